use std::path::Path;
use std::process;

use serde::Serialize;

use kana_core::kana::OutputUnit;
use kana_core::settings::{load_settings_file, settings};
use kana_session::{key, InputSession, KeyEvent};

use super::{column_width, hex_codes, pad};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unsupported character {ch:?} at position {pos}")]
    Unsupported { ch: char, pos: usize },
}

/// Map command-line text to host key codes. Space and newline act as the
/// space and commit keys; backspace can be written as `\b`.
pub fn key_codes(romaji: &str) -> Result<Vec<i32>, InputError> {
    romaji
        .chars()
        .enumerate()
        .map(|(pos, ch)| match ch {
            ' ' => Ok(key::SPACE),
            '\n' => Ok(key::ENTER),
            '\u{8}' => Ok(key::BACKSPACE),
            _ => KeyEvent::from_char(ch)
                .map(|_| ch as i32)
                .ok_or(InputError::Unsupported { ch, pos }),
        })
        .collect()
}

fn key_label(code: i32) -> String {
    match code {
        key::SPACE => "SPC".to_string(),
        key::ENTER | key::RETURN => "RET".to_string(),
        key::BACKSPACE | key::DELETE => "BS".to_string(),
        _ => u8::try_from(code)
            .map(|b| char::from(b).to_string())
            .unwrap_or_else(|_| format!("{code:#x}")),
    }
}

pub fn load_session(settings_file: Option<&str>) -> InputSession {
    match settings_file {
        Some(path) => {
            let s = die!(
                load_settings_file(Path::new(path)),
                "Error loading settings: {}"
            );
            InputSession::with_settings(&s)
        }
        None => InputSession::with_settings(settings()),
    }
}

#[derive(Debug, Serialize)]
pub struct ConvertReport {
    pub input: String,
    pub output: String,
    pub pending: String,
    pub units: Vec<OutputUnit>,
    pub codes: Vec<u16>,
    pub dropped: usize,
}

pub fn run_convert(session: &mut InputSession, romaji: &str, codes: &[i32], commit: bool) -> ConvertReport {
    let mut dropped = 0;
    for &code in codes {
        dropped += session.on_key(code).dropped;
    }
    if commit {
        dropped += session.on_key(key::ENTER).dropped;
    }
    let rendered = session.render();
    ConvertReport {
        input: romaji.to_string(),
        output: session.output_text(),
        pending: session.pending_staged().to_string(),
        units: session.output_units().to_vec(),
        codes: rendered.codes,
        dropped,
    }
}

pub fn convert_cmd(romaji: &str, commit: bool, show_codes: bool, json: bool, settings_file: Option<&str>) {
    let codes = die!(key_codes(romaji), "Error: {}");
    let mut session = load_session(settings_file);
    let report = run_convert(&mut session, romaji, &codes, commit);

    if json {
        let text = die!(serde_json::to_string_pretty(&report), "Error encoding JSON: {}");
        println!("{text}");
        return;
    }

    if report.pending.is_empty() {
        println!("{}", report.output);
    } else {
        println!("{} [{}]", report.output, report.pending);
    }
    if show_codes {
        println!("{}", hex_codes(&report.codes));
    }
    if report.dropped > 0 {
        eprintln!("warning: {} key(s) or unit(s) dropped at capacity", report.dropped);
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TraceRow {
    pub key: String,
    pub output: String,
    pub pending: String,
    pub emitted: usize,
    pub dropped: usize,
}

pub fn trace_rows(session: &mut InputSession, codes: &[i32]) -> Vec<TraceRow> {
    codes
        .iter()
        .map(|&code| {
            let resp = session.on_key(code);
            TraceRow {
                key: key_label(code),
                output: session.output_text(),
                pending: session.pending_staged().to_string(),
                emitted: resp.emitted,
                dropped: resp.dropped,
            }
        })
        .collect()
}

pub fn trace_cmd(romaji: &str, settings_file: Option<&str>) {
    let codes = die!(key_codes(romaji), "Error: {}");
    let mut session = load_session(settings_file);
    let rows = trace_rows(&mut session, &codes);

    let key_w = column_width(rows.iter().map(|r| r.key.as_str()), 3);
    let out_w = column_width(rows.iter().map(|r| r.output.as_str()), 6);
    let pend_w = column_width(rows.iter().map(|r| r.pending.as_str()), 7);

    println!(
        "{} {} {} emitted dropped",
        pad("key", key_w),
        pad("output", out_w),
        pad("pending", pend_w)
    );
    for row in &rows {
        println!(
            "{} {} {} {:>7} {:>7}",
            pad(&row.key, key_w),
            pad(&row.output, out_w),
            pad(&row.pending, pend_w),
            row.emitted,
            row.dropped
        );
    }
}
