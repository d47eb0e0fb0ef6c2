use super::type_string;
use crate::types::key;
use crate::{InputSession, Rendered};

/// Headless renderer for integration tests.
///
/// Drives an `InputSession` key by key and records the frame the host
/// would draw after each one.
pub(super) struct HeadlessTerminal {
    pub session: InputSession,
    frames: Vec<Rendered>,
}

impl HeadlessTerminal {
    pub fn new() -> Self {
        Self {
            session: InputSession::default(),
            frames: Vec::new(),
        }
    }

    pub fn press(&mut self, code: i32) {
        if self.session.on_key(code).consumed {
            self.frames.push(self.session.render());
        }
    }

    pub fn type_str(&mut self, romaji: &str) {
        for ch in romaji.chars() {
            self.press(ch as i32);
        }
    }

    pub fn frame_texts(&self) -> Vec<&str> {
        self.frames.iter().map(|f| f.text.as_str()).collect()
    }

    pub fn last_frame(&self) -> Option<&Rendered> {
        self.frames.last()
    }
}

#[test]
fn test_frames_show_pending_romaji() {
    let mut term = HeadlessTerminal::new();
    term.type_str("kya");
    assert_eq!(term.frame_texts(), vec!["k", "ky", "きゃ"]);
}

#[test]
fn test_frames_for_sentence() {
    let mut term = HeadlessTerminal::new();
    term.type_str("watashi");
    term.press(key::SPACE);
    term.type_str("desu");
    term.press(key::ENTER);

    let last = term.last_frame().unwrap();
    assert_eq!(last.text, "わたし\u{3000}です");
    assert_eq!(last.pending_start, last.codes.len());
    assert!(term.session.pending_staged().is_empty());
}

#[test]
fn test_frames_track_backspace() {
    let mut term = HeadlessTerminal::new();
    term.type_str("kon");
    term.press(key::BACKSPACE);
    term.press(key::BACKSPACE);
    assert_eq!(term.frame_texts(), vec!["k", "こ", "こn", "こ", ""]);
}

#[test]
fn test_ignored_keys_draw_nothing() {
    let mut term = HeadlessTerminal::new();
    term.press(0);
    term.press(0x1B);
    assert!(term.last_frame().is_none());
}

#[test]
fn test_sokuon_frame_codes() {
    let mut term = HeadlessTerminal::new();
    term.type_str("kitte");
    let last = term.last_frame().unwrap();
    // き っ て
    assert_eq!(last.codes, vec![0x82AB, 0x82C1, 0x82C4]);
}

#[test]
fn test_replay_matches_live_session() {
    let mut term = HeadlessTerminal::new();
    term.type_str("nihongo");

    let mut replay = InputSession::default();
    type_string(&mut replay, "nihongo");
    assert_eq!(term.session.output_units(), replay.output_units());
    assert_eq!(replay.output_text(), "にほんご");
}
