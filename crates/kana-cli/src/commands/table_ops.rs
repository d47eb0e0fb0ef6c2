use std::process;

use serde::Serialize;

use kana_core::romaji::{SyllableTable, TrieLookupResult};

use super::{column_width, hex_codes, pad};

macro_rules! die {
    ($result:expr, $($arg:tt)*) => {
        $result.unwrap_or_else(|e| {
            eprintln!($($arg)*, e);
            process::exit(1);
        })
    };
}

#[derive(Debug, Serialize)]
pub struct TableRow {
    pub spelling: &'static str,
    pub kana: String,
    pub codes: Vec<u16>,
    /// Some longer spelling starts with this one, so the engine may wait.
    pub open: bool,
}

/// Table entries in match priority order.
pub fn table_rows(table: &SyllableTable) -> Vec<TableRow> {
    table
        .entries()
        .map(|s| TableRow {
            spelling: s.spelling,
            kana: s.unit.to_string(),
            codes: s.unit.codes(),
            open: matches!(
                table.lookup(s.spelling),
                TrieLookupResult::ExactAndPrefix(_)
            ),
        })
        .collect()
}

pub fn table_cmd(json: bool) {
    let rows = table_rows(SyllableTable::global());

    if json {
        let text = die!(serde_json::to_string_pretty(&rows), "Error encoding JSON: {}");
        println!("{text}");
        return;
    }

    let spell_w = column_width(rows.iter().map(|r| r.spelling), 8);
    let kana_w = column_width(rows.iter().map(|r| r.kana.as_str()), 4);
    for row in &rows {
        println!(
            "{} {} {} {}",
            pad(row.spelling, spell_w),
            pad(&row.kana, kana_w),
            if row.open { "+" } else { " " },
            hex_codes(&row.codes)
        );
    }
    println!("{} entries (+ = also starts a longer spelling)", rows.len());
}
