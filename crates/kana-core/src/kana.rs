//! Output units and their Shift_JIS renderer codes.

use std::fmt;

use serde::Serialize;

/// Ideographic punctuation reachable from the syllable table.
const PUNCTUATION_SJIS: &[(char, u16)] = &[
    ('\u{3000}', 0x8140),
    ('、', 0x8141),
    ('。', 0x8142),
    ('・', 0x8145),
    ('？', 0x8148),
    ('！', 0x8149),
    ('ー', 0x815B),
    ('〜', 0x8160),
    ('「', 0x8175),
    ('」', 0x8176),
];

/// Shift_JIS double-byte code for a kana or ideographic punctuation char.
///
/// Hiragana ぁ..ん is contiguous from 0x829F. Katakana ァ..ミ starts at 0x8340
/// and ム..ヶ at 0x8380, skipping the 0x837F hole.
pub fn to_sjis(c: char) -> Option<u16> {
    let cp = c as u32;
    match cp {
        0x3041..=0x3093 => Some(0x829F + (cp - 0x3041) as u16),
        0x30A1..=0x30DF => Some(0x8340 + (cp - 0x30A1) as u16),
        0x30E0..=0x30F6 => Some(0x8380 + (cp - 0x30E0) as u16),
        _ => PUNCTUATION_SJIS
            .iter()
            .find(|(p, _)| *p == c)
            .map(|&(_, code)| code),
    }
}

/// One entry of the output sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum OutputUnit {
    /// Kana for one resolved syllable. Yōon like きゃ are a single unit.
    Converted(&'static str),
    /// Raw ASCII character forced through without conversion.
    Literal(char),
}

impl OutputUnit {
    /// Glottal stop emitted for a doubled consonant.
    pub const SOKUON: OutputUnit = OutputUnit::Converted("っ");
    /// Standalone nasal consonant.
    pub const HATSUON: OutputUnit = OutputUnit::Converted("ん");
    /// Word boundary (ideographic space).
    pub const SEPARATOR: OutputUnit = OutputUnit::Converted("\u{3000}");

    /// Append renderer codes: double-byte Shift_JIS for converted text,
    /// the single-byte ASCII value for literals.
    ///
    /// Characters without a Shift_JIS form are skipped; every unit the
    /// syllable table produces has one.
    pub fn encode_into(&self, out: &mut Vec<u16>) {
        match self {
            OutputUnit::Converted(kana) => out.extend(kana.chars().filter_map(to_sjis)),
            OutputUnit::Literal(c) => out.push(*c as u16),
        }
    }

    pub fn codes(&self) -> Vec<u16> {
        let mut out = Vec::with_capacity(2);
        self.encode_into(&mut out);
        out
    }
}

impl fmt::Display for OutputUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OutputUnit::Converted(kana) => f.write_str(kana),
            OutputUnit::Literal(c) => write!(f, "{c}"),
        }
    }
}
