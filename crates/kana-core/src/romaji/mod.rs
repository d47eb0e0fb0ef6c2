//! Romaji-to-kana conversion engine.
//!
//! A trie-backed syllable table plus the reduction loop that turns staged
//! keystrokes into kana, handling sokuon (っ), hatsuon (ん), and yōon (きゃ).

mod convert;
mod table;
mod trie;

pub use convert::{Reduction, Transliterator};
pub use trie::{Match, Syllable, SyllableTable, TableError, TrieLookupResult, MAX_SPELLING_LEN};

/// The nasal consonant whose resolution depends on what follows it.
pub const NASAL: char = 'n';
