use std::collections::HashMap;
use std::sync::OnceLock;

use super::table::MAPPINGS;
use crate::kana::OutputUnit;

/// Longest spelling the table accepts.
pub const MAX_SPELLING_LEN: usize = 4;

#[derive(Debug, PartialEq)]
pub enum TrieLookupResult {
    None,
    Prefix,
    Exact(OutputUnit),
    ExactAndPrefix(OutputUnit),
}

/// One table entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Syllable {
    pub spelling: &'static str,
    pub unit: OutputUnit,
}

/// An entry whose spelling is a prefix of the staged input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Match {
    pub spelling: &'static str,
    pub len: usize,
    pub unit: OutputUnit,
}

#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum TableError {
    #[error("empty spelling")]
    EmptySpelling,
    #[error("spelling longer than {MAX_SPELLING_LEN} characters: {0}")]
    TooLong(String),
    #[error("spelling must be lowercase ASCII letters or one punctuation mark: {0:?}")]
    InvalidSpelling(String),
    #[error("empty kana for spelling: {0}")]
    EmptyKana(String),
    #[error("duplicate spelling: {0}")]
    Duplicate(String),
}

struct Node {
    children: HashMap<u8, Node>,
    entry: Option<usize>,
}

impl Node {
    fn new() -> Self {
        Self {
            children: HashMap::new(),
            entry: None,
        }
    }
}

/// Syllable table keyed by spelling.
///
/// Entries live in a byte trie, so a longer spelling is always found before
/// any of its strict prefixes no matter how the source list is ordered.
pub struct SyllableTable {
    root: Node,
    entries: Vec<Syllable>,
    /// Entry indices, longest spelling first, ties in authoring order.
    priority: Vec<usize>,
}

impl SyllableTable {
    /// Get or initialize the built-in table.
    pub fn global() -> &'static SyllableTable {
        static INSTANCE: OnceLock<SyllableTable> = OnceLock::new();
        INSTANCE.get_or_init(|| {
            SyllableTable::build(MAPPINGS).expect("built-in syllable table must be valid")
        })
    }

    pub fn build(mappings: &[(&'static str, &'static str)]) -> Result<Self, TableError> {
        let mut table = SyllableTable {
            root: Node::new(),
            entries: Vec::with_capacity(mappings.len()),
            priority: Vec::new(),
        };
        for &(spelling, kana) in mappings {
            validate_spelling(spelling)?;
            if kana.is_empty() {
                return Err(TableError::EmptyKana(spelling.to_string()));
            }
            table.insert(Syllable {
                spelling,
                unit: OutputUnit::Converted(kana),
            })?;
        }
        let mut priority: Vec<usize> = (0..table.entries.len()).collect();
        priority.sort_by_key(|&i| std::cmp::Reverse(table.entries[i].spelling.len()));
        table.priority = priority;
        Ok(table)
    }

    fn insert(&mut self, syllable: Syllable) -> Result<(), TableError> {
        let mut node = &mut self.root;
        for &b in syllable.spelling.as_bytes() {
            node = node.children.entry(b).or_insert_with(Node::new);
        }
        if node.entry.is_some() {
            return Err(TableError::Duplicate(syllable.spelling.to_string()));
        }
        node.entry = Some(self.entries.len());
        self.entries.push(syllable);
        Ok(())
    }

    /// Classify `romaji` as a complete spelling, the start of a longer one,
    /// both, or neither.
    pub fn lookup(&self, romaji: &str) -> TrieLookupResult {
        let mut node = &self.root;
        for &b in romaji.as_bytes() {
            match node.children.get(&b) {
                Some(child) => node = child,
                None => return TrieLookupResult::None,
            }
        }
        let has_children = !node.children.is_empty();
        match node.entry {
            Some(id) => {
                let unit = self.entries[id].unit;
                if has_children {
                    TrieLookupResult::ExactAndPrefix(unit)
                } else {
                    TrieLookupResult::Exact(unit)
                }
            }
            None => {
                if has_children {
                    TrieLookupResult::Prefix
                } else {
                    TrieLookupResult::None
                }
            }
        }
    }

    /// All entries whose spelling is a prefix of `staged`, longest first.
    pub fn matches(&self, staged: &str) -> impl Iterator<Item = Match> {
        let mut found: [Option<Match>; MAX_SPELLING_LEN] = [None; MAX_SPELLING_LEN];
        let mut node = &self.root;
        for (depth, &b) in staged.as_bytes().iter().take(MAX_SPELLING_LEN).enumerate() {
            let Some(child) = node.children.get(&b) else {
                break;
            };
            node = child;
            if let Some(id) = node.entry {
                let entry = &self.entries[id];
                found[depth] = Some(Match {
                    spelling: entry.spelling,
                    len: depth + 1,
                    unit: entry.unit,
                });
            }
        }
        found.into_iter().rev().flatten()
    }

    /// The longest entry whose spelling is a prefix of `staged`.
    pub fn lookup_longest_match(&self, staged: &str) -> Option<Match> {
        self.matches(staged).next()
    }

    /// Whether any spelling begins with `c`. A staged head failing this can
    /// never be resolved by further input.
    pub fn can_start(&self, c: char) -> bool {
        let mut buf = [0u8; 4];
        self.lookup(c.encode_utf8(&mut buf)) != TrieLookupResult::None
    }

    /// Entries in priority order.
    pub fn entries(&self) -> impl Iterator<Item = &Syllable> + '_ {
        self.priority.iter().map(move |&i| &self.entries[i])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

fn validate_spelling(spelling: &str) -> Result<(), TableError> {
    if spelling.is_empty() {
        return Err(TableError::EmptySpelling);
    }
    if spelling.len() > MAX_SPELLING_LEN {
        return Err(TableError::TooLong(spelling.to_string()));
    }
    let letters = spelling
        .chars()
        .all(|c| c.is_ascii_lowercase() || c == '\'');
    let punctuation = spelling.len() == 1 && spelling.chars().all(|c| c.is_ascii_punctuation());
    let starts_with_letter = spelling.chars().next().is_some_and(|c| c.is_ascii_lowercase());
    if (letters && starts_with_letter) || punctuation {
        Ok(())
    } else {
        Err(TableError::InvalidSpelling(spelling.to_string()))
    }
}
