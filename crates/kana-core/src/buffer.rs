//! Bounded staging and output buffers.
//!
//! Both buffers drop input silently once full; the boolean returns exist so
//! callers and tests can observe a drop without it ever becoming an error.

use crate::kana::OutputUnit;

pub const DEFAULT_STAGING_CAPACITY: usize = 30;
pub const DEFAULT_OUTPUT_CAPACITY: usize = 255;
/// Largest capacity settings may request for either buffer.
pub const MAX_CAPACITY: usize = 4096;

/// Pending romaji not yet resolved to an output unit.
///
/// Holds printable ASCII only, so byte offsets and char offsets coincide.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StagingBuffer {
    chars: String,
    capacity: usize,
}

impl StagingBuffer {
    pub fn new(capacity: usize) -> Self {
        Self {
            chars: String::new(),
            capacity,
        }
    }

    /// Append one character. Returns false (and leaves the buffer untouched)
    /// when full or when `c` is not printable ASCII.
    pub fn push(&mut self, c: char) -> bool {
        if self.chars.len() >= self.capacity || !c.is_ascii_graphic() {
            return false;
        }
        self.chars.push(c);
        true
    }

    pub fn pop_last(&mut self) -> bool {
        self.chars.pop().is_some()
    }

    /// Remove the first `n` characters (clamped to the current length).
    pub fn consume_prefix(&mut self, n: usize) {
        let n = n.min(self.chars.len());
        self.chars.drain(..n);
    }

    pub fn clear(&mut self) {
        self.chars.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.chars.is_empty()
    }

    pub fn len(&self) -> usize {
        self.chars.len()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn first_char(&self) -> Option<char> {
        self.chars.chars().next()
    }

    pub fn second_char(&self) -> Option<char> {
        self.chars.chars().nth(1)
    }

    pub fn starts_with(&self, spelling: &str) -> bool {
        self.chars.starts_with(spelling)
    }

    pub fn as_str(&self) -> &str {
        &self.chars
    }
}

impl Default for StagingBuffer {
    fn default() -> Self {
        Self::new(DEFAULT_STAGING_CAPACITY)
    }
}

/// Converted units awaiting rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputSequence {
    units: Vec<OutputUnit>,
    capacity: usize,
}

impl OutputSequence {
    pub fn new(capacity: usize) -> Self {
        Self {
            units: Vec::new(),
            capacity,
        }
    }

    /// Append one unit. Returns false when full; the unit is dropped.
    pub fn append(&mut self, unit: OutputUnit) -> bool {
        if self.units.len() >= self.capacity {
            return false;
        }
        self.units.push(unit);
        true
    }

    pub fn pop_last(&mut self) -> bool {
        self.units.pop().is_some()
    }

    pub fn clear(&mut self) {
        self.units.clear();
    }

    pub fn len(&self) -> usize {
        self.units.len()
    }

    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn iter(&self) -> std::slice::Iter<'_, OutputUnit> {
        self.units.iter()
    }

    pub fn as_slice(&self) -> &[OutputUnit] {
        &self.units
    }

    /// Concatenated text of every unit.
    pub fn to_text(&self) -> String {
        self.units.iter().map(|u| u.to_string()).collect()
    }

    /// Renderer codes for every unit, in order.
    pub fn codes(&self) -> Vec<u16> {
        let mut out = Vec::with_capacity(self.units.len() * 2);
        for unit in &self.units {
            unit.encode_into(&mut out);
        }
        out
    }
}

impl Default for OutputSequence {
    fn default() -> Self {
        Self::new(DEFAULT_OUTPUT_CAPACITY)
    }
}

impl<'a> IntoIterator for &'a OutputSequence {
    type Item = &'a OutputUnit;
    type IntoIter = std::slice::Iter<'a, OutputUnit>;

    fn into_iter(self) -> Self::IntoIter {
        self.units.iter()
    }
}
