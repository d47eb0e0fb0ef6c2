use kana_core::romaji::Reduction;

/// Host key codes. Backspace, commit and space are sentinels; every other
/// printable ASCII code is staged as romaji.
pub mod key {
    pub const BACKSPACE: i32 = 0x08;
    pub const ENTER: i32 = 0x0A;
    pub const RETURN: i32 = 0x0D;
    pub const SPACE: i32 = 0x20;
    pub const DELETE: i32 = 0x7F;
}

/// A decoded keystroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyEvent {
    Backspace,
    Commit,
    Space,
    Char(char),
}

impl KeyEvent {
    /// Decode a host key code. Codes outside the sentinels and printable
    /// ASCII (including zero and negatives from an idle poll) yield `None`.
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            key::BACKSPACE | key::DELETE => Some(Self::Backspace),
            key::ENTER | key::RETURN => Some(Self::Commit),
            key::SPACE => Some(Self::Space),
            0x21..=0x7E => u8::try_from(code).ok().map(|b| Self::Char(char::from(b))),
            _ => None,
        }
    }

    pub fn from_char(c: char) -> Option<Self> {
        i32::try_from(u32::from(c)).ok().and_then(Self::from_code)
    }
}

/// Response from `handle_key`, returned to the host.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct KeyResponse {
    /// The key code was recognised and applied.
    pub consumed: bool,
    /// Output units appended by this key.
    pub emitted: usize,
    /// Keystrokes or units lost to a full buffer.
    pub dropped: usize,
}

impl KeyResponse {
    pub(crate) fn not_consumed() -> Self {
        Self::default()
    }

    pub(crate) fn consumed() -> Self {
        Self {
            consumed: true,
            ..Self::default()
        }
    }

    pub(crate) fn absorb(&mut self, reduction: Reduction) {
        self.emitted += reduction.emitted;
        self.dropped += reduction.dropped;
    }
}
