use super::InputSession;

/// What the renderer draws after a key: converted output, then the pending
/// romaji as literal characters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Rendered {
    pub text: String,
    /// Glyph codes in draw order. Codes below 0x100 are single-byte glyphs.
    pub codes: Vec<u16>,
    /// Index into `codes` where the pending romaji begins.
    pub pending_start: usize,
}

impl Rendered {
    pub fn pending_codes(&self) -> &[u16] {
        &self.codes[self.pending_start..]
    }
}

impl InputSession {
    pub fn render(&self) -> Rendered {
        let mut codes = self.output.codes();
        let pending_start = codes.len();
        codes.extend(self.staging.as_str().bytes().map(u16::from));

        let mut text = self.output.to_text();
        text.push_str(self.staging.as_str());

        Rendered {
            text,
            codes,
            pending_start,
        }
    }
}
