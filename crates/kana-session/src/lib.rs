//! Stateful input session: the edit controller around the romaji engine.
//!
//! `InputSession` owns the staging buffer and the output sequence and
//! processes one key at a time, running the reduction loop to a fixed point
//! before returning. The host renders `render()` after each key.

mod key_handlers;
mod render;
pub(crate) mod types;

#[cfg(test)]
mod tests;

use kana_core::buffer::{OutputSequence, StagingBuffer};
use kana_core::kana::OutputUnit;
use kana_core::romaji::SyllableTable;
use kana_core::settings::{self, Rules, Settings};
use tracing::debug;

pub use render::Rendered;
pub use types::{key, KeyEvent, KeyResponse};

/// One input session. Its only state is the two buffers.
#[derive(Clone)]
pub struct InputSession {
    table: &'static SyllableTable,
    rules: Rules,
    staging: StagingBuffer,
    output: OutputSequence,
}

impl InputSession {
    /// Session configured from the global settings.
    pub fn new() -> Self {
        Self::with_settings(settings::settings())
    }

    pub fn with_settings(settings: &Settings) -> Self {
        Self {
            table: SyllableTable::global(),
            rules: settings.rules.clone(),
            staging: StagingBuffer::new(settings.staging.capacity),
            output: OutputSequence::new(settings.output.capacity),
        }
    }

    pub fn activate(&mut self) {
        debug!("activate");
        self.reset();
    }

    pub fn deactivate(&mut self) {
        debug!("deactivate");
        self.reset();
    }

    /// Clear both buffers.
    pub fn reset(&mut self) {
        self.staging.clear();
        self.output.clear();
    }

    pub fn output_units(&self) -> &[OutputUnit] {
        self.output.as_slice()
    }

    pub fn pending_staged(&self) -> &str {
        self.staging.as_str()
    }

    pub fn output_text(&self) -> String {
        self.output.to_text()
    }

    /// Nothing converted and nothing pending.
    pub fn is_idle(&self) -> bool {
        self.staging.is_empty() && self.output.is_empty()
    }
}

impl Default for InputSession {
    fn default() -> Self {
        Self::new()
    }
}
