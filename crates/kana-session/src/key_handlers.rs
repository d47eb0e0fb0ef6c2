use tracing::{debug, debug_span};

use kana_core::kana::OutputUnit;
use kana_core::romaji::{Reduction, Transliterator};
use kana_core::settings::CommitPolicy;

use super::types::{KeyEvent, KeyResponse};
use super::InputSession;

impl InputSession {
    /// Process a raw host key code. Unrecognised codes are ignored.
    pub fn on_key(&mut self, code: i32) -> KeyResponse {
        match KeyEvent::from_code(code) {
            Some(event) => self.handle_key(event),
            None => {
                debug!(code, "ignored key code");
                KeyResponse::not_consumed()
            }
        }
    }

    /// Process a key event. The reduction loop has reached a fixed point
    /// when this returns.
    pub fn handle_key(&mut self, event: KeyEvent) -> KeyResponse {
        let _span = debug_span!("handle_key", ?event).entered();
        debug!(
            staged = self.staging.as_str(),
            output_len = self.output.len(),
            "before"
        );

        let mut resp = KeyResponse::consumed();
        match event {
            KeyEvent::Backspace => self.handle_backspace(),
            KeyEvent::Commit => resp.absorb(self.handle_commit()),
            KeyEvent::Space => resp.absorb(self.handle_space()),
            KeyEvent::Char(c) => {
                if !self.stage(c) {
                    resp.dropped += 1;
                }
            }
        }

        let t = Transliterator::new(self.table, &self.rules);
        resp.absorb(t.reduce(&mut self.staging, &mut self.output));

        debug!(
            staged = self.staging.as_str(),
            output_len = self.output.len(),
            emitted = resp.emitted,
            dropped = resp.dropped,
            "after"
        );
        resp
    }

    /// Transition by value: `(state, key) -> state'`.
    pub fn step(mut self, event: KeyEvent) -> Self {
        self.handle_key(event);
        self
    }

    /// Staged characters go first; converted output only once nothing is pending.
    fn handle_backspace(&mut self) {
        if !self.staging.pop_last() {
            self.output.pop_last();
        }
    }

    fn handle_commit(&mut self) -> Reduction {
        let t = Transliterator::new(self.table, &self.rules);
        match self.rules.commit {
            CommitPolicy::PassThrough => t.flush(&mut self.staging, &mut self.output),
            CommitPolicy::Retain => t.resolve_trailing_nasal(&mut self.staging, &mut self.output),
        }
    }

    /// Word boundary: drain staging, then append the separator.
    fn handle_space(&mut self) -> Reduction {
        let t = Transliterator::new(self.table, &self.rules);
        let mut reduction = t.flush(&mut self.staging, &mut self.output);
        if self.output.append(OutputUnit::SEPARATOR) {
            reduction.emitted += 1;
        } else {
            reduction.dropped += 1;
        }
        reduction
    }

    fn stage(&mut self, c: char) -> bool {
        let c = if self.rules.fold_uppercase {
            c.to_ascii_lowercase()
        } else {
            c
        };
        let pushed = self.staging.push(c);
        if !pushed {
            debug!(
                %c,
                capacity = self.staging.capacity(),
                "staging full, key dropped"
            );
        }
        pushed
    }
}
