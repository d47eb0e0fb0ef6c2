mod simulator;

use kana_core::kana::OutputUnit;
use kana_core::settings::{CommitPolicy, Settings};

use super::types::key;
use super::InputSession;
use super::KeyResponse;

pub(super) fn retain_session() -> InputSession {
    let mut settings = Settings::default();
    settings.rules.commit = CommitPolicy::Retain;
    InputSession::with_settings(&settings)
}

pub(super) fn kana(s: &'static str) -> OutputUnit {
    OutputUnit::Converted(s)
}

// Helper: simulate typing a string one character at a time
pub(super) fn type_string(session: &mut InputSession, s: &str) -> Vec<KeyResponse> {
    s.chars().map(|ch| session.on_key(ch as i32)).collect()
}
