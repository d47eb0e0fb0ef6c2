// FFI functions perform null checks before dereferencing raw pointers.
// Clippy cannot verify this statically, so we allow it at crate level.
#![allow(clippy::not_unsafe_ptr_arg_deref)]

//! C ABI over the romaji-to-kana engine for an embedded host that owns the
//! keyboard and the display.

mod ffi;
mod trace_init;

pub use ffi::*;
pub use trace_init::init_tracing;

pub use kana_core::kana::OutputUnit;
pub use kana_core::settings::{CommitPolicy, Settings, SettingsError};
pub use kana_session::{InputSession, KeyEvent, KeyResponse, Rendered};
