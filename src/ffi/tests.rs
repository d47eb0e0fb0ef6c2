use super::*;
use std::ffi::{CStr, CString};
use std::ptr;

fn type_keys(session: *mut KanaSession, s: &str) {
    for ch in s.chars() {
        let resp = kana_session_on_key(session, ch as i32);
        assert_eq!(resp.consumed, 1);
    }
}

fn render_text(session: *const KanaSession) -> (String, Vec<u16>, u32) {
    let render = kana_session_render(session);
    let out = unsafe {
        let text = CStr::from_ptr(render.text).to_str().unwrap().to_string();
        let codes = if render.codes.is_null() {
            Vec::new()
        } else {
            std::slice::from_raw_parts(render.codes, render.codes_len as usize).to_vec()
        };
        (text, codes, render.pending_start)
    };
    kana_render_free(render);
    out
}

#[test]
fn test_ffi_version() {
    let v = unsafe { CStr::from_ptr(kana_engine_version()) };
    assert_eq!(v.to_str().unwrap(), "0.1.0");
}

#[test]
fn test_ffi_session_roundtrip() {
    let session = kana_session_new();
    assert!(!session.is_null());
    kana_session_activate(session);

    type_keys(session, "kak");
    let (text, codes, pending_start) = render_text(session);
    assert_eq!(text, "かk");
    assert_eq!(codes, vec![0x82A9, 0x6B]);
    assert_eq!(pending_start, 1);

    let resp = kana_session_on_key(session, 0x0A);
    assert_eq!(resp.consumed, 1);
    assert_eq!(resp.emitted, 1);
    let (text, _, pending_start) = render_text(session);
    assert_eq!(text, "かk");
    assert_eq!(pending_start, 2);

    kana_session_deactivate(session);
    let (text, codes, _) = render_text(session);
    assert!(text.is_empty());
    assert!(codes.is_empty());

    kana_session_free(session);
}

#[test]
fn test_ffi_unknown_key_not_consumed() {
    let session = kana_session_new();
    let resp = kana_session_on_key(session, -1);
    assert_eq!(resp.consumed, 0);
    let resp = kana_session_on_key(session, 0x1B);
    assert_eq!(resp.consumed, 0);
    kana_session_free(session);
}

#[test]
fn test_ffi_null_session_tolerated() {
    let resp = kana_session_on_key(ptr::null_mut(), 'a' as i32);
    assert_eq!(resp.consumed, 0);
    kana_session_activate(ptr::null_mut());
    kana_session_deactivate(ptr::null_mut());
    kana_session_free(ptr::null_mut());

    let render = kana_session_render(ptr::null());
    assert!(render.text.is_null());
    assert_eq!(render.codes_len, 0);
    kana_render_free(render);
}

#[test]
fn test_ffi_settings_init_rejects_null_and_bad_toml() {
    assert_eq!(kana_settings_init(ptr::null()), -1);
    let bad = CString::new("[staging]\ncapacity = 0\n").unwrap();
    assert_eq!(kana_settings_init(bad.as_ptr()), -2);
}

#[test]
fn test_ffi_settings_init_rejects_oversized_capacity() {
    let toml = kana_core::settings::DEFAULT_SETTINGS_TOML
        .replace("capacity = 30", "capacity = 9223372036854775807");
    let huge = CString::new(toml).unwrap();
    assert_eq!(kana_settings_init(huge.as_ptr()), -2);

    // Sessions keep working on the built-in settings.
    let session = kana_session_new();
    type_keys(session, "ka");
    let (text, _, _) = render_text(session);
    assert_eq!(text, "か");
    kana_session_free(session);
}

#[test]
fn test_ffi_trace_init_null_is_noop() {
    kana_init_tracing(ptr::null());
}
