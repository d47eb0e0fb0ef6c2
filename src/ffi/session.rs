use std::ffi::{c_char, CString};
use std::ptr;

use tracing::debug;

use kana_session::{InputSession, KeyResponse, Rendered};

use super::{ffi_close, ffi_guard, owned_new};

// --- InputSession FFI ---

/// Opaque session handle owned by the host.
pub struct KanaSession {
    inner: InputSession,
}

#[repr(C)]
#[derive(Debug, Default)]
pub struct KanaKeyResponse {
    pub consumed: u8,
    pub emitted: u32,
    pub dropped: u32,
}

impl From<KeyResponse> for KanaKeyResponse {
    fn from(resp: KeyResponse) -> Self {
        Self {
            consumed: u8::from(resp.consumed),
            emitted: u32::try_from(resp.emitted).unwrap_or(u32::MAX),
            dropped: u32::try_from(resp.dropped).unwrap_or(u32::MAX),
        }
    }
}

/// Frame for the renderer. `codes[..pending_start]` are converted output,
/// the rest is pending romaji. Codes below 0x100 are single-byte glyphs.
#[repr(C)]
pub struct KanaRender {
    pub text: *const c_char,
    pub codes: *const u16,
    pub codes_len: u32,
    pub pending_start: u32,
    pub(crate) _owned: *mut OwnedRender,
}

pub(crate) struct OwnedRender {
    _text: CString,
    _codes: Vec<u16>,
}

impl KanaRender {
    pub(crate) fn empty() -> Self {
        Self {
            text: ptr::null(),
            codes: ptr::null(),
            codes_len: 0,
            pending_start: 0,
            _owned: ptr::null_mut(),
        }
    }
}

pub(crate) fn pack_render(rendered: Rendered) -> KanaRender {
    // Output units never contain NUL; a failure here means an empty frame.
    let Ok(text) = CString::new(rendered.text) else {
        return KanaRender::empty();
    };
    let owned = Box::new(OwnedRender {
        _text: text,
        _codes: rendered.codes,
    });
    let text_ptr = owned._text.as_ptr();
    let codes_ptr = if owned._codes.is_empty() {
        ptr::null()
    } else {
        owned._codes.as_ptr()
    };
    let codes_len = u32::try_from(owned._codes.len()).unwrap_or(u32::MAX);
    KanaRender {
        text: text_ptr,
        codes: codes_ptr,
        codes_len,
        pending_start: u32::try_from(rendered.pending_start).unwrap_or(u32::MAX),
        _owned: Box::into_raw(owned),
    }
}

#[no_mangle]
pub extern "C" fn kana_session_new() -> *mut KanaSession {
    debug!("session created");
    owned_new(KanaSession {
        inner: InputSession::new(),
    })
}

ffi_close!(kana_session_free, KanaSession);

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn kana_session_activate(session: *mut KanaSession) {
    ffi_guard!(();
        mut: session = session,
    );
    session.inner.activate();
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn kana_session_deactivate(session: *mut KanaSession) {
    ffi_guard!(();
        mut: session = session,
    );
    session.inner.deactivate();
}

/// Feed one host key code. Unknown codes return `consumed = 0`.
#[no_mangle]
pub extern "C" fn kana_session_on_key(session: *mut KanaSession, key_code: i32) -> KanaKeyResponse {
    ffi_guard!(KanaKeyResponse::default();
        mut: session = session,
    );
    session.inner.on_key(key_code).into()
}

/// The caller must free the result with `kana_render_free`.
#[no_mangle]
pub extern "C" fn kana_session_render(session: *const KanaSession) -> KanaRender {
    ffi_guard!(KanaRender::empty();
        ref: session = session,
    );
    pack_render(session.inner.render())
}

#[no_mangle]
pub extern "C" fn kana_render_free(render: KanaRender) {
    unsafe { super::owned_drop(render._owned) };
}
