//! FFI layer for the embedded host.
//!
//! Shared helpers live here (macros, pointer helpers); the session surface
//! is in [`session`].

use std::ffi::{c_char, CStr};
use std::path::Path;

use tracing::warn;

pub mod session;

#[cfg(test)]
mod tests;

pub use session::*;

// --- Generic owned-pointer helpers for FFI resource management ---

/// Allocate a value on the heap and return a raw pointer suitable for FFI.
/// The caller is responsible for eventually passing the pointer to [`owned_drop`].
pub(crate) fn owned_new<T>(value: T) -> *mut T {
    Box::into_raw(Box::new(value))
}

/// Free a heap-allocated value previously created by [`owned_new`].
/// No-op if `ptr` is null.
///
/// # Safety
/// `ptr` must have been produced by [`owned_new`] and must not have been
/// freed already.
pub(crate) unsafe fn owned_drop<T>(ptr: *mut T) {
    if !ptr.is_null() {
        drop(Box::from_raw(ptr));
    }
}

/// Convert a C string pointer to a `&str`.
/// Returns `None` if the pointer is null or contains invalid UTF-8.
pub(crate) unsafe fn cptr_to_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    CStr::from_ptr(ptr).to_str().ok()
}

// ---------------------------------------------------------------------------
// FFI boilerplate-reduction macros (crate-internal)
// ---------------------------------------------------------------------------

/// Validate FFI arguments and bind them as safe Rust values, returning
/// `$on_err` from the calling function if any check fails.
///
/// | Syntax | What it does |
/// |--------|--------------|
/// | `str: $name = $ptr` | Null-check a `*const c_char`, convert to `&str`, bind as `$name`. |
/// | `ref: $name = $ptr` | Null-check a `*const T`, bind `&T` as `$name`. |
/// | `mut: $name = $ptr` | Null-check a `*mut T`, bind `&mut T` as `$name`. |
macro_rules! ffi_guard {
    ($on_err:expr ; ) => {};

    ($on_err:expr ; str: $name:ident = $ptr:expr , $($rest:tt)*) => {
        let Some($name) = (unsafe { $crate::ffi::cptr_to_str($ptr) }) else {
            return $on_err;
        };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };

    ($on_err:expr ; ref: $name:ident = $ptr:expr , $($rest:tt)*) => {
        if $ptr.is_null() {
            return $on_err;
        }
        let $name = unsafe { &*$ptr };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };

    ($on_err:expr ; mut: $name:ident = $ptr:expr , $($rest:tt)*) => {
        if $ptr.is_null() {
            return $on_err;
        }
        let $name = unsafe { &mut *$ptr };
        $crate::ffi::ffi_guard!($on_err ; $($rest)*);
    };
}

/// Define an `extern "C"` function that frees a heap-allocated resource.
macro_rules! ffi_close {
    ($fn_name:ident, $T:ty) => {
        #[no_mangle]
        pub extern "C" fn $fn_name(ptr: *mut $T) {
            unsafe { $crate::ffi::owned_drop(ptr) };
        }
    };
}

pub(crate) use ffi_close;
pub(crate) use ffi_guard;

// --- Top-level FFI functions ---

#[no_mangle]
pub extern "C" fn kana_engine_version() -> *const c_char {
    c"0.1.0".as_ptr()
}

/// Install custom settings TOML. Must run before the first session is
/// created. Returns 0 on success, -1 on a null or non-UTF-8 argument,
/// -2 if the TOML is rejected or settings are already in use.
#[no_mangle]
pub extern "C" fn kana_settings_init(toml: *const c_char) -> i32 {
    ffi_guard!(-1;
        str: toml_str = toml,
    );
    match kana_core::settings::init_custom(toml_str.to_string()) {
        Ok(()) => 0,
        Err(e) => {
            warn!(error = %e, "custom settings rejected");
            -2
        }
    }
}

#[no_mangle]
#[allow(clippy::unused_unit)]
pub extern "C" fn kana_init_tracing(log_dir: *const c_char) {
    ffi_guard!(();
        str: dir_str = log_dir,
    );
    crate::trace_init::init_tracing(Path::new(dir_str));
}
