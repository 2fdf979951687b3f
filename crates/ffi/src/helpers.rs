use crate::error::{with_last_error_mut, DefaultFfiError, FfiError, PlumeErrorCode};
use plume_core::{Result, StabilityClass};
use std::ffi::CString;
use std::os::raw::c_char;

/// Set the thread-local error message and code.
/// Accepts any type implementing `FfiError` trait.
pub(crate) fn set_last_error(error: &impl FfiError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Track an error by setting it in thread-local storage and returning its code.
#[inline]
pub(crate) fn track_error(error: &impl FfiError) -> PlumeErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error message and code.
/// Called on successful operations.
pub(crate) fn clear_last_error() {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = PlumeErrorCode::Ok;
    });
}

/// Write a successful result through `out`, or record the error.
///
/// An input error is reported before a null `out`, so a caller sees the
/// domain error even when both are wrong.
///
/// # Safety
/// `out` must be null or valid for a write of `T`.
pub(crate) unsafe fn write_result<T>(
    result: Result<T>,
    out: *mut T,
    out_name: &str,
) -> PlumeErrorCode {
    let value = match result {
        Ok(value) => value,
        Err(err) => return track_error(&err),
    };
    if out.is_null() {
        return track_error(&DefaultFfiError::null_pointer(out_name));
    }
    *out = value;
    clear_last_error();
    PlumeErrorCode::Ok
}

/// Decode an ASCII class letter from C.
pub(crate) fn class_from_c(letter: c_char) -> Result<StabilityClass> {
    StabilityClass::try_from(char::from(letter as u8))
}

/// Encode a class as an ASCII letter for C.
pub(crate) fn class_to_c(class: StabilityClass) -> c_char {
    class.letter() as c_char
}
