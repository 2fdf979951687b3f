use plume_core::PlumeError;
use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Common interface for errors crossing the FFI boundary.
///
/// - `code()` - Returns the error code to be passed across FFI boundary
/// - `msg()` - Returns the error message for diagnostic purposes
pub(crate) trait FfiError {
    /// Returns the error code to be returned across the FFI boundary.
    fn code(&self) -> PlumeErrorCode;

    /// Returns the human-readable error message.
    fn msg(&self) -> String;
}

/// Errors that only exist at the FFI layer (bad pointers, bad enum tags).
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DefaultFfiError {
    code: PlumeErrorCode,
    msg: String,
}

impl DefaultFfiError {
    /// Create error for null pointer passed where non-null required.
    ///
    /// # Arguments
    /// * `param_name` - The name of the parameter that was null (e.g., `"out_class"`)
    pub fn null_pointer(param_name: &str) -> Self {
        Self {
            code: PlumeErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    /// Create error for an out-of-range enum tag or flag.
    ///
    /// # Arguments
    /// * `message` - Description of the error
    pub fn invalid_parameter(message: String) -> Self {
        Self {
            code: PlumeErrorCode::InvalidParameter,
            msg: message,
        }
    }
}

impl FfiError for DefaultFfiError {
    fn code(&self) -> PlumeErrorCode {
        self.code
    }

    fn msg(&self) -> String {
        self.msg.clone()
    }
}

impl FfiError for PlumeError {
    fn code(&self) -> PlumeErrorCode {
        match self {
            PlumeError::InvalidClass(_) => PlumeErrorCode::InvalidClass,
            PlumeError::InvalidInput { .. } => PlumeErrorCode::InvalidInput,
            PlumeError::WeatherResponse(_) | PlumeError::Json(_) => {
                PlumeErrorCode::InvalidParameter
            }
        }
    }

    fn msg(&self) -> String {
        self.to_string()
    }
}

/// FFI error codes returned by plume functions.
/// Follows standard C convention: 0 = success, non-zero = error.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlumeErrorCode {
    /// Operation completed successfully.
    Ok = 0,

    /// Invalid pointer: null pointer passed where non-null required.
    NullPointer = 1,

    /// Stability class letter is not one of A-F.
    InvalidClass = 2,

    /// Physical input is negative, non-finite or out of range.
    InvalidInput = 3,

    /// Invalid enum tag or other non-physical parameter.
    InvalidParameter = 4,
}

thread_local! {
    /// Thread-local storage for the most recent FFI error (C string, error code).
    /// The CString is stored so the pointer handed out stays valid until the next call.
    static LAST_ERROR: RefCell<(Option<CString>, PlumeErrorCode)> =
        const { RefCell::new((None, PlumeErrorCode::Ok)) };
}

/// Internal helper to read `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error<F, R>(f: F) -> R
where
    F: FnOnce(&(Option<CString>, PlumeErrorCode)) -> R,
{
    LAST_ERROR.with_borrow(f)
}

/// Internal helper to mutate `LAST_ERROR` thread-local storage (cstring, code).
pub(crate) fn with_last_error_mut<F, R>(f: F) -> R
where
    F: FnOnce(&mut (Option<CString>, PlumeErrorCode)) -> R,
{
    LAST_ERROR.with_borrow_mut(f)
}

/// Retrieve the most recent FFI error message as a null-terminated C string.
///
/// Returns:
/// - A borrowed pointer to the error message if an error occurred.
/// - `null` if the last call on this thread succeeded.
///
/// # Lifetime
/// The returned pointer is valid until the next plume FFI call on this thread.
///
/// **DO NOT FREE THIS POINTER** - it is managed internally.
///
/// Example:
/// ```cpp
/// double sy = 0.0;
/// if (plume_sigma_y(1000.0, 'G', &sy) != PlumeErrorCode::Ok) {
///     printf("sigma_y failed: %s\n", plume_get_last_error());
/// }
/// ```
#[no_mangle]
pub extern "C" fn plume_get_last_error() -> *const c_char {
    with_last_error(|(cstring, _code)| cstring.as_ref().map_or(ptr::null(), |cs| cs.as_ptr()))
}

/// Retrieve the most recent FFI error code (`Ok` if the last call succeeded).
#[no_mangle]
pub extern "C" fn plume_get_last_error_code() -> PlumeErrorCode {
    with_last_error(|(_cstring, code)| *code)
}
