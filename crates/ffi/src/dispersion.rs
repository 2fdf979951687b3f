use plume_core::{build_table, sigma_y, sigma_z, Meters, StabilityClass};
use std::ffi::CStr;
use std::os::raw::c_char;
use std::slice;

use crate::error::{DefaultFfiError, PlumeErrorCode};
use crate::helpers::{class_from_c, class_to_c, clear_last_error, track_error, write_result};

/// Number of rows written by `plume_build_table`.
pub const PLUME_CLASS_COUNT: usize = 6;

/// One row of the all-classes comparison table.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PlumeDispersionRow {
    /// Class letter, `'A'`..`'F'`.
    pub class_letter: c_char,
    /// Static, null-terminated condition label. **DO NOT FREE**.
    pub label: *const c_char,
    /// Horizontal spread (m).
    pub sigma_y: f64,
    /// Vertical spread (m).
    pub sigma_z: f64,
}

fn label_c(class: StabilityClass) -> &'static CStr {
    match class {
        StabilityClass::A => c"Very Unstable",
        StabilityClass::B => c"Unstable",
        StabilityClass::C => c"Slightly Unstable",
        StabilityClass::D => c"Neutral",
        StabilityClass::E => c"Slightly Stable",
        StabilityClass::F => c"Stable",
    }
}

/// Horizontal dispersion σy (m) at downwind distance `x` (m) for a class letter.
///
/// # Returns
/// - `Ok` on success
/// - `InvalidClass` if `class_letter` is not `A`-`F` (either case)
/// - `InvalidInput` if `x` is negative or non-finite
/// - `NullPointer` if `out_sigma` is null and the inputs are valid
///
/// # Safety
/// `out_sigma` must be null or valid for a write of one `double`.
#[no_mangle]
pub unsafe extern "C" fn plume_sigma_y(
    x: f64,
    class_letter: c_char,
    out_sigma: *mut f64,
) -> PlumeErrorCode {
    let sigma = class_from_c(class_letter)
        .and_then(|class| Meters::try_new(x).map(|x| sigma_y(x, class).value()));
    write_result(sigma, out_sigma, "out_sigma")
}

/// Vertical dispersion σz (m) at downwind distance `x` (m) for a class letter.
///
/// Error codes as for `plume_sigma_y`.
///
/// # Safety
/// `out_sigma` must be null or valid for a write of one `double`.
#[no_mangle]
pub unsafe extern "C" fn plume_sigma_z(
    x: f64,
    class_letter: c_char,
    out_sigma: *mut f64,
) -> PlumeErrorCode {
    let sigma = class_from_c(class_letter)
        .and_then(|class| Meters::try_new(x).map(|x| sigma_z(x, class).value()));
    write_result(sigma, out_sigma, "out_sigma")
}

/// Fill `out_rows` with σy/σz for all six classes at distance `x`, in A→F order.
///
/// # Returns
/// - `Ok` on success
/// - `InvalidInput` if `x` is negative or non-finite
/// - `NullPointer` if `out_rows` is null and `x` is valid
///
/// # Safety
/// `out_rows` must be null or point to writable storage for
/// `PLUME_CLASS_COUNT` consecutive `PlumeDispersionRow` values.
#[no_mangle]
pub unsafe extern "C" fn plume_build_table(
    x: f64,
    out_rows: *mut PlumeDispersionRow,
) -> PlumeErrorCode {
    let x = match Meters::try_new(x) {
        Ok(x) => x,
        Err(err) => return track_error(&err),
    };
    if out_rows.is_null() {
        return track_error(&DefaultFfiError::null_pointer("out_rows"));
    }

    let rows = slice::from_raw_parts_mut(out_rows, PLUME_CLASS_COUNT);
    for (slot, row) in rows.iter_mut().zip(build_table(x)) {
        *slot = PlumeDispersionRow {
            class_letter: class_to_c(row.class),
            label: label_c(row.class).as_ptr(),
            sigma_y: row.sigma_y.value(),
            sigma_z: row.sigma_z.value(),
        };
    }
    clear_last_error();
    PlumeErrorCode::Ok
}
