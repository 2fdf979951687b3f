use plume_core::concentration_raw;

use crate::error::{DefaultFfiError, PlumeErrorCode};
use crate::helpers::{track_error, write_result};

/// Inputs to the Gaussian plume formula.
/// Keep this layout stable for C/C++/C# consumers.
#[repr(C)]
#[derive(Debug, Clone, Copy)]
pub struct PlumeInputs {
    /// Emission rate Q (g/s, >= 0).
    pub emission_rate: f64,
    /// Wind speed u (m/s, >= 0).
    pub wind_speed: f64,
    /// Effective stack height H (m, >= 0).
    pub stack_height: f64,
    /// Downwind distance x (m, >= 0).
    pub downwind: f64,
    /// Crosswind offset y (m, signed).
    pub crosswind: f64,
    /// Horizontal spread σy (m, >= 0).
    pub sigma_y: f64,
    /// Vertical spread σz (m, >= 0).
    pub sigma_z: f64,
}

/// Ground-level concentration (g/m³).
///
/// Zero wind speed or zero spread yields `Ok` with a concentration of 0.
///
/// # Returns
/// - `Ok` on success
/// - `InvalidInput` if any non-negative field is negative or non-finite
/// - `NullPointer` if `inputs` or `out_concentration` is null
///
/// # Safety
/// `inputs` must be null or point to a valid `PlumeInputs`;
/// `out_concentration` must be null or valid for a write of one `double`.
#[no_mangle]
pub unsafe extern "C" fn plume_concentration(
    inputs: *const PlumeInputs,
    out_concentration: *mut f64,
) -> PlumeErrorCode {
    if inputs.is_null() {
        return track_error(&DefaultFfiError::null_pointer("inputs"));
    }
    let i = &*inputs;
    let result = concentration_raw(
        i.emission_rate,
        i.wind_speed,
        i.stack_height,
        i.downwind,
        i.crosswind,
        i.sigma_y,
        i.sigma_z,
    );
    write_result(result, out_concentration, "out_concentration")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::PI;
    use std::ptr;

    fn inputs() -> PlumeInputs {
        PlumeInputs {
            emission_rate: 100.0,
            wind_speed: 3.0,
            stack_height: 50.0,
            downwind: 1000.0,
            crosswind: 0.0,
            sigma_y: 76.0,
            sigma_z: 60.0,
        }
    }

    #[test]
    fn computes_closed_form() {
        let mut c = 0.0;
        let code = unsafe { plume_concentration(&inputs(), &mut c) };
        assert_eq!(code, PlumeErrorCode::Ok);
        let expected =
            100.0 / (2.0 * PI * 3.0 * 76.0 * 60.0) * (-(2500.0_f64) / (2.0 * 3600.0)).exp();
        assert!(((c - expected) / expected).abs() < 1e-12);
    }

    #[test]
    fn calm_wind_is_zero_not_error() {
        let mut c = -1.0;
        let calm = PlumeInputs {
            wind_speed: 0.0,
            ..inputs()
        };
        let code = unsafe { plume_concentration(&calm, &mut c) };
        assert_eq!(code, PlumeErrorCode::Ok);
        assert_eq!(c, 0.0);
    }

    #[test]
    fn negative_stack_height_rejected() {
        let mut c = 0.0;
        let bad = PlumeInputs {
            stack_height: -1.0,
            ..inputs()
        };
        let code = unsafe { plume_concentration(&bad, &mut c) };
        assert_eq!(code, PlumeErrorCode::InvalidInput);
    }

    #[test]
    fn null_pointers_rejected() {
        let mut c = 0.0;
        assert_eq!(
            unsafe { plume_concentration(ptr::null(), &mut c) },
            PlumeErrorCode::NullPointer
        );
        assert_eq!(
            unsafe { plume_concentration(&inputs(), ptr::null_mut()) },
            PlumeErrorCode::NullPointer
        );
    }
}
