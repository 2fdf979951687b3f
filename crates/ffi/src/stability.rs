use plume_core::{
    CloudCover, CloudCoverUnit, MeteorologicalInput, MetersPerSecond, Result, StabilityClassifier,
};
use std::os::raw::c_char;

use crate::error::{DefaultFfiError, PlumeErrorCode};
use crate::helpers::{class_to_c, track_error, write_result};

/// Cloud cover given in percent (0-100), cutoff 40.
pub const PLUME_CLOUD_PERCENT: u8 = 0;
/// Cloud cover given in tenths of sky (0-10), cutoff 4.
pub const PLUME_CLOUD_TENTHS: u8 = 1;
/// Cloud cover given as a fraction (0-1), cutoff 0.4.
pub const PLUME_CLOUD_FRACTION: u8 = 2;

fn unit_from_c(unit: u8) -> Option<CloudCoverUnit> {
    match unit {
        PLUME_CLOUD_PERCENT => Some(CloudCoverUnit::Percent),
        PLUME_CLOUD_TENTHS => Some(CloudCoverUnit::Tenths),
        PLUME_CLOUD_FRACTION => Some(CloudCoverUnit::Fraction),
        _ => None,
    }
}

/// Classify atmospheric stability from wind speed and cloud cover.
///
/// # Parameters
/// - `wind_speed`: Wind speed in m/s (>= 0)
/// - `cloud_cover`: Cloud cover in the scale selected by `unit`
/// - `unit`: `PLUME_CLOUD_PERCENT`, `PLUME_CLOUD_TENTHS` or `PLUME_CLOUD_FRACTION`
/// - `out_class`: Receives the class letter (`'A'`..`'E'`)
///
/// # Returns
/// - `Ok` on success
/// - `InvalidParameter` if `unit` is not one of the constants above
/// - `InvalidInput` if wind speed is negative or cloud cover is outside the unit's range
/// - `NullPointer` if `out_class` is null
///
/// # Safety
/// `out_class` must be null or valid for a write of one `c_char`.
#[no_mangle]
pub unsafe extern "C" fn plume_classify(
    wind_speed: f64,
    cloud_cover: f64,
    unit: u8,
    out_class: *mut c_char,
) -> PlumeErrorCode {
    let Some(unit) = unit_from_c(unit) else {
        return track_error(&DefaultFfiError::invalid_parameter(format!(
            "cloud cover unit must be 0 (percent), 1 (tenths) or 2 (fraction), got {unit}"
        )));
    };

    write_result(classify_checked(wind_speed, cloud_cover, unit), out_class, "out_class")
}

fn classify_checked(wind_speed: f64, cloud_cover: f64, unit: CloudCoverUnit) -> Result<c_char> {
    let met = MeteorologicalInput::new(
        MetersPerSecond::try_new(wind_speed)?,
        CloudCover::try_new(cloud_cover, unit)?,
    );
    StabilityClassifier::preset(unit)
        .classify_observation(&met)
        .map(class_to_c)
}
