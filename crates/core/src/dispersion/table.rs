//! Comparison tables and σ-vs-distance curves across all stability classes.

use serde::Serialize;

use super::coefficients::{sigma_y, sigma_z};
use crate::core_types::{Meters, StabilityClass};
use crate::error::{PlumeError, Result};

/// One row of the all-classes comparison table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DispersionRow {
    pub class: StabilityClass,
    pub label: &'static str,
    pub sigma_y: Meters,
    pub sigma_z: Meters,
}

/// Spread for every class at distance `x`, in A→F order.
pub fn build_table(x: Meters) -> [DispersionRow; 6] {
    StabilityClass::ALL.map(|class| DispersionRow {
        class,
        label: class.label(),
        sigma_y: sigma_y(x, class),
        sigma_z: sigma_z(x, class),
    })
}

/// A single sample on a dispersion curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CurvePoint {
    pub x: Meters,
    pub sigma_y: Meters,
    pub sigma_z: Meters,
}

/// σy and σz over a distance sequence for one class.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DispersionCurve {
    pub class: StabilityClass,
    pub points: Vec<CurvePoint>,
}

/// One curve per class (A→F) sampled at each of `distances`, in the given order.
pub fn dispersion_curves(distances: &[Meters]) -> Vec<DispersionCurve> {
    StabilityClass::ALL
        .iter()
        .map(|&class| DispersionCurve {
            class,
            points: distances
                .iter()
                .map(|&x| CurvePoint {
                    x,
                    sigma_y: sigma_y(x, class),
                    sigma_z: sigma_z(x, class),
                })
                .collect(),
        })
        .collect()
}

/// `samples` distances spaced evenly in log10 from `10^start_exp` to
/// `10^end_exp` inclusive.
///
/// `log_spaced_distances(2.0, 5.0, 200)` gives the usual charting range of
/// 100 m to 100 km.
///
/// # Errors
/// Returns [`PlumeError::InvalidInput`] if either exponent is non-finite, if
/// `start_exp > end_exp`, or if a sample overflows `f64`.
pub fn log_spaced_distances(start_exp: f64, end_exp: f64, samples: usize) -> Result<Vec<Meters>> {
    if !start_exp.is_finite() || !end_exp.is_finite() {
        return Err(PlumeError::invalid_input(
            "distance exponent",
            format!("must be finite, got {start_exp}..{end_exp}"),
        ));
    }
    if start_exp > end_exp {
        return Err(PlumeError::invalid_input(
            "distance exponent",
            format!("start {start_exp} exceeds end {end_exp}"),
        ));
    }

    match samples {
        0 => Ok(Vec::new()),
        1 => Ok(vec![Meters::try_named("sample distance", 10f64.powf(start_exp))?]),
        n => {
            let step = (end_exp - start_exp) / (n - 1) as f64;
            (0..n)
                .map(|i| {
                    // Pin the last exponent so the range ends exactly at 10^end_exp
                    let exp = if i == n - 1 {
                        end_exp
                    } else {
                        start_exp + step * i as f64
                    };
                    Meters::try_named("sample distance", 10f64.powf(exp))
                })
                .collect()
        }
    }
}
