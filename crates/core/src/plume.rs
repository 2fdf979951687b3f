//! Steady-state Gaussian plume concentration at ground level.
//!
//! ```text
//!            Q              ⎛   y²   ⎞     ⎛   H²   ⎞
//! C = ───────────────── exp⎜ ─ ───── ⎟ exp⎜ ─ ───── ⎟
//!      2π · u · σy · σz     ⎝  2σy²  ⎠     ⎝  2σz²  ⎠
//! ```
//!
//! When u, σy or σz is zero the closed form is singular. That state (calm air,
//! or a receptor at the source) is recovered to a concentration of exactly
//! zero rather than reported as an error.
//!
//! # References
//!
//! - Turner, D.B. (1970). "Workbook of Atmospheric Dispersion Estimates."
//!   U.S. EPA AP-26.

use serde::{Deserialize, Serialize};
use std::f64::consts::PI;
use tracing::{debug, trace};

use crate::core_types::{
    EmissionSource, GramsPerCubicMeter, GramsPerSecond, MeteorologicalInput, Meters,
    MetersPerSecond, ReceptorPoint, StabilityClass,
};
use crate::dispersion::DispersionParameters;
use crate::error::{PlumeError, Result};
use crate::stability::{StabilityClassifier, StabilitySource};

/// Ground-level concentration from already-validated quantities.
///
/// `downwind` only enters through `sigma_y`/`sigma_z`; it is taken so the call
/// mirrors the model's full parameter list.
///
/// # Errors
/// Returns [`PlumeError::InvalidInput`] if `crosswind` is NaN or infinite.
pub fn concentration(
    emission_rate: GramsPerSecond,
    wind_speed: MetersPerSecond,
    stack_height: Meters,
    downwind: Meters,
    crosswind: f64,
    sigma_y: Meters,
    sigma_z: Meters,
) -> Result<GramsPerCubicMeter> {
    if !crosswind.is_finite() {
        return Err(PlumeError::invalid_input(
            "crosswind distance",
            format!("must be finite, got {crosswind}"),
        ));
    }

    let (q, u, h) = (emission_rate.value(), wind_speed.value(), stack_height.value());
    let (sy, sz) = (sigma_y.value(), sigma_z.value());

    // Also catches a product that underflows to zero
    let denominator = 2.0 * PI * u * sy * sz;
    if denominator == 0.0 {
        trace!(
            x = downwind.value(),
            u,
            sigma_y = sy,
            sigma_z = sz,
            "undefined dispersion, concentration is zero"
        );
        return Ok(GramsPerCubicMeter::ZERO);
    }

    // Ratios first: squaring a tiny σ alone underflows to zero
    let ry = crosswind / sy;
    let rz = h / sz;
    let decay = (-0.5 * ry * ry).exp() * (-0.5 * rz * rz).exp();
    if decay == 0.0 {
        trace!(x = downwind.value(), y = crosswind, "receptor outside the plume");
        return Ok(GramsPerCubicMeter::ZERO);
    }
    let value = q / denominator * decay;

    trace!(x = downwind.value(), y = crosswind, value, "plume concentration");
    Ok(GramsPerCubicMeter::new_unchecked(value))
}

/// Boundary entry point taking raw numbers, e.g. from a form or a C caller.
///
/// Every argument except `crosswind` must be finite and non-negative.
///
/// # Errors
/// Returns [`PlumeError::InvalidInput`] naming the first offending argument.
pub fn concentration_raw(
    emission_rate: f64,
    wind_speed: f64,
    stack_height: f64,
    downwind: f64,
    crosswind: f64,
    sigma_y: f64,
    sigma_z: f64,
) -> Result<f64> {
    let c = concentration(
        GramsPerSecond::try_new(emission_rate)?,
        MetersPerSecond::try_new(wind_speed)?,
        Meters::try_named("stack height", stack_height)?,
        Meters::try_named("downwind distance", downwind)?,
        crosswind,
        Meters::try_named("sigma y", sigma_y)?,
        Meters::try_named("sigma z", sigma_z)?,
    )?;
    Ok(c.value())
}

/// Result of one full evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlumeEstimate {
    pub class: StabilityClass,
    pub dispersion: DispersionParameters,
    pub concentration: GramsPerCubicMeter,
}

/// Classifier plus plume formula: the whole pipeline behind one call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlumeModel {
    pub classifier: StabilityClassifier,
}

impl PlumeModel {
    pub fn new(classifier: StabilityClassifier) -> Self {
        Self { classifier }
    }

    /// Resolve the stability class, evaluate σy/σz at the receptor's downwind
    /// distance, and compute the ground-level concentration.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if a computed class is requested
    /// with cloud cover in a unit other than the classifier's.
    pub fn evaluate(
        &self,
        source: &EmissionSource,
        receptor: &ReceptorPoint,
        met: &MeteorologicalInput,
        stability: StabilitySource,
    ) -> Result<PlumeEstimate> {
        let class = stability.resolve(&self.classifier, met)?;
        let dispersion = DispersionParameters::at(receptor.downwind(), class);
        let concentration = concentration(
            source.emission_rate,
            met.wind_speed,
            source.stack_height,
            receptor.downwind(),
            receptor.crosswind(),
            dispersion.sigma_y,
            dispersion.sigma_z,
        )?;

        debug!(
            class = %class,
            manual = matches!(stability, StabilitySource::Manual(_)),
            sigma_y = dispersion.sigma_y.value(),
            sigma_z = dispersion.sigma_z.value(),
            concentration = concentration.value(),
            "evaluated plume"
        );

        Ok(PlumeEstimate {
            class,
            dispersion,
            concentration,
        })
    }
}
