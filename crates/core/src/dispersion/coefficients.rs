//! Pasquill-Gifford dispersion coefficients.
//!
//! Horizontal spread carries a near-field power-law correction, vertical
//! spread is linear in distance:
//!
//! ```text
//! σy(x, S) = a(S) · x · (1 + 0.0001·x)^(-1/2)
//! σz(x, S) = b(S) · x
//! ```
//!
//! Both vanish at the source (x = 0) and are non-decreasing in x.
//!
//! # References
//!
//! - Briggs, G.A. (1973). "Diffusion estimation for small emissions."
//!   ATDL Contribution File No. 79, NOAA.
//! - Gifford, F.A. (1961). "Use of routine meteorological observations for
//!   estimating atmospheric dispersion." Nuclear Safety, 2(4), 47-51.

use serde::{Deserialize, Serialize};

use crate::core_types::{Meters, StabilityClass};
use crate::error::Result;

/// σy slope a(S), indexed A..F.
const SIGMA_Y_COEFFICIENTS: [f64; 6] = [0.22, 0.16, 0.11, 0.08, 0.06, 0.04];

/// σz slope b(S), indexed A..F.
const SIGMA_Z_COEFFICIENTS: [f64; 6] = [0.20, 0.12, 0.08, 0.06, 0.03, 0.016];

/// Distance scale of the σy near-field correction (1/m).
const NEAR_FIELD_SCALE: f64 = 0.0001;

/// Horizontal spread σy at downwind distance `x`.
#[inline]
pub fn sigma_y(x: Meters, class: StabilityClass) -> Meters {
    let x = x.value();
    let a = SIGMA_Y_COEFFICIENTS[class.index()];
    Meters::new_unchecked(a * x * (1.0 + NEAR_FIELD_SCALE * x).powf(-0.5))
}

/// Vertical spread σz at downwind distance `x`.
#[inline]
pub fn sigma_z(x: Meters, class: StabilityClass) -> Meters {
    let b = SIGMA_Z_COEFFICIENTS[class.index()];
    Meters::new_unchecked(b * x.value())
}

/// Look up `(a, b)` for a class token arriving from outside the crate.
///
/// # Errors
/// Returns [`crate::PlumeError::InvalidClass`] unless `token` is one of the
/// six class letters. There is no fallback class.
pub fn coefficients_for(token: &str) -> Result<(f64, f64)> {
    let class: StabilityClass = token.parse()?;
    Ok((
        SIGMA_Y_COEFFICIENTS[class.index()],
        SIGMA_Z_COEFFICIENTS[class.index()],
    ))
}

/// Plume spread at one downwind distance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DispersionParameters {
    pub sigma_y: Meters,
    pub sigma_z: Meters,
}

impl DispersionParameters {
    /// Evaluate both spreads at `x` for `class`.
    pub fn at(x: Meters, class: StabilityClass) -> Self {
        Self {
            sigma_y: sigma_y(x, class),
            sigma_z: sigma_z(x, class),
        }
    }
}
