//! Semantic unit types for type-safe physical quantity handling
//!
//! Newtype wrappers for the quantities that flow through the plume model so
//! that an emission rate can never be passed where a stack height is expected.
//!
//! # Design
//! - All types wrap `f64`; the reference closed form is checked to 1e-9 relative
//! - Values are finite and non-negative, enforced by `try_new`
//! - `-0.0` is normalised to `0.0` on construction
//! - Total ordering via `Ord` (built on `f64::total_cmp`)
//! - Serde support; deserialization goes through the same validation
//!
//! # Usage
//! ```
//! use plume_core::core_types::units::{Meters, MetersPerSecond};
//!
//! let x = Meters::try_new(1000.0).unwrap();
//! assert_eq!(x.value(), 1000.0);
//! assert!(MetersPerSecond::try_new(-3.0).is_err());
//! ```

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Deref;

use crate::error::{PlumeError, Result};

/// Validate a raw value as a finite, non-negative quantity.
#[inline]
fn non_negative(quantity: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(PlumeError::invalid_input(
            quantity,
            format!("must be finite, got {value}"),
        ));
    }
    if value < 0.0 {
        return Err(PlumeError::invalid_input(
            quantity,
            format!("must be non-negative, got {value}"),
        ));
    }
    // abs() folds -0.0 into 0.0
    Ok(value.abs())
}

// ============================================================================
// DISTANCE
// ============================================================================

/// Distance (or plume spread) in meters
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64")]
#[repr(transparent)]
pub struct Meters(f64);

impl Eq for Meters {}

impl PartialOrd for Meters {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Meters {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for Meters {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl Meters {
    /// Zero distance
    pub const ZERO: Meters = Meters(0.0);

    /// Create a distance, rejecting negative or non-finite values.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if `value` is negative, NaN or infinite.
    pub fn try_new(value: f64) -> Result<Self> {
        non_negative("distance", value).map(Meters)
    }

    /// Like [`Meters::try_new`] but reports the error under a caller-chosen name.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] naming `quantity` if `value` is invalid.
    pub fn try_named(quantity: &'static str, value: f64) -> Result<Self> {
        non_negative(quantity, value).map(Meters)
    }

    /// Wrap a value the caller has already proven finite and non-negative.
    #[inline]
    pub(crate) const fn new_unchecked(value: f64) -> Self {
        Meters(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<Meters> for f64 {
    fn from(m: Meters) -> f64 {
        m.0
    }
}

impl TryFrom<f64> for Meters {
    type Error = PlumeError;

    fn try_from(value: f64) -> Result<Self> {
        Meters::try_new(value)
    }
}

impl fmt::Display for Meters {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m", self.0)
    }
}

// ============================================================================
// VELOCITY
// ============================================================================

/// Wind speed in meters per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64")]
#[repr(transparent)]
pub struct MetersPerSecond(f64);

impl Eq for MetersPerSecond {}

impl PartialOrd for MetersPerSecond {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for MetersPerSecond {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for MetersPerSecond {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl MetersPerSecond {
    /// km/h per m/s
    const KMH_PER_MS: f64 = 3.6;

    /// Create a wind speed, rejecting negative or non-finite values.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if `value` is negative, NaN or infinite.
    pub fn try_new(value: f64) -> Result<Self> {
        non_negative("wind speed", value).map(MetersPerSecond)
    }

    /// Create a wind speed from a value in km/h.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if `kmh` is negative, NaN or infinite.
    pub fn try_from_kmh(kmh: f64) -> Result<Self> {
        non_negative("wind speed", kmh).map(|v| MetersPerSecond(v / Self::KMH_PER_MS))
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<MetersPerSecond> for f64 {
    fn from(v: MetersPerSecond) -> f64 {
        v.0
    }
}

impl TryFrom<f64> for MetersPerSecond {
    type Error = PlumeError;

    fn try_from(value: f64) -> Result<Self> {
        MetersPerSecond::try_new(value)
    }
}

impl fmt::Display for MetersPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} m/s", self.0)
    }
}

// ============================================================================
// EMISSION RATE
// ============================================================================

/// Pollutant mass emission rate in grams per second
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64")]
#[repr(transparent)]
pub struct GramsPerSecond(f64);

impl Eq for GramsPerSecond {}

impl PartialOrd for GramsPerSecond {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GramsPerSecond {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for GramsPerSecond {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl GramsPerSecond {
    /// Create an emission rate, rejecting negative or non-finite values.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if `value` is negative, NaN or infinite.
    pub fn try_new(value: f64) -> Result<Self> {
        non_negative("emission rate", value).map(GramsPerSecond)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }
}

impl From<GramsPerSecond> for f64 {
    fn from(q: GramsPerSecond) -> f64 {
        q.0
    }
}

impl TryFrom<f64> for GramsPerSecond {
    type Error = PlumeError;

    fn try_from(value: f64) -> Result<Self> {
        GramsPerSecond::try_new(value)
    }
}

impl fmt::Display for GramsPerSecond {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2} g/s", self.0)
    }
}

// ============================================================================
// CONCENTRATION
// ============================================================================

/// Mass concentration in grams per cubic meter
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(try_from = "f64")]
#[repr(transparent)]
pub struct GramsPerCubicMeter(f64);

impl Eq for GramsPerCubicMeter {}

impl PartialOrd for GramsPerCubicMeter {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for GramsPerCubicMeter {
    fn cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl Deref for GramsPerCubicMeter {
    type Target = f64;
    #[inline]
    fn deref(&self) -> &f64 {
        &self.0
    }
}

impl GramsPerCubicMeter {
    /// Zero concentration
    pub const ZERO: GramsPerCubicMeter = GramsPerCubicMeter(0.0);

    /// Wrap a computed concentration (non-negative by construction of the formula).
    #[inline]
    pub(crate) const fn new_unchecked(value: f64) -> Self {
        GramsPerCubicMeter(value)
    }

    /// Get the raw f64 value
    #[inline]
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Convert to micrograms per cubic meter
    #[inline]
    #[must_use]
    pub fn to_micrograms(self) -> f64 {
        self.0 * 1.0e6
    }
}

impl From<GramsPerCubicMeter> for f64 {
    fn from(c: GramsPerCubicMeter) -> f64 {
        c.0
    }
}

impl TryFrom<f64> for GramsPerCubicMeter {
    type Error = PlumeError;

    fn try_from(value: f64) -> Result<Self> {
        non_negative("concentration", value).map(GramsPerCubicMeter)
    }
}

impl fmt::Display for GramsPerCubicMeter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6e} g/m³", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_negative_and_non_finite() {
        assert!(Meters::try_new(-0.1).is_err());
        assert!(Meters::try_new(f64::NAN).is_err());
        assert!(MetersPerSecond::try_new(f64::INFINITY).is_err());
        assert!(GramsPerSecond::try_new(-5.0).is_err());
    }

    #[test]
    fn error_names_the_quantity() {
        let err = Meters::try_named("stack height", -2.0).unwrap_err();
        assert!(err.to_string().contains("stack height"), "got: {err}");

        let err = GramsPerSecond::try_new(-1.0).unwrap_err();
        assert!(err.to_string().contains("emission rate"), "got: {err}");
    }

    #[test]
    fn negative_zero_is_normalised() {
        let m = Meters::try_new(-0.0).unwrap();
        assert!(m.value().is_sign_positive());
        assert_eq!(m, Meters::ZERO);
    }

    #[test]
    fn kmh_conversion() {
        let v = MetersPerSecond::try_from_kmh(36.0).unwrap();
        assert!((v.value() - 10.0).abs() < 1e-12);
    }

    #[test]
    fn total_ordering() {
        let a = Meters::try_new(10.0).unwrap();
        let b = Meters::try_new(20.0).unwrap();
        assert_eq!(a.min(b), a);
        assert!(b > a);
    }

    #[test]
    fn display_formats() {
        assert_eq!(Meters::try_new(76.276).unwrap().to_string(), "76.28 m");
        assert_eq!(MetersPerSecond::try_new(3.0).unwrap().to_string(), "3.00 m/s");
        assert_eq!(
            GramsPerCubicMeter::new_unchecked(1.5e-4).to_string(),
            "1.500000e-4 g/m³"
        );
    }

    #[test]
    fn deserialization_is_validated() {
        assert!(serde_json::from_str::<Meters>("-1000.0").is_err());
        assert!(serde_json::from_str::<MetersPerSecond>("-3.0").is_err());
        assert!(serde_json::from_str::<GramsPerSecond>("-100.0").is_err());
        assert!(serde_json::from_str::<GramsPerCubicMeter>("-1e-6").is_err());

        let x: Meters = serde_json::from_str("1000.0").unwrap();
        assert_eq!(x.value(), 1000.0);
        assert_eq!(serde_json::to_string(&x).unwrap(), "1000.0");
    }

    #[test]
    fn micrograms_conversion() {
        let c = GramsPerCubicMeter::new_unchecked(2.5e-6);
        assert!((c.to_micrograms() - 2.5).abs() < 1e-12);
    }
}
