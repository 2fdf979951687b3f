//! Stability classification from surface observations.
//!
//! Implements a simplified Turner scheme: the wind speed selects a band and,
//! in the three lowest bands, cloud cover at or above a cutoff shifts the
//! result one class towards neutral.
//!
//! ```text
//! u < 2        A if cloud < cutoff else B
//! 2 ≤ u < 3    B if cloud < cutoff else C
//! 3 ≤ u < 5    C if cloud < cutoff else D
//! 5 ≤ u < 6    D
//! u ≥ 6        E
//! ```
//!
//! Class F is never produced here. It is only reachable through
//! [`StabilitySource::Manual`].
//!
//! # References
//!
//! - Turner, D.B. (1964). "A diffusion model for an urban area."
//!   Journal of Applied Meteorology, 3(1), 83-91.
//! - Pasquill, F. (1961). "The estimation of the dispersion of windborne material."
//!   Meteorological Magazine, 90, 33-49.

use serde::{Deserialize, Serialize};

use crate::core_types::{CloudCoverUnit, MeteorologicalInput, StabilityClass};
use crate::error::{PlumeError, Result};

/// Upper wind-speed bound (exclusive, m/s) of each band.
const BAND_VERY_LIGHT: f64 = 2.0;
const BAND_LIGHT: f64 = 3.0;
const BAND_MODERATE: f64 = 5.0;
const BAND_FRESH: f64 = 6.0;

/// Configured stability classifier.
///
/// The cutoff is always stated together with its cloud-cover unit. Raw cloud
/// values handed to [`StabilityClassifier::classify`] are read in that unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ClassifierRepr")]
pub struct StabilityClassifier {
    cutoff: f64,
    unit: CloudCoverUnit,
}

#[derive(Deserialize)]
struct ClassifierRepr {
    cutoff: f64,
    unit: CloudCoverUnit,
}

impl TryFrom<ClassifierRepr> for StabilityClassifier {
    type Error = PlumeError;

    fn try_from(repr: ClassifierRepr) -> Result<Self> {
        Self::with_cutoff(repr.unit, repr.cutoff)
    }
}

impl Default for StabilityClassifier {
    fn default() -> Self {
        Self::percent()
    }
}

impl StabilityClassifier {
    /// Cloud cover in percent, cutoff 40 %.
    pub fn percent() -> Self {
        Self::preset(CloudCoverUnit::Percent)
    }

    /// Cloud cover in tenths of sky, cutoff 4.
    pub fn tenths() -> Self {
        Self::preset(CloudCoverUnit::Tenths)
    }

    /// Cloud cover as a fraction of sky, cutoff 0.4.
    pub fn fraction() -> Self {
        Self::preset(CloudCoverUnit::Fraction)
    }

    /// Default cutoff for `unit`.
    pub fn preset(unit: CloudCoverUnit) -> Self {
        Self {
            cutoff: unit.default_cutoff(),
            unit,
        }
    }

    /// Classifier with a custom cutoff.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if `cutoff` is non-finite or lies
    /// outside the scale of `unit`.
    pub fn with_cutoff(unit: CloudCoverUnit, cutoff: f64) -> Result<Self> {
        let full = unit.full_sky();
        if !cutoff.is_finite() || !(0.0..=full).contains(&cutoff) {
            return Err(PlumeError::invalid_input(
                "cloud cover cutoff",
                format!("must be within [0, {full}]{}, got {cutoff}", unit.suffix()),
            ));
        }
        Ok(Self { cutoff, unit })
    }

    pub fn cutoff(&self) -> f64 {
        self.cutoff
    }

    pub fn unit(&self) -> CloudCoverUnit {
        self.unit
    }

    /// Classify from raw wind speed (m/s) and cloud cover in this classifier's unit.
    ///
    /// Total over all real inputs; thresholds are half-open so a value exactly
    /// on a boundary falls into the higher wind band.
    pub fn classify(&self, wind_speed: f64, cloud_cover: f64) -> StabilityClass {
        let clear = cloud_cover < self.cutoff;
        let pick = |sunny, cloudy| if clear { sunny } else { cloudy };

        if wind_speed < BAND_VERY_LIGHT {
            pick(StabilityClass::A, StabilityClass::B)
        } else if wind_speed < BAND_LIGHT {
            pick(StabilityClass::B, StabilityClass::C)
        } else if wind_speed < BAND_MODERATE {
            pick(StabilityClass::C, StabilityClass::D)
        } else if wind_speed < BAND_FRESH {
            StabilityClass::D
        } else {
            StabilityClass::E
        }
    }

    /// Classify a typed observation.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if the observation's cloud-cover unit
    /// differs from the classifier's. Units are never converted implicitly.
    pub fn classify_observation(&self, met: &MeteorologicalInput) -> Result<StabilityClass> {
        let cloud = met.cloud_cover;
        if cloud.unit() != self.unit {
            return Err(PlumeError::invalid_input(
                "cloud cover",
                format!(
                    "expressed in {:?} but the classifier cutoff is in {:?}",
                    cloud.unit(),
                    self.unit
                ),
            ));
        }
        Ok(self.classify(met.wind_speed.value(), cloud.value()))
    }
}

/// Classify with the percent convention (cutoff 40 %).
pub fn classify(wind_speed: f64, cloud_cover: f64) -> StabilityClass {
    StabilityClassifier::percent().classify(wind_speed, cloud_cover)
}

/// Where the stability class for an evaluation comes from.
///
/// Both producers feed the same downstream computation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StabilitySource {
    /// Derive the class from the evaluation's meteorology.
    Computed,
    /// Use a class chosen directly by the user.
    Manual(StabilityClass),
}

impl StabilitySource {
    /// Build a source from an optional user-supplied class token.
    ///
    /// `None` means "compute it".
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidClass`] if the token is not a class letter.
    pub fn from_token(token: Option<&str>) -> Result<Self> {
        match token {
            None => Ok(StabilitySource::Computed),
            Some(t) => t.parse().map(StabilitySource::Manual),
        }
    }

    /// Resolve to a concrete class.
    ///
    /// # Errors
    /// Propagates the unit-mismatch error of
    /// [`StabilityClassifier::classify_observation`] for computed sources.
    pub fn resolve(
        self,
        classifier: &StabilityClassifier,
        met: &MeteorologicalInput,
    ) -> Result<StabilityClass> {
        match self {
            StabilitySource::Computed => classifier.classify_observation(met),
            StabilitySource::Manual(class) => Ok(class),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core_types::{CloudCover, MetersPerSecond};

    fn met(wind: f64, cloud: CloudCover) -> MeteorologicalInput {
        MeteorologicalInput::new(MetersPerSecond::try_new(wind).unwrap(), cloud)
    }

    #[test]
    fn percent_convention_cases() {
        assert_eq!(classify(1.5, 30.0), StabilityClass::A);
        assert_eq!(classify(1.5, 40.0), StabilityClass::B);
        assert_eq!(classify(2.5, 50.0), StabilityClass::C);
        assert_eq!(classify(2.5, 10.0), StabilityClass::B);
        assert_eq!(classify(4.0, 10.0), StabilityClass::C);
        assert_eq!(classify(4.0, 90.0), StabilityClass::D);
        assert_eq!(classify(5.5, 0.0), StabilityClass::D);
        assert_eq!(classify(5.5, 100.0), StabilityClass::D);
    }

    #[test]
    fn strong_wind_is_always_e() {
        for cloud in [0.0, 39.9, 40.0, 100.0, -5.0, 1e9] {
            assert_eq!(classify(6.5, cloud), StabilityClass::E);
        }
        assert_eq!(classify(60.0, 0.0), StabilityClass::E);
    }

    #[test]
    fn thresholds_fall_into_higher_band() {
        assert_eq!(classify(2.0, 0.0), StabilityClass::B);
        assert_eq!(classify(3.0, 0.0), StabilityClass::C);
        assert_eq!(classify(5.0, 0.0), StabilityClass::D);
        assert_eq!(classify(6.0, 0.0), StabilityClass::E);
        assert_eq!(classify(1.999_999, 0.0), StabilityClass::A);
    }

    #[test]
    fn never_produces_f() {
        for tenth_ms in 0..200 {
            for cloud in [0.0, 20.0, 40.0, 80.0, 100.0] {
                let class = classify(f64::from(tenth_ms) / 10.0, cloud);
                assert_ne!(class, StabilityClass::F);
            }
        }
    }

    #[test]
    fn tenths_preset_uses_cutoff_four() {
        let classifier = StabilityClassifier::tenths();
        assert_eq!(classifier.cutoff(), 4.0);
        assert_eq!(classifier.classify(1.5, 3.0), StabilityClass::A);
        assert_eq!(classifier.classify(1.5, 4.0), StabilityClass::B);
        assert_eq!(classifier.classify(2.5, 5.0), StabilityClass::C);
    }

    #[test]
    fn fraction_preset_uses_cutoff_point_four() {
        let classifier = StabilityClassifier::fraction();
        assert_eq!(classifier.classify(1.5, 0.3), StabilityClass::A);
        assert_eq!(classifier.classify(1.5, 0.4), StabilityClass::B);
    }

    #[test]
    fn custom_cutoff_is_range_checked() {
        assert!(StabilityClassifier::with_cutoff(CloudCoverUnit::Percent, 60.0).is_ok());
        assert!(StabilityClassifier::with_cutoff(CloudCoverUnit::Tenths, 40.0).is_err());
        assert!(StabilityClassifier::with_cutoff(CloudCoverUnit::Fraction, f64::NAN).is_err());

        let classifier = StabilityClassifier::with_cutoff(CloudCoverUnit::Percent, 60.0).unwrap();
        assert_eq!(classifier.classify(1.0, 50.0), StabilityClass::A);
    }

    #[test]
    fn deserialized_cutoff_is_range_checked() {
        let bad =
            serde_json::from_str::<StabilityClassifier>(r#"{"cutoff": -7.0, "unit": "tenths"}"#);
        assert!(bad.is_err());

        let model = serde_json::from_str::<crate::PlumeModel>(
            r#"{"classifier": {"cutoff": 500.0, "unit": "percent"}}"#,
        );
        assert!(model.is_err());

        let ok: StabilityClassifier =
            serde_json::from_str(r#"{"cutoff": 4.0, "unit": "tenths"}"#).unwrap();
        assert_eq!(ok, StabilityClassifier::tenths());
    }

    #[test]
    fn observation_unit_must_match() {
        let tenths = CloudCover::try_new(3.0, CloudCoverUnit::Tenths).unwrap();
        let observation = met(1.5, tenths);

        let err = StabilityClassifier::percent()
            .classify_observation(&observation)
            .unwrap_err();
        assert!(matches!(err, PlumeError::InvalidInput { quantity: "cloud cover", .. }));

        let class = StabilityClassifier::tenths()
            .classify_observation(&observation)
            .unwrap();
        assert_eq!(class, StabilityClass::A);
    }

    #[test]
    fn manual_source_bypasses_classifier() {
        let observation = met(8.0, CloudCover::percent(0.0).unwrap());
        let classifier = StabilityClassifier::default();

        let computed = StabilitySource::Computed.resolve(&classifier, &observation).unwrap();
        assert_eq!(computed, StabilityClass::E);

        let manual = StabilitySource::Manual(StabilityClass::F)
            .resolve(&classifier, &observation)
            .unwrap();
        assert_eq!(manual, StabilityClass::F);
    }

    #[test]
    fn manual_source_skips_unit_check() {
        let observation = met(1.0, CloudCover::try_new(0.2, CloudCoverUnit::Fraction).unwrap());
        let manual = StabilitySource::Manual(StabilityClass::C)
            .resolve(&StabilityClassifier::percent(), &observation)
            .unwrap();
        assert_eq!(manual, StabilityClass::C);
    }

    #[test]
    fn from_token() {
        assert_eq!(StabilitySource::from_token(None).unwrap(), StabilitySource::Computed);
        assert_eq!(
            StabilitySource::from_token(Some("f")).unwrap(),
            StabilitySource::Manual(StabilityClass::F)
        );
        assert!(matches!(
            StabilitySource::from_token(Some("Z")),
            Err(PlumeError::InvalidClass(_))
        ));
    }
}
