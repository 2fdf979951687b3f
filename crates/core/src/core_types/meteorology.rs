//! Input value types: meteorology, emission source and receptor.
//!
//! Every type here is validated on construction and immutable afterwards.
//! They are built fresh for each evaluation and carry no identity.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::units::{GramsPerSecond, Meters, MetersPerSecond};
use crate::error::{PlumeError, Result};

/// Unit convention for cloud cover.
///
/// Different front ends report cloud cover on different scales. The scale
/// travels with the value so that a percentage is never compared against a
/// cutoff expressed in tenths.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CloudCoverUnit {
    /// Percent of sky covered, 0-100
    Percent,
    /// Tenths of sky covered, 0-10
    Tenths,
    /// Fraction of sky covered, 0-1
    Fraction,
}

impl CloudCoverUnit {
    /// Upper bound of the scale (full overcast).
    pub fn full_sky(self) -> f64 {
        match self {
            CloudCoverUnit::Percent => 100.0,
            CloudCoverUnit::Tenths => 10.0,
            CloudCoverUnit::Fraction => 1.0,
        }
    }

    /// Classifier cutoff for this unit: 40 %, 4 tenths, 0.4.
    pub fn default_cutoff(self) -> f64 {
        match self {
            CloudCoverUnit::Percent => 40.0,
            CloudCoverUnit::Tenths => 4.0,
            CloudCoverUnit::Fraction => 0.4,
        }
    }

    /// Short unit suffix used in display.
    pub fn suffix(self) -> &'static str {
        match self {
            CloudCoverUnit::Percent => "%",
            CloudCoverUnit::Tenths => "/10",
            CloudCoverUnit::Fraction => "",
        }
    }
}

/// Cloud cover value tagged with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "CloudCoverRepr")]
pub struct CloudCover {
    value: f64,
    unit: CloudCoverUnit,
}

#[derive(Deserialize)]
struct CloudCoverRepr {
    value: f64,
    unit: CloudCoverUnit,
}

impl TryFrom<CloudCoverRepr> for CloudCover {
    type Error = PlumeError;

    fn try_from(repr: CloudCoverRepr) -> Result<Self> {
        Self::try_new(repr.value, repr.unit)
    }
}

impl CloudCover {
    /// Create a cloud cover reading.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if `value` is non-finite or outside
    /// `[0, unit.full_sky()]`.
    pub fn try_new(value: f64, unit: CloudCoverUnit) -> Result<Self> {
        let full = unit.full_sky();
        if !value.is_finite() || !(0.0..=full).contains(&value) {
            return Err(PlumeError::invalid_input(
                "cloud cover",
                format!("must be within [0, {full}]{}, got {value}", unit.suffix()),
            ));
        }
        Ok(Self {
            value: value.abs(),
            unit,
        })
    }

    /// Convenience constructor for a percentage reading.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if `percent` is outside `[0, 100]`.
    pub fn percent(percent: f64) -> Result<Self> {
        Self::try_new(percent, CloudCoverUnit::Percent)
    }

    /// Raw value in this reading's own unit.
    pub fn value(self) -> f64 {
        self.value
    }

    /// Unit the value is expressed in.
    pub fn unit(self) -> CloudCoverUnit {
        self.unit
    }

    /// Value rescaled to percent, for display only.
    pub fn to_percent(self) -> f64 {
        self.value / self.unit.full_sky() * 100.0
    }
}

impl fmt::Display for CloudCover {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.value, self.unit.suffix())
    }
}

/// Meteorological conditions for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MeteorologicalInput {
    /// Mean wind speed at source height.
    pub wind_speed: MetersPerSecond,
    /// Cloud cover with its unit.
    pub cloud_cover: CloudCover,
    /// Boundary-layer depth, when the weather source reports one. Not used by
    /// the plume formula.
    pub mixing_height: Option<Meters>,
}

impl MeteorologicalInput {
    pub fn new(wind_speed: MetersPerSecond, cloud_cover: CloudCover) -> Self {
        Self {
            wind_speed,
            cloud_cover,
            mixing_height: None,
        }
    }

    pub fn with_mixing_height(mut self, mixing_height: Meters) -> Self {
        self.mixing_height = Some(mixing_height);
        self
    }
}

/// An elevated continuous point source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EmissionSource {
    /// Pollutant emission rate Q.
    pub emission_rate: GramsPerSecond,
    /// Effective stack height H (physical stack plus plume rise).
    pub stack_height: Meters,
}

impl EmissionSource {
    pub fn new(emission_rate: GramsPerSecond, stack_height: Meters) -> Self {
        Self {
            emission_rate,
            stack_height,
        }
    }
}

/// Ground-level receptor relative to the source.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "ReceptorRepr")]
pub struct ReceptorPoint {
    downwind: Meters,
    crosswind: f64,
}

#[derive(Deserialize)]
struct ReceptorRepr {
    downwind: Meters,
    crosswind: f64,
}

impl TryFrom<ReceptorRepr> for ReceptorPoint {
    type Error = PlumeError;

    fn try_from(repr: ReceptorRepr) -> Result<Self> {
        Self::try_new(repr.downwind, repr.crosswind)
    }
}

impl ReceptorPoint {
    /// Create a receptor `downwind` meters along the plume axis and
    /// `crosswind` meters (signed) off it.
    ///
    /// # Errors
    /// Returns [`PlumeError::InvalidInput`] if `crosswind` is NaN or infinite.
    pub fn try_new(downwind: Meters, crosswind: f64) -> Result<Self> {
        if !crosswind.is_finite() {
            return Err(PlumeError::invalid_input(
                "crosswind distance",
                format!("must be finite, got {crosswind}"),
            ));
        }
        Ok(Self {
            downwind,
            crosswind,
        })
    }

    /// Downwind distance x.
    pub fn downwind(self) -> Meters {
        self.downwind
    }

    /// Signed crosswind offset y.
    pub fn crosswind(self) -> f64 {
        self.crosswind
    }
}
