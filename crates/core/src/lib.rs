//! Gaussian Plume Dispersion Core Library
//!
//! Estimates ground-level pollutant concentration downwind of an elevated
//! continuous point source using the steady-state Gaussian plume model with
//! Pasquill-Gifford dispersion coefficients.
//!
//! ## Pipeline
//!
//! - [`stability`]: surface wind and cloud cover → stability class A..E
//!   (F by manual selection only)
//! - [`dispersion`]: σy/σz as functions of downwind distance and class,
//!   plus the comparison table and σ-vs-distance curves
//! - [`plume`]: the closed-form ground-level concentration
//! - [`weather`]: turning a forecast response body into meteorological input
//!
//! Every operation is a pure function of its inputs.
//!
//! ```
//! use plume_core::{classify, concentration_raw, sigma_y, sigma_z, Meters, StabilityClass};
//!
//! let class = classify(5.5, 20.0);
//! assert_eq!(class, StabilityClass::D);
//!
//! let x = Meters::try_new(1000.0).unwrap();
//! let (sy, sz) = (sigma_y(x, class), sigma_z(x, class));
//! let c = concentration_raw(100.0, 5.5, 50.0, 1000.0, 0.0, *sy, *sz).unwrap();
//! assert!(c > 0.0);
//! ```

// Core types and utilities
pub mod core_types;
pub mod error;

pub mod dispersion;
pub mod plume;
pub mod stability;
pub mod weather;

// Re-export core types
pub use core_types::{
    CloudCover, CloudCoverUnit, EmissionSource, GramsPerCubicMeter, GramsPerSecond,
    MeteorologicalInput, Meters, MetersPerSecond, ReceptorPoint, StabilityClass,
};
pub use error::{PlumeError, Result};

// Re-export the functional API
pub use dispersion::{
    build_table, coefficients_for, dispersion_curves, log_spaced_distances, sigma_y, sigma_z,
    CurvePoint, DispersionCurve, DispersionParameters, DispersionRow,
};
pub use plume::{concentration, concentration_raw, PlumeEstimate, PlumeModel};
pub use stability::{classify, StabilityClassifier, StabilitySource};
pub use weather::{WeatherResponse, WindSpeedUnit};
