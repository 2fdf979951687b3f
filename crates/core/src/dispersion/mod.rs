//! Plume spread parameterizations and the all-classes comparison views.
//!
//! - [`coefficients`]: σy(x, S) and σz(x, S)
//! - [`table`]: six-row comparison table and per-class curves for charting

pub mod coefficients;
pub mod table;

pub use coefficients::{coefficients_for, sigma_y, sigma_z, DispersionParameters};
pub use table::{
    build_table, dispersion_curves, log_spaced_distances, CurvePoint, DispersionCurve,
    DispersionRow,
};
