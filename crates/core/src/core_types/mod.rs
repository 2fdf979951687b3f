//! Core types and utilities

pub mod meteorology;
pub mod stability;
pub mod units;

pub use meteorology::*;
pub use stability::StabilityClass;
pub use units::*;
