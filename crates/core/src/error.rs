//! Error types for the plume calculator core.
//!
//! Two errors are caller faults and are always surfaced: an unknown
//! stability-class token and an out-of-range physical input. A zero wind
//! speed or zero plume spread is *not* an error; the concentration model
//! recovers it to a concentration of zero.

use thiserror::Error;

/// Errors produced by the dispersion core.
#[derive(Debug, Error)]
pub enum PlumeError {
    /// A stability-class token that is not one of the six Pasquill-Gifford letters.
    #[error("invalid stability class {0:?}: expected one of A, B, C, D, E, F")]
    InvalidClass(String),

    /// A physical quantity outside its valid domain (negative, non-finite,
    /// out of range, or expressed in the wrong unit).
    #[error("invalid {quantity}: {reason}")]
    InvalidInput {
        /// Name of the offending quantity (e.g. `"emission rate"`).
        quantity: &'static str,
        /// What was wrong with it.
        reason: String,
    },

    /// A weather response that parsed as JSON but lacks the expected data.
    #[error("malformed weather response: {0}")]
    WeatherResponse(String),

    /// A weather response that is not valid JSON for the expected shape.
    #[error("weather response is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),
}

impl PlumeError {
    /// Create an `InvalidInput` error for the named quantity.
    ///
    /// # Arguments
    /// * `quantity` - Human-readable name of the quantity (e.g. `"stack height"`)
    /// * `reason` - Description of the constraint that was violated
    pub fn invalid_input(quantity: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidInput {
            quantity,
            reason: reason.into(),
        }
    }
}

/// Result alias used throughout the core.
pub type Result<T> = std::result::Result<T, PlumeError>;
