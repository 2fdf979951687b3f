//! C ABI for the Gaussian plume calculator.
//!
//! Every function returns a [`PlumeErrorCode`] and writes its result through an
//! out-pointer. On failure the output is left untouched and the message is
//! available from [`plume_get_last_error`] on the same thread.

mod dispersion;
mod error;
mod helpers;
mod plume;
mod stability;

pub use dispersion::{
    plume_build_table, plume_sigma_y, plume_sigma_z, PlumeDispersionRow, PLUME_CLASS_COUNT,
};
pub use error::{plume_get_last_error, plume_get_last_error_code, PlumeErrorCode};
pub use plume::{plume_concentration, PlumeInputs};
pub use stability::{
    plume_classify, PLUME_CLOUD_FRACTION, PLUME_CLOUD_PERCENT, PLUME_CLOUD_TENTHS,
};
