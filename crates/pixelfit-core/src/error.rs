//! Error taxonomy for the public operations.

use thiserror::Error;

use crate::codec::{DecodeError, EncodeError};

/// Errors returned by size targeting and cropping.
///
/// Codec failures abort the call as soon as they happen; running out of
/// iterations is never an error.
#[derive(Debug, Error)]
pub enum FitError {
    /// Target size must be a positive number of bytes
    #[error("Invalid target size: must be greater than zero")]
    InvalidTarget,

    /// Search options are out of range
    #[error("Invalid options: {0}")]
    InvalidOptions(String),

    /// Crop rectangle is outside the display bounds or empty
    #[error("Invalid crop region: {0}")]
    InvalidRegion(String),

    #[error("Decode failed: {0}")]
    Decode(#[from] DecodeError),

    #[error("Encode failed: {0}")]
    Encode(#[from] EncodeError),

    /// The caller abandoned the operation
    #[error("Operation cancelled")]
    Cancelled,
}
