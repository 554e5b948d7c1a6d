//! pixelfit core - size-targeted re-encoding and region cropping
//!
//! This crate takes encoded image bytes and either re-encodes them so the
//! output lands near a byte budget, or crops a region picked on a scaled
//! preview. Pixels are only touched through the [`codec::RasterCodec`] seam;
//! the entry points here wire in the production [`codec::JpegCodec`].
//!
//! # Modules
//!
//! - `codec` - decode/encode primitive and the JPEG implementation
//! - `target` - iterative size-targeting search
//! - `crop` - display-to-native crop mapping, placement and preview overlay
//! - `units` - pixel / inch / cm conversions
//! - `size_format` - human-readable byte sizes

pub mod codec;
pub mod crop;
pub mod error;
pub mod size_format;
pub mod target;
pub mod units;

pub use codec::{EncodedResult, JpegCodec, RasterCodec};
pub use crop::{crop, CropRegion, DisplayDimensions};
pub use error::FitError;
pub use size_format::{format_file_size, parse_file_size, DEFAULT_DECIMALS};
pub use target::{target_size, CancelFlag, Cancellation, NeverCancel, TargetSizeOptions};
pub use units::{PhysicalDimension, PhysicalUnit, Unit};

/// Re-encode `file_bytes` as JPEG so the output is close to `target_bytes`.
///
/// Uses the default search options and never cancels. See
/// [`resize_to_target_size_with`] for the configurable variant.
pub fn resize_to_target_size(file_bytes: &[u8], target_bytes: usize) -> Result<Vec<u8>, FitError> {
    resize_to_target_size_with(
        file_bytes,
        target_bytes,
        &TargetSizeOptions::default(),
        &NeverCancel,
    )
}

/// Re-encode `file_bytes` toward `target_bytes` with explicit options.
///
/// The input bytes are the baseline: if they already sit inside the
/// tolerance band they are returned as-is.
pub fn resize_to_target_size_with(
    file_bytes: &[u8],
    target_bytes: usize,
    options: &TargetSizeOptions,
    cancel: &dyn Cancellation,
) -> Result<Vec<u8>, FitError> {
    if target_bytes == 0 {
        return Err(FitError::InvalidTarget);
    }

    let codec = JpegCodec::default();
    let raster = codec.decode(file_bytes)?;
    let baseline = EncodedResult::new(file_bytes.to_vec());

    target_size(&codec, &raster, baseline, target_bytes, options, cancel)
        .map(EncodedResult::into_payload)
}

/// Crop `file_bytes` to a region measured on a preview of the image.
pub fn crop_to_region(file_bytes: &[u8], region: &CropRegion) -> Result<Vec<u8>, FitError> {
    region.validate()?;

    let codec = JpegCodec::default();
    let raster = codec.decode(file_bytes)?;

    crop(&codec, &raster, region).map(EncodedResult::into_payload)
}
