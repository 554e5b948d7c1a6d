//! Region cropping.
//!
//! A crop is chosen on a scaled preview (display space) and applied to the
//! full-resolution raster (native space). The region is mapped through the
//! per-axis scale `native / display` and the codec extracts and resamples it
//! in a single encode at quality 1.0.
//!
//! # Coordinate System
//!
//! - Origin is the top-left corner of the preview
//! - `x`, `y`, `width`, `height` are display-space pixels and may be fractional
//! - The output canvas is `round(width) x round(height)`
//!
//! # Example
//!
//! ```ignore
//! let region = CropRegion::new(0.0, 0.0, 100.0, 100.0, DisplayDimensions::new(200.0, 200.0));
//! // On a 400x400 raster this samples native (0, 0, 200, 200) into a 100x100 JPEG.
//! let result = crop(&JpegCodec::default(), &raster, &region)?;
//! ```

mod overlay;
mod placement;

pub use overlay::{overlay, CropOverlay, OverlayRect};
pub use placement::region_for_physical_size;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::codec::{EncodeRequest, EncodedResult, RasterCodec, RasterDimensions, SourceRect};
use crate::error::FitError;

/// Slack allowed on the right/bottom edge so clamped drags that land on the
/// boundary through float arithmetic still validate.
const EDGE_EPSILON: f64 = 1e-6;

/// Size of the preview the crop region was measured against.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DisplayDimensions {
    pub width: f64,
    pub height: f64,
}

impl DisplayDimensions {
    pub fn new(width: f64, height: f64) -> Self {
        Self { width, height }
    }
}

/// A crop rectangle in display-space pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CropRegion {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
    pub display: DisplayDimensions,
}

impl CropRegion {
    pub fn new(x: f64, y: f64, width: f64, height: f64, display: DisplayDimensions) -> Self {
        Self {
            x,
            y,
            width,
            height,
            display,
        }
    }

    /// Check the region lies inside the display bounds and is non-empty.
    pub fn validate(&self) -> Result<(), FitError> {
        let values = [
            self.x,
            self.y,
            self.width,
            self.height,
            self.display.width,
            self.display.height,
        ];
        if values.iter().any(|v| !v.is_finite()) {
            return Err(FitError::InvalidRegion("coordinates must be finite".into()));
        }
        if self.display.width <= 0.0 || self.display.height <= 0.0 {
            return Err(FitError::InvalidRegion(format!(
                "display dimensions must be positive, got {}x{}",
                self.display.width, self.display.height
            )));
        }
        if self.width <= 0.0 || self.height <= 0.0 {
            return Err(FitError::InvalidRegion(format!(
                "width and height must be positive, got {}x{}",
                self.width, self.height
            )));
        }
        if self.x < 0.0 || self.y < 0.0 {
            return Err(FitError::InvalidRegion(format!(
                "origin ({}, {}) is outside the display",
                self.x, self.y
            )));
        }
        if self.x + self.width > self.display.width + EDGE_EPSILON {
            return Err(FitError::InvalidRegion(format!(
                "x + width ({}) exceeds display width ({})",
                self.x + self.width,
                self.display.width
            )));
        }
        if self.y + self.height > self.display.height + EDGE_EPSILON {
            return Err(FitError::InvalidRegion(format!(
                "y + height ({}) exceeds display height ({})",
                self.y + self.height,
                self.display.height
            )));
        }
        Ok(())
    }

    /// Map the region into the native coordinates of a `native_width` x
    /// `native_height` raster.
    pub fn native_rect(&self, native_width: u32, native_height: u32) -> SourceRect {
        let scale_x = native_width as f64 / self.display.width;
        let scale_y = native_height as f64 / self.display.height;
        SourceRect::new(
            self.x * scale_x,
            self.y * scale_y,
            self.width * scale_x,
            self.height * scale_y,
        )
    }

    /// Output canvas size: the display-space region, in whole pixels.
    pub fn output_size(&self) -> (u32, u32) {
        let snap = |v: f64| (v.round() as u32).max(1);
        (snap(self.width), snap(self.height))
    }

    /// Move the region's origin, keeping it fully inside the display.
    pub fn moved_to(&self, x: f64, y: f64) -> CropRegion {
        let max_x = (self.display.width - self.width).max(0.0);
        let max_y = (self.display.height - self.height).max(0.0);
        CropRegion {
            x: clamp_or_zero(x, max_x),
            y: clamp_or_zero(y, max_y),
            ..*self
        }
    }
}

fn clamp_or_zero(value: f64, max: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, max)
    }
}

/// Crop `raster` to `region` and encode the result at maximum quality.
///
/// Deterministic: identical arguments produce identical bytes.
///
/// # Errors
///
/// - [`FitError::InvalidRegion`] if the region breaks its bounds invariants
/// - [`FitError::Encode`] if the codec rejects the request
pub fn crop<C: RasterCodec>(
    codec: &C,
    raster: &C::Raster,
    region: &CropRegion,
) -> Result<EncodedResult, FitError> {
    region.validate()?;

    let source = region.native_rect(raster.width(), raster.height());
    let (width, height) = region.output_size();
    let request = EncodeRequest::new(width, height, 1.0).with_source(source);

    let result = codec.encode(raster, &request)?;
    debug!(
        native_x = source.x,
        native_y = source.y,
        native_width = source.width,
        native_height = source.height,
        width,
        height,
        size = result.size_bytes(),
        "region cropped"
    );
    Ok(result)
}
