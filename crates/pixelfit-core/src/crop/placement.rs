//! Placing a print-size crop on the preview.

use crate::error::FitError;
use crate::units::PhysicalDimension;

use super::{CropRegion, DisplayDimensions};

/// Build a display-space crop region covering `width` x `height` on paper.
///
/// The physical size is converted to native pixels at each dimension's DPI,
/// then scaled into display space. The region is centred on `center`
/// (display coordinates) and pushed back inside the preview where needed.
///
/// # Errors
///
/// Returns [`FitError::InvalidRegion`] when a dimension isn't positive, the
/// raster or display is empty, or the requested size is larger than the
/// image.
pub fn region_for_physical_size(
    native_width: u32,
    native_height: u32,
    display: DisplayDimensions,
    width: PhysicalDimension,
    height: PhysicalDimension,
    center: (f64, f64),
) -> Result<CropRegion, FitError> {
    if !width.is_valid() || !height.is_valid() {
        return Err(FitError::InvalidRegion(
            "physical dimensions need a positive value and DPI".into(),
        ));
    }
    if native_width == 0 || native_height == 0 {
        return Err(FitError::InvalidRegion("image has no pixels".into()));
    }
    if !(display.width > 0.0 && display.height > 0.0) {
        return Err(FitError::InvalidRegion(format!(
            "display dimensions must be positive, got {}x{}",
            display.width, display.height
        )));
    }

    let native_w = width.to_pixels();
    let native_h = height.to_pixels();
    if native_w > native_width as f64 || native_h > native_height as f64 {
        return Err(FitError::InvalidRegion(format!(
            "{:.0}x{:.0} px crop does not fit a {}x{} image",
            native_w, native_h, native_width, native_height
        )));
    }

    let region_w = native_w * display.width / native_width as f64;
    let region_h = native_h * display.height / native_height as f64;

    let placed = CropRegion::new(0.0, 0.0, region_w, region_h, display)
        .moved_to(center.0 - region_w / 2.0, center.1 - region_h / 2.0);
    placed.validate()?;
    Ok(placed)
}
