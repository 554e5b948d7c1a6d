//! Cropping WASM bindings.
//!
//! Coordinates come straight from the preview element: the crop rectangle
//! and the size the preview was displayed at, both in CSS pixels.

use pixelfit_core::crop::{overlay, region_for_physical_size};
use pixelfit_core::units::{PhysicalDimension, PhysicalUnit};
use pixelfit_core::{CropRegion, DisplayDimensions, FitError, JpegCodec, RasterCodec};
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// Crop an image to a rectangle measured on its preview.
///
/// The output is a JPEG of `width x height` pixels sampled from the
/// matching native-resolution region.
///
/// # Example (TypeScript)
///
/// ```typescript
/// const rect = preview.getBoundingClientRect();
/// const jpeg = crop_to_region(bytes, sel.x, sel.y, sel.w, sel.h, rect.width, rect.height);
/// ```
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn crop_to_region(
    bytes: &[u8],
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    display_width: f64,
    display_height: f64,
) -> Result<Vec<u8>, JsValue> {
    let region = CropRegion::new(
        x,
        y,
        width,
        height,
        DisplayDimensions::new(display_width, display_height),
    );
    pixelfit_core::crop_to_region(bytes, &region).map_err(to_js_error)
}

/// Crop a print-size area (`"inch"` or `"cm"` at `dpi`) centred on a preview point.
///
/// The region is kept inside the preview; it fails when the requested print
/// size is larger than the image at that DPI.
#[wasm_bindgen]
#[allow(clippy::too_many_arguments)]
pub fn crop_to_physical_size(
    bytes: &[u8],
    width: f64,
    height: f64,
    unit: &str,
    dpi: u32,
    center_x: f64,
    center_y: f64,
    display_width: f64,
    display_height: f64,
) -> Result<Vec<u8>, JsValue> {
    let unit = physical_unit(unit).ok_or_else(|| {
        to_js_error(FitError::InvalidRegion(format!("unknown unit '{}'", unit)))
    })?;

    let codec = JpegCodec::default();
    let raster = codec
        .decode(bytes)
        .map_err(|e| to_js_error(FitError::from(e)))?;

    let region = region_for_physical_size(
        raster.width,
        raster.height,
        DisplayDimensions::new(display_width, display_height),
        PhysicalDimension::new(width, unit, dpi),
        PhysicalDimension::new(height, unit, dpi),
        (center_x, center_y),
    )
    .map_err(to_js_error)?;

    pixelfit_core::crop(&codec, &raster, &region)
        .map(|result| result.into_payload())
        .map_err(to_js_error)
}

/// Describe the preview overlay for a crop rectangle.
///
/// Returns `{ selection, shaded: [...], handles: [[x, y], ...] }`.
#[wasm_bindgen]
pub fn crop_overlay(
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    display_width: f64,
    display_height: f64,
) -> Result<JsValue, JsValue> {
    let region = CropRegion::new(
        x,
        y,
        width,
        height,
        DisplayDimensions::new(display_width, display_height),
    );
    region.validate().map_err(to_js_error)?;
    serde_wasm_bindgen::to_value(&overlay(&region))
        .map_err(|e| JsValue::from_str(&format!("Failed to serialize overlay: {}", e)))
}

fn physical_unit(name: &str) -> Option<PhysicalUnit> {
    match name.trim().to_ascii_lowercase().as_str() {
        "in" | "inch" | "inches" => Some(PhysicalUnit::Inch),
        "cm" => Some(PhysicalUnit::Cm),
        _ => None,
    }
}


/// WASM-specific tests that require JsValue.
#[cfg(all(test, target_arch = "wasm32"))]
mod wasm_tests {
    use super::*;
    use pixelfit_core::codec::{DecodedImage, EncodeRequest};
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn sample_jpeg(width: u32, height: u32) -> Vec<u8> {
        let pixels = vec![90u8; (width * height * 3) as usize];
        JpegCodec::default()
            .encode(
                &DecodedImage::new(width, height, pixels),
                &EncodeRequest::new(width, height, 0.9),
            )
            .unwrap()
            .into_payload()
    }

    #[wasm_bindgen_test]
    fn test_crop_to_region() {
        let input = sample_jpeg(400, 400);
        let output = crop_to_region(&input, 0.0, 0.0, 100.0, 100.0, 200.0, 200.0).unwrap();
        let decoded = JpegCodec::default().decode(&output).unwrap();
        assert_eq!((decoded.width, decoded.height), (100, 100));
    }

    #[wasm_bindgen_test]
    fn test_crop_out_of_bounds() {
        let input = sample_jpeg(400, 400);
        assert!(crop_to_region(&input, 150.0, 0.0, 100.0, 100.0, 200.0, 200.0).is_err());
    }

    #[wasm_bindgen_test]
    fn test_crop_to_physical_size() {
        let input = sample_jpeg(600, 600);
        let output =
            crop_to_physical_size(&input, 1.0, 1.0, "inch", 300, 150.0, 150.0, 300.0, 300.0)
                .unwrap();
        let decoded = JpegCodec::default().decode(&output).unwrap();
        assert_eq!((decoded.width, decoded.height), (150, 150));
    }

    #[wasm_bindgen_test]
    fn test_crop_overlay() {
        let value = crop_overlay(0.0, 0.0, 100.0, 100.0, 200.0, 100.0).unwrap();
        assert!(value.is_object());
    }
}
