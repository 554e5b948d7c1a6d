//! Unit conversion bindings.
//!
//! Thin wrappers over `pixelfit_core::units`; no rounding is applied.

use pixelfit_core::units::{self, Unit};
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub fn inches_to_pixels(inches: f64, dpi: f64) -> f64 {
    units::inches_to_pixels(inches, dpi)
}

#[wasm_bindgen]
pub fn pixels_to_inches(pixels: f64, dpi: f64) -> f64 {
    units::pixels_to_inches(pixels, dpi)
}

#[wasm_bindgen]
pub fn cm_to_pixels(cm: f64, dpi: f64) -> f64 {
    units::cm_to_pixels(cm, dpi)
}

#[wasm_bindgen]
pub fn pixels_to_cm(pixels: f64, dpi: f64) -> f64 {
    units::pixels_to_cm(pixels, dpi)
}

/// Convert between `"px"`, `"inch"` and `"cm"`.
///
/// Unknown unit names return `NaN` rather than throwing.
#[wasm_bindgen]
pub fn convert_units(value: f64, from: &str, to: &str, dpi: f64) -> f64 {
    match (unit_from_str(from), unit_from_str(to)) {
        (Some(from), Some(to)) => units::convert(value, from, to, dpi),
        _ => f64::NAN,
    }
}

fn unit_from_str(name: &str) -> Option<Unit> {
    match name.trim().to_ascii_lowercase().as_str() {
        "px" | "pixel" | "pixels" => Some(Unit::Pixel),
        "in" | "inch" | "inches" => Some(Unit::Inch),
        "cm" => Some(Unit::Cm),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrappers() {
        assert!((inches_to_pixels(2.0, 300.0) - 600.0).abs() < 1e-9);
        assert!((pixels_to_inches(600.0, 300.0) - 2.0).abs() < 1e-9);
        assert!((cm_to_pixels(2.54, 300.0) - 300.0).abs() < 1e-9);
        assert!((pixels_to_cm(300.0, 300.0) - 2.54).abs() < 1e-9);
    }

    #[test]
    fn test_convert_units_by_name() {
        assert!((convert_units(1.0, "inch", "cm", 96.0) - 2.54).abs() < 1e-9);
        assert!((convert_units(96.0, "PX", "in", 96.0) - 1.0).abs() < 1e-9);
        assert!(convert_units(1.0, "furlong", "cm", 96.0).is_nan());
    }
}
