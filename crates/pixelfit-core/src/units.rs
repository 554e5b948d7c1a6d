//! Pixel / inch / centimeter conversions at a given DPI.
//!
//! All functions are exact inverses of each other up to floating-point
//! error. Nothing here rounds; callers decide how to snap to whole pixels.

use serde::{Deserialize, Serialize};

/// Centimeters per inch.
pub const CM_PER_INCH: f64 = 2.54;

/// A length unit understood by [`convert`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Unit {
    #[serde(alias = "px")]
    Pixel,
    #[serde(alias = "in")]
    Inch,
    Cm,
}

pub fn inches_to_pixels(inches: f64, dpi: f64) -> f64 {
    inches * dpi
}

pub fn pixels_to_inches(pixels: f64, dpi: f64) -> f64 {
    pixels / dpi
}

pub fn cm_to_pixels(cm: f64, dpi: f64) -> f64 {
    cm / CM_PER_INCH * dpi
}

pub fn pixels_to_cm(pixels: f64, dpi: f64) -> f64 {
    pixels / dpi * CM_PER_INCH
}

/// Convert `value` between any two units at `dpi`.
pub fn convert(value: f64, from: Unit, to: Unit, dpi: f64) -> f64 {
    let pixels = match from {
        Unit::Pixel => value,
        Unit::Inch => inches_to_pixels(value, dpi),
        Unit::Cm => cm_to_pixels(value, dpi),
    };
    match to {
        Unit::Pixel => pixels,
        Unit::Inch => pixels_to_inches(pixels, dpi),
        Unit::Cm => pixels_to_cm(pixels, dpi),
    }
}

/// Physical units accepted for a print-size crop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalUnit {
    #[serde(alias = "in")]
    Inch,
    Cm,
}

impl From<PhysicalUnit> for Unit {
    fn from(unit: PhysicalUnit) -> Self {
        match unit {
            PhysicalUnit::Inch => Unit::Inch,
            PhysicalUnit::Cm => Unit::Cm,
        }
    }
}

/// A length on paper, e.g. 3.5 cm at 300 DPI.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalDimension {
    pub value: f64,
    pub unit: PhysicalUnit,
    pub dpi: u32,
}

impl PhysicalDimension {
    pub fn new(value: f64, unit: PhysicalUnit, dpi: u32) -> Self {
        Self { value, unit, dpi }
    }

    /// Length expressed in pixels (unrounded).
    pub fn to_pixels(&self) -> f64 {
        convert(self.value, self.unit.into(), Unit::Pixel, self.dpi as f64)
    }

    /// Inverse of [`PhysicalDimension::to_pixels`].
    pub fn from_pixels(pixels: f64, unit: PhysicalUnit, dpi: u32) -> Self {
        Self {
            value: convert(pixels, Unit::Pixel, unit.into(), dpi as f64),
            unit,
            dpi,
        }
    }

    /// Positive, finite value and non-zero DPI.
    pub fn is_valid(&self) -> bool {
        self.value.is_finite() && self.value > 0.0 && self.dpi > 0
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    proptest! {
        #[test]
        fn prop_inch_round_trip(x in 0.0f64..100_000.0, dpi in 1u32..=2400) {
            let dpi = dpi as f64;
            prop_assert!(close(pixels_to_inches(inches_to_pixels(x, dpi), dpi), x));
            prop_assert!(close(inches_to_pixels(pixels_to_inches(x, dpi), dpi), x));
        }

        #[test]
        fn prop_cm_round_trip(x in 0.0f64..100_000.0, dpi in 1u32..=2400) {
            let dpi = dpi as f64;
            prop_assert!(close(pixels_to_cm(cm_to_pixels(x, dpi), dpi), x));
            prop_assert!(close(cm_to_pixels(pixels_to_cm(x, dpi), dpi), x));
        }

        #[test]
        fn prop_physical_round_trip(value in 0.01f64..1000.0, dpi in 1u32..=1200, cm in any::<bool>()) {
            let unit = if cm { PhysicalUnit::Cm } else { PhysicalUnit::Inch };
            let dim = PhysicalDimension::new(value, unit, dpi);
            let back = PhysicalDimension::from_pixels(dim.to_pixels(), unit, dpi);
            prop_assert!(close(back.value, value));
        }
    }
}
