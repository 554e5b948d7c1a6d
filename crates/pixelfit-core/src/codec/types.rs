//! Core types shared by every raster codec.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while turning input bytes into a raster.
#[derive(Debug, Error)]
pub enum DecodeError {
    /// The input is empty.
    #[error("No image data provided")]
    Empty,

    /// The file format is not recognized or supported.
    #[error("Invalid or unsupported image format")]
    InvalidFormat,

    /// The image file is corrupted or incomplete.
    #[error("Corrupted or incomplete image file: {0}")]
    CorruptedFile(String),
}

/// Errors raised while encoding a raster region.
#[derive(Debug, Error)]
pub enum EncodeError {
    /// Pixel data length doesn't match the raster dimensions
    #[error("Invalid pixel data: expected {expected} bytes (width * height * 3), got {actual}")]
    InvalidPixelData { expected: usize, actual: usize },

    /// Requested output width or height is zero
    #[error("Invalid dimensions: width ({width}) and height ({height}) must be non-zero")]
    InvalidDimensions { width: u32, height: u32 },

    /// The encoder rejected the request or failed internally
    #[error("JPEG encoding failed: {0}")]
    EncodingFailed(String),
}

/// Resampling filter used when the output size differs from the sampled region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FilterType {
    /// Nearest neighbor interpolation (fastest, lowest quality).
    Nearest,
    /// Bilinear interpolation (fast, acceptable quality).
    #[default]
    Bilinear,
    /// Lanczos3 interpolation (slower, highest quality).
    Lanczos3,
}

impl FilterType {
    /// Convert to the image crate's FilterType.
    pub fn to_image_filter(self) -> image::imageops::FilterType {
        match self {
            FilterType::Nearest => image::imageops::FilterType::Nearest,
            FilterType::Bilinear => image::imageops::FilterType::Triangle,
            FilterType::Lanczos3 => image::imageops::FilterType::Lanczos3,
        }
    }
}

/// EXIF orientation values (1-8).
/// See: https://exiftool.org/TagNames/EXIF.html
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[repr(u8)]
pub enum Orientation {
    #[default]
    Normal = 1,
    FlipHorizontal = 2,
    Rotate180 = 3,
    FlipVertical = 4,
    /// Flip horizontal + rotate 270 CW.
    Transpose = 5,
    Rotate90CW = 6,
    /// Flip horizontal + rotate 90 CW.
    Transverse = 7,
    Rotate270CW = 8,
}

impl From<u32> for Orientation {
    fn from(value: u32) -> Self {
        match value {
            2 => Orientation::FlipHorizontal,
            3 => Orientation::Rotate180,
            4 => Orientation::FlipVertical,
            5 => Orientation::Transpose,
            6 => Orientation::Rotate90CW,
            7 => Orientation::Transverse,
            8 => Orientation::Rotate270CW,
            _ => Orientation::Normal,
        }
    }
}

/// Native pixel dimensions of a raster.
///
/// The size-targeting engine and the cropper only ever look at a raster
/// through this trait; pixel access stays inside the codec.
pub trait RasterDimensions {
    fn width(&self) -> u32;
    fn height(&self) -> u32;
}

/// A decoded image with RGB pixel data.
///
/// Never mutated after decoding: every encode produces a fresh buffer.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Image width in pixels.
    pub width: u32,
    /// Image height in pixels.
    pub height: u32,
    /// RGB pixel data in row-major order (3 bytes per pixel).
    pub pixels: Vec<u8>,
}

impl DecodedImage {
    pub fn new(width: u32, height: u32, pixels: Vec<u8>) -> Self {
        debug_assert_eq!(
            pixels.len(),
            width as usize * height as usize * 3,
            "Pixel buffer size mismatch"
        );
        Self {
            width,
            height,
            pixels,
        }
    }

    pub fn from_rgb_image(img: image::RgbImage) -> Self {
        let (width, height) = img.dimensions();
        Self {
            width,
            height,
            pixels: img.into_raw(),
        }
    }

    /// Copy the pixels into an `image::RgbImage`.
    ///
    /// Returns `None` when the buffer length doesn't match the dimensions.
    pub fn to_rgb_image(&self) -> Option<image::RgbImage> {
        image::RgbImage::from_raw(self.width, self.height, self.pixels.clone())
    }

    /// Expected pixel buffer length for the stored dimensions.
    pub fn expected_len(&self) -> usize {
        self.width as usize * self.height as usize * 3
    }
}

impl RasterDimensions for DecodedImage {
    fn width(&self) -> u32 {
        self.width
    }

    fn height(&self) -> u32 {
        self.height
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_type_conversion() {
        assert!(matches!(
            FilterType::Nearest.to_image_filter(),
            image::imageops::FilterType::Nearest
        ));
        assert!(matches!(
            FilterType::Bilinear.to_image_filter(),
            image::imageops::FilterType::Triangle
        ));
        assert!(matches!(
            FilterType::Lanczos3.to_image_filter(),
            image::imageops::FilterType::Lanczos3
        ));
    }

    #[test]
    fn test_orientation_from_u32() {
        assert_eq!(Orientation::from(1), Orientation::Normal);
        assert_eq!(Orientation::from(6), Orientation::Rotate90CW);
        assert_eq!(Orientation::from(0), Orientation::Normal);
        assert_eq!(Orientation::from(99), Orientation::Normal);
    }

    #[test]
    fn test_decoded_image_dimensions() {
        let img = DecodedImage::new(100, 50, vec![0u8; 100 * 50 * 3]);
        assert_eq!(RasterDimensions::width(&img), 100);
        assert_eq!(RasterDimensions::height(&img), 50);
        assert_eq!(img.expected_len(), 15000);
    }

    #[test]
    fn test_to_rgb_image_rejects_bad_buffer() {
        let img = DecodedImage {
            width: 10,
            height: 10,
            pixels: vec![0u8; 12],
        };
        assert!(img.to_rgb_image().is_none());
    }

    #[test]
    fn test_filter_type_deserializes_lowercase() {
        let filter: FilterType = serde::Deserialize::deserialize(
            serde::de::value::StrDeserializer::<serde::de::value::Error>::new("lanczos3"),
        )
        .unwrap();
        assert_eq!(filter, FilterType::Lanczos3);
    }

    #[test]
    fn test_error_display() {
        let err = EncodeError::InvalidDimensions {
            width: 0,
            height: 5,
        };
        assert_eq!(
            err.to_string(),
            "Invalid dimensions: width (0) and height (5) must be non-zero"
        );
        assert_eq!(
            DecodeError::InvalidFormat.to_string(),
            "Invalid or unsupported image format"
        );
    }
}
