//! JPEG codec backed by the `image` crate.
//!
//! Decoding accepts anything the enabled `image` features can read (JPEG,
//! PNG) and applies EXIF orientation so native space matches what the user
//! sees. Encoding always produces baseline JPEG.

use std::io::Cursor;

use exif::{In, Reader, Tag};
use image::codecs::jpeg::JpegEncoder;
use image::{imageops, DynamicImage, ExtendedColorType, ImageEncoder, ImageReader};
use serde::{Deserialize, Serialize};

use super::types::{DecodeError, DecodedImage, EncodeError, FilterType, Orientation};
use super::{EncodeRequest, EncodedResult, RasterCodec};

/// Production codec: decodes to RGB8 and encodes JPEG.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct JpegCodec {
    /// Filter used when the sampled region is resampled to the output size.
    pub filter: FilterType,
}

impl JpegCodec {
    pub fn new(filter: FilterType) -> Self {
        Self { filter }
    }
}

impl RasterCodec for JpegCodec {
    type Raster = DecodedImage;

    fn decode(&self, bytes: &[u8]) -> Result<DecodedImage, DecodeError> {
        if bytes.is_empty() {
            return Err(DecodeError::Empty);
        }

        let orientation = read_orientation(bytes);

        let reader = ImageReader::new(Cursor::new(bytes))
            .with_guessed_format()
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;
        if reader.format().is_none() {
            return Err(DecodeError::InvalidFormat);
        }

        let img = reader
            .decode()
            .map_err(|e| DecodeError::CorruptedFile(e.to_string()))?;

        Ok(DecodedImage::from_rgb_image(
            orient(img, orientation).into_rgb8(),
        ))
    }

    fn encode(
        &self,
        raster: &DecodedImage,
        request: &EncodeRequest,
    ) -> Result<EncodedResult, EncodeError> {
        if request.width == 0 || request.height == 0 {
            return Err(EncodeError::InvalidDimensions {
                width: request.width,
                height: request.height,
            });
        }

        let rgb = raster
            .to_rgb_image()
            .ok_or_else(|| EncodeError::InvalidPixelData {
                expected: raster.expected_len(),
                actual: raster.pixels.len(),
            })?;

        let (x, y, w, h) = match request.source {
            Some(rect) => rect.pixel_bounds(raster.width, raster.height),
            None => (0, 0, raster.width, raster.height),
        };
        let sampled = if (x, y, w, h) == (0, 0, raster.width, raster.height) {
            rgb
        } else {
            imageops::crop_imm(&rgb, x, y, w, h).to_image()
        };

        let output = if sampled.dimensions() == (request.width, request.height) {
            sampled
        } else {
            imageops::resize(
                &sampled,
                request.width,
                request.height,
                self.filter.to_image_filter(),
            )
        };

        let mut buffer = Cursor::new(Vec::new());
        JpegEncoder::new_with_quality(&mut buffer, quality_to_jpeg(request.quality))
            .write_image(
                output.as_raw(),
                request.width,
                request.height,
                ExtendedColorType::Rgb8,
            )
            .map_err(|e| EncodeError::EncodingFailed(e.to_string()))?;

        Ok(EncodedResult::new(buffer.into_inner()))
    }
}

/// Map a `[0, 1]` quality onto the JPEG encoder's 1-100 scale.
///
/// Non-finite input falls back to the lowest setting.
pub fn quality_to_jpeg(quality: f64) -> u8 {
    if !quality.is_finite() {
        return 1;
    }
    (quality.clamp(0.0, 1.0) * 100.0).round().clamp(1.0, 100.0) as u8
}

/// Read the EXIF orientation tag, defaulting to `Normal` when absent.
fn read_orientation(bytes: &[u8]) -> Orientation {
    let mut cursor = Cursor::new(bytes);
    Reader::new()
        .read_from_container(&mut cursor)
        .ok()
        .and_then(|exif| {
            exif.get_field(Tag::Orientation, In::PRIMARY)
                .and_then(|field| field.value.get_uint(0))
        })
        .map(Orientation::from)
        .unwrap_or_default()
}

fn orient(img: DynamicImage, orientation: Orientation) -> DynamicImage {
    match orientation {
        Orientation::Normal => img,
        Orientation::FlipHorizontal => img.fliph(),
        Orientation::Rotate180 => img.rotate180(),
        Orientation::FlipVertical => img.flipv(),
        Orientation::Transpose => img.rotate90().fliph(),
        Orientation::Rotate90CW => img.rotate90(),
        Orientation::Transverse => img.rotate270().fliph(),
        Orientation::Rotate270CW => img.rotate270(),
    }
}
