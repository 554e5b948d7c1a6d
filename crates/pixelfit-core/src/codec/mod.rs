//! The raster codec seam.
//!
//! Both pipelines (size targeting and cropping) talk to pixels only through
//! [`RasterCodec`]: `decode` turns input bytes into an immutable raster and
//! `encode` produces a fresh [`EncodedResult`] for a given output size,
//! quality and optional native-space sampling rectangle.
//!
//! [`JpegCodec`] is the production implementation built on the `image`
//! crate. Tests substitute lightweight codecs that model output size without
//! touching real pixels.
//!
//! # Examples
//!
//! ```ignore
//! use pixelfit_core::codec::{EncodeRequest, JpegCodec, RasterCodec};
//!
//! let codec = JpegCodec::default();
//! let raster = codec.decode(&std::fs::read("photo.jpg").unwrap()).unwrap();
//! let result = codec.encode(&raster, &EncodeRequest::new(800, 600, 0.8)).unwrap();
//! println!("Encoded {} bytes", result.size_bytes());
//! ```

mod jpeg;
mod types;

pub use jpeg::{quality_to_jpeg, JpegCodec};
pub use types::{DecodeError, DecodedImage, EncodeError, FilterType, Orientation, RasterDimensions};

/// A rectangle in native (source raster) pixel coordinates.
///
/// Coordinates are fractional; codecs snap them to whole pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SourceRect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl SourceRect {
    pub fn new(x: f64, y: f64, width: f64, height: f64) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Snap to whole pixels inside a `bound_w` x `bound_h` raster.
    ///
    /// Returns `(x, y, width, height)`; the result is never empty and never
    /// extends past the raster edge.
    pub fn pixel_bounds(&self, bound_w: u32, bound_h: u32) -> (u32, u32, u32, u32) {
        let snap = |v: f64, max: u32| -> u32 {
            if v.is_finite() {
                (v.round().max(0.0) as u64).min(max as u64) as u32
            } else {
                0
            }
        };

        let left = snap(self.x, bound_w.saturating_sub(1));
        let top = snap(self.y, bound_h.saturating_sub(1));
        let right = snap(self.x + self.width, bound_w);
        let bottom = snap(self.y + self.height, bound_h);

        let width = right.saturating_sub(left).max(1);
        let height = bottom.saturating_sub(top).max(1);
        (left, top, width, height)
    }
}

/// Parameters for one encode attempt.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EncodeRequest {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Encoder quality in `[0, 1]`.
    pub quality: f64,
    /// Native-space region to sample; `None` samples the whole raster.
    pub source: Option<SourceRect>,
}

impl EncodeRequest {
    pub fn new(width: u32, height: u32, quality: f64) -> Self {
        Self {
            width,
            height,
            quality,
            source: None,
        }
    }

    pub fn with_source(mut self, source: SourceRect) -> Self {
        self.source = Some(source);
        self
    }
}

/// The bytes produced by one encode attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedResult {
    payload: Vec<u8>,
}

impl EncodedResult {
    pub fn new(payload: Vec<u8>) -> Self {
        Self { payload }
    }

    pub fn size_bytes(&self) -> usize {
        self.payload.len()
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    pub fn into_payload(self) -> Vec<u8> {
        self.payload
    }
}

/// Decode/encode primitive consumed by the size-targeting engine and the cropper.
pub trait RasterCodec {
    type Raster: RasterDimensions;

    /// Decode input bytes into a raster.
    fn decode(&self, bytes: &[u8]) -> Result<Self::Raster, DecodeError>;

    /// Encode (a region of) the raster at the requested size and quality.
    ///
    /// Callers clamp `quality` to `[0, 1]` before invoking.
    fn encode(
        &self,
        raster: &Self::Raster,
        request: &EncodeRequest,
    ) -> Result<EncodedResult, EncodeError>;
}
