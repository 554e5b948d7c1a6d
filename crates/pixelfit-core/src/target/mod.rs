//! Size targeting: re-encode a raster so its output approaches a byte budget.
//!
//! The encoder's rate control is a black box, so the engine runs a closed
//! loop over (resolution, quality) and measures each attempt.
//!
//! # Regimes
//!
//! The regime is picked once from the baseline size `S0`:
//!
//! - **Growth** (`S0 <= target`): quality can't push a lossy encoder much
//!   past its maximum, so each axis is scaled by `sqrt(target / S0)` and the
//!   raster is encoded once at quality 1.0. No verification.
//! - **Shrink** (`S0 > target`): up to `max_iterations` sequential attempts.
//!   Far above target the dimensions shrink (at most 30% per step), close
//!   above it only quality drops (never below 0.5), and after undershooting
//!   both grow again (at most 20% per step). The first attempt inside the
//!   tolerance band wins; otherwise the closest attempt is returned.
//!
//! Attempts are strictly ordered: each one's parameters depend on the size
//! measured for the previous one.

mod cancel;
mod options;
mod state;

pub use cancel::{CancelFlag, Cancellation, NeverCancel};
pub use options::TargetSizeOptions;
pub use state::{SearchState, Step};

use state::capped_growth;

use tracing::debug;

use crate::codec::{EncodeRequest, EncodedResult, RasterCodec, RasterDimensions};
use crate::error::FitError;

/// Re-encode `raster` so its size lands near `target_bytes`.
///
/// `baseline` is the raster's current encoding; it is returned untouched when
/// already inside the tolerance band. Exhausting the iteration budget is not
/// an error: the closest attempt is returned instead.
///
/// # Errors
///
/// - [`FitError::InvalidTarget`] when `target_bytes` is zero
/// - [`FitError::InvalidOptions`] when `options` fail validation
/// - [`FitError::Encode`] as soon as any encode attempt fails
/// - [`FitError::Cancelled`] when `cancel` fires between attempts
pub fn target_size<C: RasterCodec>(
    codec: &C,
    raster: &C::Raster,
    baseline: EncodedResult,
    target_bytes: usize,
    options: &TargetSizeOptions,
    cancel: &dyn Cancellation,
) -> Result<EncodedResult, FitError> {
    if target_bytes == 0 {
        return Err(FitError::InvalidTarget);
    }
    options.validate()?;

    let initial_size = baseline.size_bytes();
    if options.within_tolerance(initial_size, target_bytes) {
        debug!(
            size = initial_size,
            target = target_bytes,
            "baseline already inside tolerance band"
        );
        return Ok(baseline);
    }

    if initial_size <= target_bytes {
        grow(codec, raster, initial_size, target_bytes, options, cancel)
    } else {
        shrink(codec, raster, initial_size, target_bytes, options, cancel)
    }
}

/// Single-shot estimate: scale pixel count by the byte ratio at maximum quality.
fn grow<C: RasterCodec>(
    codec: &C,
    raster: &C::Raster,
    initial_size: usize,
    target_bytes: usize,
    options: &TargetSizeOptions,
    cancel: &dyn Cancellation,
) -> Result<EncodedResult, FitError> {
    if cancel.is_cancelled() {
        return Err(FitError::Cancelled);
    }

    let scale = if initial_size == 0 {
        1.0
    } else {
        (target_bytes as f64 / initial_size as f64).sqrt()
    };
    let scale = capped_growth(scale, raster.width(), raster.height(), options.max_dimension);
    let request = EncodeRequest::new(
        scale_ceil(raster.width(), scale),
        scale_ceil(raster.height(), scale),
        1.0,
    );

    let result = codec.encode(raster, &request)?;
    debug!(
        scale,
        width = request.width,
        height = request.height,
        size = result.size_bytes(),
        target = target_bytes,
        "growth estimate encoded"
    );
    Ok(result)
}

fn shrink<C: RasterCodec>(
    codec: &C,
    raster: &C::Raster,
    initial_size: usize,
    target_bytes: usize,
    options: &TargetSizeOptions,
    cancel: &dyn Cancellation,
) -> Result<EncodedResult, FitError> {
    let mut state = SearchState::new(
        raster.width(),
        raster.height(),
        options.initial_quality,
        options.max_dimension,
    );
    let mut current_size = initial_size;

    while state.iteration < options.max_iterations {
        if cancel.is_cancelled() {
            debug!(iteration = state.iteration, "search cancelled");
            return Err(FitError::Cancelled);
        }

        let step = state.advance(current_size, target_bytes);
        let result = codec.encode(raster, &state.request())?;
        current_size = result.size_bytes();
        state.record(&result, target_bytes);

        debug!(
            iteration = state.iteration,
            ?step,
            width = state.width,
            height = state.height,
            quality = state.quality,
            size = current_size,
            target = target_bytes,
            "encode attempt"
        );

        if options.within_tolerance(current_size, target_bytes) {
            debug!(iterations = state.iteration, size = current_size, "converged");
            return Ok(result);
        }
    }

    debug!(
        iterations = state.iteration,
        best_diff = state.best_diff,
        "iteration budget exhausted, returning closest attempt"
    );
    // At least one attempt ran, so a best result exists.
    state
        .best
        .ok_or_else(|| FitError::InvalidOptions("max_iterations must be at least 1".into()))
}

/// Float error below this is ignored so an exact cap doesn't ceil one past it.
const CEIL_SLACK: f64 = 1e-9;

fn scale_ceil(value: u32, scale: f64) -> u32 {
    let scaled = (value as f64 * scale - CEIL_SLACK).ceil();
    if scaled.is_finite() {
        (scaled as u64).clamp(1, u32::MAX as u64) as u32
    } else {
        value.max(1)
    }
}
