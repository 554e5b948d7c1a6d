//! Size-targeting WASM bindings.
//!
//! # Example
//!
//! ```typescript
//! import { resize_to_target_size } from '@pixelfit/wasm';
//!
//! let abandoned = false;
//! const output = resize_to_target_size(
//!   bytes,
//!   500 * 1024,
//!   { maxIterations: 12 },   // optional, any subset of the options
//!   () => abandoned,         // optional, polled between encode attempts
//! );
//! ```

use pixelfit_core::{Cancellation, FitError, TargetSizeOptions};
use wasm_bindgen::prelude::*;

use crate::to_js_error;

/// Polls a JS callback; a truthy return value cancels the search.
struct JsCancel(Option<js_sys::Function>);

impl Cancellation for JsCancel {
    fn is_cancelled(&self) -> bool {
        self.0.as_ref().is_some_and(|callback| {
            callback
                .call0(&JsValue::NULL)
                .map(|value| value.is_truthy())
                .unwrap_or(false)
        })
    }
}

/// Re-encode an image so its JPEG output is close to `target_bytes`.
///
/// # Arguments
///
/// * `bytes` - Encoded input image (JPEG or PNG)
/// * `target_bytes` - Desired output size in bytes
/// * `options` - Optional `{ maxIterations, initialQuality, tolerance, maxDimension }`
/// * `should_cancel` - Optional callback polled before every encode attempt
///
/// # Errors
///
/// Returns an error string if the target isn't a positive number, the
/// options don't deserialize, the input can't be decoded, encoding fails,
/// or the callback cancels the search.
#[wasm_bindgen]
pub fn resize_to_target_size(
    bytes: &[u8],
    target_bytes: f64,
    options: JsValue,
    should_cancel: Option<js_sys::Function>,
) -> Result<Vec<u8>, JsValue> {
    let target = target_from_js(target_bytes).ok_or_else(|| to_js_error(FitError::InvalidTarget))?;
    let options = options_from_js(options)?;

    pixelfit_core::resize_to_target_size_with(bytes, target, &options, &JsCancel(should_cancel))
        .map_err(to_js_error)
}

/// Accept only finite, positive byte counts.
fn target_from_js(value: f64) -> Option<usize> {
    if value.is_finite() && value >= 1.0 {
        Some(value.round() as usize)
    } else {
        None
    }
}

fn options_from_js(options: JsValue) -> Result<TargetSizeOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(TargetSizeOptions::default());
    }
    serde_wasm_bindgen::from_value(options)
        .map_err(|e| JsValue::from_str(&format!("Invalid options: {}", e)))
}
