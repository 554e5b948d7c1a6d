//! pixelfit WASM - WebAssembly bindings for pixelfit
//!
//! This crate exposes the pixelfit-core operations to a browser host. File
//! reading, drag-and-drop and download links stay on the JavaScript side;
//! everything here takes and returns plain byte arrays and numbers.
//!
//! # Module Structure
//!
//! - `resize` - size-targeted re-encoding
//! - `crop` - region and print-size cropping, preview overlay
//! - `units` - pixel / inch / cm conversions
//! - `size` - human-readable byte sizes
//!
//! # Usage
//!
//! ```typescript
//! import init, { resize_to_target_size, parse_file_size } from '@pixelfit/wasm';
//!
//! await init();
//!
//! const bytes = new Uint8Array(await file.arrayBuffer());
//! const output = resize_to_target_size(bytes, parse_file_size('500 KB'));
//! ```

use wasm_bindgen::prelude::*;

mod crop;
mod resize;
mod size;
mod units;

pub use crop::{crop_overlay, crop_to_physical_size, crop_to_region};
pub use resize::resize_to_target_size;
pub use size::{format_file_size, parse_file_size};
pub use units::{cm_to_pixels, convert_units, inches_to_pixels, pixels_to_cm, pixels_to_inches};

/// Convert a core error into the string `JsValue` the host displays.
pub(crate) fn to_js_error(err: pixelfit_core::FitError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Get the version of the WASM module
#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }
}
