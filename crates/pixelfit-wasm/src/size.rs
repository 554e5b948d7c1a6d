//! Byte-size formatting bindings.

use pixelfit_core::size_format;
use wasm_bindgen::prelude::*;

/// Format a byte count for display, e.g. `1536` -> `"1.5 KB"`.
///
/// `decimals` defaults to 2 when omitted and is capped at 20.
#[wasm_bindgen]
pub fn format_file_size(bytes: f64, decimals: Option<u32>) -> String {
    let bytes = if bytes.is_finite() && bytes > 0.0 {
        bytes.round() as u64
    } else {
        0
    };
    let decimals = decimals.map_or(size_format::DEFAULT_DECIMALS, |d| {
        (d as usize).min(size_format::MAX_DECIMALS)
    });
    size_format::format_file_size(bytes, decimals)
}

/// Parse a size such as `"500 KB"` into bytes. Unparseable input yields 0.
///
/// Returned as a JS number; sizes stay well inside the exact integer range.
#[wasm_bindgen]
pub fn parse_file_size(input: &str) -> f64 {
    size_format::parse_file_size(input) as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_defaults_to_two_decimals() {
        assert_eq!(format_file_size(1_234_567.0, None), "1.18 MB");
        assert_eq!(format_file_size(1_234_567.0, Some(0)), "1 MB");
    }

    #[test]
    fn test_format_clamps_decimals() {
        assert_eq!(format_file_size(1536.0, Some(u32::MAX)), "1.5 KB");
        assert_eq!(
            format_file_size(1_234_567.0, Some(u32::MAX)),
            format_file_size(1_234_567.0, Some(20))
        );
    }

    #[test]
    fn test_format_rejects_negative_and_nan() {
        assert_eq!(format_file_size(-5.0, None), "0 Bytes");
        assert_eq!(format_file_size(f64::NAN, None), "0 Bytes");
    }

    #[test]
    fn test_parse() {
        assert_eq!(parse_file_size("1.5 KB"), 1536.0);
        assert_eq!(parse_file_size("nope"), 0.0);
    }
}
