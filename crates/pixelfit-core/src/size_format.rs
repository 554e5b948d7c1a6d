//! Human-readable byte sizes.
//!
//! [`format_file_size`] rounds, so [`parse_file_size`] only recovers the
//! original value within that rounding: `parse(format(x)) ≈ x`.

/// Fractional digits used when no precision is given.
pub const DEFAULT_DECIMALS: usize = 2;
/// Precision beyond this is clamped; `f64` has nothing left to print.
pub const MAX_DECIMALS: usize = 20;

const UNITS: [&str; 4] = ["Bytes", "KB", "MB", "GB"];
const STEP: f64 = 1024.0;

/// Format `bytes` with the largest unit that keeps the value at or above 1.
///
/// At most `decimals` fractional digits (capped at [`MAX_DECIMALS`]) are
/// printed and trailing zeros are dropped, so `1536` becomes `"1.5 KB"`. Values beyond the gigabyte range
/// stay in GB.
pub fn format_file_size(bytes: u64, decimals: usize) -> String {
    if bytes == 0 {
        return format!("0 {}", UNITS[0]);
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= STEP && unit < UNITS.len() - 1 {
        value /= STEP;
        unit += 1;
    }

    let decimals = decimals.min(MAX_DECIMALS);
    format!("{} {}", trim_decimal(&format!("{:.*}", decimals, value)), UNITS[unit])
}

/// Parse a size such as `"1.5 KB"`, `"300kb"` or `"2 MB"` into bytes.
///
/// The leading number is read the way a lenient float parser would; the unit
/// is picked by looking for `kb`, `mb` or `gb` anywhere in the input
/// (case-insensitive), otherwise the number is taken as bytes. Input without a
/// leading number, or a negative one, yields `0`.
pub fn parse_file_size(input: &str) -> u64 {
    let Some(value) = leading_number(input) else {
        return 0;
    };

    let lower = input.to_ascii_lowercase();
    let multiplier = if lower.contains("kb") {
        STEP
    } else if lower.contains("mb") {
        STEP * STEP
    } else if lower.contains("gb") {
        STEP * STEP * STEP
    } else {
        1.0
    };

    let bytes = (value * multiplier).round();
    if bytes.is_finite() && bytes > 0.0 {
        bytes as u64
    } else {
        0
    }
}

fn trim_decimal(formatted: &str) -> &str {
    if formatted.contains('.') {
        formatted.trim_end_matches('0').trim_end_matches('.')
    } else {
        formatted
    }
}

/// Longest numeric prefix after leading whitespace.
fn leading_number(input: &str) -> Option<f64> {
    let s = input.trim_start();
    let bytes = s.as_bytes();
    let digits_from = |mut i: usize| {
        while i < bytes.len() && bytes[i].is_ascii_digit() {
            i += 1;
        }
        i
    };

    let mut end = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        end = 1;
    }

    let int_end = digits_from(end);
    let mut mantissa_digits = int_end - end;
    end = int_end;

    if bytes.get(end) == Some(&b'.') {
        let frac_end = digits_from(end + 1);
        mantissa_digits += frac_end - (end + 1);
        if mantissa_digits > 0 {
            end = frac_end;
        }
    }
    if mantissa_digits == 0 {
        return None;
    }

    if matches!(bytes.get(end), Some(b'e' | b'E')) {
        let mut exp = end + 1;
        if matches!(bytes.get(exp), Some(b'+' | b'-')) {
            exp += 1;
        }
        let exp_end = digits_from(exp);
        if exp_end > exp {
            end = exp_end;
        }
    }

    s[..end].parse().ok()
}
