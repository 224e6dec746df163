//! Typed coercion between setting strings and Rust primitives.
//!
//! Every setting is stored as a string.  The helpers here define how the
//! typed accessors on [`crate::ConfigStore`] interpret and produce those
//! strings:
//!
//! | Type   | Read                                        | Write                      |
//! |--------|---------------------------------------------|----------------------------|
//! | bool   | `"1"`, `"yes"`, `"true"` (any case) → true  | `"1"` / `"0"`              |
//! | i32    | trimmed base-10, `None` on failure          | plain base-10              |
//! | f64    | trimmed `f64` syntax, `None` on failure     | shortest or trimmed digits |
//!
//! The two directions round midpoints differently.  Reads round the binary
//! value half-to-even, so `2.5` read with zero digits is `2`.  Writes round
//! the 15-significant-digit decimal form half away from zero, so `2.5`
//! written with zero digits is `"3"` and `2.675` with two is `"2.68"`.

/// Largest fractional digit count honoured by [`round_to_digits`].
///
/// An `f64` carries at most 15-17 significant decimal digits, so rounding
/// beyond this is meaningless and the value is returned unchanged.
pub const MAX_ROUNDING_DIGITS: i32 = 15;

/// Magnitude above which an `f64` has no fractional part left to round.
const NO_FRACTION_THRESHOLD: f64 = 1e16;

/// Significant decimal digits kept by [`format_double`] before rounding.
const FORMAT_SIGNIFICANT_DIGITS: usize = 15;

/// String written for `true` by [`format_bool`].
pub const TRUE_STRING: &str = "1";
/// String written for `false` by [`format_bool`].
pub const FALSE_STRING: &str = "0";

/// Interprets a stored string as a boolean.
///
/// The string is trimmed and compared case-insensitively against `"1"`,
/// `"yes"` and `"true"`.  Anything else, including the empty string, is
/// `false`.
pub fn parse_bool(raw: &str) -> bool {
    let value = raw.trim();
    value == "1" || value.eq_ignore_ascii_case("yes") || value.eq_ignore_ascii_case("true")
}

/// Formats a boolean as `"1"` or `"0"`.
pub fn format_bool(value: bool) -> &'static str {
    if value {
        TRUE_STRING
    } else {
        FALSE_STRING
    }
}

/// Parses a 32-bit signed integer, ignoring surrounding whitespace.
///
/// Returns `None` for empty input, non-digits, fractions and values that
/// overflow `i32`.
pub fn parse_int(raw: &str) -> Option<i32> {
    raw.trim().parse().ok()
}

/// Parses a floating-point number, ignoring surrounding whitespace.
pub fn parse_double(raw: &str) -> Option<f64> {
    raw.trim().parse().ok()
}

/// Rounds `value` to `digits` fractional digits using round-half-to-even.
///
/// A negative `digits` means "no rounding".  Non-finite values, digit
/// counts above [`MAX_ROUNDING_DIGITS`] and magnitudes too large to carry a
/// fraction are returned unchanged.
///
/// # Examples
///
/// ```rust
/// use xmlconf_core::values::round_to_digits;
///
/// assert_eq!(round_to_digits(3.14159, 2), 3.14);
/// assert_eq!(round_to_digits(2.5, 0), 2.0);
/// assert_eq!(round_to_digits(3.14159, -1), 3.14159);
/// ```
pub fn round_to_digits(value: f64, digits: i32) -> f64 {
    if digits < 0
        || digits > MAX_ROUNDING_DIGITS
        || !value.is_finite()
        || value.abs() >= NO_FRACTION_THRESHOLD
    {
        return value;
    }

    let factor = 10f64.powi(digits);
    let scaled = value * factor;
    if !scaled.is_finite() {
        return value;
    }
    scaled.round_ties_even() / factor
}

/// Formats a floating-point number for storage.
///
/// With `digits < 0` the shortest string that parses back to the same `f64`
/// is produced (`14.0` → `"14"`).  Otherwise the value is taken to 15
/// significant decimal digits, rounded half away from zero to at most
/// `digits` fractional digits, and trailing zeros are dropped, so
/// `3.1230000` with four digits becomes `"3.123"` rather than `"3.1230"`.
///
/// # Examples
///
/// ```rust
/// use xmlconf_core::values::format_double;
///
/// assert_eq!(format_double(3.1230000, 4), "3.123");
/// assert_eq!(format_double(14.0, -1), "14");
/// assert_eq!(format_double(2.0, 2), "2");
/// assert_eq!(format_double(2.675, 2), "2.68");
/// ```
pub fn format_double(value: f64, digits: i32) -> String {
    if digits < 0 || !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    // `d.ddddddddddddddde<exp>`: exactly FORMAT_SIGNIFICANT_DIGITS digits.
    let scientific = format!("{:.*e}", FORMAT_SIGNIFICANT_DIGITS - 1, value.abs());
    let Some((mantissa, exponent)) = scientific.split_once('e') else {
        return value.to_string();
    };
    let Ok(exponent) = exponent.parse::<i64>() else {
        return value.to_string();
    };
    let mut decimal: Vec<u8> = mantissa
        .bytes()
        .filter(u8::is_ascii_digit)
        .map(|b| b - b'0')
        .collect();
    // Number of digits in `decimal` before the decimal point; may be <= 0.
    let mut point = exponent + 1;

    let keep = point + i64::from(digits);
    if keep < 0 {
        return "0".to_string();
    }
    if let Ok(keep) = usize::try_from(keep) {
        if keep < decimal.len() {
            let round_up = decimal[keep] >= 5;
            decimal.truncate(keep);
            if round_up && increment(&mut decimal) {
                decimal.insert(0, 1);
                point += 1;
            }
        }
    }

    let text = render_decimal(&decimal, point);
    if text == "0" || value.is_sign_positive() {
        text
    } else {
        format!("-{text}")
    }
}

/// Adds one unit in the last place.  Returns `true` on carry out of the
/// first digit (an empty slice always carries).
fn increment(decimal: &mut [u8]) -> bool {
    for digit in decimal.iter_mut().rev() {
        if *digit == 9 {
            *digit = 0;
        } else {
            *digit += 1;
            return false;
        }
    }
    true
}

/// Writes unsigned decimal digits with `point` digits before the decimal
/// point, dropping trailing fractional zeros.
fn render_decimal(decimal: &[u8], point: i64) -> String {
    let char_of = |d: &u8| char::from(b'0' + d);
    let split = usize::try_from(point.max(0)).unwrap_or(usize::MAX);

    let mut text = String::new();
    if split == 0 {
        text.push('0');
    } else {
        text.extend(decimal.iter().take(split).map(char_of));
        text.extend(std::iter::repeat('0').take(split.saturating_sub(decimal.len())));
    }

    let leading_zeros = usize::try_from(-point.min(0)).unwrap_or(0);
    let fraction: String = std::iter::repeat('0')
        .take(leading_zeros)
        .chain(decimal.iter().skip(split).map(char_of))
        .collect();
    let fraction = fraction.trim_end_matches('0');
    if !fraction.is_empty() {
        text.push('.');
        text.push_str(fraction);
    }

    let trimmed = text.trim_start_matches('0');
    if trimmed.is_empty() || trimmed.starts_with('.') {
        format!("0{trimmed}")
    } else {
        trimmed.to_string()
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    // ── parse_bool ────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_bool_accepts_truthy_spellings() {
        for raw in ["1", "yes", "Yes", "YES", "true", "TRUE", "True", "  true  "] {
            assert!(parse_bool(raw), "{raw:?} must be true");
        }
    }

    #[test]
    fn test_parse_bool_rejects_everything_else() {
        for raw in ["0", "no", "false", "", "  ", "on", "2", "y", "t", "01"] {
            assert!(!parse_bool(raw), "{raw:?} must be false");
        }
    }

    #[test]
    fn test_format_bool_writes_one_and_zero() {
        assert_eq!(format_bool(true), "1");
        assert_eq!(format_bool(false), "0");
    }

    // ── parse_int ─────────────────────────────────────────────────────────────

    #[test]
    fn test_parse_int_handles_signs_and_whitespace() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int(" -7 "), Some(-7));
        assert_eq!(parse_int("+3"), Some(3));
    }

    #[test]
    fn test_parse_int_rejects_invalid_input() {
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("1.5"), None);
        // One past i32::MAX overflows.
        assert_eq!(parse_int("2147483648"), None);
    }

    // ── parse_double / round_to_digits ────────────────────────────────────────

    #[test]
    fn test_parse_double_accepts_common_forms() {
        assert_eq!(parse_double("3.14159"), Some(3.14159));
        assert_eq!(parse_double(" 14 "), Some(14.0));
        assert_eq!(parse_double("1e3"), Some(1000.0));
        assert_eq!(parse_double("-0.5"), Some(-0.5));
    }

    #[test]
    fn test_parse_double_rejects_garbage() {
        assert_eq!(parse_double("abc"), None);
        assert_eq!(parse_double(""), None);
        assert_eq!(parse_double("1,5"), None);
    }

    #[test]
    fn test_round_to_digits_two_places() {
        assert_eq!(round_to_digits(3.14159, 2), 3.14);
        assert_eq!(round_to_digits(3.14159, 0), 3.0);
    }

    #[test]
    fn test_round_to_digits_negative_digits_is_identity() {
        assert_eq!(round_to_digits(3.14159, -1), 3.14159);
        assert_eq!(round_to_digits(3.14159, -5), 3.14159);
    }

    #[test]
    fn test_round_to_digits_midpoint_goes_to_even() {
        assert_eq!(round_to_digits(2.5, 0), 2.0);
        assert_eq!(round_to_digits(3.5, 0), 4.0);
        assert_eq!(round_to_digits(-2.5, 0), -2.0);
        // 0.125 is exactly representable, so this is a true midpoint.
        assert_eq!(round_to_digits(0.125, 2), 0.12);
    }

    #[test]
    fn test_round_to_digits_leaves_extreme_inputs_alone() {
        assert!(round_to_digits(f64::NAN, 2).is_nan());
        assert_eq!(round_to_digits(f64::INFINITY, 2), f64::INFINITY);
        assert_eq!(round_to_digits(1.23456, 16), 1.23456);
        assert_eq!(round_to_digits(1e300, 10), 1e300);
    }

    // ── format_double ─────────────────────────────────────────────────────────

    #[test]
    fn test_format_double_trims_optional_digits() {
        assert_eq!(format_double(3.1230000, 4), "3.123");
        assert_eq!(format_double(3.14159, 2), "3.14");
        assert_eq!(format_double(2.0, 2), "2");
        assert_eq!(format_double(10.0, 0), "10");
        assert_eq!(format_double(1234.5678, 2), "1234.57");
        assert_eq!(format_double(0.0001234, 6), "0.000123");
    }

    #[test]
    fn test_format_double_midpoints_round_away_from_zero() {
        assert_eq!(format_double(0.125, 2), "0.13");
        assert_eq!(format_double(2.5, 0), "3");
        assert_eq!(format_double(2.675, 2), "2.68");
        assert_eq!(format_double(1.005, 2), "1.01");
        assert_eq!(format_double(-2.5, 0), "-3");
        assert_eq!(format_double(-0.125, 2), "-0.13");
    }

    #[test]
    fn test_format_double_carries_into_new_digit() {
        assert_eq!(format_double(0.999, 2), "1");
        assert_eq!(format_double(9.96, 1), "10");
        assert_eq!(format_double(0.5, 0), "1");
        assert_eq!(format_double(0.4, 0), "0");
    }

    #[test]
    fn test_format_double_huge_digit_count_stays_short() {
        assert_eq!(format_double(1.5, i32::MAX), "1.5");
        assert_eq!(format_double(0.1, i32::MAX), "0.1");
    }

    #[test]
    fn test_format_double_large_and_non_finite_values() {
        assert_eq!(format_double(1e20, 2), "100000000000000000000");
        assert_eq!(format_double(f64::INFINITY, 2), "inf");
        assert_eq!(format_double(f64::NAN, 2), "NaN");
    }

    #[test]
    fn test_format_double_without_digits_is_shortest_round_trip() {
        assert_eq!(format_double(14.0, -1), "14");
        assert_eq!(format_double(0.1, -1), "0.1");
        assert_eq!(format_double(-2.75, -1), "-2.75");
        assert_eq!(parse_double(&format_double(1.0 / 3.0, -1)), Some(1.0 / 3.0));
    }

    #[test]
    fn test_format_double_never_writes_negative_zero() {
        assert_eq!(format_double(-0.001, 2), "0");
    }
}
