//! Conversion of raw configuration bytes into scalar values.

use crate::error::ValueError;
use base64::Engine;
use base64::alphabet;
use base64::engine::{GeneralPurpose, GeneralPurposeConfig};
use std::time::Duration;

/// Interpret bytes as UTF-8 text, without trimming.
pub(crate) fn text(bytes: Vec<u8>) -> Result<String, ValueError> {
    String::from_utf8(bytes).map_err(|_| ValueError::InvalidUtf8)
}

/// Parse a boolean.
///
/// Empty text is an error rather than `false`. `"0"` and any casing of
/// `"false"` are `false`; every other value is `true`.
pub(crate) fn boolean(s: &str) -> Result<bool, ValueError> {
    if s.is_empty() {
        return Err(ValueError::Empty);
    }
    if s == "0" || s.to_lowercase() == "false" {
        return Ok(false);
    }
    Ok(true)
}

/// Standard padded alphabet that ignores non-zero bits after the last byte.
const STANDARD_LENIENT: GeneralPurpose = GeneralPurpose::new(
    &alphabet::STANDARD,
    GeneralPurposeConfig::new().with_decode_allow_trailing_bits(true),
);

/// Decode standard padded base64. Line breaks are ignored.
pub(crate) fn base64(s: &str) -> Result<Vec<u8>, ValueError> {
    if s.is_empty() {
        return Err(ValueError::Empty);
    }
    let cleaned: Vec<u8> = s.bytes().filter(|b| !matches!(b, b'\r' | b'\n')).collect();
    Ok(STANDARD_LENIENT.decode(cleaned)?)
}

const NANOSECOND: u64 = 1;
const MICROSECOND: u64 = 1_000 * NANOSECOND;
const MILLISECOND: u64 = 1_000 * MICROSECOND;
const SECOND: u64 = 1_000 * MILLISECOND;
const MINUTE: u64 = 60 * SECOND;
const HOUR: u64 = 60 * MINUTE;

fn unit_nanos(unit: &str) -> Option<u64> {
    match unit {
        "ns" => Some(NANOSECOND),
        // U+00B5 micro sign and U+03BC Greek small letter mu
        "us" | "\u{b5}s" | "\u{3bc}s" => Some(MICROSECOND),
        "ms" => Some(MILLISECOND),
        "s" => Some(SECOND),
        "m" => Some(MINUTE),
        "h" => Some(HOUR),
        _ => None,
    }
}

/// Parse a duration such as `"300ms"`, `"1.5h"` or `"2h45m"`.
///
/// The grammar is an optional sign followed by one or more
/// `digits[.digits]unit` components. Valid units are `ns`, `us` (or `µs`),
/// `ms`, `s`, `m` and `h`. The bare literal `"0"` needs no unit.
pub fn parse_duration(s: &str) -> Result<Duration, ValueError> {
    let invalid = || ValueError::InvalidDuration(s.to_string());

    let (negative, mut rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    if rest == "0" {
        return Ok(Duration::ZERO);
    }
    if rest.is_empty() {
        return Err(invalid());
    }

    let mut total: u64 = 0;
    while !rest.is_empty() {
        // Integer part
        let int_len = leading_digits(rest);
        let (int_digits, after_int) = rest.split_at(int_len);
        let mut whole: u64 = 0;
        for d in int_digits.bytes() {
            whole = whole
                .checked_mul(10)
                .and_then(|v| v.checked_add(u64::from(d - b'0')))
                .ok_or_else(|| ValueError::DurationOverflow(s.to_string()))?;
        }
        rest = after_int;

        // Fraction part; digits that would overflow are dropped
        let mut frac: u64 = 0;
        let mut scale: f64 = 1.0;
        let mut frac_len = 0;
        if let Some(after_dot) = rest.strip_prefix('.') {
            frac_len = leading_digits(after_dot);
            let mut overflowed = false;
            for d in after_dot[..frac_len].bytes() {
                if overflowed {
                    continue;
                }
                match frac
                    .checked_mul(10)
                    .and_then(|v| v.checked_add(u64::from(d - b'0')))
                {
                    Some(v) => {
                        frac = v;
                        scale *= 10.0;
                    }
                    None => overflowed = true,
                }
            }
            rest = &after_dot[frac_len..];
        }

        if int_len == 0 && frac_len == 0 {
            return Err(invalid());
        }

        // Unit
        let unit_len = rest
            .find(|c: char| c == '.' || c.is_ascii_digit())
            .unwrap_or(rest.len());
        if unit_len == 0 {
            return Err(ValueError::MissingUnit(s.to_string()));
        }
        let (unit, after_unit) = rest.split_at(unit_len);
        let unit_ns = unit_nanos(unit).ok_or_else(|| ValueError::UnknownUnit {
            unit: unit.to_string(),
            value: s.to_string(),
        })?;
        rest = after_unit;

        let overflow = || ValueError::DurationOverflow(s.to_string());
        let mut component = whole.checked_mul(unit_ns).ok_or_else(overflow)?;
        if frac > 0 {
            let fractional = (frac as f64 * (unit_ns as f64 / scale)) as u64;
            component = component.checked_add(fractional).ok_or_else(overflow)?;
        }
        total = total.checked_add(component).ok_or_else(overflow)?;
    }

    if negative && total > 0 {
        return Err(ValueError::NegativeDuration(s.to_string()));
    }
    Ok(Duration::from_nanos(total))
}

fn leading_digits(s: &str) -> usize {
    s.bytes().take_while(u8::is_ascii_digit).count()
}
