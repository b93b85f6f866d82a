//! Canonical number rendering shared by the encoder and the strict validator.

use itoa::Buffer as ItoaBuffer;
use ryu::Buffer as RyuBuffer;

/// Render `f` the way TOON numbers are written: integral values with no
/// decimal point, everything else via the shortest round-trip
/// representation, never using exponential notation.
pub(crate) fn write_canonical_number_into(f: f64, out: &mut String) {
    if f.is_finite() && f.fract() == 0.0 && f.abs() <= i64::MAX as f64 {
        let mut buf = ItoaBuffer::new();
        out.push_str(buf.format(f as i64));
        return;
    }

    if !f.is_finite() {
        out.push('0');
        return;
    }

    let mut buf = RyuBuffer::new();
    let formatted = buf.format(f);

    if formatted.contains('e') || formatted.contains('E') {
        write_without_exponent(f, out);
    } else {
        push_trimmed_decimal(formatted, out);
    }
}

fn write_without_exponent(f: f64, out: &mut String) {
    if f == 0.0 {
        out.push('0');
        return;
    }
    let result = format!("{f:.17}");
    push_trimmed_decimal(&result, out);
}

fn push_trimmed_decimal(s: &str, out: &mut String) {
    if let Some((int_part, frac_part)) = s.split_once('.') {
        let trimmed = frac_part.trim_end_matches('0');
        out.push_str(int_part);
        if !trimmed.is_empty() {
            out.push('.');
            out.push_str(trimmed);
        }
    } else {
        out.push_str(s);
    }
}

/// Render `f` as a standalone `String` (convenience wrapper).
pub(crate) fn canonical_number(f: f64) -> String {
    let mut out = String::new();
    write_canonical_number_into(f, &mut out);
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[rstest::rstest]
    fn test_format_canonical_integers() {
        assert_eq!(canonical_number(42.0), "42");
        assert_eq!(canonical_number(-123.0), "-123");
        assert_eq!(canonical_number(0.0), "0");
        assert_eq!(canonical_number(-0.0), "0");
    }

    #[rstest::rstest]
    fn test_format_canonical_floats() {
        assert_eq!(canonical_number(1.5), "1.5");
        let result = canonical_number(std::f64::consts::PI);
        assert!(result.starts_with("3.141592653589793"));
        assert!(!result.contains('e'));
    }

    #[rstest::rstest]
    fn test_large_numbers_no_exponent() {
        assert_eq!(canonical_number(1_000_000.0), "1000000");
        assert_eq!(canonical_number(1_000_000_000.0), "1000000000");
    }

    #[rstest::rstest]
    fn test_small_numbers_no_exponent() {
        let result = canonical_number(0.000001);
        assert!(result.starts_with("0.000001"));
        assert!(!result.contains('e'));
        assert_eq!(canonical_number(0.001), "0.001");
    }

    #[rstest::rstest]
    fn test_non_finite_renders_as_zero() {
        assert_eq!(canonical_number(f64::NAN), "0");
        assert_eq!(canonical_number(f64::INFINITY), "0");
        assert_eq!(canonical_number(f64::NEG_INFINITY), "0");
    }
}
