// zfs_management/size.rs
// Decoding of libzfs formatted sizes ("1.2G") into byte counts

use crate::error::{SizeFault, ZfsError, ZfsResult};

/// Parse a size as libzfs formats it into a byte count.
///
/// Accepts plain digits (already bytes) or a decimal number followed by one
/// of `K`, `M`, `G`, `T`, `P` (powers of 1024, case-insensitive). Either `.`
/// or `,` may separate the fraction.
///
/// libzfs prints sizes with limited precision, so the result is only as
/// exact as the string. The value is scaled by 1024 and rounded once before
/// the remaining multiplication, which is done in integers.
pub fn decode_size(input: &str) -> ZfsResult<u64> {
    if is_digits(input) {
        return input
            .parse::<u64>()
            .map_err(|_| ZfsError::invalid_format(input, SizeFault::OutOfRange));
    }

    let mut chars = input.chars();
    let suffix = chars
        .next_back()
        .ok_or_else(|| ZfsError::invalid_format(input, SizeFault::NotNumeric))?;
    let number = chars.as_str();
    if !is_decimal(number) {
        return Err(ZfsError::invalid_format(input, SizeFault::NotNumeric));
    }

    let multiplier = magnitude(suffix)
        .ok_or_else(|| ZfsError::invalid_format(input, SizeFault::IllegalSymbol))?;

    let value: f64 = number
        .replace(',', ".")
        .parse()
        .map_err(|_| ZfsError::invalid_format(input, SizeFault::NotNumeric))?;

    let scaled = (value * 1024.0).round();
    if !scaled.is_finite() || scaled >= u64::MAX as f64 {
        return Err(ZfsError::invalid_format(input, SizeFault::OutOfRange));
    }

    (scaled as u64)
        .checked_mul(multiplier / 1024)
        .ok_or_else(|| ZfsError::invalid_format(input, SizeFault::OutOfRange))
}

/// Multiplier for a magnitude suffix.
fn magnitude(suffix: char) -> Option<u64> {
    let exponent = match suffix.to_ascii_uppercase() {
        'K' => 1,
        'M' => 2,
        'G' => 3,
        'T' => 4,
        'P' => 5,
        _ => return None,
    };
    Some(1024u64.pow(exponent))
}

fn is_digits(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit())
}

/// `digits` or `digits[.,]digits`
fn is_decimal(s: &str) -> bool {
    match s.find(['.', ',']) {
        Some(pos) => is_digits(&s[..pos]) && is_digits(&s[pos + 1..]),
        None => is_digits(s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fault(input: &str) -> SizeFault {
        match decode_size(input) {
            Err(ZfsError::InvalidFormat { reason, .. }) => reason,
            other => panic!("expected InvalidFormat for {:?}, got {:?}", input, other),
        }
    }

    #[test]
    fn test_plain_bytes() {
        assert_eq!(decode_size("1024").unwrap(), 1024);
        assert_eq!(decode_size("0").unwrap(), 0);
    }

    #[test]
    fn test_integer_with_suffix() {
        assert_eq!(decode_size("1K").unwrap(), 1024);
        assert_eq!(decode_size("2M").unwrap(), 2_097_152);
        assert_eq!(decode_size("3T").unwrap(), 3 * 1024u64.pow(4));
        assert_eq!(decode_size("1P").unwrap(), 1024u64.pow(5));
    }

    #[test]
    fn test_fraction_with_dot_and_comma() {
        assert_eq!(decode_size("1.5K").unwrap(), 1536);
        assert_eq!(decode_size("1,5G").unwrap(), 1_610_612_736);
        assert_eq!(decode_size("1.5G").unwrap(), decode_size("1,5G").unwrap());
    }

    #[test]
    fn test_suffix_is_case_insensitive() {
        assert_eq!(decode_size("1k").unwrap(), 1024);
        assert_eq!(decode_size("2g").unwrap(), 2 * 1024u64.pow(3));
    }

    #[test]
    fn test_rounding_happens_before_large_multiply() {
        // 1.2 * 1024 = 1228.8 -> 1229, then exact integer scaling
        assert_eq!(decode_size("1.2G").unwrap(), 1229 * 1024 * 1024);
        assert_eq!(decode_size("1.2G").unwrap() % (1024 * 1024), 0);
    }

    #[test]
    fn test_not_numeric() {
        assert_eq!(fault("abcK"), SizeFault::NotNumeric);
        assert_eq!(fault("K"), SizeFault::NotNumeric);
        assert_eq!(fault(""), SizeFault::NotNumeric);
        assert_eq!(fault("1..5K"), SizeFault::NotNumeric);
        assert_eq!(fault("1.K"), SizeFault::NotNumeric);
        assert_eq!(fault(".5K"), SizeFault::NotNumeric);
        assert_eq!(fault("-1K"), SizeFault::NotNumeric);
        assert_eq!(fault("1.5KB"), SizeFault::NotNumeric);
    }

    #[test]
    fn test_illegal_symbol() {
        assert_eq!(fault("5Q"), SizeFault::IllegalSymbol);
        assert_eq!(fault("1.5B"), SizeFault::IllegalSymbol);
        // the last digit is taken as the suffix
        assert_eq!(fault("15.25"), SizeFault::IllegalSymbol);
        assert_eq!(fault("1.5"), SizeFault::NotNumeric);
    }

    #[test]
    fn test_out_of_range() {
        assert_eq!(fault("99999999999999999999999999999"), SizeFault::OutOfRange);
        assert_eq!(fault("99999999999P"), SizeFault::OutOfRange);
    }

    #[test]
    fn test_multibyte_suffix_is_rejected() {
        assert_eq!(fault("5€"), SizeFault::IllegalSymbol);
    }

    #[test]
    fn test_decode_is_deterministic() {
        for input in ["1.2G", "931,5M", "7.27T", "512", "0.5P"] {
            assert_eq!(decode_size(input).unwrap(), decode_size(input).unwrap());
        }
    }
}
