//! Centralized assumed-decimal / mnemonic scientific-notation decoding
//! (spec §4.4, §9 "centralize each in a single pure function").
//!
//! TLE encodes small signed quantities as `±NNNNN±E`: a 5-digit mantissa
//! with an implicit leading `0.`, followed by a signed single-digit
//! power-of-ten exponent. `" 12345-3"` means `+0.12345 * 10^-3`. Mantissa
//! sign defaults to positive when the leading column is blank.

/// Decode a TLE mnemonic scientific-notation field (e.g. `second_derivative`
/// or `b_star`, columns 44-52 / 53-61 of line 1).
///
/// Returns `0.0` for the canonical zero encodings (`"00000-0"`,
/// `"00000+0"`, `"00000 0"`) and for an empty/blank field, and `None` if
/// the field does not otherwise match the `±NNNNN±E` shape.
pub fn decode_assumed_decimal_exponential(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let (mantissa_sign, rest) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1.0, rest),
        None => (1.0, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };

    // Last two characters are the exponent sign and exponent digit.
    if rest.len() < 2 {
        return None;
    }
    let (mantissa_digits, exp_part) = rest.split_at(rest.len() - 2);
    if !mantissa_digits.chars().all(|c| c.is_ascii_digit()) || mantissa_digits.is_empty() {
        return None;
    }

    let mut exp_chars = exp_part.chars();
    let exp_sign_char = exp_chars.next()?;
    let exp_digit_char = exp_chars.next()?;
    let exp_sign = match exp_sign_char {
        '-' => -1i32,
        '+' | ' ' => 1i32,
        _ => return None,
    };
    let exp_digit = exp_digit_char.to_digit(10)? as i32;
    let exponent = exp_sign * exp_digit;

    if mantissa_digits.chars().all(|c| c == '0') {
        return Some(0.0);
    }

    let mantissa: f64 = format!("0.{mantissa_digits}").parse().ok()?;
    Some(mantissa_sign * mantissa * 10f64.powi(exponent))
}

/// Decode the 7-digit assumed-decimal eccentricity field: `"0006703"` ->
/// `0.0006703`.
pub fn decode_eccentricity(raw: &str) -> Option<f64> {
    let trimmed = raw.trim();
    if trimmed.is_empty() || !trimmed.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    format!("0.{trimmed}").parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_negative_mantissa_negative_exponent() {
        let v = decode_assumed_decimal_exponential(" 27450-4").unwrap();
        assert!((v - 0.2745e-4).abs() < 1e-12);
    }

    #[test]
    fn decodes_bstar_with_explicit_minus_mantissa() {
        let v = decode_assumed_decimal_exponential("-11606-4").unwrap();
        assert!((v - (-0.11606e-4)).abs() < 1e-12);
    }

    #[test]
    fn zero_forms_all_decode_to_exactly_zero() {
        for z in ["00000-0", "00000+0", "00000 0"] {
            assert_eq!(decode_assumed_decimal_exponential(z), Some(0.0));
        }
    }

    #[test]
    fn blank_field_decodes_to_zero() {
        assert_eq!(decode_assumed_decimal_exponential(""), Some(0.0));
        assert_eq!(decode_assumed_decimal_exponential("   "), Some(0.0));
    }

    #[test]
    fn eccentricity_prepends_leading_zero_point() {
        assert_eq!(decode_eccentricity("0006703"), Some(0.0006703));
        assert_eq!(decode_eccentricity("9999999").unwrap(), 0.9999999);
    }

    #[test]
    fn eccentricity_rejects_non_digits() {
        assert_eq!(decode_eccentricity("12a4567"), None);
    }
}
