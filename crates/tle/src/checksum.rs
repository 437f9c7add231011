//! Centralized checksum arithmetic (spec §4.3.1, §9 "centralize each in a
//! single pure function"). Every other component calls these two
//! functions rather than re-deriving the modulo-10 sum.

use crate::schema::LINE_LENGTH;

/// Compute the modulo-10 checksum of a line's first 68 characters
/// (positions 0..68). Digits contribute their value, `'-'` contributes 1,
/// everything else (letters, space, `.`, `+`) contributes 0.
///
/// Per spec §8 property 1, this is defined over any string at least 68
/// characters long; callers pass a 69-character data line and the 69th
/// character (the checksum digit itself) is never summed.
pub fn calculate(line: &str) -> u8 {
    let sum: u32 = line
        .chars()
        .take(68)
        .map(|c| match c {
            '0'..='9' => c.to_digit(10).unwrap(),
            '-' => 1,
            _ => 0,
        })
        .sum();
    (sum % 10) as u8
}

/// Outcome of validating a line's trailing checksum digit against the
/// computed value (spec §4.7 `validate_checksum(line) → {valid,
/// expected, actual, error?}`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChecksumCheck {
    /// Whether the checksum matched.
    pub valid: bool,
    /// Computed checksum.
    pub expected: u8,
    /// The digit actually present at position 68, if it was a digit.
    pub actual: Option<u8>,
    /// Set when the checksum position did not hold a digit at all,
    /// rather than holding the wrong digit.
    pub error: Option<&'static str>,
}

/// Validate a line's checksum. Requires the line to be at least 69
/// characters; the checksum position must hold an ASCII digit or
/// `actual` is `None` and `error` is set (caller should raise
/// `INVALID_CHECKSUM_CHARACTER`).
pub fn validate(line: &str) -> ChecksumCheck {
    let expected = calculate(line);
    let actual = line.chars().nth(68).and_then(|c| c.to_digit(10)).map(|d| d as u8);
    let error = if line.chars().count() < LINE_LENGTH {
        Some("line is shorter than 69 characters")
    } else if actual.is_none() {
        Some("checksum position (column 68) is not a digit")
    } else {
        None
    };
    ChecksumCheck {
        valid: actual == Some(expected),
        expected,
        actual,
        error,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn iss_lines_checksum_to_seven() {
        assert_eq!(calculate(ISS_LINE1), 7);
        assert_eq!(calculate(ISS_LINE2), 7);
    }

    #[test]
    fn validate_matches_calculate() {
        let check = validate(ISS_LINE1);
        assert!(check.valid);
        assert_eq!(check.expected, 7);
        assert_eq!(check.actual, Some(7));
    }

    #[test]
    fn letters_and_punctuation_contribute_zero_minus_contributes_one() {
        let line = format!("{}0", "A.+ ".repeat(17));
        assert_eq!(line.chars().count(), 69);
        assert_eq!(calculate(&line), 0);

        let mut dashes = "-".repeat(68);
        dashes.push('0');
        // 68 dashes => sum 68 => mod 10 = 8
        assert_eq!(calculate(&dashes), 8);
    }

    #[test]
    fn flipping_the_checksum_digit_is_detected() {
        let mut mutated = ISS_LINE1.to_string();
        mutated.replace_range(68.., "9");
        let check = validate(&mutated);
        assert!(!check.valid);
        assert_eq!(check.expected, 7);
        assert_eq!(check.actual, Some(9));
        assert_eq!(check.error, None);
    }

    #[test]
    fn non_digit_checksum_character_is_reported_as_error_not_mismatch() {
        let mut mutated = ISS_LINE1.to_string();
        mutated.replace_range(68.., "X");
        let check = validate(&mutated);
        assert!(!check.valid);
        assert_eq!(check.actual, None);
        assert!(check.error.is_some());
    }
}
