//! C7 — the public façade (spec §4 "Public API (façade)").
//!
//! Every other module in this crate is reachable directly, but these six
//! functions are the supported entry points: they own the "canonicalize,
//! extract, validate" sequencing so callers never have to assemble the
//! pipeline themselves.

use crate::canonicalize::canonicalize;
use crate::checksum;
use crate::fields::extract;
use crate::normalize::NumericView;
use crate::options::ParseOptions;
use crate::record::ParsedRecord;
use crate::schema::LINE_LENGTH;
use crate::state_machine::{self, StateMachineResult};
use crate::validate::{validate, ValidationReport};
use chrono::{DateTime, Utc};
use tle_types::{ErrorCode, Issue, LineNumber, Result, TleError, ValidationError};

/// Parse TLE text into a [`ParsedRecord`], running canonicalization,
/// field extraction, and (unless `options.validate` is `false`)
/// validation, in order.
///
/// Returns `Err(TleError::Format(_))` if the input fails structural
/// preconditions (empty input, wrong line count) before any field can be
/// extracted, or `Err(TleError::Validation(_))` if validation collects
/// at least one error-severity issue. On success, informational warnings
/// (if any, and if `options.include_warnings`) travel on
/// [`ParsedRecord::warnings`].
pub fn parse_tle(text: &str, options: &ParseOptions) -> Result<ParsedRecord> {
    parse_tle_at(text, options, Utc::now())
}

/// [`parse_tle`] with an explicit reference date, for deterministic
/// epoch-recency checks (`STALE_TLE_WARNING`) in tests and replay tooling.
pub fn parse_tle_at(
    text: &str,
    options: &ParseOptions,
    reference_date: DateTime<Utc>,
) -> Result<ParsedRecord> {
    let (lines, mut warnings) = canonicalize(text)?;
    let fields = extract(&lines.line1, &lines.line2);

    if options.validate {
        let report = validate(&lines, &fields, options, reference_date);
        warnings.extend(report.warnings.clone());
        if !report.is_valid {
            return Err(TleError::Validation(ValidationError {
                errors: report.errors,
                warnings: report.warnings,
            }));
        }
    }

    let record = ParsedRecord {
        fields,
        satellite_name: lines.name,
        warnings: if options.include_warnings { warnings } else { Vec::new() },
        comments: if options.include_comments { lines.comments } else { Vec::new() },
    };

    #[cfg(feature = "log")]
    log::info!(
        "parsed TLE for satellite {}",
        record.satellite_number().unwrap_or("?")
    );

    Ok(record)
}

/// Validate TLE text without requiring it to succeed; always returns a
/// [`ValidationReport`] rather than a `Result`, so callers inspecting a
/// record's health (e.g. a batch quality sweep) don't pay for
/// `ParsedRecord` construction they'll discard.
pub fn validate_tle(text: &str, options: &ParseOptions) -> std::result::Result<ValidationReport, Issue> {
    validate_tle_at(text, options, Utc::now())
}

/// [`validate_tle`] with an explicit reference date.
///
/// Per spec §7, only the two hard input-type preconditions
/// (`INVALID_INPUT_TYPE`, `EMPTY_INPUT`) throw; every other structural
/// failure — including `INVALID_LINE_COUNT`, which Rust's type system
/// can otherwise only reach through this path — is folded into the
/// returned report as an error-severity issue instead.
pub fn validate_tle_at(
    text: &str,
    options: &ParseOptions,
    reference_date: DateTime<Utc>,
) -> std::result::Result<ValidationReport, Issue> {
    let (lines, _warnings) = match canonicalize(text) {
        Ok(v) => v,
        Err(e) if e.code == ErrorCode::EmptyInput => {
            return Err(Issue::new(e.code, e.message));
        }
        Err(e) => {
            return Ok(ValidationReport {
                is_valid: false,
                errors: vec![Issue::new(e.code, e.message)],
                warnings: Vec::new(),
            });
        }
    };
    let fields = extract(&lines.line1, &lines.line2);
    Ok(validate(&lines, &fields, options, reference_date))
}

/// Parse and also build the typed [`NumericView`], for callers that want
/// decoded numeric fields (epoch instant, eccentricity, B*, ...) rather
/// than the string-exact [`ParsedRecord`] alone.
pub fn parse_tle_numeric(text: &str, options: &ParseOptions) -> Result<(ParsedRecord, NumericView)> {
    let record = parse_tle(text, options)?;
    let numeric = NumericView::build(&record.fields).map_err(|e| {
        TleError::Validation(ValidationError {
            errors: vec![e.0],
            warnings: Vec::new(),
        })
    })?;
    Ok((record, numeric))
}

/// Run the recovering state machine (spec §4.5) instead of the
/// straight-line pipeline; never fails outright, see
/// [`StateMachineResult`].
pub fn parse_with_state_machine(text: &str, options: &ParseOptions) -> StateMachineResult {
    state_machine::parse_with_state_machine(text, options, Utc::now())
}

/// Compute a line's modulo-10 checksum (spec §4.3.1).
pub fn calculate_checksum(line: &str) -> u8 {
    checksum::calculate(line)
}

/// Validate a line's trailing checksum digit against the computed value
/// (spec §4.7 `validate_checksum(line) → {valid, expected, actual,
/// error?}`).
pub fn validate_checksum(line: &str) -> checksum::ChecksumCheck {
    checksum::validate(line)
}

/// Check only a line's length and leading line-number character (layers
/// 3-4), without running the rest of the validator. Useful for a cheap
/// pre-filter over a large batch before the full pipeline runs.
pub fn validate_line_structure(line: &str, expected: LineNumber) -> Vec<Issue> {
    let mut issues = Vec::new();
    if line.len() != LINE_LENGTH {
        issues.push(
            Issue::new(
                ErrorCode::InvalidLineLength,
                format!("line must be exactly {LINE_LENGTH} characters, found {}", line.len()),
            )
            .with_line(expected)
            .with_expected_actual(LINE_LENGTH, line.len()),
        );
    }
    if line.chars().next() != Some(expected.expected_char()) {
        issues.push(
            Issue::new(
                ErrorCode::InvalidLineNumber,
                format!("line must start with '{}'", expected.expected_char()),
            )
            .with_line(expected)
            .with_position(0),
        );
    }
    issues
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_TLE: &str = "ISS (ZARYA)\n1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927\n2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn parse_tle_succeeds_on_clean_input() {
        let record = parse_tle(ISS_TLE, &ParseOptions::default()).unwrap();
        assert_eq!(record.satellite_number(), Some("25544"));
        assert_eq!(record.satellite_name.as_deref(), Some("ISS (ZARYA)"));
    }

    #[test]
    fn parse_tle_rejects_flipped_checksum_in_strict_mode() {
        let mut lines: Vec<&str> = ISS_TLE.lines().collect();
        let mut line1 = lines[1].to_string();
        line1.replace_range(68.., "9");
        lines[1] = &line1;
        let bad = lines.join("\n");

        let err = parse_tle(&bad, &ParseOptions::default()).unwrap_err();
        match err {
            TleError::Validation(v) => assert!(v.errors.iter().any(|i| i.code == ErrorCode::ChecksumMismatch)),
            TleError::Format(_) => panic!("expected a validation error"),
        }
    }

    #[test]
    fn parse_tle_numeric_exposes_decoded_eccentricity() {
        let (_, numeric) = parse_tle_numeric(ISS_TLE, &ParseOptions::default()).unwrap();
        assert!((numeric.eccentricity - 0.0006703).abs() < 1e-9);
    }

    #[test]
    fn validate_checksum_matches_known_value() {
        let check = validate_checksum("1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927");
        assert!(check.valid);
        assert_eq!(check.expected, 7);
        assert_eq!(check.actual, Some(7));
        assert_eq!(check.error, None);
        assert_eq!(calculate_checksum("1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927"), 7);
    }

    #[test]
    fn validate_line_structure_flags_both_layers_independently() {
        let issues = validate_line_structure("2 25544", LineNumber::One);
        assert!(issues.iter().any(|i| i.code == ErrorCode::InvalidLineLength));
        assert!(issues.iter().any(|i| i.code == ErrorCode::InvalidLineNumber));
    }

    #[test]
    fn validate_tle_reports_invalid_line_count_instead_of_throwing() {
        let report = validate_tle("1 25544U 98067A   08264.51782528", &ParseOptions::default()).unwrap();
        assert!(!report.is_valid);
        assert!(report.errors.iter().any(|i| i.code == ErrorCode::InvalidLineCount));
    }

    #[test]
    fn validate_tle_still_throws_on_empty_input() {
        let err = validate_tle("", &ParseOptions::default()).unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyInput);
    }
}
