//! C3 — `Validator` (spec §4.3).
//!
//! Runs layers 3-9 against already-canonicalized lines and an already
//! extracted [`FieldMap`] (layers 1-2 are `canonicalize`'s job and are
//! reported as a [`tle_types::FormatError`] before this module ever runs).
//! Every layer runs to completion and appends to one issue list — layers
//! never short-circuit the overall pass, only their own internal logic
//! (spec §4.3 "always continue across lines so users see all errors").

use crate::canonicalize::CanonicalLines;
use crate::fields::FieldMap;
use crate::normalize;
use crate::options::{classify, Mode, ParseOptions};
use crate::schema::{FieldName, LINE_LENGTH};
use crate::sci;
use chrono::{DateTime, Utc};
use lazy_static::lazy_static;
use regex::Regex;
use tle_types::{ErrorCode, Issue, LineNumber, Severity};

lazy_static! {
    static ref DESIGNATOR_PIECE: Regex = Regex::new(r"^[A-Z]{1,3}$").unwrap();
}

/// `{ is_valid, errors, warnings }` (spec §3 `ValidationReport`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ValidationReport {
    /// True iff no error-severity issue survived mode projection.
    pub is_valid: bool,
    /// Error-severity issues.
    pub errors: Vec<Issue>,
    /// Warning/info-severity issues.
    pub warnings: Vec<Issue>,
}

impl ValidationReport {
    fn from_issues(issues: Vec<Issue>) -> Self {
        let (errors, warnings): (Vec<_>, Vec<_>) = issues.into_iter().partition(Issue::is_error);
        Self {
            is_valid: errors.is_empty(),
            errors,
            warnings,
        }
    }
}

fn push_line_length(issues: &mut Vec<Issue>, line: LineNumber, text: &str, mode: Mode) {
    if text.len() != LINE_LENGTH {
        let severity = classify(ErrorCode::InvalidLineLength, mode);
        issues.push(
            Issue::new(ErrorCode::InvalidLineLength, format!(
                "line {} must be exactly {} characters, found {}",
                line_num(line), LINE_LENGTH, text.len()
            ))
            .with_line(line)
            .with_expected_actual(LINE_LENGTH, text.len())
            .with_severity(severity),
        );
    }
}

fn line_num(line: LineNumber) -> char {
    line.expected_char()
}

fn push_line_number_prefix(issues: &mut Vec<Issue>, line: LineNumber, text: &str, mode: Mode) {
    let expected = line.expected_char();
    let actual = text.chars().next();
    if actual != Some(expected) {
        let severity = classify(ErrorCode::InvalidLineNumber, mode);
        issues.push(
            Issue::new(
                ErrorCode::InvalidLineNumber,
                format!("line {expected} must start with '{expected}'"),
            )
            .with_line(line)
            .with_field(FieldName::LineNumber.as_str())
            .with_expected_actual(expected, actual.map(|c| c.to_string()).unwrap_or_default())
            .with_position(0)
            .with_severity(severity),
        );
    }
}

fn push_checksum(issues: &mut Vec<Issue>, line: LineNumber, text: &str, options: &ParseOptions) {
    if !options.strict_checksums || text.len() < LINE_LENGTH {
        return;
    }
    let check = crate::checksum::validate(text);
    match check.actual {
        None => {
            issues.push(
                Issue::new(
                    ErrorCode::InvalidChecksumCharacter,
                    "checksum position (column 68) must be a digit",
                )
                .with_line(line)
                .with_field(FieldName::Checksum.as_str())
                .with_position(68),
            );
        }
        Some(actual) if !check.valid => {
            let severity = classify(ErrorCode::ChecksumMismatch, options.mode);
            issues.push(
                Issue::new(ErrorCode::ChecksumMismatch, "checksum does not match computed value")
                    .with_line(line)
                    .with_field(FieldName::Checksum.as_str())
                    .with_expected_actual(check.expected, actual)
                    .with_position(68)
                    .with_severity(severity),
            );
        }
        _ => {}
    }
}

fn push_satellite_number_checks(issues: &mut Vec<Issue>, fields: &FieldMap, mode: Mode) {
    let l1 = fields.line1(FieldName::SatelliteNumber).map(|f| f.value.as_str());
    let l2 = fields.line2(FieldName::SatelliteNumber).map(|f| f.value.as_str());

    for (line, value) in [(LineNumber::One, l1), (LineNumber::Two, l2)] {
        if let Some(v) = value {
            if v.is_empty() || !v.chars().all(|c| c.is_ascii_digit()) {
                issues.push(
                    Issue::new(ErrorCode::InvalidSatelliteNumber, "satellite number must be all digits")
                        .with_line(line)
                        .with_field(FieldName::SatelliteNumber.as_str())
                        .with_expected_actual("[0-9]{1,5}", v),
                );
            }
        }
    }

    if let (Some(a), Some(b)) = (l1, l2) {
        if a != b {
            let severity = classify(ErrorCode::SatelliteNumberMismatch, mode);
            issues.push(
                Issue::new(
                    ErrorCode::SatelliteNumberMismatch,
                    "satellite number differs between line 1 and line 2",
                )
                .with_expected_actual(a, b)
                .with_severity(severity),
            );
        }
    }
}

fn push_classification(issues: &mut Vec<Issue>, fields: &FieldMap, mode: Mode) {
    let Some(raw) = fields.line1(FieldName::Classification).map(|f| f.value.as_str()) else {
        return;
    };
    match raw.chars().next() {
        Some('U') => {}
        Some(c @ ('C' | 'S')) => {
            issues.push(
                Issue::new(ErrorCode::ClassifiedDataWarning, "record carries a non-unclassified marking")
                    .with_line(LineNumber::One)
                    .with_field(FieldName::Classification.as_str())
                    .with_actual(c),
            );
        }
        other => {
            let severity = classify(ErrorCode::InvalidClassification, mode);
            issues.push(
                Issue::new(ErrorCode::InvalidClassification, "classification must be one of U, C, S")
                    .with_line(LineNumber::One)
                    .with_field(FieldName::Classification.as_str())
                    .with_expected_actual("U|C|S", other.unwrap_or_default())
                    .with_severity(severity),
            );
        }
    }
}

/// Small helper: `Issue::with_actual` without a matching expected value
/// (used for the two-valued classification warning above).
trait IssueExt {
    fn with_actual(self, actual: impl ToString) -> Self;
}
impl IssueExt for Issue {
    fn with_actual(mut self, actual: impl ToString) -> Self {
        self.actual = Some(actual.to_string());
        self
    }
}

struct RangeSpec {
    field: FieldName,
    line: LineNumber,
    min: f64,
    max: f64,
    /// If true, a violation is always a warning regardless of mode
    /// (mean_motion's >20 rev/day ceiling, spec §4.3 layer 8).
    warning_only: bool,
}

fn parse_plain_float(raw: &str) -> Option<f64> {
    if raw.is_empty() {
        return None;
    }
    raw.parse::<f64>().ok()
}

fn push_numeric_range_checks(issues: &mut Vec<Issue>, fields: &FieldMap, options: &ParseOptions) {
    if !options.validate_ranges {
        return;
    }

    // Fields validated as plain decimals via f64::parse.
    let plain_ranges = [
        RangeSpec { field: FieldName::Inclination, line: LineNumber::Two, min: 0.0, max: 180.0, warning_only: false },
        RangeSpec { field: FieldName::RightAscension, line: LineNumber::Two, min: 0.0, max: 360.0, warning_only: false },
        RangeSpec { field: FieldName::ArgumentOfPerigee, line: LineNumber::Two, min: 0.0, max: 360.0, warning_only: false },
        RangeSpec { field: FieldName::MeanAnomaly, line: LineNumber::Two, min: 0.0, max: 360.0, warning_only: false },
        RangeSpec { field: FieldName::MeanMotion, line: LineNumber::Two, min: 0.0, max: 20.0, warning_only: true },
        RangeSpec { field: FieldName::EpochDay, line: LineNumber::One, min: 1.0, max: 366.99999999, warning_only: false },
    ];

    for spec in &plain_ranges {
        let Some(raw) = fields.get(spec.line, spec.field).map(|f| f.value.as_str()) else {
            continue;
        };
        match parse_plain_float(raw) {
            None => {
                issues.push(
                    Issue::new(ErrorCode::InvalidNumberFormat, format!("{} is not a valid number", spec.field.as_str()))
                        .with_line(spec.line)
                        .with_field(spec.field.as_str())
                        .with_actual(raw),
                );
            }
            Some(value) => {
                if value < spec.min || value > spec.max {
                    let severity = if spec.warning_only {
                        Severity::Warning
                    } else {
                        classify(ErrorCode::ValueOutOfRange, options.mode)
                    };
                    issues.push(
                        Issue::new(
                            ErrorCode::ValueOutOfRange,
                            format!("{} must be between {} and {}", spec.field.as_str(), spec.min, spec.max),
                        )
                        .with_line(spec.line)
                        .with_field(spec.field.as_str())
                        .with_expected_actual(format!("[{}, {}]", spec.min, spec.max), value)
                        .with_severity(severity),
                    );
                }
            }
        }
    }

    // Eccentricity: assumed-decimal 7-digit field, [0, 1).
    if let Some(raw) = fields.line2(FieldName::Eccentricity).map(|f| f.value.as_str()) {
        match sci::decode_eccentricity(raw) {
            None => {
                issues.push(
                    Issue::new(ErrorCode::InvalidNumberFormat, "eccentricity must be 7 digits")
                        .with_line(LineNumber::Two)
                        .with_field(FieldName::Eccentricity.as_str())
                        .with_actual(raw),
                );
            }
            Some(e) => {
                if !(0.0..1.0).contains(&e) {
                    let severity = classify(ErrorCode::ValueOutOfRange, options.mode);
                    issues.push(
                        Issue::new(ErrorCode::ValueOutOfRange, "eccentricity must be in [0, 1)")
                            .with_line(LineNumber::Two)
                            .with_field(FieldName::Eccentricity.as_str())
                            .with_expected_actual("[0, 1)", e)
                            .with_severity(severity),
                    );
                }
            }
        }
    }

    // Optional-blank integer fields: intl_desig_year, intl_desig_launch_number,
    // ephemeris_type, element_set_number, revolution_number, epoch_year,
    // satellite_number. Blank is valid for the fields spec §4.3.2 marks
    // "optional blank"; a non-blank non-numeric value is INVALID_NUMBER_FORMAT.
    check_optional_int_range(issues, fields, LineNumber::One, FieldName::IntlDesigYear, 0, 99, options.mode);
    check_optional_int_range(issues, fields, LineNumber::One, FieldName::IntlDesigLaunchNumber, 1, 999, options.mode);
    check_optional_int_range(issues, fields, LineNumber::One, FieldName::EpochYear, 0, 99, options.mode);
    check_optional_int_range(issues, fields, LineNumber::One, FieldName::EphemerisType, 0, 9, options.mode);
    check_optional_int_range(issues, fields, LineNumber::One, FieldName::ElementSetNumber, 0, 9999, options.mode);
    check_optional_int_range(issues, fields, LineNumber::Two, FieldName::RevolutionNumber, 0, 99999, options.mode);
    check_optional_int_range(issues, fields, LineNumber::One, FieldName::SatelliteNumber, 1, 99999, options.mode);

    // intl_desig_piece: pattern /^[A-Z]{1,3}$/, blank allowed.
    if let Some(raw) = fields.line1(FieldName::IntlDesigPiece).map(|f| f.value.as_str()) {
        if !raw.is_empty() && !DESIGNATOR_PIECE.is_match(raw) {
            issues.push(
                Issue::new(ErrorCode::InvalidNumberFormat, "international designator piece must match [A-Z]{1,3}")
                    .with_line(LineNumber::One)
                    .with_field(FieldName::IntlDesigPiece.as_str())
                    .with_expected_actual("[A-Z]{1,3}", raw),
            );
        }
    }
}

fn check_optional_int_range(
    issues: &mut Vec<Issue>,
    fields: &FieldMap,
    line: LineNumber,
    field: FieldName,
    min: i64,
    max: i64,
    mode: Mode,
) {
    let Some(raw) = fields.get(line, field).map(|f| f.value.as_str()) else {
        return;
    };
    if raw.is_empty() {
        return;
    }
    match raw.parse::<i64>() {
        Err(_) => {
            issues.push(
                Issue::new(ErrorCode::InvalidNumberFormat, format!("{} is not a valid integer", field.as_str()))
                    .with_line(line)
                    .with_field(field.as_str())
                    .with_actual(raw),
            );
        }
        Ok(value) => {
            if value < min || value > max {
                let severity = classify(ErrorCode::ValueOutOfRange, mode);
                issues.push(
                    Issue::new(ErrorCode::ValueOutOfRange, format!("{} must be between {} and {}", field.as_str(), min, max))
                        .with_line(line)
                        .with_field(field.as_str())
                        .with_expected_actual(format!("[{min}, {max}]"), value)
                        .with_severity(severity),
                );
            }
        }
    }
}

fn push_semantic_warnings(
    issues: &mut Vec<Issue>,
    fields: &FieldMap,
    reference_date: DateTime<Utc>,
) {
    // STALE_TLE_WARNING / DEPRECATED_EPOCH_YEAR_WARNING: need a resolved epoch.
    if let (Some(yy_raw), Some(day_raw)) = (
        fields.line1(FieldName::EpochYear).map(|f| f.value.as_str()),
        fields.line1(FieldName::EpochDay).map(|f| f.value.as_str()),
    ) {
        if let (Ok(yy), Some(day)) = (yy_raw.parse::<u16>(), parse_plain_float(day_raw)) {
            let full_year = normalize::resolve_full_year(yy);
            if let Some(epoch) = normalize::epoch_instant(full_year, day) {
                let age_days = (reference_date - epoch).num_seconds() as f64 / 86400.0;
                if age_days > 30.0 {
                    issues.push(
                        Issue::new(ErrorCode::StaleTleWarning, format!("epoch is {age_days:.1} days before the reference date"))
                            .with_field(FieldName::EpochDay.as_str()),
                    );
                }
                if full_year < 2000 {
                    issues.push(
                        Issue::new(ErrorCode::DeprecatedEpochYearWarning, format!("resolved epoch year {full_year} predates 2000"))
                            .with_field(FieldName::EpochYear.as_str()),
                    );
                }
            }
        }
    }

    if let Some(raw) = fields.line2(FieldName::Eccentricity).map(|f| f.value.as_str()) {
        if let Some(e) = sci::decode_eccentricity(raw) {
            if e > 0.25 {
                issues.push(
                    Issue::new(ErrorCode::HighEccentricityWarning, format!("eccentricity {e} exceeds 0.25"))
                        .with_field(FieldName::Eccentricity.as_str()),
                );
            }
        }
    }

    if let Some(raw) = fields.line2(FieldName::MeanMotion).map(|f| f.value.as_str()) {
        if let Some(n) = parse_plain_float(raw) {
            if n < 1.0 {
                issues.push(
                    Issue::new(ErrorCode::LowMeanMotionWarning, format!("mean motion {n} rev/day is below 1.0"))
                        .with_field(FieldName::MeanMotion.as_str()),
                );
            }
        }
    }

    if let Some(raw) = fields.line2(FieldName::RevolutionNumber).map(|f| f.value.as_str()) {
        if let Ok(rev) = raw.parse::<u32>() {
            if rev > 90000 {
                issues.push(
                    Issue::new(ErrorCode::RevolutionNumberRolloverWarning, format!("revolution number {rev} exceeds 90000"))
                        .with_field(FieldName::RevolutionNumber.as_str()),
                );
            }
        }
    }

    // NEAR_ZERO_DRAG_WARNING: decode first, compare magnitude (spec §9 Open
    // Question: prefer decoding over matching the three historical string
    // spellings directly).
    if let Some(raw) = fields.line1(FieldName::BStar).map(|f| f.value.as_str()) {
        if let Some(b_star) = sci::decode_assumed_decimal_exponential(raw) {
            if b_star.abs() < 1e-12 {
                issues.push(
                    Issue::new(ErrorCode::NearZeroDragWarning, "B* drag term is effectively zero")
                        .with_field(FieldName::BStar.as_str()),
                );
            }
        }
    }

    if let Some(raw) = fields.line1(FieldName::FirstDerivative).map(|f| f.value.as_str()) {
        if let Some(first_deriv) = parse_plain_float(raw) {
            if first_deriv < 0.0 {
                issues.push(
                    Issue::new(ErrorCode::NegativeDecayWarning, "first derivative of mean motion is negative")
                        .with_field(FieldName::FirstDerivative.as_str()),
                );
            }
        }
    }

    if let Some(raw) = fields.line1(FieldName::EphemerisType).map(|f| f.value.as_str()) {
        if !raw.is_empty() && raw != "0" {
            issues.push(
                Issue::new(ErrorCode::NonStandardEphemerisWarning, format!("ephemeris type '{raw}' is not the standard '0'"))
                    .with_field(FieldName::EphemerisType.as_str()),
            );
        }
    }
}

/// Run layers 3-9 and return a full [`ValidationReport`].
pub fn validate(
    lines: &CanonicalLines,
    fields: &FieldMap,
    options: &ParseOptions,
    reference_date: DateTime<Utc>,
) -> ValidationReport {
    let mut issues = Vec::new();

    push_line_length(&mut issues, LineNumber::One, &lines.line1, options.mode);
    push_line_length(&mut issues, LineNumber::Two, &lines.line2, options.mode);
    push_line_number_prefix(&mut issues, LineNumber::One, &lines.line1, options.mode);
    push_line_number_prefix(&mut issues, LineNumber::Two, &lines.line2, options.mode);
    push_checksum(&mut issues, LineNumber::One, &lines.line1, options);
    push_checksum(&mut issues, LineNumber::Two, &lines.line2, options);
    push_satellite_number_checks(&mut issues, fields, options.mode);
    push_classification(&mut issues, fields, options.mode);
    push_numeric_range_checks(&mut issues, fields, options);
    push_semantic_warnings(&mut issues, fields, reference_date);

    #[cfg(feature = "log")]
    log::debug!(
        "validate: {} issue(s) collected in {:?} mode",
        issues.len(),
        options.mode
    );

    let mut report = ValidationReport::from_issues(issues);
    if !options.include_warnings {
        report.warnings.clear();
    }
    report
}
