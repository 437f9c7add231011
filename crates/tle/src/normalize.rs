//! C4 — `Normalizer` (spec §4.4).
//!
//! Decodes TLE's idiosyncratic numeric encodings into a typed
//! [`NumericView`], kept deliberately separate from the string-exact
//! [`crate::record::ParsedRecord`] (spec §9: "eliminates string<->number
//! drift" rather than parsing ad-hoc at every callsite).

use crate::fields::FieldMap;
use crate::schema::FieldName;
use crate::sci;
use chrono::{DateTime, Duration, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use tle_types::{Classification, InternationalDesignator, Issue, LineNumber, OptionalField, QualityGrade};

/// Year at and above which a 2-digit epoch year resolves into the 1900s
/// rather than the 2000s (spec §4.4 "Sputnik pivot", §8 property 5).
const YEAR_PIVOT: u16 = 57;

/// Resolve a 2-digit TLE year into a 4-digit Gregorian year.
pub fn resolve_full_year(yy: u16) -> u16 {
    if yy >= YEAR_PIVOT {
        1900 + yy
    } else {
        2000 + yy
    }
}

/// Compute the epoch instant from a resolved 4-digit year and a
/// 1-based, fractional day-of-year.
pub fn epoch_instant(full_year: u16, day_of_year: f64) -> Option<DateTime<Utc>> {
    let jan1 = Utc.with_ymd_and_hms(full_year as i32, 1, 1, 0, 0, 0).single()?;
    let offset_seconds = (day_of_year - 1.0) * 86_400.0;
    jan1.checked_add_signed(Duration::milliseconds((offset_seconds * 1000.0) as i64))
}

/// Julian Date for a given instant.
pub fn julian_date(dt: DateTime<Utc>) -> f64 {
    // Unix epoch (1970-01-01T00:00:00Z) is JD 2440587.5.
    const UNIX_EPOCH_JD: f64 = 2_440_587.5;
    UNIX_EPOCH_JD + dt.timestamp() as f64 / 86_400.0 + dt.timestamp_subsec_nanos() as f64 / 86_400.0e9
}

/// Modified Julian Date: `JD - 2400000.5`.
pub fn modified_julian_date(jd: f64) -> f64 {
    jd - 2_400_000.5
}

/// The typed numeric projection of a [`crate::record::ParsedRecord`]
/// (spec §3 `NumericView`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NumericView {
    /// NORAD catalog number.
    pub satellite_number: u32,
    /// Security classification marking.
    pub classification: Classification,
    /// Launch year / number / piece.
    pub international_designator: InternationalDesignator,
    /// Raw 2-digit epoch year (00-99).
    pub epoch_year: u8,
    /// Resolved 4-digit epoch year.
    pub epoch_full_year: u16,
    /// 1-based fractional day of year, `1.0 <= x < 367.0`.
    pub epoch_day: f64,
    /// Epoch instant in UTC.
    pub epoch_instant: DateTime<Utc>,
    /// Julian Date of the epoch.
    pub julian_date: f64,
    /// Modified Julian Date of the epoch.
    pub modified_julian_date: f64,
    /// First derivative of mean motion (rev/day^2).
    pub first_derivative: f64,
    /// Second derivative of mean motion (rev/day^3).
    pub second_derivative: f64,
    /// BSTAR drag term.
    pub b_star: f64,
    /// Inclination in degrees (0-180).
    pub inclination_deg: f64,
    /// Right ascension of ascending node in degrees (0-360).
    pub right_ascension_deg: f64,
    /// Orbital eccentricity, `0 <= e < 1`.
    pub eccentricity: f64,
    /// Argument of perigee in degrees (0-360).
    pub argument_of_perigee_deg: f64,
    /// Mean anomaly in degrees (0-360).
    pub mean_anomaly_deg: f64,
    /// Mean motion in revolutions per day.
    pub mean_motion_rev_per_day: f64,
    /// Revolution number at epoch, if present (spec §9 Open Question:
    /// blank is represented explicitly rather than defaulted to zero).
    pub revolution_number: OptionalField<u32>,
    /// Ephemeris type, if present.
    pub ephemeris_type: OptionalField<u8>,
    /// Element set number.
    pub element_set_number: u16,
}

/// A numeric field failed to parse or decode; carries the [`Issue`] that
/// describes why.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizeError(pub Issue);

fn require_field<'a>(
    fields: &'a FieldMap,
    line: LineNumber,
    name: FieldName,
) -> Result<&'a str, NormalizeError> {
    fields
        .get(line, name)
        .map(|f| f.value.as_str())
        .ok_or_else(|| {
            NormalizeError(
                tle_types::Issue::new(
                    tle_types::ErrorCode::InvalidNumberFormat,
                    format!("{} is missing", name.as_str()),
                )
                .with_line(line)
                .with_field(name.as_str()),
            )
        })
}

fn parse_u32(raw: &str, name: FieldName, line: LineNumber) -> Result<u32, NormalizeError> {
    raw.parse::<u32>().map_err(|_| {
        NormalizeError(
            Issue::new(tle_types::ErrorCode::InvalidNumberFormat, format!("{} is not a valid integer", name.as_str()))
                .with_line(line)
                .with_field(name.as_str())
                .with_actual_str(raw),
        )
    })
}

fn parse_f64(raw: &str, name: FieldName, line: LineNumber) -> Result<f64, NormalizeError> {
    raw.parse::<f64>().map_err(|_| {
        NormalizeError(
            Issue::new(tle_types::ErrorCode::InvalidNumberFormat, format!("{} is not a valid number", name.as_str()))
                .with_line(line)
                .with_field(name.as_str())
                .with_actual_str(raw),
        )
    })
}

/// Small local extension so error-construction above can stay terse;
/// mirrors `Issue::with_expected_actual` but only sets `actual`.
trait IssueActualExt {
    fn with_actual_str(self, actual: &str) -> Self;
}
impl IssueActualExt for Issue {
    fn with_actual_str(mut self, actual: &str) -> Self {
        self.actual = Some(actual.to_string());
        self
    }
}

fn optional_u8(raw: &str) -> Result<OptionalField<u8>, NormalizeError> {
    if raw.is_empty() {
        return Ok(OptionalField::Blank);
    }
    raw.parse::<u8>()
        .map(OptionalField::Present)
        .map_err(|_| {
            NormalizeError(Issue::new(
                tle_types::ErrorCode::InvalidNumberFormat,
                format!("expected a small integer, found '{raw}'"),
            ))
        })
}

fn optional_u16(raw: &str) -> Result<OptionalField<u16>, NormalizeError> {
    if raw.is_empty() {
        return Ok(OptionalField::Blank);
    }
    raw.parse::<u16>()
        .map(OptionalField::Present)
        .map_err(|_| {
            NormalizeError(Issue::new(
                tle_types::ErrorCode::InvalidNumberFormat,
                format!("expected a 16-bit integer, found '{raw}'"),
            ))
        })
}

fn optional_u32(raw: &str) -> Result<OptionalField<u32>, NormalizeError> {
    if raw.is_empty() {
        return Ok(OptionalField::Blank);
    }
    raw.parse::<u32>()
        .map(OptionalField::Present)
        .map_err(|_| {
            NormalizeError(Issue::new(
                tle_types::ErrorCode::InvalidNumberFormat,
                format!("expected a 32-bit integer, found '{raw}'"),
            ))
        })
}

impl NumericView {
    /// Build the typed numeric view from an already-extracted [`FieldMap`].
    ///
    /// Returns the first [`NormalizeError`] encountered; callers that want
    /// every issue at once should rely on [`crate::validate::validate`]
    /// instead, which never stops at the first failure.
    pub fn build(fields: &FieldMap) -> Result<Self, NormalizeError> {
        let satellite_number = parse_u32(
            require_field(fields, LineNumber::One, FieldName::SatelliteNumber)?,
            FieldName::SatelliteNumber,
            LineNumber::One,
        )?;

        let classification_raw = require_field(fields, LineNumber::One, FieldName::Classification)?;
        let classification = Classification::from_char(classification_raw.chars().next().unwrap_or(' '))
            .ok_or_else(|| {
                NormalizeError(
                    Issue::new(tle_types::ErrorCode::InvalidClassification, "classification must be U, C, or S")
                        .with_line(LineNumber::One)
                        .with_field(FieldName::Classification.as_str())
                        .with_actual_str(classification_raw),
                )
            })?;

        let designator_year = optional_u8(require_field(fields, LineNumber::One, FieldName::IntlDesigYear)?)?;
        let designator_launch = optional_u16(require_field(fields, LineNumber::One, FieldName::IntlDesigLaunchNumber)?)?;
        let piece = require_field(fields, LineNumber::One, FieldName::IntlDesigPiece)?.to_string();

        let epoch_year_raw = require_field(fields, LineNumber::One, FieldName::EpochYear)?;
        let epoch_year: u8 = epoch_year_raw.parse().map_err(|_| {
            NormalizeError(
                Issue::new(tle_types::ErrorCode::InvalidNumberFormat, "epoch year is not a valid integer")
                    .with_line(LineNumber::One)
                    .with_field(FieldName::EpochYear.as_str())
                    .with_actual_str(epoch_year_raw),
            )
        })?;
        let epoch_full_year = resolve_full_year(epoch_year as u16);

        let epoch_day = parse_f64(
            require_field(fields, LineNumber::One, FieldName::EpochDay)?,
            FieldName::EpochDay,
            LineNumber::One,
        )?;

        let epoch_instant = epoch_instant(epoch_full_year, epoch_day).ok_or_else(|| {
            NormalizeError(
                Issue::new(tle_types::ErrorCode::InvalidNumberFormat, "epoch day/year does not resolve to a valid instant")
                    .with_line(LineNumber::One)
                    .with_field(FieldName::EpochDay.as_str()),
            )
        })?;
        let jd = julian_date(epoch_instant);
        let mjd = modified_julian_date(jd);

        let first_derivative = parse_f64(
            require_field(fields, LineNumber::One, FieldName::FirstDerivative)?,
            FieldName::FirstDerivative,
            LineNumber::One,
        )?;

        let second_derivative_raw = require_field(fields, LineNumber::One, FieldName::SecondDerivative)?;
        let second_derivative = sci::decode_assumed_decimal_exponential(second_derivative_raw).ok_or_else(|| {
            NormalizeError(
                Issue::new(tle_types::ErrorCode::InvalidNumberFormat, "second derivative is not valid assumed-decimal notation")
                    .with_line(LineNumber::One)
                    .with_field(FieldName::SecondDerivative.as_str())
                    .with_actual_str(second_derivative_raw),
            )
        })?;

        let b_star_raw = require_field(fields, LineNumber::One, FieldName::BStar)?;
        let b_star = sci::decode_assumed_decimal_exponential(b_star_raw).ok_or_else(|| {
            NormalizeError(
                Issue::new(tle_types::ErrorCode::InvalidNumberFormat, "B* is not valid assumed-decimal notation")
                    .with_line(LineNumber::One)
                    .with_field(FieldName::BStar.as_str())
                    .with_actual_str(b_star_raw),
            )
        })?;

        let ephemeris_type = optional_u8(require_field(fields, LineNumber::One, FieldName::EphemerisType)?)?;
        let element_set_number_raw = require_field(fields, LineNumber::One, FieldName::ElementSetNumber)?;
        let element_set_number: u16 = if element_set_number_raw.is_empty() {
            0
        } else {
            element_set_number_raw.parse().map_err(|_| {
                NormalizeError(
                    Issue::new(tle_types::ErrorCode::InvalidNumberFormat, "element set number is not a valid integer")
                        .with_line(LineNumber::One)
                        .with_field(FieldName::ElementSetNumber.as_str())
                        .with_actual_str(element_set_number_raw),
                )
            })?
        };

        let inclination_deg = parse_f64(
            require_field(fields, LineNumber::Two, FieldName::Inclination)?,
            FieldName::Inclination,
            LineNumber::Two,
        )?;
        let right_ascension_deg = parse_f64(
            require_field(fields, LineNumber::Two, FieldName::RightAscension)?,
            FieldName::RightAscension,
            LineNumber::Two,
        )?;

        let eccentricity_raw = require_field(fields, LineNumber::Two, FieldName::Eccentricity)?;
        let eccentricity = sci::decode_eccentricity(eccentricity_raw).ok_or_else(|| {
            NormalizeError(
                Issue::new(tle_types::ErrorCode::InvalidNumberFormat, "eccentricity must be 7 digits")
                    .with_line(LineNumber::Two)
                    .with_field(FieldName::Eccentricity.as_str())
                    .with_actual_str(eccentricity_raw),
            )
        })?;

        let argument_of_perigee_deg = parse_f64(
            require_field(fields, LineNumber::Two, FieldName::ArgumentOfPerigee)?,
            FieldName::ArgumentOfPerigee,
            LineNumber::Two,
        )?;
        let mean_anomaly_deg = parse_f64(
            require_field(fields, LineNumber::Two, FieldName::MeanAnomaly)?,
            FieldName::MeanAnomaly,
            LineNumber::Two,
        )?;
        let mean_motion_rev_per_day = parse_f64(
            require_field(fields, LineNumber::Two, FieldName::MeanMotion)?,
            FieldName::MeanMotion,
            LineNumber::Two,
        )?;
        let revolution_number = optional_u32(require_field(fields, LineNumber::Two, FieldName::RevolutionNumber)?)?;

        Ok(NumericView {
            satellite_number,
            classification,
            international_designator: InternationalDesignator {
                year: designator_year,
                launch_number: designator_launch,
                piece,
            },
            epoch_year,
            epoch_full_year,
            epoch_day,
            epoch_instant,
            julian_date: jd,
            modified_julian_date: mjd,
            first_derivative,
            second_derivative,
            b_star,
            inclination_deg,
            right_ascension_deg,
            eccentricity,
            argument_of_perigee_deg,
            mean_anomaly_deg,
            mean_motion_rev_per_day,
            revolution_number,
            ephemeris_type,
            element_set_number,
        })
    }

    /// Composite quality score in `[0, 100]` (spec §4.4 "Quality score").
    ///
    /// Weighted: checksum validity 20%, format validity 15%, range
    /// compliance 15%, typical-range compliance 10%, epoch recency 15%,
    /// anomaly count 10%, designator validity 5%, consistency 10%.
    pub fn quality_score(&self, report: &crate::validate::ValidationReport, reference_date: DateTime<Utc>) -> f64 {
        let checksum_ok = !report
            .errors
            .iter()
            .chain(report.warnings.iter())
            .any(|i| i.code == tle_types::ErrorCode::ChecksumMismatch);
        let format_ok = !report.errors.iter().any(|i| i.code == tle_types::ErrorCode::InvalidNumberFormat);
        let range_ok = !report
            .errors
            .iter()
            .chain(report.warnings.iter())
            .any(|i| i.code == tle_types::ErrorCode::ValueOutOfRange);

        let typical_ok = self.eccentricity <= 0.25
            && self.mean_motion_rev_per_day >= 1.0
            && self.mean_motion_rev_per_day <= 20.0;

        let age_days = (reference_date - self.epoch_instant).num_seconds() as f64 / 86_400.0;
        let recency = if age_days <= 0.0 {
            1.0
        } else {
            (1.0 - (age_days / 365.0)).clamp(0.0, 1.0)
        };

        let anomaly_count = report.warnings.len() as f64;
        let anomaly_score = (1.0 - anomaly_count / 10.0).clamp(0.0, 1.0);

        let designator_ok = !self.international_designator.piece.is_empty()
            || self.international_designator.year.is_blank();

        let consistency_ok = checksum_ok && range_ok;

        let score = 20.0 * checksum_ok as u8 as f64
            + 15.0 * format_ok as u8 as f64
            + 15.0 * range_ok as u8 as f64
            + 10.0 * typical_ok as u8 as f64
            + 15.0 * recency
            + 10.0 * anomaly_score
            + 5.0 * designator_ok as u8 as f64
            + 10.0 * consistency_ok as u8 as f64;

        score.clamp(0.0, 100.0)
    }

    /// Letter grade for [`Self::quality_score`].
    pub fn quality_grade(&self, report: &crate::validate::ValidationReport, reference_date: DateTime<Utc>) -> QualityGrade {
        QualityGrade::from_score(self.quality_score(report, reference_date))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fields::extract;
    use chrono::Datelike;

    const ISS_LINE1: &str =
        "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927";
    const ISS_LINE2: &str =
        "2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn year_pivot_boundaries() {
        assert_eq!(resolve_full_year(57), 1957);
        assert_eq!(resolve_full_year(99), 1999);
        assert_eq!(resolve_full_year(56), 2056);
        assert_eq!(resolve_full_year(0), 2000);
    }

    #[test]
    fn s1_iss_numeric_view() {
        let fields = extract(ISS_LINE1, ISS_LINE2);
        let view = NumericView::build(&fields).unwrap();
        assert_eq!(view.satellite_number, 25544);
        assert_eq!(view.epoch_full_year, 2008);
        assert!((view.eccentricity - 0.0006703).abs() < 1e-9);
        assert_eq!(view.epoch_instant.year(), 2008);
    }

    #[test]
    fn julian_date_matches_known_epoch() {
        let dt = Utc.with_ymd_and_hms(2000, 1, 1, 12, 0, 0).unwrap();
        let jd = julian_date(dt);
        assert!((jd - 2_451_545.0).abs() < 1e-6);
    }

    #[test]
    fn numeric_view_round_trips_through_serde_json() {
        let fields = extract(ISS_LINE1, ISS_LINE2);
        let view = NumericView::build(&fields).unwrap();
        let json = serde_json::to_string(&view).unwrap();
        let restored: NumericView = serde_json::from_str(&json).unwrap();
        assert_eq!(view, restored);
    }
}
