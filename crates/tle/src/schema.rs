//! The static column schema (spec §3 "Column Schema (authoritative)").
//!
//! Every offset lives in exactly one place: this table. Nothing else in
//! the crate hard-codes a column range; `fields::FieldExtractor` is the
//! only code that reads `FieldSpec::start`/`end` directly.

use tle_types::LineNumber;

/// Zero-based, end-exclusive column range plus the field's logical name,
/// for one field on one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    /// Logical name, matches [`FieldName`].
    pub name: FieldName,
    /// Which line this field lives on.
    pub line: LineNumber,
    /// Start column, inclusive.
    pub start: usize,
    /// End column, exclusive.
    pub end: usize,
}

impl FieldSpec {
    /// Width of this field in columns.
    pub const fn width(&self) -> usize {
        self.end - self.start
    }
}

/// Enumerated set of every field the schema knows about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FieldName {
    LineNumber,
    SatelliteNumber,
    Classification,
    IntlDesigYear,
    IntlDesigLaunchNumber,
    IntlDesigPiece,
    EpochYear,
    EpochDay,
    FirstDerivative,
    SecondDerivative,
    BStar,
    EphemerisType,
    ElementSetNumber,
    Checksum,
    Inclination,
    RightAscension,
    Eccentricity,
    ArgumentOfPerigee,
    MeanAnomaly,
    MeanMotion,
    RevolutionNumber,
}

impl FieldName {
    /// Lowercase snake_case name, used as the `FieldMap` key and in
    /// `Issue::field`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LineNumber => "line_number",
            Self::SatelliteNumber => "satellite_number",
            Self::Classification => "classification",
            Self::IntlDesigYear => "intl_desig_year",
            Self::IntlDesigLaunchNumber => "intl_desig_launch_number",
            Self::IntlDesigPiece => "intl_desig_piece",
            Self::EpochYear => "epoch_year",
            Self::EpochDay => "epoch_day",
            Self::FirstDerivative => "first_derivative",
            Self::SecondDerivative => "second_derivative",
            Self::BStar => "b_star",
            Self::EphemerisType => "ephemeris_type",
            Self::ElementSetNumber => "element_set_number",
            Self::Checksum => "checksum",
            Self::Inclination => "inclination",
            Self::RightAscension => "right_ascension",
            Self::Eccentricity => "eccentricity",
            Self::ArgumentOfPerigee => "argument_of_perigee",
            Self::MeanAnomaly => "mean_anomaly",
            Self::MeanMotion => "mean_motion",
            Self::RevolutionNumber => "revolution_number",
        }
    }
}

const L1: LineNumber = LineNumber::One;
const L2: LineNumber = LineNumber::Two;

/// Line 1 fields, in column order.
pub const LINE1_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: FieldName::LineNumber, line: L1, start: 0, end: 1 },
    FieldSpec { name: FieldName::SatelliteNumber, line: L1, start: 2, end: 7 },
    FieldSpec { name: FieldName::Classification, line: L1, start: 7, end: 8 },
    FieldSpec { name: FieldName::IntlDesigYear, line: L1, start: 9, end: 11 },
    FieldSpec { name: FieldName::IntlDesigLaunchNumber, line: L1, start: 11, end: 14 },
    FieldSpec { name: FieldName::IntlDesigPiece, line: L1, start: 14, end: 17 },
    FieldSpec { name: FieldName::EpochYear, line: L1, start: 18, end: 20 },
    FieldSpec { name: FieldName::EpochDay, line: L1, start: 20, end: 32 },
    FieldSpec { name: FieldName::FirstDerivative, line: L1, start: 33, end: 43 },
    FieldSpec { name: FieldName::SecondDerivative, line: L1, start: 44, end: 52 },
    FieldSpec { name: FieldName::BStar, line: L1, start: 53, end: 61 },
    FieldSpec { name: FieldName::EphemerisType, line: L1, start: 62, end: 63 },
    FieldSpec { name: FieldName::ElementSetNumber, line: L1, start: 64, end: 68 },
    FieldSpec { name: FieldName::Checksum, line: L1, start: 68, end: 69 },
];

/// Line 2 fields, in column order.
pub const LINE2_FIELDS: &[FieldSpec] = &[
    FieldSpec { name: FieldName::LineNumber, line: L2, start: 0, end: 1 },
    FieldSpec { name: FieldName::SatelliteNumber, line: L2, start: 2, end: 7 },
    FieldSpec { name: FieldName::Inclination, line: L2, start: 8, end: 16 },
    FieldSpec { name: FieldName::RightAscension, line: L2, start: 17, end: 25 },
    FieldSpec { name: FieldName::Eccentricity, line: L2, start: 26, end: 33 },
    FieldSpec { name: FieldName::ArgumentOfPerigee, line: L2, start: 34, end: 42 },
    FieldSpec { name: FieldName::MeanAnomaly, line: L2, start: 43, end: 51 },
    FieldSpec { name: FieldName::MeanMotion, line: L2, start: 52, end: 63 },
    FieldSpec { name: FieldName::RevolutionNumber, line: L2, start: 63, end: 68 },
    FieldSpec { name: FieldName::Checksum, line: L2, start: 68, end: 69 },
];

/// Required length of every data line.
pub const LINE_LENGTH: usize = 69;

/// Look up a field spec by line and name.
pub fn field(line: LineNumber, name: FieldName) -> Option<&'static FieldSpec> {
    let table = match line {
        LineNumber::One => LINE1_FIELDS,
        LineNumber::Two => LINE2_FIELDS,
    };
    table.iter().find(|f| f.name == name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line1_fields_do_not_overlap_and_stay_in_bounds() {
        let mut last_end = 0;
        for f in LINE1_FIELDS {
            assert!(f.start >= last_end, "{:?} overlaps previous field", f.name);
            assert!(f.end <= LINE_LENGTH);
            last_end = f.end;
        }
    }

    #[test]
    fn line2_fields_do_not_overlap_and_stay_in_bounds() {
        let mut last_end = 0;
        for f in LINE2_FIELDS {
            assert!(f.start >= last_end, "{:?} overlaps previous field", f.name);
            assert!(f.end <= LINE_LENGTH);
            last_end = f.end;
        }
    }

    #[test]
    fn checksum_is_last_column_on_both_lines() {
        let c1 = field(LineNumber::One, FieldName::Checksum).unwrap();
        let c2 = field(LineNumber::Two, FieldName::Checksum).unwrap();
        assert_eq!((c1.start, c1.end), (68, 69));
        assert_eq!((c2.start, c2.end), (68, 69));
    }
}
