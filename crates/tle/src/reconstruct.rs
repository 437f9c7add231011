//! C6 — `TLEReconstructor` (spec §4.6).
//!
//! The inverse of C2: re-emits column-exact TLE lines from an already
//! extracted [`FieldMap`], recomputing the checksum rather than trusting
//! whatever checksum the source carried. Used both for
//! [`std::fmt::Display`] on [`ParsedRecord`] and by anything that edits a
//! field and needs a valid line back (spec §4.6.b "round-trips a
//! corrected record to text").

use crate::checksum::calculate;
use crate::fields::FieldMap;
use crate::record::ParsedRecord;
use crate::schema::{FieldName, FieldSpec, LINE1_FIELDS, LINE2_FIELDS, LINE_LENGTH};
use std::fmt;
use tle_types::LineNumber;

/// How a field's trimmed value is placed back into its fixed-width slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Align {
    /// Pad on the left (value hugs the right edge of the field).
    Right(char),
    /// Pad on the right (value hugs the left edge of the field).
    Left(char),
}

/// Alignment/fill rule for each field, independent of the authoritative
/// column table in [`crate::schema`] (spec §4.6.a "per-field alignment
/// rules").
fn alignment_for(name: FieldName) -> Align {
    match name {
        FieldName::LineNumber => Align::Left(' '),
        FieldName::SatelliteNumber => Align::Right(' '),
        FieldName::Classification => Align::Left(' '),
        FieldName::IntlDesigYear => Align::Right('0'),
        FieldName::IntlDesigLaunchNumber => Align::Right('0'),
        FieldName::IntlDesigPiece => Align::Left(' '),
        FieldName::EpochYear => Align::Right('0'),
        FieldName::EpochDay => Align::Right(' '),
        FieldName::FirstDerivative => Align::Right(' '),
        FieldName::SecondDerivative => Align::Right(' '),
        FieldName::BStar => Align::Right(' '),
        FieldName::EphemerisType => Align::Right(' '),
        FieldName::ElementSetNumber => Align::Right(' '),
        FieldName::Checksum => Align::Right('0'),
        FieldName::Inclination => Align::Right(' '),
        FieldName::RightAscension => Align::Right(' '),
        // Assumed-decimal: zero-padded, no decimal point stored.
        FieldName::Eccentricity => Align::Right('0'),
        FieldName::ArgumentOfPerigee => Align::Right(' '),
        FieldName::MeanAnomaly => Align::Right(' '),
        FieldName::MeanMotion => Align::Right(' '),
        FieldName::RevolutionNumber => Align::Right(' '),
    }
}

/// A field's formatted value is longer than its column slot and would
/// have to be truncated to fit.
#[derive(Debug, Clone, PartialEq)]
pub struct FieldOverflow {
    /// The field that overflowed.
    pub field: FieldName,
    /// The value that did not fit.
    pub value: String,
    /// The slot's width.
    pub width: usize,
}

fn place(buf: &mut [char], spec: &FieldSpec, value: &str) -> Result<(), FieldOverflow> {
    let width = spec.width();
    if value.chars().count() > width {
        return Err(FieldOverflow {
            field: spec.name,
            value: value.to_string(),
            width,
        });
    }
    let pad_len = width - value.chars().count();
    let formatted: String = match alignment_for(spec.name) {
        Align::Right(fill) => std::iter::repeat(fill).take(pad_len).chain(value.chars()).collect(),
        Align::Left(fill) => value.chars().chain(std::iter::repeat(fill).take(pad_len)).collect(),
    };
    for (slot, ch) in buf[spec.start..spec.end].iter_mut().zip(formatted.chars()) {
        *slot = ch;
    }
    Ok(())
}

fn build_line(
    fields: &FieldMap,
    line: LineNumber,
    specs: &[FieldSpec],
) -> Result<String, FieldOverflow> {
    let mut buf = vec![' '; LINE_LENGTH];
    for spec in specs {
        if spec.name == FieldName::Checksum {
            continue;
        }
        if spec.name == FieldName::LineNumber {
            buf[spec.start] = line.expected_char();
            continue;
        }
        if let Some(raw) = fields.get(line, spec.name) {
            place(&mut buf, spec, &raw.value)?;
        }
    }
    let text: String = buf.into_iter().collect();
    let digit = calculate(&text);
    let mut out = text;
    out.replace_range(68..69, &digit.to_string());
    Ok(out)
}

/// Re-emit both data lines from an extracted [`FieldMap`], recomputing
/// each checksum.
pub fn reconstruct_lines(fields: &FieldMap) -> Result<(String, String), FieldOverflow> {
    let line1 = build_line(fields, LineNumber::One, LINE1_FIELDS)?;
    let line2 = build_line(fields, LineNumber::Two, LINE2_FIELDS)?;
    Ok((line1, line2))
}

/// Re-emit the full record (optional name line plus both data lines).
pub fn reconstruct(record: &ParsedRecord) -> Result<String, FieldOverflow> {
    let (line1, line2) = reconstruct_lines(&record.fields)?;
    Ok(match &record.satellite_name {
        Some(name) => format!("{name}\n{line1}\n{line2}"),
        None => format!("{line1}\n{line2}"),
    })
}

impl fmt::Display for ParsedRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match reconstruct(self) {
            Ok(text) => write!(f, "{text}"),
            Err(overflow) => write!(
                f,
                "<unreconstructable record: {} overflowed its {}-column field>",
                overflow.field.as_str(),
                overflow.width
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::canonicalize::canonicalize;
    use crate::fields::extract;

    const ISS_TLE: &str = "ISS (ZARYA)\n1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927\n2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn round_trips_iss_byte_for_byte() {
        let (lines, warnings) = canonicalize(ISS_TLE).unwrap();
        assert!(warnings.is_empty());
        let fields = extract(&lines.line1, &lines.line2);
        let (line1, line2) = reconstruct_lines(&fields).unwrap();
        assert_eq!(line1, lines.line1);
        assert_eq!(line2, lines.line2);
    }

    #[test]
    fn reconstructed_lines_are_always_69_columns() {
        let (lines, _) = canonicalize(ISS_TLE).unwrap();
        let fields = extract(&lines.line1, &lines.line2);
        let (line1, line2) = reconstruct_lines(&fields).unwrap();
        assert_eq!(line1.len(), LINE_LENGTH);
        assert_eq!(line2.len(), LINE_LENGTH);
    }

    #[test]
    fn checksum_is_recomputed_not_copied() {
        let mut lines: Vec<&str> = ISS_TLE.lines().collect();
        let mut line1 = lines[1].to_string();
        line1.replace_range(68.., "9"); // corrupt the source checksum digit
        lines[1] = &line1;
        let bad = lines.join("\n");

        let (canon, _) = canonicalize(&bad).unwrap();
        let fields = extract(&canon.line1, &canon.line2);
        let (reconstructed, _) = reconstruct_lines(&fields).unwrap();
        assert_eq!(&reconstructed[68..69], "7");
    }

    #[test]
    fn display_matches_reconstruct() {
        let (lines, _) = canonicalize(ISS_TLE).unwrap();
        let fields = extract(&lines.line1, &lines.line2);
        let record = ParsedRecord {
            fields,
            satellite_name: lines.name.clone(),
            warnings: Vec::new(),
            comments: Vec::new(),
        };
        assert_eq!(record.to_string(), reconstruct(&record).unwrap());
    }
}
