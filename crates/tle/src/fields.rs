//! C2 — `FieldExtractor` (spec §4.2).
//!
//! Pure substring slicing against the static schema in [`crate::schema`].
//! No parsing, no bounds failures: callers must have already verified
//! `line.len() == LINE_LENGTH` (C3 layer 3) before calling `extract`.

use crate::schema::{FieldName, FieldSpec, LINE1_FIELDS, LINE2_FIELDS};
use std::collections::BTreeMap;
use tle_types::LineNumber;

/// One extracted field: its trimmed string value plus the original
/// column span, so validators and the state machine can still report a
/// precise `position` even after trimming.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawField {
    /// Whitespace-trimmed substring.
    pub value: String,
    /// Original (untrimmed) column span this field was sliced from.
    pub span: (usize, usize),
}

/// The raw slice view of a parsed TLE: every field, keyed by name, with
/// no numeric interpretation applied yet.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FieldMap {
    line1: BTreeMap<FieldName, RawField>,
    line2: BTreeMap<FieldName, RawField>,
}

impl FieldMap {
    /// Look up a field on line 1.
    pub fn line1(&self, name: FieldName) -> Option<&RawField> {
        self.line1.get(&name)
    }

    /// Look up a field on line 2.
    pub fn line2(&self, name: FieldName) -> Option<&RawField> {
        self.line2.get(&name)
    }

    /// Look up a field on the given line.
    pub fn get(&self, line: LineNumber, name: FieldName) -> Option<&RawField> {
        match line {
            LineNumber::One => self.line1(name),
            LineNumber::Two => self.line2(name),
        }
    }
}

/// Extract every field the schema knows about from a (not necessarily
/// full-length) line, stopping gracefully at the end of the string.
///
/// Used both by the straight-line C2 path (where `line.len() == 69` is
/// already guaranteed) and by the state machine's truncated-line
/// recovery, where fields whose column range lies past the available
/// characters are simply absent from the returned map.
pub fn extract_line(line: &str, specs: &[FieldSpec]) -> BTreeMap<FieldName, RawField> {
    let chars: Vec<char> = line.chars().collect();
    let mut out = BTreeMap::new();
    for spec in specs {
        if spec.start >= chars.len() {
            continue;
        }
        let end = spec.end.min(chars.len());
        let raw: String = chars[spec.start..end].iter().collect();
        out.insert(
            spec.name,
            RawField {
                value: raw.trim().to_string(),
                span: (spec.start, spec.end),
            },
        );
    }
    out
}

/// Extract both lines into a [`FieldMap`].
pub fn extract(line1: &str, line2: &str) -> FieldMap {
    FieldMap {
        line1: extract_line(line1, LINE1_FIELDS),
        line2: extract_line(line2, LINE2_FIELDS),
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
    fn satellite_number_matches_on_both_lines() {
        let map = extract(ISS_LINE1, ISS_LINE2);
        assert_eq!(map.line1(FieldName::SatelliteNumber).unwrap().value, "25544");
        assert_eq!(map.line2(FieldName::SatelliteNumber).unwrap().value, "25544");
    }

    #[test]
    fn classification_is_single_raw_character() {
        let map = extract(ISS_LINE1, ISS_LINE2);
        assert_eq!(map.line1(FieldName::Classification).unwrap().value, "U");
    }

    #[test]
    fn truncated_line_drops_out_of_range_fields() {
        let truncated = &ISS_LINE1[..40];
        let fields = extract_line(truncated, LINE1_FIELDS);
        assert!(fields.contains_key(&FieldName::SatelliteNumber));
        assert!(!fields.contains_key(&FieldName::BStar));
    }

    #[test]
    fn field_map_equality_is_structural() {
        let a = extract(ISS_LINE1, ISS_LINE2);
        let b = extract(ISS_LINE1, ISS_LINE2);
        assert_eq!(a, b);
    }
}
