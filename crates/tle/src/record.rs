//! `ParsedRecord` (spec §3): the public parsed form. Every element value
//! stays a string here, preserving the bit-exact source representation;
//! [`crate::normalize::NumericView`] is the typed projection built from it.

use crate::fields::FieldMap;
use crate::schema::FieldName;
use tle_types::{Issue, LineNumber};

/// A successfully column-sliced TLE record.
///
/// Invariant: `fields.line1(SatelliteNumber) == fields.line2(SatelliteNumber)`
/// for any record that reached this type through the strict pipeline;
/// the state machine (C5) can produce records that violate this when it
/// is carrying a `SATELLITE_NUMBER_MISMATCH` issue instead of rejecting
/// outright.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedRecord {
    /// Raw, column-sliced field values.
    pub fields: FieldMap,
    /// Satellite name, if the source supplied a 3-line record.
    pub satellite_name: Option<String>,
    /// Warnings collected during canonicalization and validation.
    pub warnings: Vec<Issue>,
    /// Comment lines retained from the source (if `include_comments`).
    pub comments: Vec<String>,
}

impl ParsedRecord {
    /// NORAD catalog number as it appears on line 1 (string form; see
    /// [`crate::normalize::NumericView::satellite_number`] for the typed
    /// value).
    pub fn satellite_number(&self) -> Option<&str> {
        self.fields
            .line1(FieldName::SatelliteNumber)
            .map(|f| f.value.as_str())
    }

    /// Raw classification character (`'U'`, `'C'`, `'S'`, or whatever
    /// invalid character the source held).
    pub fn classification_raw(&self) -> Option<&str> {
        self.fields
            .line1(FieldName::Classification)
            .map(|f| f.value.as_str())
    }

    /// Look up any field by line and name.
    pub fn field(&self, line: LineNumber, name: FieldName) -> Option<&str> {
        self.fields.get(line, name).map(|f| f.value.as_str())
    }
}
