//! # tle
//!
//! Column-exact Two-Line Element (TLE) parsing, validation, and
//! reconstruction.
//!
//! ```
//! use tle::{parse_tle, ParseOptions};
//!
//! let source = "ISS (ZARYA)\n\
//!     1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927\n\
//!     2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";
//!
//! let record = parse_tle(source, &ParseOptions::default()).unwrap();
//! assert_eq!(record.satellite_number(), Some("25544"));
//! ```
//!
//! The pipeline runs in six stages, each its own module:
//!
//! 1. [`canonicalize`] — line-ending normalization, comment stripping, 2-
//!    vs 3-line classification.
//! 2. [`fields`] — column-exact slicing against the authoritative
//!    [`schema`] table.
//! 3. [`validate`] — structural, checksum, field-format, and semantic
//!    checks, reported as one [`ValidationReport`](validate::ValidationReport).
//! 4. [`normalize`] — typed numeric decoding ([`normalize::NumericView`]).
//! 5. [`state_machine`] — an alternative, recovering entry point for
//!    malformed input.
//! 6. [`reconstruct`] — the inverse of stage 2, for round-tripping a
//!    corrected record back to text.
//!
//! [`api`] re-exports the six supported entry points; most callers only
//! need that module's functions.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod api;
pub mod canonicalize;
pub mod checksum;
pub mod fields;
pub mod normalize;
pub mod options;
pub mod record;
pub mod reconstruct;
pub mod schema;
pub mod sci;
pub mod state_machine;
pub mod validate;

pub use api::{
    calculate_checksum, parse_tle, parse_tle_at, parse_tle_numeric, parse_with_state_machine,
    validate_checksum, validate_line_structure, validate_tle, validate_tle_at,
};
pub use canonicalize::CanonicalLines;
pub use fields::{FieldMap, RawField};
pub use normalize::NumericView;
pub use options::{Mode, ParseOptions};
pub use record::ParsedRecord;
pub use reconstruct::{reconstruct, reconstruct_lines, FieldOverflow};
pub use schema::{FieldName, FieldSpec};
pub use state_machine::{ParserState, RecoveryAction, RecoveryTrace, StateMachineResult};
pub use validate::ValidationReport;

pub use tle_types::{
    Classification, ErrorCode, FormatError, InternationalDesignator, Issue, LineNumber,
    OptionalField, QualityGrade, Result, Severity, TleError, ValidationError,
};
