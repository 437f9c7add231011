//! The `Issue` type: one error or warning surfaced by the validator,
//! the state-machine parser, or the normalizer.

use crate::codes::{ErrorCode, Severity};
use serde::{Deserialize, Serialize};

/// Which data line an [`Issue`] refers to, if any.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LineNumber {
    /// Line 1 (satellite number, epoch, drag terms, ...).
    One,
    /// Line 2 (inclination, RAAN, eccentricity, ...).
    Two,
}

impl LineNumber {
    /// The `'1'`/`'2'` character this line's own line-number field should carry.
    pub const fn expected_char(self) -> char {
        match self {
            Self::One => '1',
            Self::Two => '2',
        }
    }
}

/// A single error or warning produced anywhere in the pipeline.
///
/// `expected`/`actual` are stringified rather than `dyn Any` — the values
/// involved (a digit, a column count, a field name) are always printable,
/// and a stringly-typed pair keeps `Issue` `Serialize`/`Clone` without a
/// type parameter leaking into every caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Issue {
    /// Stable code identifying the kind of issue.
    pub code: ErrorCode,
    /// Human-readable description.
    pub message: String,
    /// Error, Warning, or Info.
    pub severity: Severity,
    /// Which data line this issue concerns, if line-specific.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LineNumber>,
    /// Which field this issue concerns, if field-specific.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Expected value (stringified), for checksum/range/format mismatches.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expected: Option<String>,
    /// Actual value (stringified).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<String>,
    /// Zero-based column position, for column-addressable issues.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<usize>,
    /// Free-form extra context.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl Issue {
    /// Build an issue at the code's default (strict-mode) severity.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            severity: code.default_severity(),
            line: None,
            field: None,
            expected: None,
            actual: None,
            position: None,
            details: None,
        }
    }

    /// Attach the affected line.
    pub fn with_line(mut self, line: LineNumber) -> Self {
        self.line = Some(line);
        self
    }

    /// Attach the affected field name.
    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.field = Some(field.into());
        self
    }

    /// Attach expected/actual values.
    pub fn with_expected_actual(mut self, expected: impl ToString, actual: impl ToString) -> Self {
        self.expected = Some(expected.to_string());
        self.actual = Some(actual.to_string());
        self
    }

    /// Attach a zero-based column position.
    pub fn with_position(mut self, position: usize) -> Self {
        self.position = Some(position);
        self
    }

    /// Override the severity (used by permissive-mode downgrading).
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Attach a details map.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    /// True if this issue is error-severity.
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }
}
