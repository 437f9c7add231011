//! Failure shapes for the TLE pipeline.
//!
//! Spec §7 distinguishes two shapes: a *validation error* (accumulated
//! errors + warnings, recoverable by fixing the input) and a *format
//! error* (a single code + detail map for precondition failures like
//! empty input). Callers pattern-match on both independently, so they
//! are kept as separate types rather than folded into one enum the way
//! `RotaStellarError` folds authentication/API/network errors together.

use crate::codes::ErrorCode;
use crate::issue::Issue;
use thiserror::Error;

/// A precondition failure: the input could not even be canonicalized or
/// line-counted, so no per-field issues exist yet.
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{code}: {message}")]
pub struct FormatError {
    /// `INVALID_INPUT_TYPE` or `EMPTY_INPUT` (the only two codes that can
    /// reach this shape per spec §7).
    pub code: ErrorCode,
    /// Human-readable detail.
    pub message: String,
    /// Free-form extra context (e.g. the input length).
    pub details: Option<serde_json::Value>,
}

impl FormatError {
    /// Build a new format error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: None,
        }
    }

    /// Attach a details map.
    pub fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }
}

/// A validation failure: the input parsed far enough to collect issues,
/// but at least one error-severity issue survived mode downgrading.
///
/// Carries *all* collected issues, never just the first (spec §7
/// "Propagation policy").
#[derive(Error, Debug, Clone, PartialEq)]
#[error("TLE failed validation with {} error(s), {} warning(s)", errors.len(), warnings.len())]
pub struct ValidationError {
    /// Error-severity issues.
    pub errors: Vec<Issue>,
    /// Warning/info-severity issues collected alongside the errors.
    pub warnings: Vec<Issue>,
}

impl ValidationError {
    /// Split a flat issue list into errors and warnings.
    pub fn from_issues(issues: Vec<Issue>) -> Self {
        let (errors, warnings) = issues.into_iter().partition(Issue::is_error);
        Self { errors, warnings }
    }
}

/// Top-level error for the public façade (`tle::api`), unifying both shapes.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TleError {
    /// Input failed structural preconditions before field-level validation
    /// could even begin.
    #[error(transparent)]
    Format(#[from] FormatError),
    /// Input was validated but rejected.
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

/// Result type alias for fallible TLE operations.
pub type Result<T> = std::result::Result<T, TleError>;
