//! The options surface (spec §4.7 "Options (enumerated)").
//!
//! A plain value struct travels into every call — no environment
//! variables, no files, no ambient configuration (spec §6
//! "Configuration surface"). Built with the teacher SDK's fluent
//! `with_*` builder convention rather than a separate `*Builder` type,
//! since every field here already has a sensible default.

use tle_types::{ErrorCode, Severity};

/// Strict vs. permissive validation (spec §4.3.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Every failed layer 5-8 check is an error.
    #[default]
    Strict,
    /// Checksum mismatches, satellite-number mismatch, classification, and
    /// range errors downgrade to warnings. Layers 1-4 (structure) are
    /// never downgraded.
    Permissive,
}

/// Project a code's strict-mode severity through the active [`Mode`].
///
/// Centralizes the downgrade rule in one place (spec §9 "Use a
/// two-variant enum ... with a small projection function `classify`").
pub fn classify(code: ErrorCode, mode: Mode) -> Severity {
    let strict_severity = code.default_severity();
    if mode == Mode::Strict || strict_severity != Severity::Error {
        return strict_severity;
    }
    match code {
        ErrorCode::ChecksumMismatch
        | ErrorCode::SatelliteNumberMismatch
        | ErrorCode::InvalidClassification
        | ErrorCode::ValueOutOfRange => Severity::Warning,
        // Layers 1-4 (structure) are non-negotiable even in permissive mode.
        _ => strict_severity,
    }
}

/// Options controlling `parse_tle`/`validate_tle`/`parse_with_state_machine`.
#[derive(Debug, Clone, PartialEq)]
pub struct ParseOptions {
    /// Run validation at all. Default `true`.
    pub validate: bool,
    /// Enforce checksums (rather than skip layer 5 entirely). Default `true`.
    pub strict_checksums: bool,
    /// Enforce field numeric ranges (layer 8). Default `true`.
    pub validate_ranges: bool,
    /// Include warnings (semantic + downgraded errors) in results. Default `true`.
    pub include_warnings: bool,
    /// Retain comment lines on the parsed record. Default `true`.
    pub include_comments: bool,
    /// Strict vs. permissive severity projection. Default `Strict`.
    pub mode: Mode,
    /// Attempt state-machine recovery (C5 only). Default `true`.
    pub attempt_recovery: bool,
    /// Cap on recovery actions per `parse_with_state_machine` call (C5 only). Default `10`.
    pub max_recovery_attempts: u32,
    /// Return a partial record even when `success` is `false` (C5 only). Default `true`.
    pub include_partial_results: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            validate: true,
            strict_checksums: true,
            validate_ranges: true,
            include_warnings: true,
            include_comments: true,
            mode: Mode::Strict,
            attempt_recovery: true,
            max_recovery_attempts: 10,
            include_partial_results: true,
        }
    }
}

impl ParseOptions {
    /// Start from the defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set `mode`.
    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Set `validate`.
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Set `strict_checksums`.
    pub fn with_strict_checksums(mut self, strict: bool) -> Self {
        self.strict_checksums = strict;
        self
    }

    /// Set `validate_ranges`.
    pub fn with_validate_ranges(mut self, validate_ranges: bool) -> Self {
        self.validate_ranges = validate_ranges;
        self
    }

    /// Set `include_warnings`.
    pub fn with_include_warnings(mut self, include_warnings: bool) -> Self {
        self.include_warnings = include_warnings;
        self
    }

    /// Set `max_recovery_attempts`.
    pub fn with_max_recovery_attempts(mut self, max: u32) -> Self {
        self.max_recovery_attempts = max;
        self
    }
}
