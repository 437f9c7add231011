//! Stable error-code taxonomy.
//!
//! Every [`Issue`](crate::Issue) carries one of these codes. The string
//! form (`ErrorCode::as_str`) is the interface contract: callers in other
//! languages match on it, so renaming a variant without keeping its
//! `as_str` output stable is a breaking change.

use std::fmt;

/// Severity of an [`Issue`](crate::Issue).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
pub enum Severity {
    /// Record is rejected if any `Error`-severity issue survives mode downgrading.
    Error,
    /// Record remains valid; the caller should still be told.
    Warning,
    /// Informational only, never affects `is_valid`.
    Info,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warning => write!(f, "warning"),
            Self::Info => write!(f, "info"),
        }
    }
}

/// Stable error/warning codes, see spec §7.
///
/// `default_severity()` gives the severity in strict mode; the validator's
/// `classify` projection (crate `tle`) applies the permissive-mode
/// downgrades on top of this.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[non_exhaustive]
pub enum ErrorCode {
    // Input / structure
    InvalidInputType,
    EmptyInput,
    InvalidLineCount,
    InvalidLineLength,
    InvalidLineNumber,
    // Checksum
    ChecksumMismatch,
    InvalidChecksumCharacter,
    // Fields
    SatelliteNumberMismatch,
    InvalidSatelliteNumber,
    InvalidClassification,
    ValueOutOfRange,
    InvalidNumberFormat,
    SatelliteNameTooLong,
    SatelliteNameFormatWarning,
    // Semantic warnings
    ClassifiedDataWarning,
    StaleTleWarning,
    HighEccentricityWarning,
    LowMeanMotionWarning,
    DeprecatedEpochYearWarning,
    RevolutionNumberRolloverWarning,
    NearZeroDragWarning,
    NonStandardEphemerisWarning,
    NegativeDecayWarning,
}

impl ErrorCode {
    /// The stable wire string for this code, e.g. `"CHECKSUM_MISMATCH"`.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::InvalidInputType => "INVALID_INPUT_TYPE",
            Self::EmptyInput => "EMPTY_INPUT",
            Self::InvalidLineCount => "INVALID_LINE_COUNT",
            Self::InvalidLineLength => "INVALID_LINE_LENGTH",
            Self::InvalidLineNumber => "INVALID_LINE_NUMBER",
            Self::ChecksumMismatch => "CHECKSUM_MISMATCH",
            Self::InvalidChecksumCharacter => "INVALID_CHECKSUM_CHARACTER",
            Self::SatelliteNumberMismatch => "SATELLITE_NUMBER_MISMATCH",
            Self::InvalidSatelliteNumber => "INVALID_SATELLITE_NUMBER",
            Self::InvalidClassification => "INVALID_CLASSIFICATION",
            Self::ValueOutOfRange => "VALUE_OUT_OF_RANGE",
            Self::InvalidNumberFormat => "INVALID_NUMBER_FORMAT",
            Self::SatelliteNameTooLong => "SATELLITE_NAME_TOO_LONG",
            Self::SatelliteNameFormatWarning => "SATELLITE_NAME_FORMAT_WARNING",
            Self::ClassifiedDataWarning => "CLASSIFIED_DATA_WARNING",
            Self::StaleTleWarning => "STALE_TLE_WARNING",
            Self::HighEccentricityWarning => "HIGH_ECCENTRICITY_WARNING",
            Self::LowMeanMotionWarning => "LOW_MEAN_MOTION_WARNING",
            Self::DeprecatedEpochYearWarning => "DEPRECATED_EPOCH_YEAR_WARNING",
            Self::RevolutionNumberRolloverWarning => "REVOLUTION_NUMBER_ROLLOVER_WARNING",
            Self::NearZeroDragWarning => "NEAR_ZERO_DRAG_WARNING",
            Self::NonStandardEphemerisWarning => "NON_STANDARD_EPHEMERIS_WARNING",
            Self::NegativeDecayWarning => "NEGATIVE_DECAY_WARNING",
        }
    }

    /// Severity this code carries in strict mode. Layers 1-4 (structure) are
    /// never downgradable; see `classify` in `tle::validate` for the
    /// permissive-mode projection over layers 5-8.
    pub const fn default_severity(self) -> Severity {
        match self {
            Self::InvalidInputType
            | Self::EmptyInput
            | Self::InvalidLineCount
            | Self::InvalidLineLength
            | Self::InvalidLineNumber
            | Self::ChecksumMismatch
            | Self::InvalidChecksumCharacter
            | Self::SatelliteNumberMismatch
            | Self::InvalidSatelliteNumber
            | Self::InvalidClassification
            | Self::ValueOutOfRange
            | Self::InvalidNumberFormat => Severity::Error,

            Self::SatelliteNameTooLong
            | Self::SatelliteNameFormatWarning
            | Self::ClassifiedDataWarning
            | Self::StaleTleWarning
            | Self::HighEccentricityWarning
            | Self::LowMeanMotionWarning
            | Self::DeprecatedEpochYearWarning
            | Self::RevolutionNumberRolloverWarning
            | Self::NearZeroDragWarning
            | Self::NonStandardEphemerisWarning
            | Self::NegativeDecayWarning => Severity::Warning,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stable_strings_match_spec() {
        assert_eq!(ErrorCode::ChecksumMismatch.as_str(), "CHECKSUM_MISMATCH");
        assert_eq!(ErrorCode::EmptyInput.as_str(), "EMPTY_INPUT");
        assert_eq!(
            ErrorCode::RevolutionNumberRolloverWarning.as_str(),
            "REVOLUTION_NUMBER_ROLLOVER_WARNING"
        );
    }

    #[test]
    fn structural_codes_are_never_warnings() {
        for code in [
            ErrorCode::InvalidInputType,
            ErrorCode::EmptyInput,
            ErrorCode::InvalidLineCount,
            ErrorCode::InvalidLineLength,
            ErrorCode::InvalidLineNumber,
        ] {
            assert_eq!(code.default_severity(), Severity::Error);
        }
    }
}
