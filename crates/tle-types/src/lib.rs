//! # tle-types
//!
//! Shared error taxonomy and value types for the [`tle`](https://docs.rs/tle)
//! crate: stable error codes, the `Issue`/`ValidationError`/`FormatError`
//! shapes, and the small value types (`Classification`, `OptionalField`,
//! `InternationalDesignator`, `QualityGrade`) that appear on both the
//! string-exact `ParsedRecord` and the typed `NumericView`.
//!
//! Split out of `tle` the same way `rotastellar` underpins
//! `rotastellar-intel`: one crate for the vocabulary everything else
//! shares, one crate for the logic built on top of it.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod codes;
mod error;
mod issue;
mod values;

pub use codes::{ErrorCode, Severity};
pub use error::{FormatError, Result, TleError, ValidationError};
pub use issue::{Issue, LineNumber};
pub use values::{Classification, InternationalDesignator, OptionalField, QualityGrade};
