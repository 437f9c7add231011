//! Small value types shared between `FieldMap`/`ParsedRecord` and
//! `NumericView`.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Security classification marking (column 7 of line 1).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Classification {
    /// `U`
    Unclassified,
    /// `C`
    Classified,
    /// `S`
    Secret,
}

impl Classification {
    /// Parse the single raw classification character.
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'U' => Some(Self::Unclassified),
            'C' => Some(Self::Classified),
            'S' => Some(Self::Secret),
            _ => None,
        }
    }

    /// The raw character this classification reconstructs to.
    pub const fn as_char(self) -> char {
        match self {
            Self::Unclassified => 'U',
            Self::Classified => 'C',
            Self::Secret => 'S',
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

/// A field that may legitimately be blank in the source TLE (e.g.
/// `intl_desig_year`, `ephemeris_type`, `revolution_number`).
///
/// Spec §9's Open Question leaves ambiguous whether blank means "zero" or
/// "absent"; this type makes absence explicit rather than guessing either
/// way, and lets `NumericView` distinguish "field was blank in the source"
/// from "field decoded to zero".
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OptionalField<T> {
    /// The column(s) held a parseable, non-blank value.
    Present(T),
    /// The column(s) were blank (all spaces) after trimming.
    Blank,
}

impl<T> OptionalField<T> {
    /// The contained value, or `None` if blank.
    pub fn value(self) -> Option<T> {
        match self {
            Self::Present(v) => Some(v),
            Self::Blank => None,
        }
    }

    /// The contained value, or a default if blank.
    pub fn unwrap_or(self, default: T) -> T {
        match self {
            Self::Present(v) => v,
            Self::Blank => default,
        }
    }

    /// True if the column(s) were blank.
    pub fn is_blank(self) -> bool {
        matches!(self, Self::Blank)
    }
}

/// International designator: launch year, sequential launch number, and
/// piece letters (e.g. `98-067A` for ISS's core module).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InternationalDesignator {
    /// Two-digit launch year, blank-able.
    pub year: OptionalField<u8>,
    /// Sequential launch number within that year, blank-able.
    pub launch_number: OptionalField<u16>,
    /// Up to three uppercase piece letters (may be empty for the primary
    /// payload on some historical launches).
    pub piece: String,
}

impl fmt::Display for InternationalDesignator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.year.value(), self.launch_number.value()) {
            (Some(y), Some(n)) => write!(f, "{:02}-{:03}{}", y, n, self.piece),
            _ => write!(f, "--{}", self.piece),
        }
    }
}

/// Overall quality grade derived from the composite quality score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QualityGrade {
    /// score >= 90
    A,
    /// score >= 80
    B,
    /// score >= 70
    C,
    /// score >= 60
    D,
    /// score < 60
    F,
}

impl QualityGrade {
    /// Classify a clamped [0, 100] composite score into a letter grade.
    pub fn from_score(score: f64) -> Self {
        if score >= 90.0 {
            Self::A
        } else if score >= 80.0 {
            Self::B
        } else if score >= 70.0 {
            Self::C
        } else if score >= 60.0 {
            Self::D
        } else {
            Self::F
        }
    }
}

impl fmt::Display for QualityGrade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let c = match self {
            Self::A => 'A',
            Self::B => 'B',
            Self::C => 'C',
            Self::D => 'D',
            Self::F => 'F',
        };
        write!(f, "{c}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classification_roundtrips() {
        for c in ['U', 'C', 'S'] {
            let parsed = Classification::from_char(c).unwrap();
            assert_eq!(parsed.as_char(), c);
        }
        assert!(Classification::from_char('X').is_none());
    }

    #[test]
    fn grade_boundaries() {
        assert_eq!(QualityGrade::from_score(95.0), QualityGrade::A);
        assert_eq!(QualityGrade::from_score(90.0), QualityGrade::A);
        assert_eq!(QualityGrade::from_score(89.9), QualityGrade::B);
        assert_eq!(QualityGrade::from_score(59.9), QualityGrade::F);
    }
}
