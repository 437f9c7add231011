//! C1 — `LineCanonicalizer` (spec §4.1).
//!
//! Normalizes line endings, strips comments, classifies the surviving
//! lines as an optional name line plus line-1/line-2. Never inspects
//! column content beyond the leading `'1'`/`'2'` used for 3-line name
//! detection — that belongs to C3.

use tle_types::{ErrorCode, FormatError, Issue};

/// Maximum recommended satellite-name length (spec §4.1.g); longer names
/// only produce a warning, never a rejection.
const MAX_NAME_LENGTH: usize = 24;

/// Output of canonicalization: the surviving data lines, classified, plus
/// any comment lines and warnings collected along the way.
#[derive(Debug, Clone, PartialEq)]
pub struct CanonicalLines {
    /// Satellite name, if a 3-line record was supplied.
    pub name: Option<String>,
    /// Line 1 text, trimmed, tabs folded to spaces.
    pub line1: String,
    /// Line 2 text, trimmed, tabs folded to spaces.
    pub line2: String,
    /// Comment lines (leading `#`), in order of appearance.
    pub comments: Vec<String>,
}

fn clean_line(line: &str) -> String {
    line.replace('\t', " ").trim().to_string()
}

/// Canonicalize raw TLE source text.
///
/// Returns the classified lines plus any warnings (e.g.
/// `SATELLITE_NAME_TOO_LONG`), or a [`FormatError`] for the two
/// preconditions this layer can fail outright: `EMPTY_INPUT` and
/// `INVALID_LINE_COUNT`.
pub fn canonicalize(text: &str) -> Result<(CanonicalLines, Vec<Issue>), FormatError> {
    if text.trim().is_empty() {
        return Err(FormatError::new(ErrorCode::EmptyInput, "input is empty"));
    }

    // (a) CRLF -> LF, then remaining CR -> LF, so mixed line endings behave
    // identically to a single-LF document (spec §4.1 edge case, property 4).
    let normalized = text.replace("\r\n", "\n").replace('\r', "\n");

    let mut comments = Vec::new();
    let mut data_lines = Vec::new();
    for raw in normalized.split('\n') {
        let line = clean_line(raw);
        if line.is_empty() {
            continue;
        }
        if line.starts_with('#') {
            comments.push(line);
        } else {
            data_lines.push(line);
        }
    }

    let mut warnings = Vec::new();

    let (name, line1, line2) = match data_lines.len() {
        2 => (None, data_lines.remove(0), data_lines.remove(0)),
        3 => {
            let first = data_lines.remove(0);
            if first.starts_with('1') || first.starts_with('2') {
                warnings.push(Issue::new(
                    ErrorCode::SatelliteNameFormatWarning,
                    "first of three data lines looks like a data line, not a name",
                ));
            }
            let line1 = data_lines.remove(0);
            let line2 = data_lines.remove(0);
            (Some(first), line1, line2)
        }
        _ => {
            return Err(FormatError::new(
                ErrorCode::InvalidLineCount,
                format!(
                    "expected 2 or 3 non-comment data lines, found {}",
                    data_lines.len()
                ),
            )
            .with_details(serde_json::json!({ "actual": data_lines.len() })));
        }
    };

    if let Some(ref n) = name {
        if n.len() > MAX_NAME_LENGTH {
            warnings.push(
                Issue::new(
                    ErrorCode::SatelliteNameTooLong,
                    format!(
                        "satellite name is {} characters, recommended max is {}",
                        n.len(),
                        MAX_NAME_LENGTH
                    ),
                )
                .with_field("satellite_name"),
            );
        }
    }

    Ok((
        CanonicalLines {
            name,
            line1,
            line2,
            comments,
        },
        warnings,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    const ISS_2LINE: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927\n2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn comments_only_is_invalid_line_count_not_empty_input() {
        let err = canonicalize("# just a comment\n# another").unwrap_err();
        assert_eq!(err.code, ErrorCode::InvalidLineCount);
    }

    #[test]
    fn whitespace_only_is_empty_input() {
        let err = canonicalize("   \n\n\t").unwrap_err();
        assert_eq!(err.code, ErrorCode::EmptyInput);
    }

    #[test]
    fn two_lines_have_no_name() {
        let (lines, warnings) = canonicalize(ISS_2LINE).unwrap();
        assert!(lines.name.is_none());
        assert!(warnings.is_empty());
    }

    #[test]
    fn crlf_and_cr_normalize_like_lf() {
        let with_crlf = ISS_2LINE.replace('\n', "\r\n");
        let with_cr = ISS_2LINE.replace('\n', "\r");
        let (lf, _) = canonicalize(ISS_2LINE).unwrap();
        let (crlf, _) = canonicalize(&with_crlf).unwrap();
        let (cr, _) = canonicalize(&with_cr).unwrap();
        assert_eq!(lf, crlf);
        assert_eq!(lf, cr);
    }

    #[test]
    fn three_lines_with_name() {
        let text = format!("ISS (ZARYA)\n{}", ISS_2LINE);
        let (lines, _) = canonicalize(&text).unwrap();
        assert_eq!(lines.name.as_deref(), Some("ISS (ZARYA)"));
    }

    #[test]
    fn over_long_name_warns_but_does_not_fail() {
        let text = format!("A VERY LONG SATELLITE NAME INDEED\n{}", ISS_2LINE);
        let (lines, warnings) = canonicalize(&text).unwrap();
        assert!(lines.name.is_some());
        assert_eq!(warnings.len(), 1);
        assert_eq!(warnings[0].code, ErrorCode::SatelliteNameTooLong);
    }

    #[test]
    fn tabs_fold_to_single_space() {
        let text = ISS_2LINE.replacen(' ', "\t", 1);
        let (lines, _) = canonicalize(&text).unwrap();
        assert_eq!(lines.line1.len(), 69);
    }
}
