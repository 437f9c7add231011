//! C5 — `StateMachineParser` (spec §4.5).
//!
//! An explicit state machine over the same canonicalize/extract/validate
//! pipeline C7's straight-line `parse_tle` uses, except that recoverable
//! issues apply a bounded [`RecoveryAction`] and continue rather than
//! failing the whole record outright.

use crate::canonicalize::{canonicalize, CanonicalLines};
use crate::fields::extract;
use crate::normalize::NumericView;
use crate::options::ParseOptions;
use crate::record::ParsedRecord;
use crate::validate::{validate, ValidationReport};
use chrono::{DateTime, Utc};
use tle_types::{ErrorCode, Issue, Severity};

/// Where the parser currently sits in the pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParserState {
    /// Nothing consumed yet.
    Initial,
    /// Splitting input into comments/name/line1/line2.
    DetectingFormat,
    /// Handling the optional 3-line satellite name.
    ParsingName,
    /// Slicing and checking line 1.
    ParsingLine1,
    /// Slicing and checking line 2.
    ParsingLine2,
    /// Running layers 5-9 against the extracted fields.
    Validating,
    /// Parse finished (with or without recovered issues).
    Completed,
    /// Parse aborted: an unrecoverable issue was hit.
    Error,
}

/// What the parser did in response to a recoverable issue (spec §4.5.c).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecoveryAction {
    /// Record the issue and proceed unchanged.
    Continue,
    /// Drop the offending field's contribution to validation.
    SkipField,
    /// Substitute a spec-defined default for the offending field.
    UseDefault,
    /// Substitute the expected value for malformed positional data (e.g.
    /// the line-number prefix character) without touching anything else.
    AttemptFix,
    /// Give up; the record cannot be recovered within the attempt budget.
    Abort,
}

/// One recovery decision, recorded for the caller's audit trail.
#[derive(Debug, Clone, PartialEq)]
pub struct RecoveryTrace {
    /// State the parser was in when the issue surfaced.
    pub state: ParserState,
    /// Action taken.
    pub action: RecoveryAction,
    /// The issue that triggered the decision.
    pub issue: Issue,
}

/// Internal transition decision; never surfaced directly.
enum StateStep {
    Advance(ParserState),
    Recover(RecoveryAction, ParserState),
    Fail(Issue),
}

/// Map a strict-mode [`ErrorCode`] to the recovery action it permits, or
/// `None` if the issue is structural and unrecoverable (spec §4.5:
/// layers 1-4 never recover; layers 5-9 may).
fn recovery_for(code: ErrorCode) -> Option<RecoveryAction> {
    match code {
        ErrorCode::InvalidInputType | ErrorCode::EmptyInput | ErrorCode::InvalidLineCount => None,
        // Short/over-length line: keep processing within the characters
        // actually present rather than rewriting the line.
        ErrorCode::InvalidLineLength => Some(RecoveryAction::Continue),
        // Wrong line-number prefix character: accept the line at its
        // expected index anyway.
        ErrorCode::InvalidLineNumber => Some(RecoveryAction::AttemptFix),
        ErrorCode::InvalidChecksumCharacter | ErrorCode::ChecksumMismatch => Some(RecoveryAction::Continue),
        ErrorCode::InvalidSatelliteNumber | ErrorCode::SatelliteNumberMismatch => Some(RecoveryAction::Continue),
        ErrorCode::InvalidClassification => Some(RecoveryAction::UseDefault),
        ErrorCode::ValueOutOfRange => Some(RecoveryAction::Continue),
        // Unparseable numeric field: the field is left as its sentinel
        // (blank/default) value rather than skipped outright.
        ErrorCode::InvalidNumberFormat => Some(RecoveryAction::UseDefault),
        _ => Some(RecoveryAction::Continue),
    }
}

/// Codes that recover (so the machine still reaches `Completed`) but leave
/// the record short of the data a caller would expect from a clean parse —
/// a truncated/over-length line means some fields simply weren't there to
/// read, which is a different thing from a value that parsed and was
/// merely out of range.
fn blocks_success(code: ErrorCode) -> bool {
    matches!(code, ErrorCode::InvalidLineLength)
}

/// Final outcome of [`parse_with_state_machine`] (spec §3 `StateMachineResult`).
#[derive(Debug, Clone, PartialEq)]
pub struct StateMachineResult {
    /// True iff the parser reached `Completed` without aborting.
    pub success: bool,
    /// The parsed record, present when `success` or when
    /// `options.include_partial_results` kept a best-effort record around.
    pub data: Option<ParsedRecord>,
    /// The typed numeric projection, when normalization succeeded.
    pub numeric: Option<NumericView>,
    /// Error-severity issues.
    pub errors: Vec<Issue>,
    /// Warning-severity issues.
    pub warnings: Vec<Issue>,
    /// Every recovery decision made along the way, in order.
    pub recovery_actions: Vec<RecoveryTrace>,
    /// Final state the machine reached (`Completed` or `Error`).
    pub state: ParserState,
}

struct Machine<'a> {
    options: &'a ParseOptions,
    reference_date: DateTime<Utc>,
    recovery_actions: Vec<RecoveryTrace>,
    state: ParserState,
}

impl<'a> Machine<'a> {
    fn new(options: &'a ParseOptions, reference_date: DateTime<Utc>) -> Self {
        Self {
            options,
            reference_date,
            recovery_actions: Vec::new(),
            state: ParserState::Initial,
        }
    }

    fn budget_remaining(&self) -> bool {
        (self.recovery_actions.len() as u32) < self.options.max_recovery_attempts
    }

    fn record(&mut self, action: RecoveryAction, issue: Issue) {
        self.recovery_actions.push(RecoveryTrace {
            state: self.state,
            action,
            issue,
        });
    }

    fn detect_format(&mut self, text: &str) -> Result<(CanonicalLines, Vec<Issue>), Issue> {
        self.state = ParserState::DetectingFormat;
        canonicalize(text).map_err(|e| {
            Issue::new(e.code, e.message.clone())
        })
    }

    /// Walk every error in `report`, applying its recovery action or
    /// failing outright if the budget is exhausted or the issue is
    /// structural.
    fn reconcile_errors(&mut self, report: &ValidationReport) -> StateStep {
        for issue in &report.errors {
            match recovery_for(issue.code) {
                None => return StateStep::Fail(issue.clone()),
                Some(action) => {
                    if !self.options.attempt_recovery {
                        return StateStep::Fail(issue.clone());
                    }
                    if !self.budget_remaining() {
                        return StateStep::Fail(
                            Issue::new(issue.code, "recovery attempt budget exhausted")
                                .with_severity(Severity::Error),
                        );
                    }
                    self.record(action, issue.clone());
                }
            }
        }
        StateStep::Advance(ParserState::Completed)
    }
}

/// Run the recovering state machine over raw TLE text.
///
/// Unlike [`crate::api::parse_tle`], this never returns `Err`: every
/// outcome, including an aborted parse, is reported through
/// [`StateMachineResult`] so the caller can inspect exactly which state
/// the machine reached and what it tried along the way.
pub fn parse_with_state_machine(
    text: &str,
    options: &ParseOptions,
    reference_date: DateTime<Utc>,
) -> StateMachineResult {
    let mut machine = Machine::new(options, reference_date);

    let (lines, mut warnings) = match machine.detect_format(text) {
        Ok(v) => v,
        Err(issue) => {
            machine.state = ParserState::Error;
            return StateMachineResult {
                success: false,
                data: None,
                numeric: None,
                errors: vec![issue],
                warnings: vec![],
                recovery_actions: machine.recovery_actions,
                state: machine.state,
            };
        }
    };

    if lines.name.is_some() {
        machine.state = ParserState::ParsingName;
    }
    machine.state = ParserState::Validating;

    // Extract from the lines exactly as canonicalize produced them — a
    // short or over-length line is never padded or truncated here;
    // `extract` already reads only the characters actually present.
    let fields = extract(&lines.line1, &lines.line2);
    let report = validate(&lines, &fields, options, reference_date);
    warnings.extend(report.warnings.clone());

    let record = ParsedRecord {
        fields: fields.clone(),
        satellite_name: lines.name.clone(),
        warnings: warnings.clone(),
        comments: lines.comments.clone(),
    };

    match machine.reconcile_errors(&report) {
        StateStep::Fail(issue) => {
            machine.state = ParserState::Error;
            let mut errors = report.errors.clone();
            if !errors.contains(&issue) {
                errors.push(issue);
            }
            StateMachineResult {
                success: false,
                data: options.include_partial_results.then_some(record),
                numeric: None,
                errors,
                warnings,
                recovery_actions: machine.recovery_actions,
                state: machine.state,
            }
        }
        StateStep::Advance(next) => {
            machine.state = next;
            let success = !report.errors.iter().any(|i| blocks_success(i.code));
            let numeric = NumericView::build(&fields).ok();
            StateMachineResult {
                success,
                data: Some(record),
                numeric,
                errors: report.errors.clone(),
                warnings,
                recovery_actions: machine.recovery_actions,
                state: machine.state,
            }
        }
        StateStep::Recover(..) => unreachable!("reconcile_errors never returns Recover"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn reference() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2008, 9, 20, 0, 0, 0).unwrap()
    }

    const ISS_TLE: &str = "ISS (ZARYA)\n1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927\n2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

    #[test]
    fn clean_input_completes_with_no_recovery() {
        let result = parse_with_state_machine(ISS_TLE, &ParseOptions::default(), reference());
        assert!(result.success);
        assert_eq!(result.state, ParserState::Completed);
        assert!(result.recovery_actions.is_empty());
        assert!(result.numeric.is_some());
    }

    #[test]
    fn s5_short_line_continues_without_rewriting_and_fails_success() {
        let mut lines: Vec<&str> = ISS_TLE.lines().collect();
        let shortened = lines[1][..40].to_string();
        lines[1] = &shortened;
        let text = lines.join("\n");

        // include_partial_results defaults to true.
        let result = parse_with_state_machine(&text, &ParseOptions::default(), reference());

        assert!(!result.success);
        let length_error = result
            .errors
            .iter()
            .find(|i| i.code == ErrorCode::InvalidLineLength)
            .expect("INVALID_LINE_LENGTH in errors");
        assert_eq!(length_error.expected.as_deref(), Some("69"));
        assert_eq!(length_error.actual.as_deref(), Some("40"));
        assert!(result
            .recovery_actions
            .iter()
            .any(|t| t.issue.code == ErrorCode::InvalidLineLength && t.action == RecoveryAction::Continue));
        // Line 1 was never padded back out to 69 characters: the fields
        // a state-machine caller sees come from exactly the 40 characters
        // actually present.
        let data = result.data.expect("partial results requested");
        assert!(data.fields.line1(crate::schema::FieldName::SatelliteNumber).is_some());
    }

    #[test]
    fn empty_input_aborts_immediately() {
        let result = parse_with_state_machine("", &ParseOptions::default(), reference());
        assert!(!result.success);
        assert_eq!(result.state, ParserState::Error);
        assert_eq!(result.errors[0].code, ErrorCode::EmptyInput);
    }

    #[test]
    fn checksum_mismatch_recovers_by_continuing() {
        let mut lines: Vec<&str> = ISS_TLE.lines().collect();
        let mut line1 = lines[1].to_string();
        line1.replace_range(68.., "9");
        lines[1] = &line1;
        let text = lines.join("\n");

        let result = parse_with_state_machine(&text, &ParseOptions::default(), reference());
        assert!(result.success);
        assert!(result
            .recovery_actions
            .iter()
            .any(|t| t.issue.code == ErrorCode::ChecksumMismatch && t.action == RecoveryAction::Continue));
        // A recovered error-severity issue still shows up in `errors` on a
        // successful outcome — it was continued past, not erased.
        assert!(result.errors.iter().any(|i| i.code == ErrorCode::ChecksumMismatch));
    }

    #[test]
    fn zero_recovery_budget_aborts_on_first_fixable_error() {
        let mut lines: Vec<&str> = ISS_TLE.lines().collect();
        let mut line1 = lines[1].to_string();
        line1.replace_range(68.., "9");
        lines[1] = &line1;
        let text = lines.join("\n");

        let options = ParseOptions::default().with_max_recovery_attempts(0);
        let result = parse_with_state_machine(&text, &options, reference());
        assert!(!result.success);
        assert_eq!(result.state, ParserState::Error);
    }
}
