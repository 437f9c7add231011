//! Integration-level scenarios (spec §8 "Testable properties" and the
//! numbered scenarios S1-S6). Unit tests colocated with each module cover
//! the pure functions; this file exercises the public façade end to end.

use chrono::{TimeZone, Utc};
use tle::{parse_tle, parse_tle_at, parse_with_state_machine, ErrorCode, Mode, ParseOptions};

const ISS_TLE: &str = "ISS (ZARYA)\n1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927\n2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

const ISS_TLE_2LINE: &str = "1 25544U 98067A   08264.51782528 -.00002182  00000-0 -11606-4 0  2927\n2 25544  51.6416 247.4627 0006703 130.5360 325.0288 15.72125391563537";

fn reference_date() -> chrono::DateTime<Utc> {
    Utc.with_ymd_and_hms(2008, 9, 20, 0, 0, 0).unwrap()
}

#[test]
fn s1_three_line_form_parses_and_round_trips() {
    let record = parse_tle_at(ISS_TLE, &ParseOptions::default(), reference_date()).unwrap();
    assert_eq!(record.satellite_name.as_deref(), Some("ISS (ZARYA)"));
    let reconstructed = tle::reconstruct(&record).unwrap();
    assert_eq!(reconstructed, ISS_TLE);
}

#[test]
fn s1b_two_line_form_parses_with_no_name() {
    let record = parse_tle_at(ISS_TLE_2LINE, &ParseOptions::default(), reference_date()).unwrap();
    assert!(record.satellite_name.is_none());
    assert_eq!(record.satellite_number(), Some("25544"));
}

#[test]
fn s5_empty_input_is_a_format_error_not_a_panic() {
    let err = parse_tle_at("", &ParseOptions::default(), reference_date()).unwrap_err();
    match err {
        tle::TleError::Format(e) => assert_eq!(e.code, ErrorCode::EmptyInput),
        tle::TleError::Validation(_) => panic!("expected a format error"),
    }
}

#[test]
fn s5b_four_data_lines_is_invalid_line_count() {
    let text = format!("{ISS_TLE}\nEXTRA LINE THAT IS NOT A NAME");
    let err = parse_tle_at(&text, &ParseOptions::default(), reference_date()).unwrap_err();
    match err {
        tle::TleError::Format(e) => assert_eq!(e.code, ErrorCode::InvalidLineCount),
        tle::TleError::Validation(_) => panic!("expected a format error"),
    }
}

#[test]
fn s6_permissive_mode_accepts_what_strict_mode_rejects() {
    let mut lines: Vec<&str> = ISS_TLE.lines().collect();
    let mut line2 = lines[2].to_string();
    line2.replace_range(2..7, "25545");
    lines[2] = &line2;
    let bad = lines.join("\n");

    let strict = parse_tle_at(&bad, &ParseOptions::default(), reference_date());
    assert!(strict.is_err());

    let permissive_options = ParseOptions::default().with_mode(Mode::Permissive);
    let permissive = parse_tle_at(&bad, &permissive_options, reference_date()).unwrap();
    assert!(permissive
        .warnings
        .iter()
        .any(|i| i.code == ErrorCode::SatelliteNumberMismatch));
}

#[test]
fn property_every_valid_tle_round_trips_through_parse_and_reconstruct() {
    let record = parse_tle(ISS_TLE, &ParseOptions::default()).unwrap();
    let text = tle::reconstruct(&record).unwrap();
    let reparsed = parse_tle(&text, &ParseOptions::default()).unwrap();
    assert_eq!(record.fields, reparsed.fields);
}

#[test]
fn property_validation_never_stops_at_the_first_error() {
    let mut lines: Vec<&str> = ISS_TLE.lines().collect();
    let mut line1 = lines[1].to_string();
    line1.replace_range(7..8, "Z"); // invalid classification
    lines[1] = &line1;
    let mut line2 = lines[2].to_string();
    line2.replace_range(2..7, "00000"); // out-of-range satellite number + mismatch
    lines[2] = &line2;
    let bad = lines.join("\n");

    let report = tle::validate_tle_at(&bad, &ParseOptions::default(), reference_date()).unwrap();
    assert!(report.errors.iter().any(|i| i.code == ErrorCode::InvalidClassification));
    assert!(report.errors.iter().any(|i| i.code == ErrorCode::SatelliteNumberMismatch));
}

#[test]
fn property_checksum_disabled_skips_layer_five_entirely() {
    let mut lines: Vec<&str> = ISS_TLE.lines().collect();
    let mut line1 = lines[1].to_string();
    line1.replace_range(68.., "0");
    lines[1] = &line1;
    let bad = lines.join("\n");

    let options = ParseOptions::default().with_strict_checksums(false);
    let record = parse_tle_at(&bad, &options, reference_date()).unwrap();
    assert_eq!(record.satellite_number(), Some("25544"));
}

#[test]
fn state_machine_continues_past_a_short_line_where_strict_parse_aborts() {
    let mut lines: Vec<&str> = ISS_TLE.lines().collect();
    let shortened = lines[1][..60].to_string();
    lines[1] = &shortened;
    let text = lines.join("\n");

    let strict = parse_tle_at(&text, &ParseOptions::default(), reference_date());
    assert!(strict.is_err());

    let outcome = parse_with_state_machine(&text, &ParseOptions::default());
    // Unlike the strict path, the state machine doesn't abort outright: it
    // records INVALID_LINE_LENGTH, keeps processing the fields that were
    // actually readable, and reports data anyway — but a truncated line
    // still means the record didn't succeed cleanly (spec scenario S5).
    assert!(!outcome.success);
    assert!(outcome.data.is_some());
    assert!(outcome
        .errors
        .iter()
        .any(|i| i.code == ErrorCode::InvalidLineLength));
    assert!(!outcome.recovery_actions.is_empty());
}

#[test]
fn trailing_comment_lines_are_ignored_and_preserved() {
    let text = format!("# source: example\n{ISS_TLE}");
    let record = parse_tle_at(&text, &ParseOptions::default(), reference_date()).unwrap();
    assert_eq!(record.comments, vec!["# source: example".to_string()]);
}
