use time::Duration;

use crate::domain::duration::{format_duration, parse_duration};
use crate::errors::domain::{DomainError, ValidationKind};

fn assert_bad_duration(input: &str) {
    match parse_duration(input) {
        Err(DomainError::Validation {
            kind: ValidationKind::BadDuration,
            ..
        }) => {}
        other => panic!("expected BadDuration for {input:?}, got {other:?}"),
    }
}

#[test]
fn parses_single_units() {
    assert_eq!(parse_duration("3d").unwrap(), Duration::days(3));
    assert_eq!(parse_duration("5h").unwrap(), Duration::hours(5));
    assert_eq!(parse_duration("45m").unwrap(), Duration::minutes(45));
    assert_eq!(parse_duration("30s").unwrap(), Duration::seconds(30));
}

#[test]
fn parses_descending_compound_segments() {
    assert_eq!(
        parse_duration("2d5h").unwrap(),
        Duration::days(2) + Duration::hours(5)
    );
    assert_eq!(
        parse_duration("1d2h30m15s").unwrap(),
        Duration::days(1) + Duration::hours(2) + Duration::minutes(30) + Duration::seconds(15)
    );
}

#[test]
fn rejects_out_of_order_units() {
    assert_bad_duration("5h2d");
    assert_bad_duration("30m1h");
}

#[test]
fn rejects_repeated_units() {
    assert_bad_duration("2d2d");
    assert_bad_duration("1h1h");
}

#[test]
fn rejects_malformed_input() {
    assert_bad_duration("");
    assert_bad_duration("   ");
    assert_bad_duration("d");
    assert_bad_duration("12");
    assert_bad_duration("12x");
    assert_bad_duration("h12");
    assert_bad_duration("1.5h");
}

#[test]
fn rejects_overflowing_values() {
    assert_bad_duration("999999999999999999999d");
    assert_bad_duration("9223372036854775807d");
}

#[test]
fn formats_most_compact_form() {
    assert_eq!(format_duration(Duration::days(2) + Duration::hours(5)), "2d5h");
    assert_eq!(format_duration(Duration::hours(48)), "2d");
    assert_eq!(format_duration(Duration::seconds(90)), "1m30s");
    assert_eq!(format_duration(Duration::ZERO), "0s");
}

#[test]
fn round_trips_typical_config_values() {
    for s in ["12h", "2d", "7d", "1d2h30m", "6h", "30s"] {
        let d = parse_duration(s).unwrap();
        assert_eq!(format_duration(d), s);
    }
}
