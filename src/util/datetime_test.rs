use super::*;
use time::macros::{date, datetime, offset};

#[test]
fn parses_datetime_local_form_value_as_naive() {
    assert_eq!(parse_timestamp("2026-10-17T09:30"), Some(Timestamp::Naive(datetime!(2026-10-17 09:30))));
}

#[test]
fn parses_naive_with_space_and_seconds() {
    assert_eq!(parse_timestamp("2026-10-17 18:05:42"), Some(Timestamp::Naive(datetime!(2026-10-17 18:05:42))));
}

#[test]
fn parses_bare_date_as_midnight() {
    assert_eq!(parse_timestamp("2026-10-17"), Some(Timestamp::Naive(datetime!(2026-10-17 00:00))));
}

#[test]
fn parses_rfc3339_with_offset() {
    let parsed = parse_timestamp("2026-10-17T23:30:00Z").unwrap();
    assert_eq!(parsed, Timestamp::Zoned(datetime!(2026-10-17 23:30 UTC)));
}

#[test]
fn parses_flask_gmt_rendering() {
    let parsed = parse_timestamp("Sat, 17 Oct 2026 10:30:00 GMT").unwrap();
    assert_eq!(parsed.to_local(offset!(UTC)), datetime!(2026-10-17 10:30));
}

#[test]
fn rejects_garbage() {
    assert_eq!(parse_timestamp(""), None);
    assert_eq!(parse_timestamp("mañana"), None);
    assert_eq!(parse_timestamp("2026-13-40T10:00"), None);
}

#[test]
fn zoned_timestamp_shifts_date_into_local_offset() {
    let parsed = parse_timestamp("2026-10-17T23:30:00Z").unwrap();
    assert_eq!(parsed.local_date(offset!(UTC)), date!(2026-10-17));
    assert_eq!(parsed.local_date(offset!(+2)), date!(2026-10-18));
    assert_eq!(parsed.local_date(offset!(-5)), date!(2026-10-17));
}

#[test]
fn naive_timestamp_ignores_offset() {
    let parsed = parse_timestamp("2026-10-17T23:30").unwrap();
    assert_eq!(parsed.local_date(offset!(+9)), date!(2026-10-17));
}

#[test]
fn es_formats_drop_leading_zeros_on_date() {
    assert_eq!(format_es_date(date!(2026-01-05)), "5/1/2026");
    assert_eq!(format_es_datetime(datetime!(2026-01-05 08:04:09)), "5/1/2026, 08:04:09");
}

#[test]
fn display_helpers_echo_unparseable_input() {
    assert_eq!(display_datetime("pronto", offset!(UTC)), "pronto");
    assert_eq!(display_date("pronto", offset!(UTC)), "pronto");
    assert_eq!(display_date("2026-10-17T09:30", offset!(UTC)), "17/10/2026");
}

#[test]
fn datetime_local_validation() {
    assert!(is_datetime_local("2026-10-17T09:30"));
    assert!(is_datetime_local("2026-10-17T09:30:15"));
    assert!(!is_datetime_local("2026-10-17"));
    assert!(!is_datetime_local("17/10/2026 09:30"));
}
