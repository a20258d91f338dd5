//! Tests for schedule row parsing and whole-schedule validation.

use marquee_core::catalog::Catalog;
use marquee_core::error::MarqueeError;
use marquee_core::schedule::{validate_schedule, ScheduleRecord, ScheduleRow};

fn catalog() -> Catalog {
    Catalog::new(
        vec!["MINT".to_string()],
        Vec::new(),
        vec!["clock.bmp".to_string(), "sun.bmp".to_string()],
    )
}

fn fields(parts: &[&str]) -> Vec<String> {
    parts.iter().map(|s| s.to_string()).collect()
}

#[test]
fn row_from_fields_requires_nine() {
    let ok = fields(&[
        "Morning", "1", "12345", "7", "0", "7", "30", "clock.bmp", "1",
    ]);
    assert!(ScheduleRow::from_fields(&ok).is_ok());

    let short = fields(&["Morning", "1", "12345", "7", "0", "7", "30"]);
    assert!(matches!(
        ScheduleRow::from_fields(&short),
        Err(MarqueeError::Format(_))
    ));
}

#[test]
fn extra_fields_are_ignored() {
    let extra = fields(&[
        "Morning", "1", "12345", "7", "0", "7", "30", "clock.bmp", "1", "surprise",
    ]);
    let row = ScheduleRow::from_fields(&extra).unwrap();
    assert_eq!(row.progressbar, "1");
}

#[test]
fn record_parses_typed_fields_from_row() {
    let row = ScheduleRow::from_fields(&fields(&[
        "Morning", "1", "135", "7", "0", "8", "30", "clock.bmp", "0",
    ]))
    .unwrap();

    let record = ScheduleRecord::try_from(&row).unwrap();
    assert!(record.enabled);
    assert!(!record.show_progress);
    assert_eq!(record.days.to_string(), "135");
    assert_eq!(record.window.start(), 420);
    assert_eq!(record.window.end(), 510);
}

#[test]
fn record_rejects_malformed_rows() {
    let mut bad_number = ScheduleRow::from_fields(&fields(&[
        "Morning", "1", "135", "7", "0", "8", "30", "clock.bmp", "0",
    ]))
    .unwrap();
    bad_number.end_hour = "late".to_string();
    assert!(matches!(
        ScheduleRecord::try_from(&bad_number),
        Err(MarqueeError::Format(_))
    ));

    let mut bad_range = bad_number.clone();
    bad_range.end_hour = "25".to_string();
    assert!(matches!(
        ScheduleRecord::try_from(&bad_range),
        Err(MarqueeError::Range(_))
    ));
}

#[test]
fn record_to_row_normalizes_numbers() {
    let row = ScheduleRow::from_fields(&fields(&[
        " Padded ", "1", "531", "07", "05", "08", "00", "clock.bmp", "1",
    ]))
    .unwrap();

    let normalized = ScheduleRecord::try_from(&row).unwrap().to_row();
    assert_eq!(normalized.days, "135");
    assert_eq!(normalized.start_hour, "7");
    assert_eq!(normalized.start_min, "5");
    assert_eq!(normalized.end_hour, "8");
    assert_eq!(normalized.end_min, "0");
}

#[test]
fn validate_schedule_builds_a_record() {
    let record = validate_schedule(
        "Morning Routine",
        "12345",
        "7:00",
        "07:30",
        "clock.bmp",
        true,
        true,
        &catalog(),
    )
    .unwrap();

    assert_eq!(record.name, "Morning Routine");
    assert_eq!(record.days.to_string(), "12345");
    assert_eq!(record.window.to_string(), "7:00-7:30");
}

#[test]
fn validate_schedule_accumulates_every_field_error() {
    // Empty name, foreign day symbol, malformed start, unknown image: all
    // four must come back from one call.
    let errors = validate_schedule(
        "  ",
        "129",
        "7am",
        "08:00",
        "nope.bmp",
        true,
        true,
        &catalog(),
    )
    .unwrap_err();

    assert_eq!(errors.len(), 4);
}

#[test]
fn window_order_is_only_checked_when_both_clocks_parse() {
    // One malformed clock yields exactly one time error, not a misleading
    // ordering error on top.
    let errors = validate_schedule(
        "Morning",
        "12345",
        "7am",
        "06:00",
        "clock.bmp",
        true,
        true,
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], MarqueeError::Format(msg) if msg.starts_with("start time")));

    // Both parse, reversed: ordering error.
    let errors = validate_schedule(
        "Morning",
        "12345",
        "08:00",
        "07:00",
        "clock.bmp",
        true,
        true,
        &catalog(),
    )
    .unwrap_err();
    assert_eq!(errors.len(), 1);
    assert!(matches!(&errors[0], MarqueeError::Range(_)));
}

#[test]
fn validate_schedule_rejects_long_names() {
    let name = "x".repeat(31);
    let errors = validate_schedule(
        &name,
        "12345",
        "7:00",
        "7:30",
        "clock.bmp",
        true,
        true,
        &catalog(),
    )
    .unwrap_err();
    assert!(matches!(&errors[0], MarqueeError::Range(msg) if msg.contains("too long")));
}
