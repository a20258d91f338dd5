//! Tests for template derivation.

use chrono::NaiveDate;
use marquee_core::schedule::ScheduleRow;
use marquee_core::template::{derive_for_date, Adjustment};

fn row(name: &str, days: &str, start_h: u16, start_m: u16, end_h: u16, end_m: u16) -> ScheduleRow {
    ScheduleRow {
        name: name.to_string(),
        enabled: "1".to_string(),
        days: days.to_string(),
        start_hour: start_h.to_string(),
        start_min: start_m.to_string(),
        end_hour: end_h.to_string(),
        end_min: end_m.to_string(),
        image: "clock.bmp".to_string(),
        progressbar: "1".to_string(),
    }
}

/// 2025-12-24 is a Wednesday.
fn a_wednesday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 24).unwrap()
}

/// 2025-12-27 is a Saturday.
fn a_saturday() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 12, 27).unwrap()
}

#[test]
fn filters_by_target_weekday_and_retags() {
    let source = vec![row("Wake up", "12345", 7, 0, 7, 30)];

    let derived = derive_for_date(&source, a_wednesday(), &Adjustment::Copy).unwrap();

    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].days, "3");
    assert_eq!(derived[0].start_hour, "7");
    assert_eq!(derived[0].start_min, "0");
    assert_eq!(derived[0].end_hour, "7");
    assert_eq!(derived[0].end_min, "30");
    assert_eq!(derived[0].name, "Wake up");
}

#[test]
fn weekday_only_rows_do_not_derive_onto_a_weekend() {
    let source = vec![
        row("Wake up", "12345", 7, 0, 7, 30),
        row("Sleep in", "67", 9, 0, 9, 30),
    ];

    let derived = derive_for_date(&source, a_saturday(), &Adjustment::Copy).unwrap();

    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].name, "Sleep in");
    assert_eq!(derived[0].days, "6");
}

#[test]
fn every_derived_row_is_single_day() {
    let source = vec![
        row("A", "1234567", 7, 0, 7, 30),
        row("B", "37", 8, 0, 8, 30),
        row("C", "3", 9, 0, 9, 30),
    ];

    let derived = derive_for_date(&source, a_wednesday(), &Adjustment::Copy).unwrap();

    assert_eq!(derived.len(), 3);
    for r in &derived {
        assert_eq!(r.days, "3", "derived row '{}' must be Wednesday-only", r.name);
    }
}

#[test]
fn shift_applies_to_every_selected_row() {
    let source = vec![
        row("Breakfast", "1234567", 7, 0, 7, 30),
        row("Lunch", "1234567", 12, 0, 13, 0),
    ];

    let derived = derive_for_date(&source, a_wednesday(), &Adjustment::Shift(45)).unwrap();

    assert_eq!(derived[0].start_hour, "7");
    assert_eq!(derived[0].start_min, "45");
    assert_eq!(derived[0].end_hour, "8");
    assert_eq!(derived[0].end_min, "15");
    assert_eq!(derived[1].start_hour, "12");
    assert_eq!(derived[1].start_min, "45");
    assert_eq!(derived[1].end_hour, "13");
    assert_eq!(derived[1].end_min, "45");
}

#[test]
fn negative_shift_moves_earlier() {
    let source = vec![row("Breakfast", "1234567", 7, 0, 7, 30)];

    let derived = derive_for_date(&source, a_wednesday(), &Adjustment::Shift(-30)).unwrap();

    assert_eq!(derived[0].start_hour, "6");
    assert_eq!(derived[0].start_min, "30");
    assert_eq!(derived[0].end_hour, "7");
    assert_eq!(derived[0].end_min, "0");
}

#[test]
fn shift_out_of_the_day_aborts_the_derivation() {
    let source = vec![
        row("Early", "1234567", 7, 0, 7, 30),
        row("Late show", "1234567", 23, 0, 23, 45),
    ];

    let result = derive_for_date(&source, a_wednesday(), &Adjustment::Shift(60));
    assert!(result.is_err(), "no half-shifted collection may come back");
}

#[test]
fn select_keeps_only_chosen_indices() {
    let source = vec![
        row("A", "1234567", 7, 0, 7, 30),
        row("B", "1234567", 8, 0, 8, 30),
        row("C", "1234567", 9, 0, 9, 30),
    ];

    let derived =
        derive_for_date(&source, a_wednesday(), &Adjustment::Select(vec![0, 2])).unwrap();

    let names: Vec<&str> = derived.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, ["A", "C"]);
}

#[test]
fn select_indexes_the_filtered_list() {
    // "B" does not apply on Wednesday, so index 1 of the filtered list is "C".
    let source = vec![
        row("A", "1234567", 7, 0, 7, 30),
        row("B", "67", 8, 0, 8, 30),
        row("C", "1234567", 9, 0, 9, 30),
    ];

    let derived = derive_for_date(&source, a_wednesday(), &Adjustment::Select(vec![1])).unwrap();

    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].name, "C");
}

#[test]
fn select_ignores_out_of_range_indices() {
    let source = vec![row("A", "1234567", 7, 0, 7, 30)];

    let derived =
        derive_for_date(&source, a_wednesday(), &Adjustment::Select(vec![0, 5])).unwrap();

    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].name, "A");
}

#[test]
fn malformed_source_rows_are_skipped() {
    let mut bad = row("Legacy", "1234567", 8, 0, 9, 0);
    bad.start_hour = "late".to_string();
    let source = vec![bad, row("Valid", "1234567", 9, 0, 10, 0)];

    let derived = derive_for_date(&source, a_wednesday(), &Adjustment::Copy).unwrap();

    assert_eq!(derived.len(), 1);
    assert_eq!(derived[0].name, "Valid");
}

#[test]
fn empty_source_derives_empty() {
    let derived = derive_for_date(&[], a_wednesday(), &Adjustment::Copy).unwrap();
    assert!(derived.is_empty());
}
