//! Property-based tests for the schedule core using proptest.
//!
//! These verify invariants that should hold for *any* valid day set, window,
//! or derivation input, not just the specific examples in the other test
//! files.

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;

use marquee_core::dayset::DaySet;
use marquee_core::overlap::find_overlaps;
use marquee_core::schedule::ScheduleRow;
use marquee_core::store::{ScheduleKey, ScheduleStore};
use marquee_core::template::{derive_for_date, Adjustment};
use marquee_core::window::TimeWindow;

// ---------------------------------------------------------------------------
// Strategies
// ---------------------------------------------------------------------------

/// A non-empty day-set bitmask rendered to its wire string.
fn arb_days() -> impl Strategy<Value = String> {
    (1u8..=0b0111_1111).prop_map(|bits| {
        (0..7u8)
            .filter(|i| bits & (1 << i) != 0)
            .map(|i| char::from(b'1' + i))
            .collect()
    })
}

/// A valid window as (start, end) minute pair, endpoints within one day.
fn arb_window() -> impl Strategy<Value = (u16, u16)> {
    (0u16..1439).prop_flat_map(|start| (Just(start), start + 1..1440u16))
}

/// A calendar date in 2025-2027; day capped at 28 to avoid invalid combos.
fn arb_date() -> impl Strategy<Value = NaiveDate> {
    (2025i32..=2027, 1u32..=12, 1u32..=28)
        .prop_map(|(y, m, d)| NaiveDate::from_ymd_opt(y, m, d).unwrap())
}

fn row(name: &str, days: &str, window: (u16, u16)) -> ScheduleRow {
    ScheduleRow {
        name: name.to_string(),
        enabled: "1".to_string(),
        days: days.to_string(),
        start_hour: (window.0 / 60).to_string(),
        start_min: (window.0 % 60).to_string(),
        end_hour: (window.1 / 60).to_string(),
        end_min: (window.1 % 60).to_string(),
        image: "clock.bmp".to_string(),
        progressbar: "1".to_string(),
    }
}

fn config() -> ProptestConfig {
    ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    }
}

// ---------------------------------------------------------------------------
// Property 1: Disjoint day sets never conflict, whatever the windows
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn disjoint_days_never_conflict(
        bits in 1u8..0b0111_1111,
        existing_window in arb_window(),
        candidate_window in arb_window(),
    ) {
        // Split the week into complementary halves.
        let complement = !bits & 0b0111_1111;
        prop_assume!(complement != 0);

        let existing_days: String = (0..7u8)
            .filter(|i| bits & (1 << i) != 0)
            .map(|i| char::from(b'1' + i))
            .collect();
        let candidate_days: String = (0..7u8)
            .filter(|i| complement & (1 << i) != 0)
            .map(|i| char::from(b'1' + i))
            .collect();

        let mut store = ScheduleStore::new();
        store.add(ScheduleKey::Default, row("Existing", &existing_days, existing_window));

        let conflicts = find_overlaps(
            &store,
            ScheduleKey::Default,
            DaySet::parse(&candidate_days).unwrap(),
            TimeWindow::new(candidate_window.0, candidate_window.1).unwrap(),
            None,
        );

        prop_assert!(
            conflicts.is_empty(),
            "disjoint day sets {} / {} conflicted",
            existing_days,
            candidate_days
        );
    }
}

// ---------------------------------------------------------------------------
// Property 2: Touching windows never conflict, even on identical day sets
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn touching_windows_never_conflict(
        days in arb_days(),
        first in 1u16..1438,
        len in 1u16..60,
    ) {
        // [start, first) then [first, first+len), clamped to the day.
        let start = first.saturating_sub(30);
        let end = (first + len).min(1439);
        prop_assume!(start < first && first < end);

        let mut store = ScheduleStore::new();
        store.add(ScheduleKey::Default, row("Before", &days, (start, first)));

        let conflicts = find_overlaps(
            &store,
            ScheduleKey::Default,
            DaySet::parse(&days).unwrap(),
            TimeWindow::new(first, end).unwrap(),
            None,
        );

        prop_assert!(conflicts.is_empty(), "touching at {} conflicted", first);
    }
}

// ---------------------------------------------------------------------------
// Property 3: Overlapping windows on a shared day always conflict
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn shared_minute_always_conflicts(
        days in arb_days(),
        existing in arb_window(),
        offset in 0u16..30,
    ) {
        // Candidate starts inside the existing window, so they share at
        // least one minute.
        let cand_start = existing.0 + (offset % (existing.1 - existing.0));
        let cand_end = (cand_start + 1).max(existing.1.min(cand_start + 15));
        prop_assume!(cand_end < 1440 && cand_start < cand_end);

        let mut store = ScheduleStore::new();
        store.add(ScheduleKey::Default, row("Existing", &days, existing));

        let conflicts = find_overlaps(
            &store,
            ScheduleKey::Default,
            DaySet::parse(&days).unwrap(),
            TimeWindow::new(cand_start, cand_end).unwrap(),
            None,
        );

        prop_assert_eq!(conflicts.len(), 1);
    }
}

// ---------------------------------------------------------------------------
// Property 4: Shift round trip -- +s then -s restores every window
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn shift_round_trips(
        window in arb_window(),
        shift in -600i32..600,
    ) {
        let w = TimeWindow::new(window.0, window.1).unwrap();

        // Only consider shifts that keep the window inside the day; the
        // checked API refuses the rest.
        if let Ok(shifted) = w.shift(shift) {
            prop_assert_eq!(shifted.shift(-shift).unwrap(), w);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 5: Every derived row is tagged to exactly the target weekday
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn derivation_always_yields_single_day_rows(
        sources in prop::collection::vec((arb_days(), arb_window()), 0..8),
        date in arb_date(),
    ) {
        let rows: Vec<ScheduleRow> = sources
            .iter()
            .enumerate()
            .map(|(i, (days, window))| row(&format!("S{}", i), days, *window))
            .collect();

        let derived = derive_for_date(&rows, date, &Adjustment::Copy).unwrap();

        let expected = DaySet::token(date.weekday()).to_string();
        for r in &derived {
            prop_assert_eq!(&r.days, &expected);
        }
    }
}

// ---------------------------------------------------------------------------
// Property 6: Derivation keeps exactly the rows active on the target day
// ---------------------------------------------------------------------------
proptest! {
    #![proptest_config(config())]

    #[test]
    fn derivation_filters_exactly_by_weekday(
        sources in prop::collection::vec((arb_days(), arb_window()), 0..8),
        date in arb_date(),
    ) {
        let rows: Vec<ScheduleRow> = sources
            .iter()
            .enumerate()
            .map(|(i, (days, window))| row(&format!("S{}", i), days, *window))
            .collect();

        let derived = derive_for_date(&rows, date, &Adjustment::Copy).unwrap();

        let expected = rows
            .iter()
            .filter(|r| DaySet::parse(&r.days).unwrap().contains(date.weekday()))
            .count();
        prop_assert_eq!(derived.len(), expected);
    }
}
