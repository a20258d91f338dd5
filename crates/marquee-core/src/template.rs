//! Template derivation: materialize one date's schedule from a source
//! collection.
//!
//! A derived collection is built for a single concrete date, so every
//! produced row is re-tagged to that date's weekday alone, whatever its
//! source row spanned. Derivation returns new rows and leaves the store
//! untouched; replacing or merging into the target key is caller policy.

use chrono::{Datelike, NaiveDate};

use crate::dayset::DaySet;
use crate::error::Result;
use crate::schedule::{ScheduleRecord, ScheduleRow};

/// How the selected source rows are transformed before re-tagging.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Adjustment {
    /// Copy the selected rows as they are.
    Copy,
    /// Shift every window by this many minutes (negative = earlier).
    Shift(i32),
    /// Keep only these 0-based indices into the day-filtered list. Unknown
    /// indices are ignored.
    Select(Vec<usize>),
}

/// Derive rows for `target_date` from a source collection.
///
/// Source rows are filtered to those active on the target date's weekday;
/// rows that fail to parse are skipped, the same defensive posture the
/// overlap scan takes. The adjustment is applied to the filtered list, and
/// every resulting row's day set becomes the singleton target weekday.
///
/// # Errors
/// [`crate::error::MarqueeError::Range`] when a `Shift` pushes any window
/// outside the day. Derivation is all-or-nothing: a failed shift aborts
/// instead of returning a half-shifted collection.
pub fn derive_for_date(
    source: &[ScheduleRow],
    target_date: NaiveDate,
    adjustment: &Adjustment,
) -> Result<Vec<ScheduleRow>> {
    let target_day = target_date.weekday();

    let matching: Vec<ScheduleRecord> = source
        .iter()
        .filter_map(|row| ScheduleRecord::try_from(row).ok())
        .filter(|record| record.days.contains(target_day))
        .collect();

    let selected: Vec<ScheduleRecord> = match adjustment {
        Adjustment::Copy => matching,
        Adjustment::Shift(minutes) => {
            let mut shifted = Vec::with_capacity(matching.len());
            for mut record in matching {
                record.window = record.window.shift(*minutes)?;
                shifted.push(record);
            }
            shifted
        }
        Adjustment::Select(indices) => indices
            .iter()
            .filter_map(|&i| matching.get(i).cloned())
            .collect(),
    };

    Ok(selected
        .into_iter()
        .map(|mut record| {
            record.days = DaySet::single(target_day);
            record.to_row()
        })
        .collect())
}
