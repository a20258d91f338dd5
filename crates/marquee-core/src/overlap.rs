//! Advisory overlap detection between schedule entries.
//!
//! Two entries conflict when they share at least one weekday AND their time
//! windows intersect on the half-open minute domain. Conflicts are warnings,
//! never errors: the caller is free to save an overlapping schedule, and the
//! devices will show whichever entry their firmware picks first.

use crate::dayset::DaySet;
use crate::schedule::ScheduleRecord;
use crate::store::{ScheduleKey, ScheduleStore};
use crate::window::TimeWindow;

/// One detected conflict against an existing entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conflict {
    /// Name of the existing entry.
    pub name: String,
    /// The existing entry's window.
    pub window: TimeWindow,
    /// The days both entries are active on (full intersection).
    pub days: DaySet,
}

impl std::fmt::Display for Conflict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {} on {}", self.name, self.window, self.days.day_names())
    }
}

/// Find every existing entry under `key` that conflicts with a candidate
/// day-set + window.
///
/// - `exclude_name` skips existing entries bearing that name (every match,
///   not just the first) -- pass the pre-edit name when re-checking an edit.
/// - Rows that fail to parse are skipped silently: the store can hold
///   partially-invalid legacy rows, and a scan must never fail or mutate
///   anything because of them.
/// - A key with no collection yields no conflicts.
///
/// Returns all conflicts found, in the collection's storage order.
pub fn find_overlaps(
    store: &ScheduleStore,
    key: ScheduleKey,
    days: DaySet,
    window: TimeWindow,
    exclude_name: Option<&str>,
) -> Vec<Conflict> {
    let mut conflicts = Vec::new();

    for row in store.get(key) {
        if exclude_name.is_some_and(|name| row.name == name) {
            continue;
        }

        // Legacy rows may not parse; they cannot conflict.
        let Ok(existing) = ScheduleRecord::try_from(row) else {
            continue;
        };

        let shared = days.intersection(existing.days);
        if shared.is_empty() {
            continue;
        }

        if window.overlaps(existing.window) {
            conflicts.push(Conflict {
                name: existing.name,
                window: existing.window,
                days: shared,
            });
        }
    }

    conflicts
}
