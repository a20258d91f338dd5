//! The in-memory schedule store: calendar key → ordered rows.
//!
//! Keys are either the `default` fallback collection or one ISO date; each
//! key's rows keep their insertion order, which is also the order they are
//! written back to disk. The store never validates rows -- it is a container,
//! and malformed legacy rows pass through it untouched.

use std::collections::BTreeMap;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::error::{MarqueeError, Result};
use crate::schedule::ScheduleRow;

/// Literal key of the fallback collection.
pub const DEFAULT_KEY: &str = "default";

/// A schedule collection's calendar key.
///
/// Ordering puts `Default` before every date, then dates ascending -- the
/// order listings show collections in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum ScheduleKey {
    Default,
    Date(NaiveDate),
}

impl ScheduleKey {
    pub fn is_default(self) -> bool {
        matches!(self, ScheduleKey::Default)
    }

    pub fn date(self) -> Option<NaiveDate> {
        match self {
            ScheduleKey::Default => None,
            ScheduleKey::Date(d) => Some(d),
        }
    }
}

impl FromStr for ScheduleKey {
    type Err = MarqueeError;

    fn from_str(s: &str) -> Result<ScheduleKey> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(DEFAULT_KEY) {
            return Ok(ScheduleKey::Default);
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(ScheduleKey::Date)
            .map_err(|_| {
                MarqueeError::Format(format!(
                    "calendar key must be YYYY-MM-DD or '{}' (got '{}')",
                    DEFAULT_KEY, s
                ))
            })
    }
}

/// Renders the filename stem: `default` or the ISO date.
impl std::fmt::Display for ScheduleKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScheduleKey::Default => f.write_str(DEFAULT_KEY),
            ScheduleKey::Date(d) => write!(f, "{}", d.format("%Y-%m-%d")),
        }
    }
}

/// All schedule collections currently in memory.
#[derive(Debug, Clone, Default)]
pub struct ScheduleStore {
    collections: BTreeMap<ScheduleKey, Vec<ScheduleRow>>,
}

impl ScheduleStore {
    pub fn new() -> ScheduleStore {
        ScheduleStore::default()
    }

    /// Append one row to `key`, creating the collection if needed. No
    /// uniqueness check: names may collide, and that is the caller's
    /// business to warn about.
    pub fn add(&mut self, key: ScheduleKey, row: ScheduleRow) {
        self.collections.entry(key).or_default().push(row);
    }

    /// Replace `key`'s collection wholesale.
    pub fn replace(&mut self, key: ScheduleKey, rows: Vec<ScheduleRow>) {
        self.collections.insert(key, rows);
    }

    /// Append `rows` to `key`'s collection. No dedup: merging the same rows
    /// twice stores them twice.
    pub fn merge(&mut self, key: ScheduleKey, rows: Vec<ScheduleRow>) {
        self.collections.entry(key).or_default().extend(rows);
    }

    /// Remove `key`'s entire collection, returning the rows that were there.
    ///
    /// # Errors
    /// [`MarqueeError::NotFound`] when the key has no collection.
    pub fn remove_key(&mut self, key: ScheduleKey) -> Result<Vec<ScheduleRow>> {
        self.collections
            .remove(&key)
            .ok_or_else(|| MarqueeError::NotFound(format!("no schedule collection for '{}'", key)))
    }

    /// The rows under `key`; empty when the key has no collection.
    pub fn get(&self, key: ScheduleKey) -> &[ScheduleRow] {
        self.collections.get(&key).map_or(&[], |rows| rows.as_slice())
    }

    /// Mutable access for in-place edits. `None` when the key has no
    /// collection.
    pub fn rows_mut(&mut self, key: ScheduleKey) -> Option<&mut Vec<ScheduleRow>> {
        self.collections.get_mut(&key)
    }

    pub fn contains_key(&self, key: ScheduleKey) -> bool {
        self.collections.contains_key(&key)
    }

    /// Keys in display order: `default` first, then dates ascending.
    pub fn keys(&self) -> impl Iterator<Item = ScheduleKey> + '_ {
        self.collections.keys().copied()
    }

    pub fn key_count(&self) -> usize {
        self.collections.len()
    }

    /// Total rows across every collection.
    pub fn total_rows(&self) -> usize {
        self.collections.values().map(Vec::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.collections.is_empty()
    }
}
