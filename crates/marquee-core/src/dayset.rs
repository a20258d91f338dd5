//! Weekday sets in the device wire alphabet.
//!
//! The firmware encodes a schedule's active days as a string over `'1'..'7'`
//! with `1 = Monday`. Internally a `DaySet` is a Monday-first bitmask, so
//! membership and intersection are single bit operations and the wire string
//! is only touched at parse/render boundaries.

use chrono::Weekday;

use crate::error::{MarqueeError, Result};

/// Short display names indexed by days-from-Monday.
const DAY_NAMES: [&str; 7] = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];

/// A set of weekdays.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DaySet(u8);

impl DaySet {
    /// The empty set.
    pub const EMPTY: DaySet = DaySet(0);

    /// All seven days (`"1234567"` on the wire).
    pub const ALL: DaySet = DaySet(0b0111_1111);

    /// Parse a wire string such as `"12345"` (Mon-Fri).
    ///
    /// # Errors
    /// - [`MarqueeError::Format`] when the string is empty or contains a
    ///   symbol outside `'1'..'7'`.
    /// - [`MarqueeError::DuplicateDay`] when a symbol repeats.
    pub fn parse(text: &str) -> Result<DaySet> {
        if text.trim().is_empty() {
            return Err(MarqueeError::Format("day set cannot be empty".to_string()));
        }

        let mut bits = 0u8;
        for c in text.chars() {
            let bit = match c {
                '1'..='7' => 1u8 << (c as u8 - b'1'),
                other => {
                    return Err(MarqueeError::Format(format!(
                        "day set must contain only 1-7 (found '{}')",
                        other
                    )))
                }
            };
            if bits & bit != 0 {
                return Err(MarqueeError::DuplicateDay(c));
            }
            bits |= bit;
        }

        Ok(DaySet(bits))
    }

    /// The singleton set for one weekday.
    pub fn single(day: Weekday) -> DaySet {
        DaySet(1 << day.num_days_from_monday())
    }

    /// The wire token for a weekday (`Mon → '1'`, ..., `Sun → '7'`).
    pub fn token(day: Weekday) -> char {
        (b'1' + day.num_days_from_monday() as u8) as char
    }

    pub fn contains(self, day: Weekday) -> bool {
        self.0 & (1 << day.num_days_from_monday()) != 0
    }

    pub fn intersection(self, other: DaySet) -> DaySet {
        DaySet(self.0 & other.0)
    }

    pub fn is_empty(self) -> bool {
        self.0 == 0
    }

    pub fn len(self) -> usize {
        self.0.count_ones() as usize
    }

    /// Days in Monday-first order.
    pub fn iter(self) -> impl Iterator<Item = Weekday> {
        (0..7u8)
            .filter(move |i| self.0 & (1 << i) != 0)
            .map(|i| match i {
                0 => Weekday::Mon,
                1 => Weekday::Tue,
                2 => Weekday::Wed,
                3 => Weekday::Thu,
                4 => Weekday::Fri,
                5 => Weekday::Sat,
                _ => Weekday::Sun,
            })
    }

    /// Human-readable day names, e.g. `"Mon,Wed,Fri"`.
    pub fn day_names(self) -> String {
        self.iter()
            .map(|d| DAY_NAMES[d.num_days_from_monday() as usize])
            .collect::<Vec<_>>()
            .join(",")
    }
}

/// Renders the wire form, ascending: `"137"`.
impl std::fmt::Display for DaySet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for day in self.iter() {
            write!(f, "{}", DaySet::token(day))?;
        }
        Ok(())
    }
}
