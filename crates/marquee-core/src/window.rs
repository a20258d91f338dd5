//! Half-open time-of-day windows in whole minutes.
//!
//! All comparisons run on minute-of-day integers (`hour * 60 + minute`), never
//! on clock strings. Windows are `[start, end)`: a window ending 10:00 and one
//! starting 10:00 share no minute.

use crate::error::{MarqueeError, Result};

/// Minutes in a day; valid minute-of-day values are `0..MINUTES_PER_DAY`.
pub const MINUTES_PER_DAY: u16 = 1440;

/// Parse a clock time in `H:MM` or `HH:MM` form into a minute-of-day.
///
/// # Errors
/// [`MarqueeError::Format`] when the shape is wrong, [`MarqueeError::Range`]
/// when the hour is not 0-23 or the minute is not 0-59.
pub fn parse_clock(text: &str) -> Result<u16> {
    let (hour_part, minute_part) = text
        .split_once(':')
        .ok_or_else(|| MarqueeError::Format(format!("time must be H:MM or HH:MM (got '{}')", text)))?;

    let shape_ok = (1..=2).contains(&hour_part.len())
        && minute_part.len() == 2
        && hour_part.chars().all(|c| c.is_ascii_digit())
        && minute_part.chars().all(|c| c.is_ascii_digit());
    if !shape_ok {
        return Err(MarqueeError::Format(format!(
            "time must be H:MM or HH:MM (got '{}')",
            text
        )));
    }

    let digits = |part: &str| -> Result<u16> {
        part.parse()
            .map_err(|_| MarqueeError::Format(format!("time must be H:MM or HH:MM (got '{}')", text)))
    };
    let hour = digits(hour_part)?;
    let minute = digits(minute_part)?;

    if hour > 23 {
        return Err(MarqueeError::Range(format!("hour must be 0-23 (got {})", hour)));
    }
    if minute > 59 {
        return Err(MarqueeError::Range(format!(
            "minute must be 0-59 (got {})",
            minute
        )));
    }

    Ok(hour * 60 + minute)
}

/// A half-open `[start, end)` window within one day.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    start: u16,
    end: u16,
}

impl TimeWindow {
    /// Build a window from minute-of-day endpoints, enforcing `start < end`.
    ///
    /// # Errors
    /// [`MarqueeError::Range`] when an endpoint is out of the day or the
    /// window is empty or reversed.
    pub fn new(start: u16, end: u16) -> Result<TimeWindow> {
        if start >= MINUTES_PER_DAY || end >= MINUTES_PER_DAY {
            return Err(MarqueeError::Range(format!(
                "window endpoints must be within one day (got {}-{})",
                start, end
            )));
        }
        if start >= end {
            return Err(MarqueeError::Range(
                "start time must be before end time".to_string(),
            ));
        }
        Ok(TimeWindow { start, end })
    }

    /// Parse a window from two clock strings.
    pub fn from_clocks(start: &str, end: &str) -> Result<TimeWindow> {
        TimeWindow::new(parse_clock(start)?, parse_clock(end)?)
    }

    pub fn start(self) -> u16 {
        self.start
    }

    pub fn end(self) -> u16 {
        self.end
    }

    /// Interval intersection on the half-open domain.
    ///
    /// Touching endpoints (`self.end == other.start`) do NOT overlap.
    pub fn overlaps(self, other: TimeWindow) -> bool {
        self.start < other.end && self.end > other.start
    }

    /// Shift both endpoints by `delta` minutes, rejecting any result that
    /// leaves the day. No wraparound: shifting 23:30 by +60 is an error, not
    /// a window that silently crosses midnight.
    ///
    /// # Errors
    /// [`MarqueeError::Range`] when a shifted endpoint falls outside
    /// `[0, 1440)`.
    pub fn shift(self, delta: i32) -> Result<TimeWindow> {
        let start = self.start as i32 + delta;
        let end = self.end as i32 + delta;
        if start < 0 || end >= MINUTES_PER_DAY as i32 {
            return Err(MarqueeError::Range(format!(
                "shift of {:+} minutes pushes {} outside the day",
                delta, self
            )));
        }
        Ok(TimeWindow {
            start: start as u16,
            end: end as u16,
        })
    }

    pub fn start_hour(self) -> u16 {
        self.start / 60
    }

    pub fn start_min(self) -> u16 {
        self.start % 60
    }

    pub fn end_hour(self) -> u16 {
        self.end / 60
    }

    pub fn end_min(self) -> u16 {
        self.end % 60
    }
}

/// Renders `"7:00-7:30"` (unpadded hour, padded minute, matching the files
/// the devices already consume).
impl std::fmt::Display for TimeWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}:{:02}-{}:{:02}",
            self.start_hour(),
            self.start_min(),
            self.end_hour(),
            self.end_min()
        )
    }
}
