//! Schedule rows and their validated form.
//!
//! The store keeps [`ScheduleRow`] -- the raw nine string fields of a CSV
//! line -- so that legacy rows that no longer validate still round-trip
//! through load and save untouched. [`ScheduleRecord`] is the typed view;
//! converting a row to a record is where all parsing happens, and code that
//! scans stored data (overlap, derivation) skips rows where that conversion
//! fails instead of failing the whole query.

use crate::catalog::Catalog;
use crate::dayset::DaySet;
use crate::error::{MarqueeError, Result};
use crate::window::TimeWindow;

/// Maximum length of a schedule name, imposed by the device list screen.
pub const MAX_NAME_LEN: usize = 30;

/// Number of fields in a schedule CSV row.
pub const SCHEDULE_FIELDS: usize = 9;

/// One raw schedule line: `name,enabled,days,start_hour,start_min,end_hour,end_min,image,progressbar`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRow {
    pub name: String,
    pub enabled: String,
    pub days: String,
    pub start_hour: String,
    pub start_min: String,
    pub end_hour: String,
    pub end_min: String,
    pub image: String,
    pub progressbar: String,
}

impl ScheduleRow {
    /// Build a row from the fields of a CSV line.
    ///
    /// # Errors
    /// [`MarqueeError::Format`] when fewer than nine fields are present.
    /// Extra fields are ignored.
    pub fn from_fields(fields: &[String]) -> Result<ScheduleRow> {
        if fields.len() < SCHEDULE_FIELDS {
            return Err(MarqueeError::Format(format!(
                "expected {} fields, got {}",
                SCHEDULE_FIELDS,
                fields.len()
            )));
        }
        Ok(ScheduleRow {
            name: fields[0].clone(),
            enabled: fields[1].clone(),
            days: fields[2].clone(),
            start_hour: fields[3].clone(),
            start_min: fields[4].clone(),
            end_hour: fields[5].clone(),
            end_min: fields[6].clone(),
            image: fields[7].clone(),
            progressbar: fields[8].clone(),
        })
    }

    /// The fields of this row in wire order.
    pub fn to_fields(&self) -> [&str; SCHEDULE_FIELDS] {
        [
            &self.name,
            &self.enabled,
            &self.days,
            &self.start_hour,
            &self.start_min,
            &self.end_hour,
            &self.end_min,
            &self.image,
            &self.progressbar,
        ]
    }

    /// Parse this row's day set.
    pub fn day_set(&self) -> Result<DaySet> {
        DaySet::parse(&self.days)
    }

    /// Parse this row's time window from the four numeric fields.
    pub fn window(&self) -> Result<TimeWindow> {
        let minute = |field: &str, what: &str| -> Result<u16> {
            field
                .trim()
                .parse::<u16>()
                .map_err(|_| MarqueeError::Format(format!("{} is not a number: '{}'", what, field)))
        };
        let start_h = minute(&self.start_hour, "start hour")?;
        let start_m = minute(&self.start_min, "start minute")?;
        let end_h = minute(&self.end_hour, "end hour")?;
        let end_m = minute(&self.end_min, "end minute")?;
        if start_h > 23 || end_h > 23 {
            return Err(MarqueeError::Range("hour must be 0-23".to_string()));
        }
        if start_m > 59 || end_m > 59 {
            return Err(MarqueeError::Range("minute must be 0-59".to_string()));
        }
        TimeWindow::new(start_h * 60 + start_m, end_h * 60 + end_m)
    }
}

/// A validated schedule entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduleRecord {
    pub name: String,
    pub enabled: bool,
    pub days: DaySet,
    pub window: TimeWindow,
    pub image: String,
    pub show_progress: bool,
}

impl ScheduleRecord {
    /// Convert back to the wire row. Numeric fields come out normalized
    /// (unpadded integers), which is what the firmware parser expects.
    pub fn to_row(&self) -> ScheduleRow {
        ScheduleRow {
            name: self.name.clone(),
            enabled: if self.enabled { "1" } else { "0" }.to_string(),
            days: self.days.to_string(),
            start_hour: self.window.start_hour().to_string(),
            start_min: self.window.start_min().to_string(),
            end_hour: self.window.end_hour().to_string(),
            end_min: self.window.end_min().to_string(),
            image: self.image.clone(),
            progressbar: if self.show_progress { "1" } else { "0" }.to_string(),
        }
    }
}

impl TryFrom<&ScheduleRow> for ScheduleRecord {
    type Error = MarqueeError;

    fn try_from(row: &ScheduleRow) -> Result<ScheduleRecord> {
        Ok(ScheduleRecord {
            name: row.name.clone(),
            enabled: row.enabled.trim() == "1",
            days: row.day_set()?,
            window: row.window()?,
            image: row.image.clone(),
            show_progress: row.progressbar.trim() == "1",
        })
    }
}

/// Label a clock-parse error with which endpoint produced it.
fn prefix_error(what: &str, err: MarqueeError) -> MarqueeError {
    match err {
        MarqueeError::Format(msg) => MarqueeError::Format(format!("{}: {}", what, msg)),
        MarqueeError::Range(msg) => MarqueeError::Range(format!("{}: {}", what, msg)),
        other => other,
    }
}

/// Validate the pieces of a new schedule entry, accumulating every problem.
///
/// Returns the typed record on success, or the full list of field errors.
/// The window ordering check only runs once both clock strings parse, so a
/// malformed clock produces one error, not two.
pub fn validate_schedule(
    name: &str,
    days: &str,
    start: &str,
    end: &str,
    image: &str,
    enabled: bool,
    show_progress: bool,
    catalog: &Catalog,
) -> std::result::Result<ScheduleRecord, Vec<MarqueeError>> {
    let mut errors = Vec::new();

    if name.trim().is_empty() {
        errors.push(MarqueeError::Range("schedule name cannot be empty".to_string()));
    } else if name.chars().count() > MAX_NAME_LEN {
        errors.push(MarqueeError::Range(format!(
            "schedule name too long (max {} chars)",
            MAX_NAME_LEN
        )));
    }

    let day_set = match DaySet::parse(days) {
        Ok(set) => Some(set),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    let start_min = match crate::window::parse_clock(start) {
        Ok(m) => Some(m),
        Err(e) => {
            errors.push(prefix_error("start time", e));
            None
        }
    };
    let end_min = match crate::window::parse_clock(end) {
        Ok(m) => Some(m),
        Err(e) => {
            errors.push(prefix_error("end time", e));
            None
        }
    };

    let window = match (start_min, end_min) {
        (Some(s), Some(e)) => match TimeWindow::new(s, e) {
            Ok(w) => Some(w),
            Err(e) => {
                errors.push(e);
                None
            }
        },
        _ => None,
    };

    if let Err(e) = catalog.check_image(crate::catalog::ImageKind::Schedules, image) {
        errors.push(e);
    }

    match (day_set, window, errors.is_empty()) {
        (Some(days), Some(window), true) => Ok(ScheduleRecord {
            name: name.trim().to_string(),
            enabled,
            days,
            window,
            image: image.to_string(),
            show_progress,
        }),
        _ => Err(errors),
    }
}
