//! Ephemeral events: date-bound banners with two text lines.
//!
//! An event row carries five fields, or seven when an hour window limits the
//! banner to part of the day: `date,top,bottom,image,color[,start_hour,end_hour]`.
//! Like schedules, the list holds raw rows so legacy entries survive
//! round-trips; validation produces the typed [`EventRecord`].

use chrono::NaiveDate;

use crate::catalog::{Catalog, ImageKind};
use crate::error::{MarqueeError, Result};

/// Maximum length of each display line, imposed by the banner font.
pub const MAX_LINE_LEN: usize = 12;

/// One raw event line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRow {
    pub date: String,
    pub top_line: String,
    pub bottom_line: String,
    pub image: String,
    pub color: String,
    /// `Some((start_hour, end_hour))` when the row carries the optional
    /// seventh and eighth fields.
    pub hours: Option<(String, String)>,
}

impl EventRow {
    /// Build a row from the fields of a CSV line. Rows carry 5 fields, or 7
    /// with an hour window; a 6-field row is malformed.
    ///
    /// # Errors
    /// [`MarqueeError::Format`] on any other field count.
    pub fn from_fields(fields: &[String]) -> Result<EventRow> {
        match fields.len() {
            5 | 7 => Ok(EventRow {
                date: fields[0].clone(),
                top_line: fields[1].clone(),
                bottom_line: fields[2].clone(),
                image: fields[3].clone(),
                color: fields[4].clone(),
                hours: (fields.len() == 7).then(|| (fields[5].clone(), fields[6].clone())),
            }),
            n => Err(MarqueeError::Format(format!(
                "expected 5 or 7 fields, got {}",
                n
            ))),
        }
    }

    /// The fields of this row in wire order.
    pub fn to_fields(&self) -> Vec<&str> {
        let mut fields = vec![
            self.date.as_str(),
            self.top_line.as_str(),
            self.bottom_line.as_str(),
            self.image.as_str(),
            self.color.as_str(),
        ];
        if let Some((start, end)) = &self.hours {
            fields.push(start);
            fields.push(end);
        }
        fields
    }

    /// The row's date, when it parses.
    pub fn parsed_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").ok()
    }
}

/// A validated event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EventRecord {
    pub date: NaiveDate,
    pub top_line: String,
    pub bottom_line: String,
    pub image: String,
    pub color: String,
    pub hours: Option<(u8, u8)>,
}

impl EventRecord {
    pub fn to_row(&self) -> EventRow {
        EventRow {
            date: self.date.format("%Y-%m-%d").to_string(),
            top_line: self.top_line.clone(),
            bottom_line: self.bottom_line.clone(),
            image: self.image.clone(),
            color: self.color.clone(),
            hours: self.hours.map(|(s, e)| (s.to_string(), e.to_string())),
        }
    }
}

fn check_date(date: &str, today: NaiveDate) -> Result<NaiveDate> {
    let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
        .map_err(|_| MarqueeError::Format(format!("date must be YYYY-MM-DD (got '{}')", date)))?;
    if parsed < today {
        return Err(MarqueeError::Range(format!(
            "date {} is in the past (today is {})",
            parsed, today
        )));
    }
    Ok(parsed)
}

fn check_line(text: &str, what: &str) -> Result<()> {
    if text.trim().is_empty() {
        return Err(MarqueeError::Range(format!("{} cannot be empty", what)));
    }
    if text.chars().count() > MAX_LINE_LEN {
        return Err(MarqueeError::Range(format!(
            "{} too long (max {} chars)",
            what, MAX_LINE_LEN
        )));
    }
    Ok(())
}

fn check_hour(text: &str, what: &str) -> Result<u8> {
    let hour: u8 = text
        .trim()
        .parse()
        .map_err(|_| MarqueeError::Format(format!("{} must be a number (got '{}')", what, text)))?;
    if hour > 23 {
        return Err(MarqueeError::Range(format!("{} must be 0-23 (got {})", what, hour)));
    }
    Ok(hour)
}

/// Validate every field of an event, accumulating all problems.
///
/// `today` is injected by the caller so "date in the past" is a pure check.
/// Each field is validated independently and every error is returned in one
/// pass; the hour ordering check only runs when both hours parsed.
pub fn validate_event(
    date: &str,
    top_line: &str,
    bottom_line: &str,
    image: &str,
    color: &str,
    hours: Option<(&str, &str)>,
    catalog: &Catalog,
    today: NaiveDate,
) -> std::result::Result<EventRecord, Vec<MarqueeError>> {
    let mut errors = Vec::new();

    let parsed_date = match check_date(date, today) {
        Ok(d) => Some(d),
        Err(e) => {
            errors.push(e);
            None
        }
    };

    if let Err(e) = check_line(top_line, "top line") {
        errors.push(e);
    }
    if let Err(e) = check_line(bottom_line, "bottom line") {
        errors.push(e);
    }
    if let Err(e) = catalog.check_image(ImageKind::Events, image) {
        errors.push(e);
    }
    if let Err(e) = catalog.check_color(color) {
        errors.push(e);
    }

    let parsed_hours = match hours {
        None => None,
        Some((start, end)) => {
            let start_hour = match check_hour(start, "start hour") {
                Ok(h) => Some(h),
                Err(e) => {
                    errors.push(e);
                    None
                }
            };
            let end_hour = match check_hour(end, "end hour") {
                Ok(h) => Some(h),
                Err(e) => {
                    errors.push(e);
                    None
                }
            };
            match (start_hour, end_hour) {
                (Some(s), Some(e)) => {
                    if s >= e {
                        errors.push(MarqueeError::Range(
                            "start hour must be before end hour".to_string(),
                        ));
                        None
                    } else {
                        Some((s, e))
                    }
                }
                _ => None,
            }
        }
    };

    match (parsed_date, errors.is_empty()) {
        (Some(parsed), true) => Ok(EventRecord {
            date: parsed,
            top_line: top_line.trim().to_string(),
            bottom_line: bottom_line.trim().to_string(),
            image: image.to_string(),
            color: color.to_uppercase(),
            hours: parsed_hours,
        }),
        _ => Err(errors),
    }
}

/// The flat, ordered event list.
#[derive(Debug, Clone, Default)]
pub struct EventList {
    rows: Vec<EventRow>,
}

impl EventList {
    pub fn new() -> EventList {
        EventList::default()
    }

    pub fn from_rows(rows: Vec<EventRow>) -> EventList {
        EventList { rows }
    }

    pub fn rows(&self) -> &[EventRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push(&mut self, row: EventRow) {
        self.rows.push(row);
    }

    /// Replace the row at `index` in place.
    ///
    /// # Errors
    /// [`MarqueeError::NotFound`] when the index is out of bounds.
    pub fn replace(&mut self, index: usize, row: EventRow) -> Result<()> {
        let slot = self
            .rows
            .get_mut(index)
            .ok_or_else(|| MarqueeError::NotFound(format!("event index {}", index)))?;
        *slot = row;
        Ok(())
    }

    /// Remove and return the row at `index`.
    ///
    /// # Errors
    /// [`MarqueeError::NotFound`] when the index is out of bounds.
    pub fn remove(&mut self, index: usize) -> Result<EventRow> {
        if index >= self.rows.len() {
            return Err(MarqueeError::NotFound(format!("event index {}", index)));
        }
        Ok(self.rows.remove(index))
    }

    /// Drop rows dated before `today`, returning how many were removed.
    /// Rows whose date does not parse are kept -- treated as future rather
    /// than silently discarded.
    pub fn cleanup_past(&mut self, today: NaiveDate) -> usize {
        let before = self.rows.len();
        self.rows
            .retain(|row| row.parsed_date().map_or(true, |d| d >= today));
        before - self.rows.len()
    }

    /// Split row indices into (future-or-unparseable, past) relative to
    /// `today`. The device importer skips past rows, so listings show the
    /// two groups separately.
    pub fn split_by_date(&self, today: NaiveDate) -> (Vec<usize>, Vec<usize>) {
        let mut future = Vec::new();
        let mut past = Vec::new();
        for (i, row) in self.rows.iter().enumerate() {
            match row.parsed_date() {
                Some(d) if d < today => past.push(i),
                _ => future.push(i),
            }
        }
        (future, past)
    }

    /// Sort rows by their raw date field. Stable, so same-day rows keep
    /// their insertion order. Run before persisting.
    pub fn sort_by_date(&mut self) {
        self.rows.sort_by(|a, b| a.date.cmp(&b.date));
    }
}
