//! # marquee-core
//!
//! Data model and scheduling logic for marquee signage devices.
//!
//! The devices poll a shared repository for two kinds of display content:
//! recurring schedules (named weekday + time-window entries, one CSV
//! collection per calendar key) and ephemeral events (date-bound banners in
//! one flat CSV). This crate owns the records, the validation rules the
//! firmware imposes, overlap detection between schedule entries, and the
//! derivation of a date's schedule from a template collection.
//!
//! Everything here is pure: no file I/O, no console I/O, no subprocesses.
//! The `marquee` CLI feeds raw rows in and writes the results back out.
//!
//! ## Modules
//!
//! - [`dayset`] -- weekday sets in the `'1'..'7'` wire alphabet (Monday = 1)
//! - [`window`] -- half-open minute-of-day windows, clock parsing, shifting
//! - [`schedule`] -- raw schedule rows, the validated record, validation
//! - [`overlap`] -- advisory conflict detection between schedule entries
//! - [`template`] -- derive one date's schedule from a source collection
//! - [`store`] -- calendar-keyed in-memory collections
//! - [`event`] -- ephemeral event rows, validation, the flat event list
//! - [`catalog`] -- injected color palette and image allow-lists
//! - [`error`] -- error types

pub mod catalog;
pub mod dayset;
pub mod error;
pub mod event;
pub mod overlap;
pub mod schedule;
pub mod store;
pub mod template;
pub mod window;

pub use catalog::{Catalog, ImageKind};
pub use dayset::DaySet;
pub use error::MarqueeError;
pub use event::{validate_event, EventList, EventRecord, EventRow};
pub use overlap::{find_overlaps, Conflict};
pub use schedule::{validate_schedule, ScheduleRecord, ScheduleRow};
pub use store::{ScheduleKey, ScheduleStore, DEFAULT_KEY};
pub use template::{derive_for_date, Adjustment};
pub use window::{parse_clock, TimeWindow};
