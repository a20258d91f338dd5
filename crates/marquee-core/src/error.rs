//! Error types for marquee-core operations.

use thiserror::Error;

/// Errors produced while parsing or validating schedule and event data.
///
/// Every variant is a recoverable, local failure: callers collect these into
/// lists and keep going. Nothing in this crate aborts the process.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MarqueeError {
    /// A string did not match the expected shape (date, clock time, day set).
    #[error("invalid format: {0}")]
    Format(String),

    /// A numeric value fell outside its domain (hour, minute, text length,
    /// window ordering).
    #[error("out of range: {0}")]
    Range(String),

    /// A day symbol appeared more than once in a day set.
    #[error("duplicate day '{0}' in day set")]
    DuplicateDay(char),

    /// An unknown calendar key, image, or color was referenced.
    #[error("not found: {0}")]
    NotFound(String),
}

/// Convenience alias used throughout marquee-core.
pub type Result<T> = std::result::Result<T, MarqueeError>;
