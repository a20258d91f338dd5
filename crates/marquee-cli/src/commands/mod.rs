//! Command implementations, one module per content area.

pub mod events;
pub mod schedules;
pub mod sync;
