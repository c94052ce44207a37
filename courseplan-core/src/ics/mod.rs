//! iCalendar export.
//!
//! This module renders calendar events as RFC 5545 text.

mod generate;

pub use generate::{IcsOptions, export_or_empty, generate_ics};
