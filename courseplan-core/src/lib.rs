//! Core types for courseplan.
//!
//! This crate provides the course data model and the timetable translation
//! used by the courseplan CLI:
//! - `lesson` and `bitmask` for the published lesson rows
//! - `translate` for turning lessons into dated calendar events
//! - `ics` for writing those events as an iCalendar file
//! - `selection`, `filter` and `classtable` for planning a semester

pub mod bitmask;
pub mod classtable;
pub mod config;
pub mod data;
pub mod error;
pub mod event;
pub mod filter;
pub mod fixture;
pub mod ics;
pub mod lesson;
pub mod location;
pub mod period;
pub mod schedule_text;
pub mod selection;
pub mod semester;
pub mod store;
pub mod translate;

pub use error::{CoursePlanError, CoursePlanResult};
pub use event::{CalendarEvent, EventDuration};
pub use fixture::Fixture;
pub use lesson::Lesson;
pub use translate::{BlockPolicy, SemesterPlan, Translator};
