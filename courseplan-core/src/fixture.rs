//! Single-date overrides for the weekly recurrence.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Moves the classes of one (week, day) slot to another date.
///
/// Used for holiday shifts, where e.g. Monday's classes of week 5 are held
/// on the following Saturday. A fixture without a date cancels the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixture {
    pub week: u32,
    /// 1 = Monday .. 7 = Sunday
    pub day: u32,
    #[serde(default)]
    pub on: Option<NaiveDate>,
}

impl Fixture {
    pub fn moved(week: u32, day: u32, on: NaiveDate) -> Self {
        Fixture {
            week,
            day,
            on: Some(on),
        }
    }

    pub fn cancelled(week: u32, day: u32) -> Self {
        Fixture { week, day, on: None }
    }

    pub fn matches(&self, week: u32, day: u32) -> bool {
        self.week == week && self.day == day
    }
}

/// The fixture for a slot. When several match, the last one wins.
pub fn find_fixture(fixtures: &[Fixture], week: u32, day: u32) -> Option<&Fixture> {
    fixtures.iter().rev().find(|f| f.matches(week, day))
}
