//! Neutral calendar event records handed to the serializer.

use std::fmt;

use chrono::{Duration, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// Length of an event, in whole hours plus remaining minutes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventDuration {
    pub hours: u32,
    pub minutes: u32,
}

impl EventDuration {
    pub fn from_minutes(total: u32) -> Self {
        EventDuration {
            hours: total / 60,
            minutes: total % 60,
        }
    }

    pub fn total_minutes(&self) -> u32 {
        self.hours * 60 + self.minutes
    }

    pub fn is_positive(&self) -> bool {
        self.total_minutes() > 0
    }

    pub fn to_chrono(&self) -> Duration {
        Duration::minutes(i64::from(self.total_minutes()))
    }
}

impl fmt::Display for EventDuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (self.hours, self.minutes) {
            (0, m) => write!(f, "{m}m"),
            (h, 0) => write!(f, "{h}h"),
            (h, m) => write!(f, "{h}h{m}m"),
        }
    }
}

/// One class meeting on a concrete date.
///
/// `start` is wall-clock time at the campus; the serializer decides whether
/// it is written floating or with a TZID.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CalendarEvent {
    pub start: NaiveDateTime,
    pub duration: EventDuration,
    pub title: String,
    pub description: String,
    pub location: String,
    pub calendar_name: String,

    /// Section the event was generated from
    pub section_id: String,
    pub week: u32,
    pub start_period: u32,
}

impl CalendarEvent {
    pub fn end(&self) -> NaiveDateTime {
        self.start + self.duration.to_chrono()
    }

    /// Stable identity of this meeting, used to derive the ICS UID.
    pub fn key(&self) -> String {
        format!("{}/{}/{}/{}", self.section_id, self.week, self.start.date(), self.start_period)
    }
}

impl fmt::Display for CalendarEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} ({})",
            self.start.format("%Y-%m-%d %H:%M"),
            self.title,
            self.duration
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_duration_split() {
        let d = EventDuration::from_minutes(95);
        assert_eq!(d, EventDuration { hours: 1, minutes: 35 });
        assert_eq!(d.total_minutes(), 95);
        assert_eq!(d.to_string(), "1h35m");
        assert_eq!(EventDuration::from_minutes(45).to_string(), "45m");
        assert_eq!(EventDuration::from_minutes(120).to_string(), "2h");
        assert!(!EventDuration::from_minutes(0).is_positive());
    }

    #[test]
    fn test_end() {
        let start = NaiveDate::from_ymd_opt(2025, 10, 13)
            .unwrap()
            .and_hms_opt(10, 40, 0)
            .unwrap();
        let event = CalendarEvent {
            start,
            duration: EventDuration::from_minutes(95),
            title: "MATH1001 Calculus".to_string(),
            description: String::new(),
            location: String::new(),
            calendar_name: "Timetable 2025-2026_Autumn".to_string(),
            section_id: "S1".to_string(),
            week: 7,
            start_period: 4,
        };

        assert_eq!(event.end().format("%H:%M").to_string(), "12:15");
        assert_eq!(event.key(), "S1/7/2025-10-13/4");
        assert_eq!(event.to_string(), "2025-10-13 10:40 MATH1001 Calculus (1h35m)");
    }
}
