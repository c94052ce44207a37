//! ICS file generation.

use chrono::{DateTime, NaiveDateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, EventLike, Property};
use tracing::error;
use uuid::Uuid;

use crate::error::{CoursePlanError, CoursePlanResult};
use crate::event::CalendarEvent;

const PRODID: &str = "-//courseplan//timetable export//EN";

/// Rendering options that are not part of the events themselves.
#[derive(Debug, Clone)]
pub struct IcsOptions {
    /// Write DTSTART/DTEND with this TZID. Floating times when None.
    pub timezone: Option<Tz>,
    /// DTSTAMP of every event. Fixed by the caller so output is reproducible.
    pub stamp: DateTime<Utc>,
}

impl Default for IcsOptions {
    fn default() -> Self {
        IcsOptions {
            timezone: None,
            stamp: Utc::now(),
        }
    }
}

/// Generate one VCALENDAR holding every event.
///
/// Fails when the set is not a valid calendar: an event without a title,
/// a non-positive duration, or events belonging to different calendars.
pub fn generate_ics(events: &[CalendarEvent], options: &IcsOptions) -> CoursePlanResult<String> {
    validate(events)?;

    let mut cal = Calendar::new();

    if let Some(first) = events.first() {
        // X-WR-CALNAME - Human-readable calendar name (de facto standard)
        cal.append_property(Property::new("X-WR-CALNAME", &first.calendar_name));
    }
    if let Some(tz) = options.timezone {
        cal.append_property(Property::new("X-WR-TIMEZONE", tz.name()));
    }

    let dtstamp = options.stamp.format("%Y%m%dT%H%M%SZ").to_string();

    for event in events {
        let mut ics_event = icalendar::Event::new();
        ics_event.uid(&event_uid(event));
        ics_event.add_property("DTSTAMP", &dtstamp);
        ics_event.summary(&event.title);

        add_datetime_property(&mut ics_event, "DTSTART", &event.start, options.timezone);
        add_datetime_property(&mut ics_event, "DTEND", &event.end(), options.timezone);

        if !event.description.is_empty() {
            ics_event.description(&event.description);
        }
        if !event.location.is_empty() {
            ics_event.location(&event.location);
        }

        cal.push(ics_event.done());
    }

    let cal = cal.done();
    Ok(strip_ics_bloat(&cal.to_string()))
}

/// Generate the calendar, or report the failure and return an empty string.
///
/// Callers write the returned text as-is, so a failed export never leaves a
/// partial file behind.
pub fn export_or_empty<F>(events: &[CalendarEvent], options: &IcsOptions, report: F) -> String
where
    F: FnOnce(&CoursePlanError),
{
    match generate_ics(events, options) {
        Ok(ics) => ics,
        Err(e) => {
            error!(events = events.len(), "calendar export failed: {e}");
            report(&e);
            String::new()
        }
    }
}

fn validate(events: &[CalendarEvent]) -> CoursePlanResult<()> {
    for (i, event) in events.iter().enumerate() {
        if event.title.trim().is_empty() {
            return Err(CoursePlanError::IcsGenerate(format!(
                "event {} ({}) has no title",
                i + 1,
                event.key()
            )));
        }
        if !event.duration.is_positive() {
            return Err(CoursePlanError::IcsGenerate(format!(
                "event {} ({}) has a non-positive duration",
                i + 1,
                event.title
            )));
        }
    }

    if let Some(first) = events.first() {
        if let Some(other) = events.iter().find(|e| e.calendar_name != first.calendar_name) {
            return Err(CoursePlanError::IcsGenerate(format!(
                "events belong to different calendars: '{}' and '{}'",
                first.calendar_name, other.calendar_name
            )));
        }
    }

    Ok(())
}

/// Same meeting, same UID, so re-importing an export updates events in place.
fn event_uid(event: &CalendarEvent) -> String {
    let id = Uuid::new_v5(&Uuid::NAMESPACE_OID, event.key().as_bytes());
    format!("{id}@courseplan")
}

/// Clean up ICS output from the icalendar crate
/// - Replace PRODID with our own
/// - Remove CALSCALE:GREGORIAN (it's the default)
fn strip_ics_bloat(ics: &str) -> String {
    let mut result = String::with_capacity(ics.len());

    for line in ics.lines() {
        if line.starts_with("PRODID:") {
            result.push_str("PRODID:");
            result.push_str(PRODID);
            result.push_str("\r\n");
            continue;
        }

        if line == "CALSCALE:GREGORIAN" {
            continue;
        }

        result.push_str(line);
        result.push_str("\r\n");
    }

    result
}

fn add_datetime_property(
    ics_event: &mut icalendar::Event,
    name: &str,
    time: &NaiveDateTime,
    timezone: Option<Tz>,
) {
    let value = time.format("%Y%m%dT%H%M%S").to_string();
    match timezone {
        Some(tz) => {
            let mut prop = Property::new(name, value);
            prop.add_parameter("TZID", tz.name());
            ics_event.append_property(prop);
        }
        None => {
            // Floating datetime (no Z, no TZID)
            ics_event.add_property(name, value);
        }
    }
}
