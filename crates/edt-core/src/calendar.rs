//! Serialization of resolved events
//!
//! iCalendar output carries local wall-clock times with a `TZID` parameter
//! and a UID derived from the start time and the title, so that importing
//! the same timetable twice updates events instead of duplicating them.

use crate::config::Locale;
use crate::error::Result;
use crate::event::Event;
use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use icalendar::{Calendar, Component, Event as CalendarEvent, Property};

const DATE_TIME_FORMAT: &str = "%Y%m%dT%H%M%S";

/// Render events as an iCalendar document
pub fn to_ics(events: &[Event], locale: &Locale) -> String {
    let mut calendar = Calendar::new();
    calendar.name(&locale.calendar_name);

    for event in events {
        calendar.push(to_calendar_event(event, &locale.uid_host));
    }

    calendar.to_string()
}

/// Render events as pretty-printed JSON
pub fn to_json(events: &[Event]) -> Result<String> {
    Ok(serde_json::to_string_pretty(events)?)
}

/// Stable identifier of an event: start time, title without spaces, host
pub fn event_uid(event: &Event, uid_host: &str) -> String {
    format!(
        "{}-{}{}",
        event.start.format(DATE_TIME_FORMAT),
        event.summary.replace(' ', ""),
        uid_host
    )
}

fn to_calendar_event(event: &Event, uid_host: &str) -> CalendarEvent {
    let mut vevent = CalendarEvent::new();
    vevent.uid(&event_uid(event, uid_host));
    vevent.summary(&event.summary);
    vevent.timestamp(Utc::now());

    if let Some(location) = &event.location {
        vevent.add_property("LOCATION", location);
    }

    vevent.append_property(local_time("DTSTART", &event.start));
    vevent.append_property(local_time("DTEND", &event.end));

    vevent.done()
}

fn local_time(key: &str, at: &DateTime<Tz>) -> Property {
    let value = at.format(DATE_TIME_FORMAT).to_string();
    let mut property = Property::new(key, &value);
    property.add_parameter("TZID", at.timezone().name());
    property
}
