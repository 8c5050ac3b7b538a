//! Resolved calendar events

use chrono::DateTime;
use chrono_tz::Tz;
use serde::Serialize;

/// One calendar event computed from a timetable entry
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event {
    pub start: DateTime<Tz>,
    pub end: DateTime<Tz>,
    /// Cleaned title (may be empty)
    pub summary: String,
    pub location: Option<String>,
}
