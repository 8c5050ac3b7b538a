//! edt-core: Core library for turning spreadsheet timetables into calendar events
//!
//! This library provides functionality to:
//! - Read a timetable grid exported as CSV
//! - Classify cells as day, date and time-range headers, noise, or course entries
//! - Track several independently-headered tables in one grid
//! - Split cells holding several course sections and fold wrapped cells back together
//! - Resolve each entry's date, times, title and room into calendar events
//! - Write the events as iCalendar or JSON

pub mod calendar;
pub mod config;
pub mod error;
pub mod event;
pub mod parser;
pub mod resolver;
pub mod rules;
pub mod schedule;
pub mod splitter;
pub mod summary;
pub mod table;

pub use calendar::{event_uid, to_ics, to_json};
pub use config::{ColumnZero, Config, Locale};
pub use error::{Error, Result};
pub use event::Event;
pub use parser::{parse_schedule, parse_schedule_str};
pub use rules::{CellKind, Rules};
pub use schedule::Schedule;
pub use table::{EntryKey, Table, TimeRange};
