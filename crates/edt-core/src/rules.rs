//! Compiled patterns and cell classification
//!
//! `Rules` is built once from a [`Config`] and is the only place where the
//! locale patterns are turned into regexes. Classification of a cell is a pure
//! function of its trimmed text and its column.

use crate::config::{ColumnZero, Config};
use crate::error::{Error, Result};
use crate::table::TimeRange;
use chrono::Duration;
use chrono_tz::Tz;
use regex::{Captures, Regex};
use std::borrow::Cow;

/// Role of a non-empty cell in the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellKind {
    /// A whole-cell time range such as "9h00-10h30"
    TimeRange,
    /// A weekday name
    Day,
    /// A cell starting with a date
    Date,
    /// Noise that is dropped
    Garbage,
    /// First-column label that is neither a header nor content
    Label,
    /// Course text
    Entry,
}

/// Compiled locale patterns
#[derive(Debug, Clone)]
pub struct Rules {
    time_range_cell: Regex,
    day: Regex,
    garbage: Regex,
    boilerplate: Regex,
    pub(crate) time_range: Regex,
    pub(crate) date: Regex,
    pub(crate) group: Regex,
    pub(crate) group_location: Regex,
    pub(crate) session_location: Regex,
    pub(crate) location: Regex,
    weekdays: Vec<String>,
    markers: Vec<char>,
    group_label: String,
    timezone: Tz,
    column_zero: ColumnZero,
}

impl Rules {
    /// Compile every pattern of a configuration
    pub fn new(config: &Config) -> Result<Self> {
        let locale = &config.locale;

        let days = locale
            .weekdays
            .iter()
            .map(|d| regex::escape(d))
            .collect::<Vec<_>>()
            .join("|");

        let timezone = locale
            .timezone
            .parse::<Tz>()
            .map_err(|_| Error::InvalidTimezone(locale.timezone.clone()))?;

        Ok(Self {
            time_range_cell: compile("time range", &format!("^(?:{})$", locale.time_range))?,
            day: compile("weekday", &format!("(?i)^(?:{})$", days))?,
            garbage: compile("garbage", &locale.garbage)?,
            boilerplate: compile("boilerplate", &locale.boilerplate)?,
            time_range: compile("time range", &locale.time_range)?,
            date: compile("date", &locale.date)?,
            group: compile("group", &locale.group)?,
            group_location: compile("group location", &locale.group_location)?,
            session_location: compile("session location", &locale.session_location)?,
            location: compile("location", &locale.location)?,
            weekdays: locale.weekdays.iter().map(|d| d.to_lowercase()).collect(),
            markers: locale.alternative_markers.chars().collect(),
            group_label: locale.group_label.clone(),
            timezone,
            column_zero: config.column_zero,
        })
    }

    /// Classify a trimmed, non-empty cell
    ///
    /// Checks run in a fixed order and the first hit wins: time range, day,
    /// date, first-column label, garbage, entry.
    pub fn classify(&self, value: &str, column: usize) -> CellKind {
        if self.time_range_cell.is_match(value) {
            CellKind::TimeRange
        } else if self.day.is_match(value) {
            CellKind::Day
        } else if self.date.is_match(value) {
            CellKind::Date
        } else if column == 0 && self.column_zero == ColumnZero::Label {
            CellKind::Label
        } else if self.garbage.is_match(value) {
            CellKind::Garbage
        } else {
            CellKind::Entry
        }
    }

    /// Timezone of the grid's wall-clock times
    pub fn timezone(&self) -> Tz {
        self.timezone
    }

    /// Days since Monday for a weekday name; unknown names count as Monday
    pub fn day_offset(&self, name: &str) -> i64 {
        let name = name.to_lowercase();
        self.weekdays
            .iter()
            .position(|d| *d == name)
            .map(|i| i as i64)
            .unwrap_or(0)
    }

    /// First time range found anywhere in `text`
    pub fn parse_time_range(&self, text: &str) -> Result<Option<TimeRange>> {
        match self.time_range.captures(text) {
            Some(caps) => to_time_range(&caps).map(Some),
            None => Ok(None),
        }
    }

    /// Remove the boilerplate label
    pub fn strip_boilerplate<'t>(&self, text: &'t str) -> Cow<'t, str> {
        self.boilerplate.replace_all(text, "")
    }

    /// Remove group tags, time ranges and location phrases from a line
    pub fn strip_structure(&self, line: &str) -> String {
        let line = self.group.replace_all(line, "");
        let line = self.time_range.replace_all(&line, "");
        let line = self.location.replace_all(&line, "");
        line.into_owned()
    }

    /// Cut a line at the first alternative-text marker
    pub fn cut_alternatives<'t>(&self, line: &'t str) -> &'t str {
        match line.find(|c: char| self.markers.contains(&c)) {
            Some(i) => &line[..i],
            None => line,
        }
    }

    /// Canonical "(Gr. N)" suffix when a group number appears in `text`
    pub fn group_suffix(&self, text: &str) -> Option<String> {
        let caps = self.group.captures(text)?;
        let number = caps.get(1)?.as_str();
        Some(format!("({} {})", self.group_label, number))
    }
}

fn compile(name: &'static str, pattern: &str) -> Result<Regex> {
    Regex::new(pattern).map_err(|source| Error::Pattern { name, source })
}

fn to_time_range(caps: &Captures) -> Result<TimeRange> {
    let part = |i: usize, field: &'static str| -> Result<i64> {
        parse_number(field, caps.get(i).map_or("", |m| m.as_str()))
    };

    let start = Duration::hours(part(1, "start hour")?) + Duration::minutes(part(2, "start minute")?);
    let end = Duration::hours(part(3, "end hour")?) + Duration::minutes(part(4, "end minute")?);

    Ok(TimeRange::new(start, end))
}

/// Parse a captured numeric field
pub(crate) fn parse_number<T: std::str::FromStr>(field: &'static str, value: &str) -> Result<T> {
    value.trim().parse().map_err(|_| Error::MalformedNumber {
        field,
        value: value.to_string(),
    })
}

/// Flatten multi-line cell text for log output
pub(crate) fn one_line(text: &str) -> String {
    text.replace('\n', " | ")
}
