//! Header maps and entries of one timetable embedded in the grid

use chrono::Duration;
use serde::Serialize;
use std::collections::BTreeMap;

/// Offsets from midnight for the start and end of a slot
///
/// `start < end` is expected but not enforced: malformed source text can
/// produce an inverted range and it is carried through as is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeRange {
    pub start: Duration,
    pub end: Duration,
}

impl Default for TimeRange {
    fn default() -> Self {
        Self::new(Duration::zero(), Duration::zero())
    }
}

impl TimeRange {
    /// Create a new time range
    pub fn new(start: Duration, end: Duration) -> Self {
        Self { start, end }
    }
}

/// Position of a logical entry: grid cell plus the index of the event split
/// out of that cell (0 when the cell holds a single event)
///
/// Ordered by row, then column, then variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct EntryKey {
    pub row: usize,
    pub column: usize,
    pub variant: usize,
}

impl EntryKey {
    /// Create a new entry key
    pub fn new(column: usize, row: usize, variant: usize) -> Self {
        Self {
            row,
            column,
            variant,
        }
    }
}

/// An independently-headered timetable
///
/// Headers are sparse: a time range or day recorded at a column applies to
/// every following column until another one is recorded, and a date recorded
/// at a row applies to every following row in the same way.
#[derive(Debug, Clone, Default)]
pub struct Table {
    time_ranges: BTreeMap<usize, TimeRange>,
    days: BTreeMap<usize, String>,
    dates: BTreeMap<usize, String>,
    entries: BTreeMap<EntryKey, String>,
}

impl Table {
    /// Create a new empty table
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_time_range(&mut self, column: usize, range: TimeRange) {
        self.time_ranges.insert(column, range);
    }

    pub fn record_day(&mut self, column: usize, name: impl Into<String>) {
        self.days.insert(column, name.into());
    }

    pub fn record_date(&mut self, row: usize, text: impl Into<String>) {
        self.dates.insert(row, text.into());
    }

    /// Time range recorded at the closest column at or before `column`
    pub fn lookup_time_range(&self, column: usize) -> TimeRange {
        floor(&self.time_ranges, column).copied().unwrap_or_default()
    }

    /// Day name recorded at the closest column at or before `column`
    pub fn lookup_day(&self, column: usize) -> &str {
        floor(&self.days, column).map_or("", String::as_str)
    }

    /// Date text recorded at the closest row at or before `row`
    pub fn lookup_date(&self, row: usize) -> &str {
        floor(&self.dates, row).map_or("", String::as_str)
    }

    /// Text of an entry
    pub fn entry(&self, key: EntryKey) -> Option<&str> {
        self.entries.get(&key).map(String::as_str)
    }

    /// Insert or replace an entry
    pub fn set_entry(&mut self, key: EntryKey, text: impl Into<String>) {
        self.entries.insert(key, text.into());
    }

    /// All entries in key order
    pub fn entries(&self) -> impl Iterator<Item = (EntryKey, &str)> {
        self.entries.iter().map(|(k, v)| (*k, v.as_str()))
    }

    /// Get the number of entries
    pub fn entry_count(&self) -> usize {
        self.entries.len()
    }

    /// Recorded time ranges by column
    pub fn time_ranges(&self) -> &BTreeMap<usize, TimeRange> {
        &self.time_ranges
    }

    /// Recorded day names by column
    pub fn days(&self) -> &BTreeMap<usize, String> {
        &self.days
    }

    /// Recorded date texts by row
    pub fn dates(&self) -> &BTreeMap<usize, String> {
        &self.dates
    }
}

/// Value at the greatest key not above `key`
fn floor<T>(map: &BTreeMap<usize, T>, key: usize) -> Option<&T> {
    map.range(..=key).next_back().map(|(_, v)| v)
}
