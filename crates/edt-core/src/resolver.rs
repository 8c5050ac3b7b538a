//! Resolution of an entry's calendar date and wall-clock times

use crate::error::{Error, Result};
use crate::rules::{parse_number, Rules};
use crate::table::{EntryKey, Table, TimeRange};
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, TimeZone};
use chrono_tz::Tz;

/// Start and end instants of the entry at `key`
pub fn resolve(
    table: &Table,
    rules: &Rules,
    correct_four_digit_year: bool,
    key: EntryKey,
    text: &str,
) -> Result<(DateTime<Tz>, DateTime<Tz>)> {
    let date = resolve_date(table, rules, correct_four_digit_year, key.column, key.row)?;
    let range = resolve_time_range(table, rules, key.column, text)?;

    let tz = rules.timezone();
    Ok((at(tz, date, range.start)?, at(tz, date, range.end)?))
}

/// Calendar day of a cell: the closest date header above it, shifted by the
/// weekday of the closest day header to its left
///
/// Without any date header the base date is 1970-01-01.
pub fn resolve_date(
    table: &Table,
    rules: &Rules,
    correct_four_digit_year: bool,
    column: usize,
    row: usize,
) -> Result<NaiveDate> {
    let raw = table.lookup_date(row);

    let base = match rules.date.captures(raw) {
        Some(caps) => {
            let field = |i: usize| caps.get(i).map_or("", |m| m.as_str());

            let day: u32 = parse_number("day", field(1))?;
            let month: u32 = parse_number("month", field(2))?;
            let mut year: i32 = parse_number("year", field(3))?;

            if year < 2000 {
                year += 2000;
            }
            if correct_four_digit_year && field(3).chars().count() == 4 {
                year -= 1;
            }

            NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| Error::InvalidDate {
                text: raw.to_string(),
            })?
        }
        None => NaiveDate::default(),
    };

    let offset = rules.day_offset(table.lookup_day(column));
    Ok(base + Duration::days(offset))
}

/// Time range written in the entry itself, or else the closest time-range
/// header at or before its column
pub fn resolve_time_range(
    table: &Table,
    rules: &Rules,
    column: usize,
    text: &str,
) -> Result<TimeRange> {
    match rules.parse_time_range(text)? {
        Some(range) => Ok(range),
        None => Ok(table.lookup_time_range(column)),
    }
}

/// Local wall-clock time `offset` after midnight of `date`
///
/// Times falling in a daylight-saving gap are counted as elapsed time from
/// midnight instead.
fn at(tz: Tz, date: NaiveDate, offset: Duration) -> Result<DateTime<Tz>> {
    let midnight = date.and_time(NaiveTime::default());
    let local = midnight + offset;

    if let Some(instant) = tz.from_local_datetime(&local).earliest() {
        return Ok(instant);
    }

    tz.from_local_datetime(&midnight)
        .earliest()
        .map(|start| start + offset)
        .ok_or_else(|| Error::InvalidDate {
            text: date.to_string(),
        })
}
