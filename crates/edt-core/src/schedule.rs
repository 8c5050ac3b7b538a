//! Row-by-row interpretation of a timetable grid
//!
//! A `Schedule` consumes the grid one row at a time. Every non-empty cell is
//! classified and either updates the headers of the current table, opens a new
//! table, or is stored as an entry. Once all rows are in, [`Schedule::events`]
//! resolves every stored entry into a calendar event.

use crate::config::Config;
use crate::error::{Error, Result};
use crate::event::Event;
use crate::resolver::resolve;
use crate::rules::{one_line, CellKind, Rules};
use crate::splitter::{is_continuation, split_entry};
use crate::summary::{location, summary};
use crate::table::{EntryKey, Table};
use log::{debug, info};

/// Interpreter state for one grid
#[derive(Debug)]
pub struct Schedule {
    config: Config,
    rules: Rules,
    tables: Vec<Table>,
    /// Row holding the day headers of the current table
    header_row: Option<usize>,
    row: usize,
}

impl Schedule {
    /// Create an empty schedule, compiling the configuration's patterns
    pub fn new(config: Config) -> Result<Self> {
        let rules = Rules::new(&config)?;
        Ok(Self {
            config,
            rules,
            tables: Vec::new(),
            header_row: None,
            row: 0,
        })
    }

    /// Feed the next row of the grid
    pub fn push_row<I, S>(&mut self, cells: I) -> Result<()>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let row = self.row;

        for (column, cell) in cells.into_iter().enumerate() {
            let value = cell.as_ref().trim();
            if value.is_empty() {
                continue;
            }

            match self.rules.classify(value, column) {
                CellKind::TimeRange => {
                    debug!("({}:{}) Found a time range: '{}'", column, row, value);
                    let range = self.rules.parse_time_range(value)?.unwrap_or_default();
                    current(&mut self.tables, column, row)?.record_time_range(column, range);
                }
                CellKind::Day => {
                    self.open_table(column);
                    debug!("({}:{}) Found a day: '{}'", column, row, value);
                    current(&mut self.tables, column, row)?.record_day(column, value);
                }
                CellKind::Date => {
                    debug!("({}:{}) Found a date: '{}'", column, row, value);
                    current(&mut self.tables, column, row)?.record_date(row, value);
                }
                CellKind::Garbage => {
                    debug!("({}:{}) Skipping noise: '{}'", column, row, one_line(value));
                }
                CellKind::Label => {}
                CellKind::Entry => {
                    debug!("({}:{}) Found an entry: '{}'", column, row, one_line(value));
                    self.add_entry(column, value)?;
                }
            }
        }

        self.row += 1;
        Ok(())
    }

    /// Start a new table when a day header shows up below the current header row
    fn open_table(&mut self, column: usize) {
        let fresh = match self.header_row {
            None => true,
            Some(header_row) => self.config.segment_tables && self.row > header_row,
        };

        if fresh {
            if !self.tables.is_empty() {
                info!("({}:{}) Switching to a new table", column, self.row);
            }
            self.tables.push(Table::new());
            self.header_row = Some(self.row);
        }
    }

    fn add_entry(&mut self, column: usize, value: &str) -> Result<()> {
        let row = self.row;
        let split_sessions = self.config.split_sessions;
        let continuation = self.config.merge_continuations && is_continuation(&self.rules, value);
        let table = current(&mut self.tables, column, row)?;

        if continuation {
            let above = row.checked_sub(1).and_then(|prev| {
                table
                    .entry(EntryKey::new(column, prev, 0))
                    .map(|text| (prev, format!("{}\n{}", text, value)))
            });

            match above {
                Some((prev, merged)) => {
                    debug!("({}:{}) Wrong line detected, reintegrating into row {}", column, row, prev);
                    split_entry(table, &self.rules, split_sessions, column, prev, &merged);
                    return Ok(());
                }
                None => {
                    debug!("({}:{}) Nothing above to reintegrate into, keeping as entry", column, row);
                }
            }
        }

        split_entry(table, &self.rules, split_sessions, column, row, value);
        Ok(())
    }

    /// Resolve every stored entry, table by table
    pub fn events(&self) -> Result<Vec<Event>> {
        let mut events = Vec::new();

        for (n, table) in self.tables.iter().enumerate() {
            debug!("Starting output of table {} ({} entries)", n, table.entry_count());

            for (key, text) in table.entries() {
                let (start, end) =
                    resolve(table, &self.rules, self.config.correct_four_digit_year, key, text)?;

                events.push(Event {
                    start,
                    end,
                    summary: summary(&self.rules, text),
                    location: location(&self.rules, text),
                });
            }
        }

        info!("Resolved {} events from {} table(s)", events.len(), self.tables.len());
        Ok(events)
    }

    /// Tables found so far, in order of appearance
    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    /// Number of rows consumed
    pub fn row_count(&self) -> usize {
        self.row
    }

    pub fn config(&self) -> &Config {
        &self.config
    }
}

fn current(tables: &mut [Table], column: usize, row: usize) -> Result<&mut Table> {
    tables.last_mut().ok_or(Error::NoTable { column, row })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, TimeZone};
    use chrono_tz::Europe::Paris;

    fn schedule(rows: &[&[&str]]) -> Schedule {
        schedule_with(Config::default(), rows)
    }

    fn schedule_with(config: Config, rows: &[&[&str]]) -> Schedule {
        let mut schedule = Schedule::new(config).unwrap();
        for row in rows {
            schedule.push_row(row.iter()).unwrap();
        }
        schedule
    }

    #[test]
    fn test_single_course() {
        let schedule = schedule(&[
            &["", "Lundi", "Mardi"],
            &["01/09/25"],
            &["", "9h00-10h30"],
            &["", "Algo\nSalle A101"],
        ]);

        let events = schedule.events().unwrap();
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.summary, "Algo");
        assert_eq!(event.location.as_deref(), Some("A101"));
        assert_eq!(event.start, Paris.with_ymd_and_hms(2025, 9, 1, 9, 0, 0).unwrap());
        assert_eq!(event.end, Paris.with_ymd_and_hms(2025, 9, 1, 10, 30, 0).unwrap());
    }

    #[test]
    fn test_second_day_column() {
        let schedule = schedule(&[
            &["", "Lundi", "Mardi"],
            &["01/09/25", "9h00-10h30", "10h45-12h15"],
            &["", "Algo", "Réseaux\nSalle B204"],
        ]);

        let events = schedule.events().unwrap();
        assert_eq!(events.len(), 2);

        assert_eq!(events[1].summary, "Réseaux");
        assert_eq!(events[1].start, Paris.with_ymd_and_hms(2025, 9, 2, 10, 45, 0).unwrap());
    }

    #[test]
    fn test_garbage_is_dropped() {
        let schedule = schedule(&[
            &["", "Lundi"],
            &["01/09/25", "Matin"],
            &["", "Semaine 36"],
        ]);

        assert_eq!(schedule.tables()[0].entry_count(), 0);
        assert!(schedule.events().unwrap().is_empty());
    }

    #[test]
    fn test_column_zero_is_never_content_by_default() {
        let schedule = schedule(&[&["", "Lundi"], &["Algo", ""]]);
        assert_eq!(schedule.tables()[0].entry_count(), 0);
    }

    #[test]
    fn test_content_before_header_is_fatal() {
        let mut schedule = Schedule::new(Config::default()).unwrap();

        let result = schedule.push_row(["", "Algo"]);
        assert!(matches!(result, Err(Error::NoTable { column: 1, row: 0 })));

        let mut schedule = Schedule::new(Config::default()).unwrap();
        let result = schedule.push_row(["01/09/25"]);
        assert!(matches!(result, Err(Error::NoTable { column: 0, row: 0 })));
    }

    #[test]
    fn test_day_headers_on_later_row_start_new_table() {
        let mut rows: Vec<Vec<&str>> = vec![vec!["", "Lundi", "Mardi"], vec!["01/09/25"]];
        for _ in 2..10 {
            rows.push(vec![]);
        }
        rows[5] = vec!["", "Algo"];
        rows.push(vec!["", "Lundi", "Mardi"]);
        rows.push(vec!["08/09/25"]);
        while rows.len() < 15 {
            rows.push(vec![]);
        }
        rows.push(vec!["", "Réseaux"]);

        let mut schedule = Schedule::new(Config::default()).unwrap();
        for row in &rows {
            schedule.push_row(row.iter()).unwrap();
        }

        let tables = schedule.tables();
        assert_eq!(tables.len(), 2);
        assert_eq!(tables[0].entry(EntryKey::new(1, 5, 0)), Some("Algo"));
        assert_eq!(tables[1].entry(EntryKey::new(1, 15, 0)), Some("Réseaux"));
        assert_eq!(tables[0].entry_count(), 1);
        assert_eq!(tables[1].entry_count(), 1);

        let events = schedule.events().unwrap();
        assert_eq!(events[0].start.date_naive(), NaiveDate::from_ymd_opt(2025, 9, 1).unwrap());
        assert_eq!(events[1].start.date_naive(), NaiveDate::from_ymd_opt(2025, 9, 8).unwrap());
    }

    #[test]
    fn test_reduced_config_keeps_one_table() {
        let schedule = schedule_with(
            Config::reduced(),
            &[&["", "Lundi"], &["01/09/25"], &["", "Lundi"], &["", "Algo"]],
        );
        assert_eq!(schedule.tables().len(), 1);
    }

    #[test]
    fn test_split_cell_produces_one_event_per_group() {
        let schedule = schedule(&[
            &["", "Lundi"],
            &["01/09/25", "13h30-15h00"],
            &["", "TD Algo\nGr 1 salle A101\nGr 2 salle B202"],
        ]);

        let events = schedule.events().unwrap();
        assert_eq!(events.len(), 2);
        assert_eq!(events[0].summary, "TD Algo (Gr. 1)");
        assert_eq!(events[0].location.as_deref(), Some("A101"));
        assert_eq!(events[1].summary, "TD Algo (Gr. 2)");
        assert_eq!(events[1].location.as_deref(), Some("B202"));
    }

    #[test]
    fn test_continuation_matches_prejoined_cell() {
        let wrapped = schedule(&[
            &["", "Lundi"],
            &["01/09/25", "13h30-15h00"],
            &["", "TD Algo"],
            &["", "Gr 1 A101 Gr 2 B202"],
        ]);
        let joined = schedule(&[
            &["", "Lundi"],
            &["01/09/25", "13h30-15h00"],
            &["", "TD Algo\nGr 1 A101 Gr 2 B202"],
        ]);

        let wrapped_events = wrapped.events().unwrap();
        assert_eq!(wrapped_events.len(), 2);
        assert_eq!(wrapped_events.len(), joined.events().unwrap().len());

        assert!(wrapped.tables()[0].entry(EntryKey::new(1, 3, 0)).is_none());
        assert_eq!(wrapped_events[1].summary, "TD Algo (Gr. 2)");
    }

    #[test]
    fn test_continuation_without_entry_above_is_kept() {
        let schedule = schedule(&[&["", "Lundi"], &["01/09/25"], &["", "Salle A101"]]);

        let table = &schedule.tables()[0];
        assert_eq!(table.entry(EntryKey::new(1, 2, 0)), Some("Salle A101"));
    }

    #[test]
    fn test_continuation_merge_can_be_disabled() {
        let config = Config {
            merge_continuations: false,
            ..Config::default()
        };
        let schedule = schedule_with(
            config,
            &[&["", "Lundi"], &["01/09/25"], &["", "Algo"], &["", "Salle A101"]],
        );

        assert_eq!(schedule.tables()[0].entry_count(), 2);
    }

    #[test]
    fn test_missing_headers_still_produce_events() {
        let schedule = schedule(&[&["", "Lundi"], &["", "Algo"]]);

        let events = schedule.events().unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].start, events[0].end);
        assert_eq!(events[0].start, Paris.with_ymd_and_hms(1970, 1, 1, 0, 0, 0).unwrap());
    }

    #[test]
    fn test_row_count() {
        let schedule = schedule(&[&["", "Lundi"], &[], &["", ""]]);
        assert_eq!(schedule.row_count(), 3);
    }
}
