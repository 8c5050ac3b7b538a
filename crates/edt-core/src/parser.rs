//! CSV reader feeding a timetable grid into a [`Schedule`]

use crate::config::Config;
use crate::error::{Error, Result};
use crate::schedule::Schedule;
use log::info;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

/// Parse a CSV timetable file
pub fn parse_schedule<P: AsRef<Path>>(path: P, config: Config) -> Result<Schedule> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|e| Error::FileRead {
        path: path.to_path_buf(),
        source: e,
    })?;

    read_rows(BufReader::new(file), path, config)
}

/// Parse a CSV timetable from a string (useful for testing)
pub fn parse_schedule_str(content: &str, source_name: &str, config: Config) -> Result<Schedule> {
    read_rows(content.as_bytes(), Path::new(source_name), config)
}

fn read_rows<R: Read>(reader: R, path: &Path, config: Config) -> Result<Schedule> {
    // Timetables have no header record and rows of varying width
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_reader(reader);

    let mut schedule = Schedule::new(config)?;

    for result in csv_reader.records() {
        let record = result.map_err(|e| Error::Csv {
            path: path.to_path_buf(),
            source: e,
        })?;

        schedule.push_row(record.iter().map(|cell| cell.replace("\r\n", "\n")))?;
    }

    info!(
        "Read {} rows into {} table(s) from {}",
        schedule.row_count(),
        schedule.tables().len(),
        path.display()
    );

    Ok(schedule)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::EntryKey;

    const TIMETABLE: &str = "\
,Lundi,Mardi,Mercredi
01/09/25,8h00-9h30,,
,\"Compilation\r\nSalle A101\",Matin,
,9h45-11h15,,
,,\"TD Réseaux\nGr 1 salle B201\nGr 2 salle B202\",
";

    #[test]
    fn test_parse_quoted_multiline_cells() {
        let schedule = parse_schedule_str(TIMETABLE, "edt.csv", Config::default()).unwrap();

        assert_eq!(schedule.row_count(), 5);
        assert_eq!(schedule.tables().len(), 1);

        let table = &schedule.tables()[0];
        assert_eq!(table.entry(EntryKey::new(1, 2, 0)), Some("Compilation\nSalle A101"));
        assert_eq!(table.entry(EntryKey::new(2, 2, 0)), None);
        assert!(table.entry(EntryKey::new(2, 4, 1)).is_some());
    }

    #[test]
    fn test_parse_to_events() {
        let schedule = parse_schedule_str(TIMETABLE, "edt.csv", Config::default()).unwrap();
        let events = schedule.events().unwrap();

        let titles: Vec<&str> = events.iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(titles, vec!["Compilation", "TD Réseaux (Gr. 1)", "TD Réseaux (Gr. 2)"]);
        assert_eq!(events[1].location.as_deref(), Some("B201"));
    }

    #[test]
    fn test_missing_header_is_reported() {
        let result = parse_schedule_str(",Algo\n", "edt.csv", Config::default());
        assert!(matches!(result, Err(Error::NoTable { .. })));
    }

    #[test]
    fn test_missing_file() {
        let result = parse_schedule("/nonexistent/edt.csv", Config::default());
        assert!(matches!(result, Err(Error::FileRead { .. })));
    }
}
