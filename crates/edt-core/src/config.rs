//! Locale data and behavior switches for the timetable interpreter
//!
//! Everything that depends on the language or the layout habits of a given
//! timetable lives here as plain data, so that another locale (or another
//! year of the same timetable) is a different `Config` value rather than a
//! code change. A configuration can be stored as JSON and loaded back.

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// How cells of the first column are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum ColumnZero {
    /// Row labels: never content, never garbage-checked
    #[default]
    Label,
    /// Same rules as every other column
    Content,
}

/// Language-specific strings and patterns
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Locale {
    /// Weekday names, Monday first
    pub weekdays: Vec<String>,
    /// Two clock times; captures start hour, start minute, end hour, end minute
    pub time_range: String,
    /// Date at the start of a cell; captures day, month, year
    pub date: String,
    /// Noise cells that are dropped
    pub garbage: String,
    /// Group tag; captures the group number
    pub group: String,
    /// Group tag followed by a room; may repeat within a cell
    pub group_location: String,
    /// Numbered session followed by a room; may repeat within a cell
    pub session_location: String,
    /// Room code or amphitheater phrase
    pub location: String,
    /// Boilerplate label removed before anything else looks at an entry
    pub boilerplate: String,
    /// Characters introducing alternative or secondary text in a title
    pub alternative_markers: String,
    /// Label used in the canonical group suffix, e.g. "(Gr. 2)"
    pub group_label: String,
    /// IANA timezone of the wall-clock times in the grid
    pub timezone: String,
    /// Name given to the produced calendar
    pub calendar_name: String,
    /// Suffix appended to every event UID
    pub uid_host: String,
}

impl Default for Locale {
    fn default() -> Self {
        Self {
            weekdays: ["lundi", "mardi", "mercredi", "jeudi", "vendredi", "samedi", "dimanche"]
                .iter()
                .map(|d| d.to_string())
                .collect(),
            time_range: r"(?i)(\d{1,2})\s?h\s?(\d{2})\s*[\-à]\s*(\d{1,2})\s?h\s?(\d{2})".to_string(),
            date: r"^(\d{2})[.|/](\d{2})[.|/](\d{2,4})".to_string(),
            garbage: r"(?i)(matin|midi|semaine|date|conges|congés|page|réserve|reserve|^\d{2}\s\d{2})"
                .to_string(),
            group: r"(?i)Gr\.*\s*(\d)".to_string(),
            group_location: r"(?i)Gr\.*\s*(\d)[:\-|\s]*(?:salle)?[:\s]*([A-Z]\s*\d{3})".to_string(),
            session_location: r"(?i)TER\s*(\d)\n(?:salle)*\s*[:\-]*\s*([A-Z]\s*\d{3})".to_string(),
            location: r"(?i)\s*(((Salle)*\s*:*\s*([A-Z] *\d{3}))|(\w*[\s|\-]*amphi))".to_string(),
            boilerplate: r"(?i)(option\s*:*\s\n*)".to_string(),
            alternative_markers: "-+".to_string(),
            group_label: "Gr.".to_string(),
            timezone: "Europe/Paris".to_string(),
            calendar_name: "Emploi du temps".to_string(),
            uid_host: "@edt-calendar".to_string(),
        }
    }
}

/// Full interpreter configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Locale strings and patterns
    pub locale: Locale,
    /// Treatment of the first column
    pub column_zero: ColumnZero,
    /// Start a new table when day headers reappear on a later row
    pub segment_tables: bool,
    /// Fold wrapped cells back into the entry above them
    pub merge_continuations: bool,
    /// Split cells listing several numbered sessions
    pub split_sessions: bool,
    /// Subtract one year from four-digit years (fix for one known timetable)
    pub correct_four_digit_year: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            locale: Locale::default(),
            column_zero: ColumnZero::Label,
            segment_tables: true,
            merge_continuations: true,
            split_sessions: true,
            correct_four_digit_year: false,
        }
    }
}

impl Config {
    /// Configuration of the oldest timetables: one table, no continuation merge,
    /// no session splitting
    pub fn reduced() -> Self {
        Self {
            segment_tables: false,
            merge_continuations: false,
            split_sessions: false,
            ..Self::default()
        }
    }

    /// Load a configuration from a JSON file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| Error::FileRead {
            path: path.to_path_buf(),
            source: e,
        })?;
        serde_json::from_str(&content).map_err(Error::Json)
    }

    /// Save the configuration to a JSON file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
