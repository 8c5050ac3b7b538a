//! Error types for edt-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in edt-core
#[derive(Debug, Error)]
pub enum Error {
    /// A header or entry showed up before any day header opened a table
    #[error("cell ({column}:{row}) found before any table header")]
    NoTable { column: usize, row: usize },

    /// A captured date/time component is not an integer
    #[error("malformed {field} '{value}'")]
    MalformedNumber { field: &'static str, value: String },

    /// A date header that does not name a real calendar day
    #[error("invalid date '{text}'")]
    InvalidDate { text: String },

    /// Unknown timezone identifier in the configuration
    #[error("invalid timezone '{0}'")]
    InvalidTimezone(String),

    /// A configured pattern failed to compile
    #[error("invalid {name} pattern: {source}")]
    Pattern {
        name: &'static str,
        #[source]
        source: regex::Error,
    },

    /// Failed to read a file
    #[error("failed to read file '{path}': {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// CSV parsing error from the csv crate
    #[error("CSV error in '{path}': {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}
