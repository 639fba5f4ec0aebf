//! Error types for bikeshare operations.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// The error type for bikeshare operations.
#[derive(Debug, Error)]
pub enum Error {
    /// IO error occurred while talking to the terminal.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// A city's trip data could not be loaded.
    #[error(transparent)]
    DataSource(#[from] DataSourceError),

    /// The input stream ended before a valid answer was given.
    #[error("Input closed while waiting for {0}")]
    InputClosed(&'static str),

    /// The caller-imposed retry limit was reached.
    #[error("Gave up after {attempts} invalid {field} entries")]
    TooManyAttempts {
        /// What was being asked for.
        field: &'static str,
        /// Number of rejected answers.
        attempts: usize,
    },
}

/// Failures while reading a city's trip file.
///
/// These are never recovered from inside the loader.
#[derive(Debug, Error)]
pub enum DataSourceError {
    /// The mapped file does not exist.
    #[error("Data file not found: {}", path.display())]
    NotFound {
        /// Path that was looked up.
        path: PathBuf,
    },

    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying IO error.
        #[source]
        source: io::Error,
    },

    /// The file is not well-formed CSV.
    #[error("Malformed CSV in {}: {source}", path.display())]
    Csv {
        /// Path being read.
        path: PathBuf,
        /// Underlying CSV error.
        #[source]
        source: csv::Error,
    },

    /// A required column is absent from the header row.
    #[error("{} is missing required column '{column}'", path.display())]
    MissingColumn {
        /// Path being read.
        path: PathBuf,
        /// Name of the missing column.
        column: &'static str,
    },

    /// A cell could not be parsed into its column's type.
    #[error("{}:{line}: invalid {column} value '{value}'", path.display())]
    InvalidValue {
        /// Path being read.
        path: PathBuf,
        /// 1-based line number in the file.
        line: u64,
        /// Column the value belongs to.
        column: &'static str,
        /// The offending text.
        value: String,
    },
}

/// A specialized Result type for bikeshare operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message_names_line_and_column() {
        let err = DataSourceError::InvalidValue {
            path: PathBuf::from("data/chicago.csv"),
            line: 7,
            column: "Start Time",
            value: "yesterday".to_string(),
        };

        let msg = err.to_string();
        assert!(msg.contains("chicago.csv:7"));
        assert!(msg.contains("Start Time"));
        assert!(msg.contains("yesterday"));
    }

    #[test]
    fn test_data_source_error_is_transparent() {
        let err: Error = DataSourceError::NotFound {
            path: PathBuf::from("missing.csv"),
        }
        .into();

        assert_eq!(err.to_string(), "Data file not found: missing.csv");
    }
}
