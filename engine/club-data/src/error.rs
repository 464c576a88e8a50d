//! Error types for the club data layer

use club_stats::StatsError;
use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for data operations
pub type Result<T> = std::result::Result<T, DataError>;

/// Errors that can occur while reading weeks or writing reports
#[derive(Error, Debug)]
pub enum DataError {
    /// Week directory or file missing or unreadable
    #[error("Week source unavailable at {path}: {source}")]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Malformed CSV content
    #[error("CSV error in {path}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Two files resolve to the same week index
    #[error("Week {week} supplied twice: {first} and {second}")]
    DuplicateWeek { week: String, first: PathBuf, second: PathBuf },

    /// Report output could not be written
    #[error("Failed to write {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Record-level format errors
    #[error(transparent)]
    Stats(#[from] StatsError),
}

impl DataError {
    pub fn source_unavailable(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::SourceUnavailable { path: path.into(), source }
    }

    pub fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        Self::Csv { path: path.into(), source }
    }

    pub fn write(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Write { path: path.into(), source }
    }
}
