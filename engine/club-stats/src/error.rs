//! Error types for the statistics engine

use thiserror::Error;

/// Result type alias for statistics operations
pub type Result<T> = std::result::Result<T, StatsError>;

/// Errors that can occur while folding weekly records
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StatsError {
    /// A record is missing a required field or holds an unusable value
    #[error("Data format error in {week}, field `{field}`: {reason}")]
    DataFormat { week: String, field: String, reason: String },

    /// A week identifier carries no numeric index, so it cannot be ordered
    #[error("Invalid week identifier {0:?}: no numeric index")]
    InvalidWeekId(String),

    /// Weeks were folded out of ascending order
    #[error("Week {next} folded after {previous}; weeks must be folded in ascending order")]
    WeekOrder { previous: String, next: String },
}

impl StatsError {
    /// Create a new data format error
    pub fn data_format(
        week: impl Into<String>,
        field: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::DataFormat { week: week.into(), field: field.into(), reason: reason.into() }
    }
}
