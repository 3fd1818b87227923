//! Ingestion boundary errors

use thiserror::Error;

/// Errors raised while turning a producer record into an `Event`
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("Missing required field: {0}")]
    MissingField(&'static str),

    #[error("Field {0} cannot be blank")]
    BlankField(&'static str),

    #[error("Field {field} must be a finite number, got {value}")]
    NotFinite { field: &'static str, value: f64 },

    #[error("Field {field} out of range: {value} ({reason})")]
    OutOfRange {
        field: &'static str,
        value: f64,
        reason: &'static str,
    },

    #[error("Field {field} is not an ISO-8601 timestamp: {value}")]
    InvalidTimestamp { field: &'static str, value: String },

    #[error("exit_time {exit} precedes entry_time {entry}")]
    InvalidTimeRange { entry: String, exit: String },
}
