//! Error types for the fitlog_core library.

use std::io;
use std::path::PathBuf;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// A rejected user input: which field, and the constraint it broke.
///
/// Displayed as `"<field> <reason>"`, e.g. `reps must be a positive integer`.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("{field} {reason}")]
pub struct ValidationError {
    pub field: String,
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

/// Core error type for fitlog_core operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// User input failed validation; recoverable by asking again
    #[error("Invalid input: {0}")]
    Validation(#[from] ValidationError),

    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// CSV error
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Configuration validation error
    #[error("Configuration error: {0}")]
    Config(String),

    /// A stored row could not be turned back into a record
    #[error("Corrupt row {row} in {}: {message}", .path.display())]
    CorruptRow {
        path: PathBuf,
        row: usize,
        message: String,
    },
}

impl Error {
    /// True for bad user input, false for storage and configuration failures
    pub fn is_validation(&self) -> bool {
        matches!(self, Error::Validation(_))
    }
}
