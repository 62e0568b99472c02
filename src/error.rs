//! Error types for Post-Index

use crate::core::temporal::{Timestamp, YearMonth};
use thiserror::Error;

/// Result type alias for Post-Index operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for Post-Index
///
/// Lookup misses and an exhausted priority index are not errors; they come
/// back as `None` from the store.
#[derive(Error, Debug)]
pub enum Error {
    /// Range bounds given in the wrong order
    #[error("Invalid range: start {start} must be earlier than end {end}")]
    InvalidRange { start: YearMonth, end: YearMonth },

    /// Date/time text that failed to parse
    #[error("Malformed input: {0}")]
    MalformedInput(String),

    /// A record reused an existing timestamp while duplicates are rejected
    #[error("Duplicate timestamp: {0}")]
    DuplicateTimestamp(Timestamp),

    /// Configuration errors
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Serialization(e.to_string())
    }
}
