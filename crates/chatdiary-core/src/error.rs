//! Error types for chatdiary-core

use thiserror::Error;

/// Result type alias using chatdiary-core's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in chatdiary-core operations
#[derive(Error, Debug)]
pub enum Error {
    /// Transport-level HTTP failure
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Diary service answered with a non-success status
    #[error("Diary service returned HTTP {status}: {body}")]
    Api { status: u16, body: String },

    /// Diary timestamp does not match `yyyy-MM-dd HH:mm:ss.SSS`
    #[error("Unparsable diary timestamp: {timestamp:?}")]
    TimestampParse { timestamp: String },

    /// Diary service response carried no `data` payload
    #[error("Diary service returned no data")]
    EmptyResult,

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// Message producer could not accept the entry
    #[error("Message producer error: {0}")]
    Producer(String),

    /// Client configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}
