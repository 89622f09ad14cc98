//! Error types for feed_sync

use std::collections::BTreeSet;

use thiserror::Error;

use crate::schema::types::PrimitiveType;

/// Result type for feed_sync operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for feed_sync
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Failed to parse document {location}: {message}")]
    ParseError { location: String, message: String },

    #[error("Failed to read document {location}: {message}")]
    FetchError { location: String, message: String },

    #[error(
        "Live schema of table '{table}' differs from the document: \
         missing {missing:?}, unexpected {unexpected:?} (document: {expected:?}, database: {actual:?})"
    )]
    SchemaMismatch {
        table: String,
        expected: BTreeSet<String>,
        actual: BTreeSet<String>,
        missing: BTreeSet<String>,
        unexpected: BTreeSet<String>,
    },

    #[error(
        "Cannot convert value for {table}.{column} to {target}: raw={raw} ({representation}): {reason}"
    )]
    CoercionError {
        table: String,
        column: String,
        target: PrimitiveType,
        raw: String,
        representation: &'static str,
        reason: String,
    },

    #[error("Table not found in document schema: {0}")]
    TableNotFound(String),

    #[error("Table not found in database or has no columns: {0}")]
    LiveTableNotFound(String),

    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("SQLx error: {0}")]
    SqlxError(#[from] sqlx::Error),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl Error {
    /// Shorthand for rejecting a blank required argument
    pub(crate) fn blank(what: &str) -> Self {
        Error::InvalidArgument(format!("{} must not be blank", what))
    }
}

/// Convert Serde JSON errors to feed_sync errors
impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::SerializationError(error.to_string())
    }
}

/// Convert TOML deserialization errors to feed_sync errors
impl From<toml::de::Error> for Error {
    fn from(error: toml::de::Error) -> Self {
        Error::ConfigError(error.to_string())
    }
}
