//! Custom error types for subsplit
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for subsplit operations
#[derive(Error, Debug)]
pub enum SubsplitError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for command arguments
    #[error("Validation error: {0}")]
    Validation(String),

    /// A source record has the wrong shape
    #[error("Malformed record in table '{table}' ({record}): {message}")]
    Ingest {
        table: String,
        record: String,
        message: String,
    },

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// A table file could not be read or written
    #[error("Storage error in table '{table}': {message}")]
    Storage { table: String, message: String },
}

impl SubsplitError {
    /// Create an ingest error for a record
    pub fn ingest(
        table: impl Into<String>,
        record: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::Ingest {
            table: table.into(),
            record: record.into(),
            message: message.into(),
        }
    }

    /// Create a storage error for a table file
    pub fn storage(table: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Storage {
            table: table.into(),
            message: message.into(),
        }
    }

    /// Create a "not found" error for a data table
    pub fn table_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Table",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is an ingestion error
    pub fn is_ingest(&self) -> bool {
        matches!(self, Self::Ingest { .. })
    }
}

impl From<std::io::Error> for SubsplitError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for SubsplitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for subsplit operations
pub type SubsplitResult<T> = Result<T, SubsplitError>;
