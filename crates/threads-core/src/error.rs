//! Error types for the catalog and progress store.

use thiserror::Error;

/// Result type for catalog and progress operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while reading or mutating progress.
#[derive(Debug, Error)]
pub enum Error {
    /// Missing or malformed input
    #[error("{0}")]
    Validation(String),

    /// Unknown lesson or news id
    #[error("{0}")]
    NotFound(String),

    /// Persistence failure that is not a plain IO error
    #[error("Storage error: {0}")]
    Storage(String),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl Error {
    /// Shorthand for a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }

    /// Shorthand for a not-found error.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::NotFound(message.into())
    }
}
