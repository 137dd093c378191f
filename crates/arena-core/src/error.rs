//! Error types for the Arena core library.

use thiserror::Error;

/// Result type alias using the Arena core `Error`.
pub type Result<T> = std::result::Result<T, Error>;

/// Core error types for Arena operations.
#[derive(Debug, Error)]
pub enum Error {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Credential store error
    #[error("Credential store error: {0}")]
    Credential(String),

    /// JSON serialization/deserialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
