//! Error types for the earnings-core library.
//!
//! Extraction itself never fails; these cover configuration I/O only.

use thiserror::Error;

/// Main error type for the earnings library.
#[derive(Error, Debug)]
pub enum EarningsError {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON (de)serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Configuration error.
    #[error("configuration error: {0}")]
    Config(String),
}

/// Result type for the earnings library.
pub type Result<T> = std::result::Result<T, EarningsError>;
