//! Error types for jetprep

use thiserror::Error;

/// jetprep error type
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Trigger configuration error (fatal for the current processing unit)
    #[error("Trigger configuration error: {0}")]
    Trigger(String),

    /// Calibration record error (fatal for the current processing unit)
    #[error("Calibration error: {0}")]
    Calibration(String),
}

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;
