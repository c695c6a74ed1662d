//! Error types for Gradesight

use thiserror::Error;

/// Errors that can occur while building dashboard views
#[derive(Debug, Error)]
pub enum EngineError {
    #[error("Grid item has no usable id: {0}")]
    MissingItemId(String),

    #[error("Grid item URL must be http(s): {0}")]
    InvalidItemUrl(String),

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Date parse error: {0}")]
    DateParseError(String),

    #[error("Invalid JSON: {0}")]
    JsonError(#[from] serde_json::Error),
}
