//! Error types for chart configuration

use thiserror::Error;

/// Errors that can occur when loading chart options
#[derive(Error, Debug)]
pub enum ChartError {
    /// Option value out of its allowed range
    #[error("Invalid chart option: {0}")]
    InvalidOption(String),

    /// Malformed options document
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for chart configuration
pub type ChartResult<T> = Result<T, ChartError>;
