//! Error types for perfagg-core

use thiserror::Error;

/// Reasons a single performance data token is rejected
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PerfdataError {
    #[error("Missing '=' in entry: {0}")]
    MissingEquals(String),

    #[error("No numeric value in entry: {0}")]
    InvalidValue(String),
}

/// Result type alias for parsing operations
pub type Result<T> = std::result::Result<T, PerfdataError>;
