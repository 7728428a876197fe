//! Aggregation error types

use thiserror::Error;

/// Aggregation errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AggregationError {
    #[error("Invalid aggregation operation: {0}")]
    InvalidOperation(String),

    #[error("Invalid Stats header: {0}")]
    InvalidStatsHeader(String),
}

/// Result type for aggregation operations
pub type Result<T> = std::result::Result<T, AggregationError>;
