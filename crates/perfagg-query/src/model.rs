//! Query model - Livestatus `Stats:` header for perfdata aggregation
//!
//! Format: `Stats: <operation> <column>`
//!
//! Example: `Stats: avg perf_data`

use crate::aggregation::StatsOperation;
use crate::error::{AggregationError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

const HEADER_PREFIX: &str = "Stats:";

/// An aggregation request: which reduction to apply to which column
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsSpec {
    /// Reduction applied at output time
    pub operation: StatsOperation,
    /// Column holding the performance data
    pub column: String,
}

impl StatsSpec {
    /// Create a new spec
    pub fn new(operation: StatsOperation, column: impl Into<String>) -> Self {
        Self {
            operation,
            column: column.into(),
        }
    }

    /// Parse a header line; the `Stats:` prefix is optional
    pub fn parse(header: &str) -> Result<Self> {
        let header = header.trim();
        let body = header.strip_prefix(HEADER_PREFIX).unwrap_or(header);

        let words: Vec<&str> = body.split_whitespace().collect();
        if words.len() != 2 {
            return Err(AggregationError::InvalidStatsHeader(header.to_string()));
        }

        let operation = words[0].parse()?;
        Ok(Self::new(operation, words[1]))
    }
}

impl FromStr for StatsSpec {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self> {
        Self::parse(s)
    }
}

impl fmt::Display for StatsSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", HEADER_PREFIX, self.operation, self.column)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_header() {
        let spec = StatsSpec::parse("Stats: avg perf_data").unwrap();
        assert_eq!(spec, StatsSpec::new(StatsOperation::Avg, "perf_data"));

        let spec = StatsSpec::parse("  Stats:std   service_perf_data \n").unwrap();
        assert_eq!(spec.operation, StatsOperation::Std);
        assert_eq!(spec.column, "service_perf_data");
    }

    #[test]
    fn test_parse_without_prefix() {
        let spec: StatsSpec = "SUM perf_data".parse().unwrap();
        assert_eq!(spec.operation, StatsOperation::Sum);
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(
            StatsSpec::parse("Stats: avg"),
            Err(AggregationError::InvalidStatsHeader(_))
        ));
        assert!(matches!(
            StatsSpec::parse("Stats: state = 0"),
            Err(AggregationError::InvalidStatsHeader(_))
        ));
        assert_eq!(
            StatsSpec::parse("Stats: max perf_data"),
            Err(AggregationError::InvalidOperation("max".to_string()))
        );
    }

    #[test]
    fn test_display() {
        let spec = StatsSpec::new(StatsOperation::Count, "perf_data");
        assert_eq!(spec.to_string(), "Stats: count perf_data");
        assert_eq!(spec.to_string().parse::<StatsSpec>().unwrap(), spec);
    }
}
