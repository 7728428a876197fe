//! PerfAgg Core - Performance data types and parsing
//!
//! This crate provides the building blocks shared by the aggregation layer:
//! - `PerfdataSample`: An owned `(name, value)` pair extracted from performance data
//! - `PerfdataEntry`: The borrowed form produced on the parsing hot path
//! - `PerfdataParser`: Tolerant tokenizer for `name=value[unit][;warn[;crit[;min[;max]]]]` text
//! - `MetricResult`: One reduced value per metric name

pub mod error;
pub mod perfdata;
pub mod types;

pub use error::{PerfdataError, Result};
pub use perfdata::{parse_entry, split_value, PerfdataParser, Samples};
pub use types::*;
