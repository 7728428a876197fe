//! PerfAgg Query - Per-query aggregation of performance data
//!
//! This crate provides the aggregation side of a status query:
//! - Reduction selection (`sum`, `count`, `avg`, `std`)
//! - Running statistics per metric name
//! - The row-consuming accumulator and its result emission
//! - Column and output sink contracts towards the query engine
//! - Livestatus `Stats:` header parsing

pub mod aggregation;
pub mod column;
pub mod error;
pub mod model;
pub mod sink;

pub use aggregation::{PerfdataAggregator, RunningStats, StatsOperation};
pub use column::{DelimitedColumn, PerfdataColumn, TextColumn};
pub use error::{AggregationError, Result};
pub use model::StatsSpec;
pub use perfagg_core::MetricResult;
pub use sink::{PerfdataStringSink, ResultSink};
