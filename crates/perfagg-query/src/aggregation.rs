//! Aggregation of performance data across the rows of a query

use crate::column::PerfdataColumn;
use crate::error::{AggregationError, Result};
use crate::sink::ResultSink;
use perfagg_core::{MetricResult, PerfdataParser};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;
use tracing::debug;

/// Supported reductions over performance data
///
/// Order statistics (min, max, percentiles) are not representable by the
/// running statistics and are therefore not offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatsOperation {
    /// Sum of values
    Sum,
    /// Number of observations
    Count,
    /// Mean (average) of values
    #[serde(alias = "mean", alias = "average")]
    Avg,
    /// Population standard deviation
    #[serde(alias = "stddev", alias = "std_dev")]
    Std,
}

impl StatsOperation {
    /// Livestatus keyword for this operation
    pub fn as_str(&self) -> &'static str {
        match self {
            StatsOperation::Sum => "sum",
            StatsOperation::Count => "count",
            StatsOperation::Avg => "avg",
            StatsOperation::Std => "std",
        }
    }
}

impl FromStr for StatsOperation {
    type Err = AggregationError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "sum" => Ok(StatsOperation::Sum),
            "count" => Ok(StatsOperation::Count),
            "avg" | "mean" | "average" => Ok(StatsOperation::Avg),
            "std" | "stddev" | "std_dev" => Ok(StatsOperation::Std),
            _ => Err(AggregationError::InvalidOperation(s.to_string())),
        }
    }
}

impl fmt::Display for StatsOperation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Running count, sum and sum of squares for one metric name
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunningStats {
    count: u64,
    sum: f64,
    sum_of_squares: f64,
}

impl RunningStats {
    /// Create empty statistics
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold in one observation
    pub fn observe(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
        self.sum_of_squares += value * value;
    }

    /// Number of observations
    pub fn count(&self) -> u64 {
        self.count
    }

    /// Sum of observations
    pub fn sum(&self) -> f64 {
        self.sum
    }

    /// Sum of squared observations
    pub fn sum_of_squares(&self) -> f64 {
        self.sum_of_squares
    }

    /// Mean of observations
    pub fn mean(&self) -> Option<f64> {
        if self.count == 0 {
            return None;
        }
        Some(self.sum / self.count as f64)
    }

    /// Population variance, clamped at zero
    ///
    /// `E[x^2] - E[x]^2` can come out slightly negative through cancellation
    /// when the observations are (nearly) identical.
    pub fn variance(&self) -> Option<f64> {
        let mean = self.mean()?;
        let variance = self.sum_of_squares / self.count as f64 - mean * mean;
        Some(variance.max(0.0))
    }

    /// Population standard deviation
    pub fn std_dev(&self) -> Option<f64> {
        self.variance().map(f64::sqrt)
    }

    /// Compute the value of `operation`
    ///
    /// Returns `None` for every operation but `Count` when nothing was observed.
    pub fn reduce(&self, operation: StatsOperation) -> Option<f64> {
        match operation {
            StatsOperation::Count => Some(self.count as f64),
            StatsOperation::Sum if self.count > 0 => Some(self.sum),
            StatsOperation::Sum => None,
            StatsOperation::Avg => self.mean(),
            StatsOperation::Std => self.std_dev(),
        }
    }
}

/// Per-query accumulator of performance data statistics
///
/// One instance serves one query: rows are fed through [`consume`] while the
/// query scans, and the reduced values are read once through [`emit`].
/// Results are ordered by metric name.
///
/// [`consume`]: PerfdataAggregator::consume
/// [`emit`]: PerfdataAggregator::emit
#[derive(Debug)]
pub struct PerfdataAggregator<C> {
    /// Accessor for the performance data text of a row
    column: C,
    /// Reduction applied at emit time
    operation: StatsOperation,
    /// Statistics per metric name
    stats: BTreeMap<String, RunningStats>,
    rows_consumed: u64,
    tokens_rejected: u64,
}

impl<C> PerfdataAggregator<C> {
    /// Create a new aggregator reading perfdata through `column`
    pub fn new(column: C, operation: StatsOperation) -> Self {
        Self {
            column,
            operation,
            stats: BTreeMap::new(),
            rows_consumed: 0,
            tokens_rejected: 0,
        }
    }

    /// Consume one matched row
    ///
    /// Rows without performance data contribute nothing. Malformed entries
    /// are skipped; this never fails.
    pub fn consume<R: ?Sized>(&mut self, row: &R)
    where
        C: PerfdataColumn<R>,
    {
        match self.column.perf_data(row) {
            Some(text) => {
                self.consume_text(text);
            }
            None => self.rows_consumed += 1,
        }
    }

    /// Consume the performance data text of one row directly
    ///
    /// Returns the number of entries folded into the statistics.
    pub fn consume_text(&mut self, text: &str) -> usize {
        self.rows_consumed += 1;

        let mut samples = PerfdataParser::new(text).samples();
        let mut folded = 0;
        for entry in samples.by_ref() {
            self.fold(entry.name, entry.value);
            folded += 1;
        }
        self.tokens_rejected += samples.rejected() as u64;

        folded
    }

    fn fold(&mut self, name: &str, value: f64) {
        // Only allocate the key the first time a name is seen
        match self.stats.get_mut(name) {
            Some(stats) => stats.observe(value),
            None => {
                let mut stats = RunningStats::new();
                stats.observe(value);
                self.stats.insert(name.to_string(), stats);
            }
        }
    }

    /// The configured reduction
    pub fn operation(&self) -> StatsOperation {
        self.operation
    }

    /// Statistics collected for `name` so far
    pub fn stats(&self, name: &str) -> Option<&RunningStats> {
        self.stats.get(name)
    }

    /// Number of distinct metric names seen
    pub fn len(&self) -> usize {
        self.stats.len()
    }

    /// Whether no metric has been seen yet
    pub fn is_empty(&self) -> bool {
        self.stats.is_empty()
    }

    /// Number of rows consumed, including rows without performance data
    pub fn rows_consumed(&self) -> u64 {
        self.rows_consumed
    }

    /// Number of malformed entries skipped
    pub fn tokens_rejected(&self) -> u64 {
        self.tokens_rejected
    }

    /// Snapshot of the reduced values, ordered by metric name
    pub fn results(&self) -> Vec<MetricResult> {
        self.stats
            .iter()
            .filter_map(|(name, stats)| {
                stats
                    .reduce(self.operation)
                    .map(|value| MetricResult::new(name.as_str(), value))
            })
            .collect()
    }

    /// Write one result per metric name to `sink`, ordered by metric name
    ///
    /// Consumes the aggregator. Returns the number of results written.
    pub fn emit<S: ResultSink + ?Sized>(self, sink: &mut S) -> usize {
        let mut emitted = 0;
        for (name, stats) in &self.stats {
            if let Some(value) = stats.reduce(self.operation) {
                sink.output(name, value);
                emitted += 1;
            }
        }

        debug!(
            operation = %self.operation,
            metrics = emitted,
            rows = self.rows_consumed,
            rejected = self.tokens_rejected,
            "Emitted perfdata aggregation"
        );

        emitted
    }
}
