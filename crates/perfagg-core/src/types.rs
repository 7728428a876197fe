//! Core data types for performance data aggregation

use serde::{Deserialize, Serialize};
use std::fmt;

/// A single metric observation borrowed from performance data text
///
/// The name slice points into the text being scanned, so producing an entry
/// never allocates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PerfdataEntry<'a> {
    pub name: &'a str,
    pub value: f64,
}

impl<'a> PerfdataEntry<'a> {
    /// Create a new entry
    pub fn new(name: &'a str, value: f64) -> Self {
        Self { name, value }
    }

    /// Convert into an owned sample
    pub fn to_sample(&self) -> PerfdataSample {
        PerfdataSample::new(self.name, self.value)
    }
}

/// An owned `(name, value)` pair extracted from performance data
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PerfdataSample {
    pub name: String,
    pub value: f64,
}

impl PerfdataSample {
    /// Create a new sample
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

impl From<PerfdataEntry<'_>> for PerfdataSample {
    fn from(entry: PerfdataEntry<'_>) -> Self {
        entry.to_sample()
    }
}

/// The reduced value emitted for one metric name
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricResult {
    /// Metric name, exactly as it appeared in the performance data
    pub name: String,
    /// Value computed by the selected reduction
    pub value: f64,
}

impl MetricResult {
    /// Create a new result
    pub fn new(name: impl Into<String>, value: f64) -> Self {
        Self {
            name: name.into(),
            value,
        }
    }
}

/// Renders as a performance data entry with eight decimal places
impl fmt::Display for MetricResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}={:.8}", self.name, self.value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_to_sample() {
        let text = String::from("load1=0.42");
        let entry = PerfdataEntry::new(&text[..5], 0.42);
        let sample: PerfdataSample = entry.into();

        assert_eq!(sample.name, "load1");
        assert!((sample.value - 0.42).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metric_result_display() {
        let result = MetricResult::new("latency", 20.0);
        assert_eq!(result.to_string(), "latency=20.00000000");

        let result = MetricResult::new("delta", -0.125);
        assert_eq!(result.to_string(), "delta=-0.12500000");
    }
}
