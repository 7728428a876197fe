//! Output side of the aggregation

use perfagg_core::MetricResult;
use std::fmt::Write;

/// Receives one `(name, value)` pair per emitted metric
pub trait ResultSink {
    fn output(&mut self, name: &str, value: f64);
}

impl<S: ResultSink + ?Sized> ResultSink for &mut S {
    fn output(&mut self, name: &str, value: f64) {
        (**self).output(name, value)
    }
}

impl ResultSink for Vec<MetricResult> {
    fn output(&mut self, name: &str, value: f64) {
        self.push(MetricResult::new(name, value));
    }
}

/// Sink rendering results as a single performance data string
///
/// Entries are `name=value` with eight decimal places, separated by one
/// space, e.g. `latency=20.00000000 throughput=5.00000000`.
#[derive(Debug, Clone, Default)]
pub struct PerfdataStringSink {
    buffer: String,
}

impl PerfdataStringSink {
    /// Create an empty sink
    pub fn new() -> Self {
        Self::default()
    }

    /// Rendered perfdata so far
    pub fn as_str(&self) -> &str {
        &self.buffer
    }

    pub fn into_string(self) -> String {
        self.buffer
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}

impl ResultSink for PerfdataStringSink {
    fn output(&mut self, name: &str, value: f64) {
        if !self.buffer.is_empty() {
            self.buffer.push(' ');
        }
        write!(self.buffer, "{}={:.8}", name, value).ok();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec_sink() {
        let mut sink: Vec<MetricResult> = Vec::new();
        sink.output("a", 1.5);
        sink.output("b", -2.0);

        assert_eq!(
            sink,
            vec![MetricResult::new("a", 1.5), MetricResult::new("b", -2.0)]
        );
    }

    #[test]
    fn test_perfdata_string_sink() {
        let mut sink = PerfdataStringSink::new();
        assert!(sink.is_empty());

        sink.output("latency", 20.0);
        sink.output("throughput", 5.0);
        assert_eq!(sink.as_str(), "latency=20.00000000 throughput=5.00000000");
    }

    #[test]
    fn test_sink_through_mut_reference() {
        fn fill<S: ResultSink>(mut sink: S) {
            sink.output("x", 0.125);
        }

        let mut sink = PerfdataStringSink::new();
        fill(&mut sink);
        assert_eq!(sink.into_string(), "x=0.12500000");
    }
}
