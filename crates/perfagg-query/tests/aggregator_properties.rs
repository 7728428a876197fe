//! Property-based tests for the perfdata aggregator.
//!
//! 1. Count equals the number of parsed occurrences of each name
//! 2. Average equals sum / count
//! 3. Standard deviation is never negative
//! 4. Output is ordered by name regardless of row order

use perfagg_query::{MetricResult, PerfdataAggregator, StatsOperation, TextColumn};
use proptest::prelude::*;
use std::collections::BTreeMap;

fn observations() -> impl Strategy<Value = Vec<(String, f64)>> {
    prop::collection::vec(("[a-e]{1,2}", -10_000.0_f64..10_000.0_f64), 0..64)
}

/// Render observations as rows, a few entries per row with some junk mixed in
fn to_rows(observations: &[(String, f64)]) -> Vec<String> {
    observations
        .chunks(3)
        .map(|chunk| {
            chunk
                .iter()
                .map(|(name, value)| format!("{}={}ms;80;90 junk", name, value))
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect()
}

fn aggregate(operation: StatsOperation, rows: &[String]) -> Vec<MetricResult> {
    let mut agg = PerfdataAggregator::new(TextColumn, operation);
    for row in rows {
        agg.consume(row);
    }
    let mut results = Vec::new();
    agg.emit(&mut results);
    results
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(300))]

    #[test]
    fn prop_count_matches_occurrences(obs in observations()) {
        let rows = to_rows(&obs);
        let results = aggregate(StatsOperation::Count, &rows);

        let mut expected: BTreeMap<&str, usize> = BTreeMap::new();
        for (name, _) in &obs {
            *expected.entry(name.as_str()).or_default() += 1;
        }

        prop_assert_eq!(results.len(), expected.len());
        for result in &results {
            prop_assert_eq!(result.value, expected[result.name.as_str()] as f64);
        }
    }

    #[test]
    fn prop_average_is_sum_over_count(obs in observations()) {
        let rows = to_rows(&obs);
        let sums = aggregate(StatsOperation::Sum, &rows);
        let counts = aggregate(StatsOperation::Count, &rows);
        let averages = aggregate(StatsOperation::Avg, &rows);

        for ((sum, count), avg) in sums.iter().zip(&counts).zip(&averages) {
            prop_assert_eq!(&sum.name, &avg.name);
            let expected = sum.value / count.value;
            prop_assert!((avg.value - expected).abs() <= 1e-9 * expected.abs().max(1.0));
        }
    }

    #[test]
    fn prop_std_is_non_negative(obs in observations()) {
        let rows = to_rows(&obs);
        for result in aggregate(StatsOperation::Std, &rows) {
            prop_assert!(result.value >= 0.0);
            prop_assert!(result.value.is_finite());
        }
    }

    #[test]
    fn prop_output_sorted_by_name(obs in observations()) {
        let mut rows = to_rows(&obs);
        rows.reverse();

        let results = aggregate(StatsOperation::Sum, &rows);
        let names: Vec<&str> = results.iter().map(|r| r.name.as_str()).collect();
        let mut sorted = names.clone();
        sorted.sort_unstable();
        sorted.dedup();
        prop_assert_eq!(names, sorted);
    }
}
