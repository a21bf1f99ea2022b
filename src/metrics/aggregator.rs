//! @ai:module:intent Group report metrics into per-pattern series
//! @ai:module:layer application
//! @ai:module:public_api SeriesAggregator, aggregate_by, pattern_bars
//! @ai:module:stateless true

use crate::metrics::types::{
    IndependentVariable, PatternBar, PatternSeries, ReportMetrics, SeriesPoint, SeriesSet,
};
use std::collections::BTreeSet;

/// @ai:intent Trait for series aggregation
pub trait SeriesAggregatorTrait: Send + Sync {
    /// @ai:intent Build one series per distinct pattern across all reports
    fn aggregate(&self, reports: &[ReportMetrics], variable: IndependentVariable) -> SeriesSet;
}

/// @ai:intent Aggregates loaded reports into chartable series
pub struct SeriesAggregator;

impl SeriesAggregator {
    /// @ai:intent Create a new series aggregator
    /// @ai:effects pure
    pub fn new() -> Self {
        Self
    }
}

impl Default for SeriesAggregator {
    fn default() -> Self {
        Self::new()
    }
}

impl SeriesAggregatorTrait for SeriesAggregator {
    fn aggregate(&self, reports: &[ReportMetrics], variable: IndependentVariable) -> SeriesSet {
        aggregate_by(reports, |report| variable.value(report))
    }
}

/// @ai:intent Aggregate with an arbitrary independent variable
/// @ai:pre reports are in loader order
/// @ai:post series are sorted by pattern name; points keep report order and duplicates
/// @ai:effects pure
pub fn aggregate_by<F>(reports: &[ReportMetrics], independent: F) -> SeriesSet
where
    F: Fn(&ReportMetrics) -> f64,
{
    let patterns: BTreeSet<&str> = reports
        .iter()
        .flat_map(|r| r.pattern_results.iter().map(|p| p.pattern.as_str()))
        .collect();

    let series = patterns
        .into_iter()
        .map(|pattern| {
            let points = reports
                .iter()
                .flat_map(|report| {
                    let x = independent(report);
                    report
                        .pattern_results
                        .iter()
                        .filter(move |p| p.pattern == pattern)
                        .map(move |p| SeriesPoint {
                            x,
                            keys_per_second: p.keys_per_second,
                        })
                })
                .collect();

            PatternSeries {
                pattern: pattern.to_string(),
                points,
            }
        })
        .collect();

    SeriesSet { series }
}

/// @ai:intent One bar per trial of a single report, sorted by pattern name
/// @ai:effects pure
pub fn pattern_bars(report: &ReportMetrics) -> Vec<PatternBar> {
    let mut bars: Vec<PatternBar> = report
        .pattern_results
        .iter()
        .map(|p| PatternBar {
            pattern: p.pattern.clone(),
            keys_per_second: p.keys_per_second,
        })
        .collect();

    bars.sort_by(|a, b| {
        a.pattern
            .cmp(&b.pattern)
            .then(a.keys_per_second.total_cmp(&b.keys_per_second))
    });
    bars
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::types::PatternResult;
    use pretty_assertions::assert_eq;

    fn trial(pattern: &str, keys_per_second: f64) -> PatternResult {
        PatternResult {
            pattern: pattern.to_string(),
            time_seconds: 1.0,
            keys_per_second,
            insertion_keys_per_second: None,
        }
    }

    fn report(tree_size: u64, trials: Vec<PatternResult>) -> ReportMetrics {
        ReportMetrics {
            tree_size,
            branching_factor: 256,
            pattern_results: trials,
        }
    }

    #[test]
    fn test_canonical_order_is_lexicographic() {
        let reports = vec![
            report(10_000, vec![trial("sequential", 5.0), trial("random", 3.0)]),
            report(1_000_000, vec![trial("random", 2.0), trial("sequential", 4.0)]),
        ];

        let set = SeriesAggregator::new().aggregate(&reports, IndependentVariable::TreeSize);

        assert_eq!(set.patterns(), vec!["random", "sequential"]);
    }

    #[test]
    fn test_points_follow_loader_order() {
        let reports = vec![
            report(10_000, vec![trial("random", 3.0)]),
            report(1_000_000, vec![trial("random", 2.0)]),
        ];

        let set = SeriesAggregator::new().aggregate(&reports, IndependentVariable::TreeSize);
        let random = set.get("random").unwrap();

        assert_eq!(
            random.points,
            vec![
                SeriesPoint { x: 10_000.0, keys_per_second: 3.0 },
                SeriesPoint { x: 1_000_000.0, keys_per_second: 2.0 },
            ]
        );
    }

    #[test]
    fn test_pattern_missing_from_some_reports() {
        let reports = vec![
            report(10_000, vec![trial("random", 3.0), trial("reverse", 9.0)]),
            report(100_000, vec![trial("random", 2.5)]),
        ];

        let set = aggregate_by(&reports, |r| r.tree_size as f64);

        assert_eq!(set.get("reverse").unwrap().points.len(), 1);
        assert_eq!(set.get("random").unwrap().points.len(), 2);
    }

    #[test]
    fn test_duplicate_patterns_are_separate_points() {
        let reports = vec![report(
            10_000,
            vec![trial("random", 3.0), trial("random", 4.0)],
        )];

        let set = aggregate_by(&reports, |r| r.tree_size as f64);

        assert_eq!(set.point_count(), 2);
        assert_eq!(set.series.len(), 1);
    }

    #[test]
    fn test_aggregate_is_deterministic() {
        let reports = vec![
            report(10_000, vec![trial("zigzag", 1.0), trial("alpha", 2.0)]),
            report(100_000, vec![trial("middle", 3.0)]),
        ];
        let aggregator = SeriesAggregator::new();

        let first = aggregator.aggregate(&reports, IndependentVariable::TreeSize);
        let second = aggregator.aggregate(&reports, IndependentVariable::TreeSize);

        assert_eq!(first, second);
        assert_eq!(first.patterns(), vec!["alpha", "middle", "zigzag"]);
    }

    #[test]
    fn test_aggregate_empty_input() {
        let set = aggregate_by(&[], |r| r.tree_size as f64);
        assert!(set.is_empty());
    }

    #[test]
    fn test_pattern_bars_sorted_by_name() {
        let r = report(
            1_000_000,
            vec![trial("sequential", 5.0), trial("random", 3.0), trial("alternating", 7.0)],
        );

        let names: Vec<_> = pattern_bars(&r).into_iter().map(|b| b.pattern).collect();

        assert_eq!(names, vec!["alternating", "random", "sequential"]);
    }
}
