//! @ai:module:intent Turn aggregated series into chart specifications
//! @ai:module:layer application
//! @ai:module:public_api build_series_chart, build_pattern_chart
//! @ai:module:stateless true

use crate::chart::palette::{color_at, color_for};
use crate::chart::spec::SeriesColor;
use crate::chart::spec::{BarSpec, ChartKind, ChartSpec, LineSeriesSpec};
use crate::metrics::{IndependentVariable, PatternBar, SeriesSet};

const THROUGHPUT_LABEL: &str = "Deletion Speed (keys/second)";

/// @ai:intent Title and x label for a swept variable
/// @ai:effects pure
fn axis_titles(variable: IndependentVariable) -> (&'static str, &'static str) {
    match variable {
        IndependentVariable::TreeSize => (
            "Deletion Performance vs Tree Size",
            "Tree Size (number of keys)",
        ),
        IndependentVariable::BranchingFactor => (
            "Deletion Performance vs Branching Factor",
            "Branching Factor",
        ),
    }
}

/// Patterns passed here always come from `sorted_patterns`
fn pattern_color(sorted_patterns: &[&str], pattern: &str) -> SeriesColor {
    color_for(sorted_patterns, pattern).unwrap_or_else(|| color_at(0))
}

/// @ai:intent Log-x line chart with one coloured line per pattern
/// @ai:pre set.series is in canonical order
/// @ai:post series order and colours follow the canonical pattern order
/// @ai:effects pure
pub fn build_series_chart(set: &SeriesSet, variable: IndependentVariable) -> ChartSpec {
    let (title, x_label) = axis_titles(variable);
    let patterns = set.patterns();

    let series = set
        .series
        .iter()
        .map(|s| LineSeriesSpec {
            label: s.pattern.clone(),
            color: pattern_color(&patterns, &s.pattern),
            points: s.points.iter().map(|p| (p.x, p.keys_per_second)).collect(),
        })
        .collect();

    ChartSpec {
        title: title.to_string(),
        x_label: x_label.to_string(),
        y_label: THROUGHPUT_LABEL.to_string(),
        kind: ChartKind::LogLine { series },
    }
}

/// @ai:intent Bar chart of one report's trials, one bar per trial
/// @ai:pre bars are sorted by pattern name
/// @ai:effects pure
pub fn build_pattern_chart(tree_size: u64, bars: &[PatternBar]) -> ChartSpec {
    let mut distinct: Vec<&str> = bars.iter().map(|b| b.pattern.as_str()).collect();
    distinct.dedup();

    let bars = bars
        .iter()
        .map(|b| BarSpec {
            label: b.pattern.clone(),
            value: b.keys_per_second,
            color: pattern_color(&distinct, &b.pattern),
        })
        .collect();

    ChartSpec {
        title: format!("Deletion Performance by Pattern (Tree Size: {tree_size})"),
        x_label: "Deletion Pattern".to_string(),
        y_label: THROUGHPUT_LABEL.to_string(),
        kind: ChartKind::Bar {
            bars,
            rotate_labels: true,
        },
    }
}
