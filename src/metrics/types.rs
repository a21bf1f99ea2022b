//! @ai:module:intent Metric types for parsed deletion reports
//! @ai:module:layer domain
//! @ai:module:public_api ReportMetrics, PatternResult, SeriesSet, IndependentVariable
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Metrics extracted from one stress report
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReportMetrics {
    /// 0 when the report has no `Keys:` line
    pub tree_size: u64,
    /// 0 when the report has no `Branching Factor:` line
    pub branching_factor: u64,
    /// Trials in the order they appear in the report
    pub pattern_results: Vec<PatternResult>,
}

/// @ai:intent One deletion trial within a report
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternResult {
    pub pattern: String,
    pub time_seconds: f64,
    pub keys_per_second: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insertion_keys_per_second: Option<f64>,
}

/// @ai:intent Report field plotted on the x axis of a series chart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndependentVariable {
    TreeSize,
    BranchingFactor,
}

impl IndependentVariable {
    /// @ai:intent Read this variable from a report
    /// @ai:effects pure
    pub fn value(self, report: &ReportMetrics) -> f64 {
        match self {
            Self::TreeSize => report.tree_size as f64,
            Self::BranchingFactor => report.branching_factor as f64,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TreeSize => "tree_size",
            Self::BranchingFactor => "branching_factor",
        }
    }
}

/// @ai:intent One (independent value, throughput) observation
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SeriesPoint {
    pub x: f64,
    pub keys_per_second: f64,
}

/// @ai:intent All observations for one pattern, in loader order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternSeries {
    pub pattern: String,
    pub points: Vec<SeriesPoint>,
}

/// @ai:intent Per-pattern series in canonical (lexicographic) pattern order
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SeriesSet {
    pub series: Vec<PatternSeries>,
}

impl SeriesSet {
    /// @ai:intent Canonical pattern order used for legends and colours
    /// @ai:effects pure
    pub fn patterns(&self) -> Vec<&str> {
        self.series.iter().map(|s| s.pattern.as_str()).collect()
    }

    pub fn get(&self, pattern: &str) -> Option<&PatternSeries> {
        self.series.iter().find(|s| s.pattern == pattern)
    }

    pub fn is_empty(&self) -> bool {
        self.series.is_empty()
    }

    pub fn point_count(&self) -> usize {
        self.series.iter().map(|s| s.points.len()).sum()
    }
}

/// @ai:intent Single throughput observation for a pattern (bar chart input)
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PatternBar {
    pub pattern: String,
    pub keys_per_second: f64,
}
