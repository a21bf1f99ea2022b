//! @ai:module:intent Metric types and series aggregation
//! @ai:module:layer application
//! @ai:module:public_api ReportMetrics, PatternResult, SeriesSet, SeriesAggregator

pub mod aggregator;
pub mod types;

pub use aggregator::{aggregate_by, pattern_bars, SeriesAggregator, SeriesAggregatorTrait};
pub use types::{
    IndependentVariable, PatternBar, PatternResult, PatternSeries, ReportMetrics, SeriesPoint,
    SeriesSet,
};
