//! @ai:module:intent Deletion stress report analysis library
//! @ai:module:layer application
//! @ai:module:public_api config, parser, loader, metrics, chart, analysis, output

pub mod analysis;
pub mod chart;
pub mod config;
pub mod error;
pub mod loader;
pub mod metrics;
pub mod output;
pub mod parser;

pub use analysis::{Analysis, AnalysisData, AnalysisOutcome, AnalysisRunner, ReportCollector};
pub use chart::{ChartRendererTrait, ChartSpec, PlottersRenderer};
pub use config::AnalysisConfig;
pub use error::{ReportError, Result};
pub use loader::{ResultLoader, ResultLoaderTrait};
pub use metrics::{PatternResult, ReportMetrics, SeriesAggregator, SeriesAggregatorTrait, SeriesSet};
pub use parser::ReportParser;
