//! @ai:module:intent Run the three chart analyses independently
//! @ai:module:layer application
//! @ai:module:public_api Analysis, AnalysisData, AnalysisOutcome, ReportCollector, AnalysisRunner
//! @ai:module:depends_on config, loader, metrics, chart

use crate::chart::{build_pattern_chart, build_series_chart, ChartRendererTrait, ChartSpec};
use crate::config::{AnalysisConfig, SweepConfig};
use crate::error::{ReportError, Result};
use crate::loader::ResultLoaderTrait;
use crate::metrics::{
    pattern_bars, IndependentVariable, PatternBar, SeriesAggregatorTrait, SeriesSet,
};
use std::fmt;
use std::path::PathBuf;

/// @ai:intent The three charts produced from a results directory
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Analysis {
    TreeSize,
    BranchingFactor,
    Pattern,
}

impl Analysis {
    pub const ALL: [Analysis; 3] = [Self::TreeSize, Self::BranchingFactor, Self::Pattern];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::TreeSize => "tree size",
            Self::BranchingFactor => "branching factor",
            Self::Pattern => "pattern",
        }
    }
}

impl fmt::Display for Analysis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// @ai:intent Aggregated input for one chart
#[derive(Debug, Clone, PartialEq)]
pub enum AnalysisData {
    Series {
        variable: IndependentVariable,
        reports_loaded: usize,
        series: SeriesSet,
    },
    Bars {
        tree_size: u64,
        bars: Vec<PatternBar>,
    },
}

impl AnalysisData {
    /// @ai:intent Build the chart specification for this data
    /// @ai:effects pure
    pub fn chart(&self) -> ChartSpec {
        match self {
            Self::Series {
                variable, series, ..
            } => build_series_chart(series, *variable),
            Self::Bars { tree_size, bars } => build_pattern_chart(*tree_size, bars),
        }
    }
}

/// @ai:intent Result of running one analysis
#[derive(Debug)]
pub enum AnalysisOutcome {
    Rendered { path: PathBuf },
    Skipped { reason: String },
    Failed { error: anyhow::Error },
}

impl AnalysisOutcome {
    pub fn is_rendered(&self) -> bool {
        matches!(self, Self::Rendered { .. })
    }
}

/// @ai:intent Loads and aggregates analysis inputs; never draws
pub struct ReportCollector<L, A> {
    config: AnalysisConfig,
    loader: L,
    aggregator: A,
}

impl<L, A> ReportCollector<L, A>
where
    L: ResultLoaderTrait,
    A: SeriesAggregatorTrait,
{
    /// @ai:intent Create a collector over the configured results directory
    /// @ai:effects pure
    pub fn new(config: AnalysisConfig, loader: L, aggregator: A) -> Self {
        Self {
            config,
            loader,
            aggregator,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// @ai:intent Fail before any report is read when the results directory is absent
    /// @ai:effects fs:read
    pub fn ensure_results_dir(&self) -> Result<()> {
        if self.config.results_dir.is_dir() {
            Ok(())
        } else {
            Err(ReportError::MissingResultsDir {
                path: self.config.results_dir.clone(),
            })
        }
    }

    fn sweep(&self, variable: IndependentVariable) -> &SweepConfig {
        match variable {
            IndependentVariable::TreeSize => &self.config.tree_size,
            IndependentVariable::BranchingFactor => &self.config.branching_factor,
        }
    }

    fn pattern_report_path(&self) -> PathBuf {
        self.config.results_path(&self.config.pattern.file)
    }

    /// @ai:intent Chart file written by an analysis
    /// @ai:effects pure
    pub fn chart_path(&self, analysis: Analysis) -> PathBuf {
        let file = match analysis {
            Analysis::TreeSize => &self.config.tree_size.output,
            Analysis::BranchingFactor => &self.config.branching_factor.output,
            Analysis::Pattern => &self.config.pattern.output,
        };
        self.config.results_path(file)
    }

    /// @ai:intent Message shown when an analysis has no input
    /// @ai:effects pure
    pub fn missing_input_reason(&self, analysis: Analysis) -> String {
        match analysis {
            Analysis::Pattern => format!("File {} not found.", self.pattern_report_path().display()),
            other => format!("No {} results found.", other),
        }
    }

    /// @ai:intent Load and aggregate the inputs of one analysis
    /// @ai:post Ok(None) when no input report exists
    /// @ai:effects fs:read
    pub fn collect(&self, analysis: Analysis) -> Result<Option<AnalysisData>> {
        let variable = match analysis {
            Analysis::TreeSize => IndependentVariable::TreeSize,
            Analysis::BranchingFactor => IndependentVariable::BranchingFactor,
            Analysis::Pattern => return self.collect_pattern(),
        };

        let sweep = self.sweep(variable);
        let results_dir = &self.config.results_dir;
        let reports = self
            .loader
            .load(&sweep.candidates, |n| sweep.path_for(results_dir, *n))?;

        if reports.is_empty() {
            return Ok(None);
        }

        Ok(Some(AnalysisData::Series {
            variable,
            reports_loaded: reports.len(),
            series: self.aggregator.aggregate(&reports, variable),
        }))
    }

    fn collect_pattern(&self) -> Result<Option<AnalysisData>> {
        let path = self.pattern_report_path();

        Ok(self.loader.load_one(&path)?.map(|report| AnalysisData::Bars {
            tree_size: report.tree_size,
            bars: pattern_bars(&report),
        }))
    }
}

/// @ai:intent Collects and renders each analysis without shared state
pub struct AnalysisRunner<L, A, R> {
    collector: ReportCollector<L, A>,
    renderer: R,
}

impl<L, A, R> AnalysisRunner<L, A, R>
where
    L: ResultLoaderTrait,
    A: SeriesAggregatorTrait,
    R: ChartRendererTrait,
{
    /// @ai:intent Create a runner over the configured results directory
    /// @ai:effects pure
    pub fn new(config: AnalysisConfig, loader: L, aggregator: A, renderer: R) -> Self {
        Self {
            collector: ReportCollector::new(config, loader, aggregator),
            renderer,
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        self.collector.config()
    }

    pub fn collector(&self) -> &ReportCollector<L, A> {
        &self.collector
    }

    /// @ai:intent Run one analysis end to end; never fails the caller
    /// @ai:effects fs:read, fs:write
    pub fn run(&self, analysis: Analysis) -> AnalysisOutcome {
        let data = match self.collector.collect(analysis) {
            Ok(Some(data)) => data,
            Ok(None) => {
                return AnalysisOutcome::Skipped {
                    reason: self.collector.missing_input_reason(analysis),
                }
            }
            Err(e) => {
                return AnalysisOutcome::Failed {
                    error: anyhow::Error::new(e)
                        .context(format!("{} analysis could not load its reports", analysis)),
                }
            }
        };

        let path = self.collector.chart_path(analysis);
        match self.renderer.render(&data.chart(), &path) {
            Ok(()) => AnalysisOutcome::Rendered { path },
            Err(error) => AnalysisOutcome::Failed {
                error: error.context(format!("Failed to render {}", path.display())),
            },
        }
    }

    /// @ai:intent Run every analysis in order, logging each outcome
    /// @ai:pre results directory exists, otherwise nothing is read or written
    /// @ai:effects fs:read, fs:write
    pub fn run_all(&self) -> Result<Vec<(Analysis, AnalysisOutcome)>> {
        self.collector.ensure_results_dir()?;

        let outcomes = Analysis::ALL
            .into_iter()
            .map(|analysis| {
                let outcome = self.run(analysis);

                match &outcome {
                    AnalysisOutcome::Rendered { path } => {
                        tracing::info!("{} analysis written to {}", analysis, path.display())
                    }
                    AnalysisOutcome::Skipped { reason } => {
                        tracing::debug!("Skipping {} analysis: {}", analysis, reason)
                    }
                    AnalysisOutcome::Failed { error } => {
                        tracing::error!("{} analysis failed: {:#}", analysis, error)
                    }
                }

                (analysis, outcome)
            })
            .collect();

        Ok(outcomes)
    }
}
