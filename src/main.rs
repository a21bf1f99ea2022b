//! @ai:module:intent CLI for deletion stress report analysis
//! @ai:module:layer presentation

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};
use deletion_report::{
    analysis::{Analysis, AnalysisOutcome, AnalysisRunner, ReportCollector},
    chart::PlottersRenderer,
    config::AnalysisConfig,
    error::ReportError,
    loader::ResultLoader,
    metrics::SeriesAggregator,
    output::{self, OutputFormat},
    parser::ReportParser,
};
use std::path::PathBuf;
use std::process::ExitCode;

#[derive(Parser)]
#[command(name = "deletion-report")]
#[command(about = "Chart B+ tree deletion throughput from stress test reports")]
#[command(version)]
struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Results directory (overrides the config file)
    #[arg(long, global = true)]
    results_dir: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Render all charts (default)
    Run,

    /// Parse a single report and print its metrics
    Parse {
        /// Path to report file
        path: PathBuf,

        /// Output format
        #[arg(long, short, value_enum, default_value = "text")]
        format: Format,
    },

    /// Print the aggregated series of every analysis without rendering
    Summary,

    /// Write the default configuration
    Init {
        /// Output path for config file
        #[arg(short, long, default_value = "analysis.toml")]
        output: PathBuf,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
    JsonPretty,
}

impl From<Format> for OutputFormat {
    fn from(f: Format) -> Self {
        match f {
            Format::Text => OutputFormat::Text,
            Format::Json => OutputFormat::Json,
            Format::JsonPretty => OutputFormat::JsonPretty,
        }
    }
}

fn main() -> ExitCode {
    init_tracing();

    let cli = Cli::parse();

    let result = match cli.command.unwrap_or(Commands::Run) {
        Commands::Run => load_config(cli.config, cli.results_dir).and_then(run_analyses),
        Commands::Parse { path, format } => parse_report(path, format.into()),
        Commands::Summary => load_config(cli.config, cli.results_dir).and_then(summarize),
        Commands::Init { output } => init_config(output),
    };

    match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            ExitCode::from(2)
        }
    }
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("deletion_report=info"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// @ai:intent Load config from file or defaults, then apply CLI overrides
/// @ai:effects fs:read
fn load_config(path: Option<PathBuf>, results_dir: Option<PathBuf>) -> Result<AnalysisConfig> {
    let mut config = match path {
        Some(p) => {
            tracing::info!("Loading config from {}", p.display());
            AnalysisConfig::load(&p)?
        }
        None => AnalysisConfig::default(),
    };

    if let Some(dir) = results_dir {
        config.results_dir = dir;
    }

    Ok(config)
}

/// @ai:intent Render every chart; missing inputs only skip their own analysis
/// @ai:effects fs:read, fs:write
fn run_analyses(config: AnalysisConfig) -> Result<ExitCode> {
    let renderer = PlottersRenderer::new(config.chart);
    let runner = AnalysisRunner::new(
        config,
        ResultLoader::new(),
        SeriesAggregator::new(),
        renderer,
    );

    let outcomes = match runner.run_all() {
        Ok(outcomes) => outcomes,
        Err(e @ ReportError::MissingResultsDir { .. }) => {
            eprintln!("{}", e);
            return Ok(ExitCode::FAILURE);
        }
        Err(e) => return Err(e.into()),
    };
    let rendered = outcomes.iter().filter(|(_, o)| o.is_rendered()).count();

    for (_, outcome) in &outcomes {
        if let AnalysisOutcome::Skipped { reason } = outcome {
            println!("{}", reason);
        }
    }

    println!(
        "Analysis complete. {} graph(s) saved to {}.",
        rendered,
        runner.config().results_dir.display()
    );
    Ok(ExitCode::SUCCESS)
}

/// @ai:intent Print aggregated series for each analysis
/// @ai:effects fs:read
fn summarize(config: AnalysisConfig) -> Result<ExitCode> {
    let collector = ReportCollector::new(config, ResultLoader::new(), SeriesAggregator::new());

    if let Err(e) = collector.ensure_results_dir() {
        eprintln!("{}", e);
        return Ok(ExitCode::FAILURE);
    }

    for analysis in Analysis::ALL {
        match collector.collect(analysis) {
            Ok(Some(data)) => println!("{}", output::format_analysis_data(analysis, &data)),
            Ok(None) => println!("{}\n", collector.missing_input_reason(analysis)),
            Err(e) => {
                tracing::error!("{} analysis failed: {}", analysis, e);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}

/// @ai:intent Parse one report file and print it
/// @ai:effects fs:read
fn parse_report(path: PathBuf, format: OutputFormat) -> Result<ExitCode> {
    let report = ReportParser::new().parse_file(&path)?;
    println!("{}", output::format_report(&report, format));
    Ok(ExitCode::SUCCESS)
}

/// @ai:intent Write default configuration file
/// @ai:effects fs:write
fn init_config(output: PathBuf) -> Result<ExitCode> {
    if output.exists() {
        anyhow::bail!("{} already exists", output.display());
    }

    AnalysisConfig::default().save(&output)?;
    println!("Configuration written to {}", output.display());
    Ok(ExitCode::SUCCESS)
}
