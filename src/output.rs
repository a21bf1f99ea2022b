//! @ai:module:intent Format parsed reports and aggregated series for the terminal
//! @ai:module:layer infrastructure
//! @ai:module:public_api OutputFormat, format_report, format_analysis_data
//! @ai:module:stateless true

use crate::analysis::{Analysis, AnalysisData};
use crate::metrics::ReportMetrics;

/// @ai:intent Output format options
#[derive(Debug, Clone, Copy, Default)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
    JsonPretty,
}

/// @ai:intent Format one parsed report
/// @ai:effects pure
pub fn format_report(report: &ReportMetrics, format: OutputFormat) -> String {
    match format {
        OutputFormat::Json => serde_json::to_string(report).unwrap_or_default(),
        OutputFormat::JsonPretty => serde_json::to_string_pretty(report).unwrap_or_default(),
        OutputFormat::Text => format_report_text(report),
    }
}

fn format_report_text(report: &ReportMetrics) -> String {
    let mut output = String::new();

    output.push_str(&format!("Tree size:        {}\n", report.tree_size));
    output.push_str(&format!("Branching factor: {}\n", report.branching_factor));
    output.push('\n');

    if report.pattern_results.is_empty() {
        output.push_str("No deletion trials found\n");
        return output;
    }

    output.push_str(&format!(
        "{:<16} {:>12} {:>16} {:>16}\n",
        "Pattern", "Time (s)", "Delete keys/s", "Insert keys/s"
    ));
    output.push_str(&format!("{}\n", "-".repeat(63)));

    for trial in &report.pattern_results {
        let insertion = trial
            .insertion_keys_per_second
            .map(|v| format!("{:.2}", v))
            .unwrap_or_else(|| "-".to_string());

        output.push_str(&format!(
            "{:<16} {:>12.4} {:>16.2} {:>16}\n",
            trial.pattern, trial.time_seconds, trial.keys_per_second, insertion
        ));
    }

    output
}

/// @ai:intent Format the aggregated input of one analysis as a table
/// @ai:effects pure
pub fn format_analysis_data(analysis: Analysis, data: &AnalysisData) -> String {
    let mut output = format!("{} analysis\n{}\n", analysis, "=".repeat(40));

    match data {
        AnalysisData::Series {
            variable,
            reports_loaded,
            series,
        } => {
            output.push_str(&format!("Reports loaded: {}\n", reports_loaded));

            for s in &series.series {
                output.push_str(&format!("\n{}\n", s.pattern));
                for point in &s.points {
                    output.push_str(&format!(
                        "  {}={:<10} {:>16.2} keys/s\n",
                        variable.as_str(),
                        point.x,
                        point.keys_per_second
                    ));
                }
            }
        }
        AnalysisData::Bars { tree_size, bars } => {
            output.push_str(&format!("Tree size: {}\n\n", tree_size));
            for bar in bars {
                output.push_str(&format!(
                    "  {:<16} {:>16.2} keys/s\n",
                    bar.pattern, bar.keys_per_second
                ));
            }
        }
    }

    output
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::metrics::{PatternBar, PatternResult};

    fn sample() -> ReportMetrics {
        ReportMetrics {
            tree_size: 100_000,
            branching_factor: 64,
            pattern_results: vec![PatternResult {
                pattern: "sequential".to_string(),
                time_seconds: 0.25,
                keys_per_second: 400_000.0,
                insertion_keys_per_second: None,
            }],
        }
    }

    #[test]
    fn test_text_report_lists_trials() {
        let text = format_report(&sample(), OutputFormat::Text);

        assert!(text.contains("Tree size:        100000"));
        assert!(text.contains("sequential"));
        assert!(text.contains("400000.00"));
    }

    #[test]
    fn test_json_report_round_trips() {
        let json = format_report(&sample(), OutputFormat::Json);
        let parsed: ReportMetrics = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, sample());
    }

    #[test]
    fn test_empty_report_text() {
        let text = format_report(&ReportMetrics::default(), OutputFormat::Text);
        assert!(text.contains("No deletion trials found"));
    }

    #[test]
    fn test_bars_summary() {
        let data = AnalysisData::Bars {
            tree_size: 1_000_000,
            bars: vec![PatternBar {
                pattern: "random".to_string(),
                keys_per_second: 12.5,
            }],
        };

        let text = format_analysis_data(Analysis::Pattern, &data);

        assert!(text.starts_with("pattern analysis"));
        assert!(text.contains("random"));
        assert!(text.contains("12.50"));
    }
}
