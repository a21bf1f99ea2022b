//! @ai:module:intent Parse deletion stress report text into typed metrics
//! @ai:module:layer application
//! @ai:module:public_api ReportParser, parse_duration_seconds
//! @ai:module:depends_on metrics, error
//! @ai:module:stateless true

pub mod duration;

pub use duration::{parse_duration_seconds, DurationError};

use crate::error::{Location, ReportError, Result};
use crate::metrics::{PatternResult, ReportMetrics};
use regex::{Captures, Regex};
use std::path::Path;

/// @ai:intent Trial whose start marker has been seen but not its completion
struct PendingTrial {
    pattern: String,
    insertion_keys_per_second: Option<f64>,
}

/// @ai:intent Line-oriented extractor for stress harness reports
pub struct ReportParser {
    keys_regex: Regex,
    branching_factor_regex: Regex,
    start_regex: Regex,
    insertion_regex: Regex,
    completion_regex: Regex,
}

impl ReportParser {
    /// @ai:intent Create a new report parser
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            keys_regex: Regex::new(r"Keys: (\d+)").expect("keys marker regex"),
            branching_factor_regex: Regex::new(r"Branching Factor: (\d+)")
                .expect("branching factor marker regex"),
            start_regex: Regex::new(r"Running deletion test with pattern: (\w+)")
                .expect("pattern marker regex"),
            insertion_regex: Regex::new(r"Insertion completed in ([\d.]+[\w.]*) \(([\d.]+) keys/sec\)")
                .expect("insertion marker regex"),
            completion_regex: Regex::new(r"Deletion completed in ([\d.]+[\w.]*) \(([\d.]+) keys/sec\)")
                .expect("completion marker regex"),
        }
    }

    /// @ai:intent Parse a report file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn parse_file(&self, path: &Path) -> Result<ReportMetrics> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::Read {
            path: path.to_path_buf(),
            source: e,
        })?;

        self.parse(&content).map_err(|e| e.with_path(path))
    }

    /// @ai:intent Parse report text
    /// @ai:post missing Keys/Branching Factor default to 0; no trials yields an empty list
    /// @ai:effects pure
    pub fn parse(&self, text: &str) -> Result<ReportMetrics> {
        let mut tree_size = None;
        let mut branching_factor = None;
        let mut pattern_results = Vec::new();
        let mut pending: Option<PendingTrial> = None;

        for (idx, line) in text.lines().enumerate() {
            let line_no = idx + 1;

            if tree_size.is_none() {
                if let Some(cap) = self.keys_regex.captures(line) {
                    tree_size = Some(parse_integer(&cap, "Keys", line_no)?);
                }
            }

            if branching_factor.is_none() {
                if let Some(cap) = self.branching_factor_regex.captures(line) {
                    branching_factor = Some(parse_integer(&cap, "Branching Factor", line_no)?);
                }
            }

            // a start marker and its completion may share a line
            let mut rest = line;
            loop {
                if pending.is_none() {
                    let Some(cap) = self.start_regex.captures(rest) else {
                        break;
                    };
                    pending = Some(PendingTrial {
                        pattern: cap[1].to_string(),
                        insertion_keys_per_second: None,
                    });
                    rest = &rest[cap.get(0).map_or(rest.len(), |m| m.end())..];
                }

                let completion = self.completion_regex.captures(rest);

                if let (Some(trial), Some(cap)) = (pending.as_mut(), self.insertion_regex.captures(rest)) {
                    let before_completion = completion
                        .as_ref()
                        .and_then(|c| c.get(0))
                        .map_or(true, |c| cap.get(0).map_or(false, |m| m.start() < c.start()));

                    if trial.insertion_keys_per_second.is_none() && before_completion {
                        trial.insertion_keys_per_second =
                            Some(parse_float(&cap, 2, "insertion keys/sec", line_no)?);
                    }
                }

                let Some(cap) = completion else {
                    break;
                };
                let Some(trial) = pending.take() else {
                    break;
                };

                pattern_results.push(PatternResult {
                    pattern: trial.pattern,
                    time_seconds: parse_duration(&cap, line_no)?,
                    keys_per_second: parse_float(&cap, 2, "keys/sec", line_no)?,
                    insertion_keys_per_second: trial.insertion_keys_per_second,
                });
                rest = &rest[cap.get(0).map_or(rest.len(), |m| m.end())..];
            }
        }

        if let Some(trial) = pending {
            tracing::debug!("Trial for pattern {} has no completion line", trial.pattern);
        }

        Ok(ReportMetrics {
            tree_size: tree_size.unwrap_or(0),
            branching_factor: branching_factor.unwrap_or(0),
            pattern_results,
        })
    }
}

impl Default for ReportParser {
    fn default() -> Self {
        Self::new()
    }
}

fn location(line: usize) -> Location {
    Location { path: None, line }
}

/// @ai:intent Convert capture group 1 to an integer field
/// @ai:effects pure
fn parse_integer(cap: &Captures<'_>, field: &'static str, line: usize) -> Result<u64> {
    let value = &cap[1];
    value.parse().map_err(|e: std::num::ParseIntError| ReportError::MalformedField {
        location: location(line),
        field,
        value: value.to_string(),
        reason: e.to_string(),
    })
}

/// @ai:intent Convert a capture group to a float field
/// @ai:effects pure
fn parse_float(cap: &Captures<'_>, group: usize, field: &'static str, line: usize) -> Result<f64> {
    let value = &cap[group];
    let malformed = |reason: String| ReportError::MalformedField {
        location: location(line),
        field,
        value: value.to_string(),
        reason,
    };

    let parsed: f64 = value
        .parse()
        .map_err(|e: std::num::ParseFloatError| malformed(e.to_string()))?;

    if !parsed.is_finite() {
        return Err(malformed("not finite".to_string()));
    }

    Ok(parsed)
}

/// @ai:intent Convert capture group 1 to seconds
/// @ai:effects pure
fn parse_duration(cap: &Captures<'_>, line: usize) -> Result<f64> {
    let value = &cap[1];
    parse_duration_seconds(value).map_err(|source| ReportError::MalformedDuration {
        location: location(line),
        value: value.to_string(),
        source,
    })
}
