//! @ai:module:intent Configuration structs for report analysis
//! @ai:module:layer infrastructure
//! @ai:module:public_api AnalysisConfig, SweepConfig, PatternConfig, ChartConfig
//! @ai:module:stateless true

use crate::error::{ReportError, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// @ai:intent Main configuration for the analysis run
/// @ai:effects pure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default = "default_results_dir")]
    pub results_dir: PathBuf,
    #[serde(default = "SweepConfig::tree_size")]
    pub tree_size: SweepConfig,
    #[serde(default = "SweepConfig::branching_factor")]
    pub branching_factor: SweepConfig,
    #[serde(default)]
    pub pattern: PatternConfig,
    #[serde(default)]
    pub chart: ChartConfig,
}

/// @ai:intent Candidate values and file naming for one swept variable
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SweepConfig {
    pub candidates: Vec<u64>,
    /// File name inside the results directory; `{n}` is replaced by the candidate
    pub file_pattern: String,
    pub output: String,
}

/// @ai:intent Input and output for the single-report pattern comparison
/// @ai:effects pure
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternConfig {
    #[serde(default = "default_pattern_file")]
    pub file: String,
    #[serde(default = "default_pattern_output")]
    pub output: String,
}

/// @ai:intent Raster size of rendered charts
/// @ai:effects pure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartConfig {
    #[serde(default = "default_width")]
    pub width: u32,
    #[serde(default = "default_height")]
    pub height: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            results_dir: default_results_dir(),
            tree_size: SweepConfig::tree_size(),
            branching_factor: SweepConfig::branching_factor(),
            pattern: PatternConfig::default(),
            chart: ChartConfig::default(),
        }
    }
}

impl SweepConfig {
    /// @ai:intent Default tree size sweep: results/size_{n}.txt
    /// @ai:effects pure
    pub fn tree_size() -> Self {
        Self {
            candidates: vec![10_000, 100_000, 1_000_000],
            file_pattern: "size_{n}.txt".to_string(),
            output: "tree_size_performance.png".to_string(),
        }
    }

    /// @ai:intent Default branching factor sweep: results/bf_{n}.txt
    /// @ai:effects pure
    pub fn branching_factor() -> Self {
        Self {
            candidates: vec![16, 64, 256, 1024],
            file_pattern: "bf_{n}.txt".to_string(),
            output: "branching_factor_performance.png".to_string(),
        }
    }

    /// @ai:intent Report path for one candidate value
    /// @ai:effects pure
    pub fn path_for(&self, results_dir: &Path, candidate: u64) -> PathBuf {
        results_dir.join(self.file_pattern.replace("{n}", &candidate.to_string()))
    }
}

impl Default for PatternConfig {
    fn default() -> Self {
        Self {
            file: default_pattern_file(),
            output: default_pattern_output(),
        }
    }
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            width: default_width(),
            height: default_height(),
        }
    }
}

fn default_results_dir() -> PathBuf {
    PathBuf::from("results")
}

fn default_pattern_file() -> String {
    "size_1000000.txt".to_string()
}

fn default_pattern_output() -> String {
    "pattern_performance.png".to_string()
}

fn default_width() -> u32 {
    1000
}

fn default_height() -> u32 {
    600
}

impl AnalysisConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| ReportError::Config {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ReportError::ConfigFormat {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// @ai:intent Path of a report or chart inside the results directory
    /// @ai:effects pure
    pub fn results_path(&self, file_name: &str) -> PathBuf {
        self.results_dir.join(file_name)
    }
}
