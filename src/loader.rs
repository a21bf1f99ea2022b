//! @ai:module:intent Load stress reports for a list of candidate values
//! @ai:module:layer infrastructure
//! @ai:module:public_api ResultLoader, ResultLoaderTrait
//! @ai:module:stateless true

use crate::error::Result;
use crate::metrics::ReportMetrics;
use crate::parser::ReportParser;
use std::path::{Path, PathBuf};

/// @ai:intent Trait for loading reports from disk
pub trait ResultLoaderTrait: Send + Sync {
    /// @ai:intent Load every candidate whose report exists, in candidate order
    fn load<V, F>(&self, candidates: &[V], path_template: F) -> Result<Vec<ReportMetrics>>
    where
        F: Fn(&V) -> PathBuf;

    /// @ai:intent Load a single report if it exists
    fn load_one(&self, path: &Path) -> Result<Option<ReportMetrics>>;
}

/// @ai:intent Reads and parses report files, skipping absent ones
pub struct ResultLoader {
    parser: ReportParser,
}

impl ResultLoader {
    /// @ai:intent Create a new result loader
    /// @ai:effects pure
    pub fn new() -> Self {
        Self {
            parser: ReportParser::new(),
        }
    }
}

impl Default for ResultLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ResultLoaderTrait for ResultLoader {
    /// @ai:post output length equals the number of candidate files present
    /// @ai:effects fs:read
    fn load<V, F>(&self, candidates: &[V], path_template: F) -> Result<Vec<ReportMetrics>>
    where
        F: Fn(&V) -> PathBuf,
    {
        let mut reports = Vec::with_capacity(candidates.len());

        for candidate in candidates {
            let path = path_template(candidate);

            if let Some(report) = self.load_one(&path)? {
                reports.push(report);
            }
        }

        Ok(reports)
    }

    /// @ai:effects fs:read
    fn load_one(&self, path: &Path) -> Result<Option<ReportMetrics>> {
        if !path.is_file() {
            tracing::debug!("No report at {}, skipping", path.display());
            return Ok(None);
        }

        let report = self.parser.parse_file(path)?;
        tracing::debug!(
            "Loaded {} ({} trials)",
            path.display(),
            report.pattern_results.len()
        );
        Ok(Some(report))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReportError;
    use tempfile::TempDir;

    fn write_report(dir: &Path, name: &str, keys: u64) {
        let content = format!(
            "Keys: {keys}\nBranching Factor: 256\n\
             Running deletion test with pattern: random\n\
             Deletion completed in 100ms (1000.00 keys/sec)\n"
        );
        std::fs::write(dir.join(name), content).unwrap();
    }

    #[test]
    fn test_missing_files_are_skipped() {
        let temp = TempDir::new().unwrap();
        write_report(temp.path(), "size_10000.txt", 10_000);
        write_report(temp.path(), "size_1000000.txt", 1_000_000);

        let loader = ResultLoader::new();
        let reports = loader
            .load(&[10_000u64, 100_000, 1_000_000], |n| {
                temp.path().join(format!("size_{n}.txt"))
            })
            .unwrap();

        let sizes: Vec<_> = reports.iter().map(|r| r.tree_size).collect();
        assert_eq!(sizes, vec![10_000, 1_000_000]);
    }

    #[test]
    fn test_order_follows_candidates() {
        let temp = TempDir::new().unwrap();
        write_report(temp.path(), "a.txt", 1);
        write_report(temp.path(), "b.txt", 2);

        let loader = ResultLoader::new();
        let reports = loader
            .load(&["b", "a"], |name| temp.path().join(format!("{name}.txt")))
            .unwrap();

        let sizes: Vec<_> = reports.iter().map(|r| r.tree_size).collect();
        assert_eq!(sizes, vec![2, 1]);
    }

    #[test]
    fn test_no_files_yields_empty() {
        let temp = TempDir::new().unwrap();
        let loader = ResultLoader::new();

        let reports = loader
            .load(&[16u64, 64], |n| temp.path().join(format!("bf_{n}.txt")))
            .unwrap();

        assert!(reports.is_empty());
    }

    #[test]
    fn test_malformed_file_fails_with_path() {
        let temp = TempDir::new().unwrap();
        std::fs::write(temp.path().join("bf_16.txt"), "Branching Factor: 99999999999999999999999\n")
            .unwrap();

        let loader = ResultLoader::new();
        let err = loader
            .load(&[16u64], |n| temp.path().join(format!("bf_{n}.txt")))
            .unwrap_err();

        assert!(matches!(err, ReportError::MalformedField { field: "Branching Factor", .. }));
        assert!(err.to_string().contains("bf_16.txt"));
    }
}
