//! @ai:module:intent Define error types for report parsing and loading
//! @ai:module:layer domain
//! @ai:module:public_api ReportError, Result
//! @ai:module:stateless true

use crate::parser::DurationError;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// @ai:intent Where in a report a problem was found
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Location {
    pub path: Option<PathBuf>,
    pub line: usize,
}

impl fmt::Display for Location {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.path {
            Some(path) => write!(f, "{}:{}", path.display(), self.line),
            None => write!(f, "<input>:{}", self.line),
        }
    }
}

/// @ai:intent Unified error type for parsing, loading and configuration
#[derive(Error, Debug)]
pub enum ReportError {
    #[error("Failed to read report {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed {field} at {location}: {value:?} ({reason})")]
    MalformedField {
        location: Location,
        field: &'static str,
        value: String,
        reason: String,
    },

    #[error("Malformed duration at {location}: {value:?} ({source})")]
    MalformedDuration {
        location: Location,
        value: String,
        #[source]
        source: DurationError,
    },

    #[error("Results directory not found: {}", path.display())]
    MissingResultsDir { path: PathBuf },

    #[error("Failed to read config {path}: {source}")]
    Config {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config {path}: {source}")]
    ConfigFormat {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ReportError {
    /// @ai:intent Attach a file path to a parse error produced from in-memory text
    /// @ai:effects pure
    pub fn with_path(self, path: impl Into<PathBuf>) -> Self {
        match self {
            Self::MalformedField {
                location,
                field,
                value,
                reason,
            } => Self::MalformedField {
                location: Location {
                    path: Some(path.into()),
                    ..location
                },
                field,
                value,
                reason,
            },
            Self::MalformedDuration {
                location,
                value,
                source,
            } => Self::MalformedDuration {
                location: Location {
                    path: Some(path.into()),
                    ..location
                },
                value,
                source,
            },
            other => other,
        }
    }
}

pub type Result<T> = std::result::Result<T, ReportError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_path_sets_location() {
        let err = ReportError::MalformedField {
            location: Location { path: None, line: 3 },
            field: "Keys",
            value: "99999999999999999999999".to_string(),
            reason: "number too large".to_string(),
        }
        .with_path("results/size_10000.txt");

        let message = err.to_string();
        assert!(message.contains("results/size_10000.txt:3"));
        assert!(message.contains("Keys"));
    }

    #[test]
    fn test_duration_error_is_kept_as_source() {
        use std::error::Error as _;

        let err = ReportError::MalformedDuration {
            location: Location { path: None, line: 7 },
            value: "5days".to_string(),
            source: DurationError::UnknownUnit("days".to_string()),
        }
        .with_path("results/bf_64.txt");

        let source = err.source().unwrap();
        assert_eq!(source.to_string(), "unknown unit \"days\"");
        assert!(err.to_string().contains("results/bf_64.txt:7"));
    }

    #[test]
    fn test_with_path_leaves_io_errors_alone() {
        let err = ReportError::Read {
            path: PathBuf::from("a.txt"),
            source: std::io::Error::new(std::io::ErrorKind::Other, "boom"),
        }
        .with_path("b.txt");

        assert!(err.to_string().contains("a.txt"));
    }
}
