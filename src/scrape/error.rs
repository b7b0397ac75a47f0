//! Error types for scraping runs.
//!
//! Per-paper and per-year network failures never surface here; they are
//! absorbed at the retry boundary. Only failures that make the whole run
//! meaningless (bad configuration, no client, no writable output) do.

use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;
use crate::fetch::FetchError;

/// Setup failures that abort a scraping run.
#[derive(Debug, Error)]
pub enum ScrapeError {
    /// Configuration rejected before starting.
    #[error("invalid configuration: {0}")]
    Config(#[from] ConfigError),

    /// HTTP client construction failed.
    #[error("HTTP client error: {0}")]
    Client(#[from] FetchError),

    /// Output root or year directory could not be created.
    #[error("failed to create directory {path}: {source}")]
    CreateDir {
        /// Directory that could not be created.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The CSV index could not be created or opened.
    #[error("failed to open CSV index {path}: {source}")]
    CsvIndex {
        /// Path of the index.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },
}

impl ScrapeError {
    /// Creates a directory creation error.
    pub fn create_dir(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CreateDir {
            path: path.into(),
            source,
        }
    }

    /// Creates a CSV index error.
    pub fn csv_index(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::CsvIndex {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_create_dir_display_names_path() {
        let io_error = std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied");
        let msg = ScrapeError::create_dir("/out/2020", io_error).to_string();
        assert!(msg.contains("/out/2020"), "Expected path in: {msg}");
        assert!(msg.contains("denied"));
    }

    #[test]
    fn test_config_error_converts() {
        let error: ScrapeError = ConfigError::NoYears.into();
        assert!(matches!(error, ScrapeError::Config(ConfigError::NoYears)));
        assert!(error.to_string().contains("no years"));
    }
}
