//! Run configuration: where to fetch from, where to write, and how hard to try.
//!
//! Nothing in the pipeline reads global state. A [`ScraperConfig`] is built
//! once (compiled-in defaults, optionally overridden by the CLI) and handed to
//! each component at construction, which lets tests point the whole pipeline
//! at a mock server and a temporary directory.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;
use url::Url;

use crate::fetch::RetryPolicy;
use crate::fetch::constants::{CONNECT_TIMEOUT_SECS, TOTAL_TIMEOUT_SECS};
use crate::user_agent;

/// Proceedings host crawled by default.
pub const DEFAULT_BASE_URL: &str = "https://papers.nips.cc";

/// Output root used when none is configured.
pub const DEFAULT_OUTPUT_DIR: &str = "NeurIPS_Papers";

/// Years processed by default, in processing order.
pub const DEFAULT_YEARS: &[u16] = &[2020, 2019];

/// Maximum paper detail fetches in flight within one year.
pub const DEFAULT_PAPER_BATCH_SIZE: usize = 50;

/// Minimum allowed batch size.
const MIN_BATCH_SIZE: usize = 1;

/// Maximum allowed batch size.
const MAX_BATCH_SIZE: usize = 100;

/// Configuration errors detected before any request is made.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// The base URL could not be parsed or cannot carry paths.
    #[error("invalid base URL '{url}': {reason}")]
    InvalidBaseUrl {
        /// The rejected value.
        url: String,
        /// Why it was rejected.
        reason: String,
    },

    /// No years to process.
    #[error("no years configured")]
    NoYears,

    /// Batch size outside the accepted range.
    #[error(
        "invalid paper batch size {value}: must be between {MIN_BATCH_SIZE} and {MAX_BATCH_SIZE}"
    )]
    InvalidBatchSize {
        /// The rejected value.
        value: usize,
    },
}

/// HTTP transport settings injected into [`crate::fetch::HttpClient`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportConfig {
    /// Connection establishment timeout.
    pub connect_timeout: Duration,
    /// Whole-request timeout, body included.
    pub total_timeout: Duration,
    /// User-Agent header sent with every request.
    pub user_agent: String,
    /// Skip certificate validation. Off unless explicitly requested.
    pub accept_invalid_certs: bool,
}

impl Default for TransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(CONNECT_TIMEOUT_SECS),
            total_timeout: Duration::from_secs(TOTAL_TIMEOUT_SECS),
            user_agent: user_agent::default_user_agent(),
            accept_invalid_certs: false,
        }
    }
}

/// Full configuration for one scraping run.
#[derive(Debug, Clone)]
pub struct ScraperConfig {
    /// Host that year index, detail and PDF links are resolved against.
    pub base_url: Url,
    /// Root directory receiving `output.csv` and one directory per year.
    pub output_dir: PathBuf,
    /// Years to process, strictly in this order.
    pub years: Vec<u16>,
    /// Paper detail tasks started together per batch.
    pub paper_batch_size: usize,
    /// Retry policy for PDF bodies.
    pub file_retry: RetryPolicy,
    /// Retry policy for paper detail pages.
    pub paper_retry: RetryPolicy,
    /// Retry policy for year index pages.
    pub year_retry: RetryPolicy,
    /// HTTP transport settings.
    pub transport: TransportConfig,
}

impl ScraperConfig {
    /// Creates a configuration with compiled-in defaults for everything but
    /// the base URL and output root.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBaseUrl`] if `base_url` is not an
    /// absolute http(s) URL.
    pub fn new(base_url: &str, output_dir: impl Into<PathBuf>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            output_dir: output_dir.into(),
            ..Self::default()
        })
    }

    /// Replaces the year list.
    #[must_use]
    pub fn with_years(mut self, years: impl Into<Vec<u16>>) -> Self {
        self.years = years.into();
        self
    }

    /// Uses the same retry policy at every level.
    #[must_use]
    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.file_retry = policy.clone();
        self.paper_retry = policy.clone();
        self.year_retry = policy;
        self
    }

    /// Path of the CSV index.
    #[must_use]
    pub fn csv_path(&self) -> PathBuf {
        self.output_dir.join(crate::scrape::CSV_FILE_NAME)
    }

    /// Directory holding the PDFs of `year`.
    #[must_use]
    pub fn year_dir(&self, year: u16) -> PathBuf {
        self.output_dir.join(year.to_string())
    }

    /// URL of the index page listing every paper of `year`.
    ///
    /// Appended to the base URL's path, so a mirror under a path prefix keeps it.
    ///
    /// # Errors
    ///
    /// Returns [`url::ParseError`] if the base URL cannot carry a path.
    pub fn year_index_url(&self, year: u16) -> Result<Url, url::ParseError> {
        let year = year.to_string();
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .pop_if_empty()
            .extend(["paper_files", "paper", year.as_str()]);
        Ok(url)
    }

    /// Checks the values that cannot be enforced by construction.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::NoYears`] or [`ConfigError::InvalidBatchSize`].
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.years.is_empty() {
            return Err(ConfigError::NoYears);
        }
        if !(MIN_BATCH_SIZE..=MAX_BATCH_SIZE).contains(&self.paper_batch_size) {
            return Err(ConfigError::InvalidBatchSize {
                value: self.paper_batch_size,
            });
        }
        Ok(())
    }
}

impl Default for ScraperConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            years: DEFAULT_YEARS.to_vec(),
            paper_batch_size: DEFAULT_PAPER_BATCH_SIZE,
            file_retry: RetryPolicy::file_fetch(),
            paper_retry: RetryPolicy::file_fetch(),
            year_retry: RetryPolicy::year_fetch(),
            transport: TransportConfig::default(),
        }
    }
}

#[allow(clippy::expect_used)]
fn default_base_url() -> Url {
    Url::parse(DEFAULT_BASE_URL).expect("default base URL is a valid absolute URL")
}

fn parse_base_url(value: &str) -> Result<Url, ConfigError> {
    let url = Url::parse(value.trim()).map_err(|e| ConfigError::InvalidBaseUrl {
        url: value.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(ConfigError::InvalidBaseUrl {
            url: value.to_string(),
            reason: format!("scheme '{}' is not supported", url.scheme()),
        });
    }
    Ok(url)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_matches_compiled_in_values() {
        let config = ScraperConfig::default();
        assert_eq!(config.base_url.as_str(), "https://papers.nips.cc/");
        assert_eq!(config.years, vec![2020, 2019]);
        assert_eq!(config.paper_batch_size, 50);
        assert_eq!(config.file_retry.backoff_range(), 5..=15);
        assert_eq!(config.paper_retry.backoff_range(), 5..=15);
        assert_eq!(config.year_retry.backoff_range(), 10..=30);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_transport_defaults_verify_tls() {
        let transport = TransportConfig::default();
        assert!(!transport.accept_invalid_certs);
        assert_eq!(transport.connect_timeout, Duration::from_secs(60));
        assert_eq!(transport.total_timeout, Duration::from_secs(120));
    }

    #[test]
    fn test_year_index_url_shape() {
        let config = ScraperConfig::default();
        assert_eq!(
            config.year_index_url(2020).unwrap().as_str(),
            "https://papers.nips.cc/paper_files/paper/2020"
        );
    }

    #[test]
    fn test_year_index_url_keeps_base_path_prefix() {
        let config = ScraperConfig::new("https://mirror.example/nips", "/tmp/out").unwrap();
        assert_eq!(
            config.year_index_url(2019).unwrap().as_str(),
            "https://mirror.example/nips/paper_files/paper/2019"
        );

        let config = ScraperConfig::new("https://mirror.example/nips/", "/tmp/out").unwrap();
        assert_eq!(
            config.year_index_url(2019).unwrap().as_str(),
            "https://mirror.example/nips/paper_files/paper/2019"
        );
    }

    #[test]
    fn test_new_keeps_compiled_in_defaults() {
        let config = ScraperConfig::new("http://127.0.0.1:9", "/tmp/out").unwrap();
        let defaults = ScraperConfig::default();
        assert_eq!(config.years, defaults.years);
        assert_eq!(config.paper_batch_size, defaults.paper_batch_size);
        assert_eq!(config.year_retry.backoff_range(), 10..=30);
        assert!(!config.transport.accept_invalid_certs);
    }

    #[test]
    fn test_paths_under_output_root() {
        let config = ScraperConfig::new("http://127.0.0.1:9", "/tmp/out").unwrap();
        assert_eq!(config.csv_path(), PathBuf::from("/tmp/out/output.csv"));
        assert_eq!(config.year_dir(2019), PathBuf::from("/tmp/out/2019"));
    }

    #[test]
    fn test_new_rejects_relative_base_url() {
        let result = ScraperConfig::new("papers.nips.cc", "/tmp/out");
        assert!(matches!(result, Err(ConfigError::InvalidBaseUrl { .. })));
    }

    #[test]
    fn test_new_rejects_non_http_scheme() {
        let result = ScraperConfig::new("ftp://papers.nips.cc", "/tmp/out");
        match result {
            Err(ConfigError::InvalidBaseUrl { reason, .. }) => assert!(reason.contains("ftp")),
            other => panic!("expected InvalidBaseUrl, got {other:?}"),
        }
    }

    #[test]
    fn test_validate_rejects_empty_years() {
        let config = ScraperConfig::default().with_years(Vec::new());
        assert_eq!(config.validate(), Err(ConfigError::NoYears));
    }

    #[test]
    fn test_validate_rejects_batch_size_out_of_range() {
        let mut config = ScraperConfig::default();
        config.paper_batch_size = 0;
        assert_eq!(
            config.validate(),
            Err(ConfigError::InvalidBatchSize { value: 0 })
        );
        config.paper_batch_size = 101;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_with_retry_policy_applies_to_every_level() {
        let config = ScraperConfig::default().with_retry_policy(RetryPolicy::without_backoff(2));
        assert_eq!(config.file_retry.max_attempts(), 2);
        assert_eq!(config.paper_retry.backoff_range(), 0..=0);
        assert_eq!(config.year_retry.backoff_range(), 0..=0);
    }
}
