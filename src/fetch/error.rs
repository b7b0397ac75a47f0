//! Error types for the fetch module.
//!
//! Every variant carries the URL (or path) it concerns so a log line produced
//! at the retry boundary is self-explanatory.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while fetching a page or saving a file.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network-level error (DNS resolution, connection refused, TLS errors, etc.)
    #[error("network error fetching {url}: {source}")]
    Network {
        /// The URL that failed.
        url: String,
        /// The underlying network error.
        #[source]
        source: reqwest::Error,
    },

    /// Request did not complete within the configured timeout.
    #[error("timeout fetching {url}")]
    Timeout {
        /// The URL that timed out.
        url: String,
    },

    /// Any response status other than 200.
    #[error("HTTP {status} fetching {url}")]
    HttpStatus {
        /// The URL that returned the status.
        url: String,
        /// The HTTP status code.
        status: u16,
    },

    /// File system error while saving a response body.
    #[error("IO error writing to {path}: {source}")]
    Io {
        /// The file path where the error occurred.
        path: PathBuf,
        /// The underlying IO error.
        #[source]
        source: std::io::Error,
    },

    /// The URL is malformed.
    #[error("invalid URL: {url}")]
    InvalidUrl {
        /// The invalid URL string.
        url: String,
    },

    /// The HTTP client could not be constructed from the transport settings.
    #[error("failed to build HTTP client: {source}")]
    ClientBuild {
        /// The underlying builder error.
        #[source]
        source: reqwest::Error,
    },
}

impl FetchError {
    /// Creates a network error from a reqwest error, promoting timeouts.
    pub fn network(url: impl Into<String>, source: reqwest::Error) -> Self {
        if source.is_timeout() {
            return Self::timeout(url);
        }
        Self::Network {
            url: url.into(),
            source,
        }
    }

    /// Creates an HTTP status error.
    pub fn http_status(url: impl Into<String>, status: u16) -> Self {
        Self::HttpStatus {
            url: url.into(),
            status,
        }
    }

    /// Creates a timeout error.
    pub fn timeout(url: impl Into<String>) -> Self {
        Self::Timeout { url: url.into() }
    }

    /// Creates an IO error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Creates an invalid URL error.
    pub fn invalid_url(url: impl Into<String>) -> Self {
        Self::InvalidUrl { url: url.into() }
    }
}

// No `From<reqwest::Error>` / `From<std::io::Error>`: every variant needs the
// url or path, which the source errors don't carry.
