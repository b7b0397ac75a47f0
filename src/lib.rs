//! Proceedings Downloader Core Library
//!
//! This library harvests a conference proceedings site: for each configured
//! year it lists the papers on the year index page, visits every paper's
//! detail page, downloads the linked PDF into a per-year directory and records
//! the paper in a single `output.csv` index.
//!
//! # Architecture
//!
//! The library is organized into the following modules:
//! - [`config`] - Run configuration and HTTP transport settings
//! - [`fetch`] - HTTP client, fetch errors and the bounded retry loop
//! - [`scrape`] - HTML extraction, CSV index, PDF downloads and the pipeline

// Clippy lints - strict for library code
#![deny(clippy::unwrap_used)]
#![deny(clippy::expect_used)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod config;
pub mod fetch;
pub mod scrape;
mod user_agent;

// Re-export commonly used types
pub use config::{ConfigError, ScraperConfig, TransportConfig};
pub use fetch::{FetchError, HttpClient, RetryOutcome, RetryPolicy, retry_with_backoff};
pub use scrape::{ScrapeError, ScrapeStats, Scraper, YearOutcome, pdf_filename};
pub use user_agent::BROWSER_USER_AGENT;
