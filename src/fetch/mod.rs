//! Network layer: HTTP client, fetch errors, and the shared retry loop.
//!
//! # Features
//!
//! - One pooled client configured from [`crate::config::TransportConfig`]
//! - Fixed browser User-Agent and 60s connect / 120s total timeouts
//! - Any status other than 200 is an error
//! - [`retry_with_backoff`] bounds every unit to a fixed number of attempts
//!   with a randomized sleep in between

mod client;
pub mod constants;
mod error;
mod retry;

pub use client::HttpClient;
pub use error::FetchError;
pub use retry::{RetryOutcome, RetryPolicy, retry_with_backoff};
