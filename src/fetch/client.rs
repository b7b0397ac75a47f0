//! HTTP client wrapper for page and PDF fetches.
//!
//! One [`HttpClient`] is built per run from a [`TransportConfig`] and shared by
//! every processor, taking advantage of connection pooling.

use std::path::Path;

use reqwest::{Client, StatusCode};
use tracing::{debug, info, instrument};
use url::Url;

use super::error::FetchError;
use crate::config::TransportConfig;

/// HTTP client for proceedings pages and PDF bodies.
///
/// # Example
///
/// ```no_run
/// use proceedings_core::config::TransportConfig;
/// use proceedings_core::fetch::HttpClient;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let client = HttpClient::new(&TransportConfig::default())?;
/// let html = client.fetch_html("https://papers.nips.cc/paper_files/paper/2020").await?;
/// println!("{} bytes of HTML", html.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: Client,
}

impl HttpClient {
    /// Builds a client from transport settings.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError::ClientBuild`] if the TLS backend or the builder
    /// rejects the configuration.
    #[instrument(level = "debug", skip(transport), fields(insecure = transport.accept_invalid_certs))]
    pub fn new(transport: &TransportConfig) -> Result<Self, FetchError> {
        let mut builder = Client::builder()
            .connect_timeout(transport.connect_timeout)
            .timeout(transport.total_timeout)
            .gzip(true)
            .user_agent(transport.user_agent.clone());
        if transport.accept_invalid_certs {
            debug!("certificate validation disabled by transport config");
            builder = builder.danger_accept_invalid_certs(true);
        }
        let client = builder
            .build()
            .map_err(|source| FetchError::ClientBuild { source })?;
        Ok(Self { client })
    }

    /// Fetches a page and returns its body as text.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on an invalid URL, a transport failure, a
    /// timeout, or any status other than 200.
    #[instrument(skip(self), fields(url = %url))]
    pub async fn fetch_html(&self, url: &str) -> Result<String, FetchError> {
        let response = self.send_get(url).await?;
        response
            .text()
            .await
            .map_err(|e| FetchError::network(url, e))
    }

    /// Fetches a binary resource and writes it to `save_path`.
    ///
    /// The full body is read before the file is created, so a failed transfer
    /// never leaves a truncated file behind. An existing file is overwritten.
    ///
    /// # Returns
    ///
    /// The number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] on any request failure or when the file cannot
    /// be written.
    #[instrument(skip(self), fields(url = %url, path = %save_path.display()))]
    pub async fn download_to_path(&self, url: &str, save_path: &Path) -> Result<u64, FetchError> {
        let response = self.send_get(url).await?;
        let body = response
            .bytes()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        tokio::fs::write(save_path, &body)
            .await
            .map_err(|e| FetchError::io(save_path, e))?;

        let bytes = body.len() as u64;
        info!(path = %save_path.display(), bytes, "download complete");
        Ok(bytes)
    }

    async fn send_get(&self, url: &str) -> Result<reqwest::Response, FetchError> {
        Url::parse(url).map_err(|_| FetchError::invalid_url(url))?;

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| FetchError::network(url, e))?;

        // Only a plain 200 counts; other 2xx codes are treated as failures too.
        if response.status() != StatusCode::OK {
            return Err(FetchError::http_status(url, response.status().as_u16()));
        }
        Ok(response)
    }
}
