//! PDF downloads with bounded retry.

use std::path::Path;

use tracing::{debug, info, instrument};

use super::Scraper;
use crate::fetch::{FetchError, HttpClient, RetryOutcome, RetryPolicy, retry_with_backoff};

/// Downloads `pdf_url` to `save_path`, retrying per `policy`.
///
/// The body is fully read before the file is written, so a skipped download
/// leaves no file, and a completed one replaces any file already there.
///
/// # Returns
///
/// [`RetryOutcome::Completed`] with the byte count, or
/// [`RetryOutcome::Skipped`] with the last error once attempts run out.
#[instrument(skip(client, policy), fields(url = %pdf_url, path = %save_path.display()))]
pub async fn download_pdf(
    client: &HttpClient,
    policy: &RetryPolicy,
    pdf_url: &str,
    save_path: &Path,
) -> RetryOutcome<u64, FetchError> {
    retry_with_backoff(policy, pdf_url, |attempt| async move {
        info!(attempt, "downloading {pdf_url}");
        client.download_to_path(pdf_url, save_path).await
    })
    .await
}

impl Scraper {
    /// Downloads one PDF and records the result. Returns whether a file was written.
    pub(crate) async fn fetch_pdf(&self, pdf_url: &str, save_path: &Path) -> bool {
        let outcome = download_pdf(&self.client, &self.config.file_retry, pdf_url, save_path).await;
        self.stats.record_attempts(outcome.attempts());

        match outcome {
            RetryOutcome::Completed { value: bytes, .. } => {
                info!(path = %save_path.display(), bytes, "downloaded");
                self.stats.increment_pdfs_downloaded();
                true
            }
            RetryOutcome::Skipped { attempts, .. } => {
                debug!(url = %pdf_url, attempts, "file skipped");
                self.stats.increment_pdfs_skipped();
                false
            }
        }
    }
}
