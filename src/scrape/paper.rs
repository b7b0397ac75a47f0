//! Paper detail processing: page fetch, author and PDF extraction, CSV row.

use std::path::Path;

use tracing::{debug, info, instrument};

use super::filename::pdf_filename;
use super::index::{CsvIndex, PaperRecord};
use super::parser::{PaperLink, parse_paper_detail};
use super::Scraper;
use crate::fetch::{FetchError, RetryOutcome, retry_with_backoff};

/// Terminal state of one paper.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaperOutcome {
    /// A CSV row was written.
    Recorded {
        /// The detail page linked a PDF.
        has_pdf: bool,
        /// The linked PDF was downloaded.
        pdf_saved: bool,
    },
    /// The detail page could not be processed; no row was written.
    Skipped,
}

impl Scraper {
    /// Processes one paper of `year`.
    ///
    /// Fetches the detail page, downloads the linked PDF into `year_dir` (a
    /// failed download still yields a row), then appends the paper's row to
    /// `index`. Page fetch, parse and row append are retried together per
    /// the paper retry policy; exhaustion is logged and reported as
    /// [`PaperOutcome::Skipped`].
    #[instrument(skip(self, year_dir, index, link), fields(title = %link.title, url = %link.page_url))]
    pub async fn process_paper(
        &self,
        year: u16,
        year_dir: &Path,
        index: &CsvIndex,
        link: &PaperLink,
    ) -> PaperOutcome {
        let unit = format!("paper '{}'", link.title);
        let page_url = link.page_url.as_str();

        let outcome = retry_with_backoff(&self.config.paper_retry, &unit, |attempt| async move {
            info!(attempt, year, "fetching details for {}", link.title);
            let html = self.client.fetch_html(page_url).await?;
            let detail = parse_paper_detail(&html, &self.config.base_url);

            let pdf_saved = match &detail.pdf_url {
                Some(pdf_url) => {
                    let save_path = year_dir.join(pdf_filename(&link.title));
                    self.fetch_pdf(pdf_url.as_str(), &save_path).await
                }
                None => false,
            };

            let record = PaperRecord {
                year,
                title: link.title.clone(),
                authors: detail.authors_joined(),
                paper_page_url: page_url.to_string(),
                pdf_url: detail.pdf_url.map(String::from),
            };
            let has_pdf = record.pdf_url.is_some();
            index
                .append(&record)
                .await
                .map_err(|e| FetchError::io(index.path(), e))?;

            Ok::<_, FetchError>(PaperOutcome::Recorded { has_pdf, pdf_saved })
        })
        .await;
        self.stats.record_attempts(outcome.attempts());

        match outcome {
            RetryOutcome::Completed { value, .. } => {
                if matches!(value, PaperOutcome::Recorded { has_pdf: false, .. }) {
                    self.stats.increment_pdfs_missing();
                }
                info!("processed paper");
                self.stats.increment_papers_recorded();
                value
            }
            RetryOutcome::Skipped { attempts, .. } => {
                debug!(attempts, "paper skipped");
                self.stats.increment_papers_skipped();
                PaperOutcome::Skipped
            }
        }
    }
}
