//! Year processing: index page fetch and batched fan-out to paper tasks.

use std::future::Future;

use futures_util::future::join_all;
use tracing::{debug, info, instrument, warn};

use super::index::CsvIndex;
use super::parser::parse_year_index;
use super::{ScrapeError, Scraper};
use crate::fetch::{FetchError, RetryOutcome, retry_with_backoff};

/// Terminal state of one year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum YearOutcome {
    /// The index was fetched and every listed paper was attempted.
    Completed {
        /// Papers listed on the index page.
        papers: usize,
        /// Batches the papers were processed in.
        batches: usize,
    },
    /// The index page listed no papers. Not retried.
    Empty,
    /// The index page could not be fetched within the retry policy.
    Skipped,
}

/// Runs `task` over `items` in consecutive batches of at most `batch_size`.
///
/// The tasks of one batch are polled jointly and the whole batch is awaited
/// before the next one starts, so at most `batch_size` tasks are ever in
/// flight. Completion order within a batch is unspecified.
///
/// # Returns
///
/// The number of batches run.
pub async fn run_in_batches<'a, T, F, Fut>(items: &'a [T], batch_size: usize, mut task: F) -> usize
where
    F: FnMut(&'a T) -> Fut,
    Fut: Future,
{
    let mut batches = 0;
    for batch in items.chunks(batch_size.max(1)) {
        batches += 1;
        debug!(batch = batches, size = batch.len(), "starting batch");
        join_all(batch.iter().map(&mut task)).await;
    }
    batches
}

impl Scraper {
    /// Processes every paper listed for `year`.
    ///
    /// Creates the year directory first, then fetches and parses the year
    /// index under the year retry policy. An index without paper links ends
    /// the year immediately. Otherwise papers are processed in batches of
    /// `paper_batch_size`, appending to the CSV index held open for the
    /// duration of the year.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] only if the year directory cannot be created
    /// or the CSV index cannot be opened. Network failures are absorbed into
    /// [`YearOutcome::Skipped`].
    #[instrument(skip(self))]
    pub async fn process_year(&self, year: u16) -> Result<YearOutcome, ScrapeError> {
        let year_dir = self.config.year_dir(year);
        tokio::fs::create_dir_all(&year_dir)
            .await
            .map_err(|e| ScrapeError::create_dir(&year_dir, e))?;

        let year_url = match self.config.year_index_url(year) {
            Ok(url) => url,
            Err(e) => {
                warn!(error = %e, "cannot build year index URL");
                self.stats.increment_years_skipped();
                return Ok(YearOutcome::Skipped);
            }
        };
        let url = year_url.as_str();
        let unit = format!("year {year}");

        let outcome = retry_with_backoff(&self.config.year_retry, &unit, |attempt| async move {
            info!(attempt, url, "fetching year {year}");
            let html = self.client.fetch_html(url).await?;
            Ok::<_, FetchError>(parse_year_index(&html, &self.config.base_url))
        })
        .await;
        self.stats.record_attempts(outcome.attempts());

        let links = match outcome {
            RetryOutcome::Completed { value, .. } => value,
            RetryOutcome::Skipped { attempts, .. } => {
                debug!(attempts, "year skipped");
                self.stats.increment_years_skipped();
                return Ok(YearOutcome::Skipped);
            }
        };

        if links.is_empty() {
            warn!(url, "no papers found");
            self.stats.increment_years_empty();
            return Ok(YearOutcome::Empty);
        }

        let csv_path = self.config.csv_path();
        let index = CsvIndex::open_append(&csv_path)
            .await
            .map_err(|e| ScrapeError::csv_index(&csv_path, e))?;

        info!(papers = links.len(), "processing papers");
        let batches = run_in_batches(&links, self.config.paper_batch_size, |link| {
            self.process_paper(year, &year_dir, &index, link)
        })
        .await;

        info!(papers = links.len(), batches, "completed processing year");
        self.stats.increment_years_completed();
        Ok(YearOutcome::Completed {
            papers: links.len(),
            batches,
        })
    }
}
