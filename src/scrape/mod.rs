//! Proceedings scraping pipeline.
//!
//! The pipeline walks two levels of HTML (year index page → paper detail
//! pages) and then fetches each paper's PDF:
//!
//! - [`Scraper::run`] writes the CSV header and processes years one at a time
//! - [`Scraper::process_year`] fetches the year index and fans out to papers
//!   in batches of at most `paper_batch_size`
//! - [`Scraper::process_paper`] fetches a detail page, saves the PDF and
//!   appends one row to `output.csv`
//!
//! Every fetch is bounded by [`crate::fetch::retry_with_backoff`]; a unit that
//! exhausts its attempts is logged and skipped, never propagated.
//!
//! # Example
//!
//! ```no_run
//! use proceedings_core::config::ScraperConfig;
//! use proceedings_core::scrape::Scraper;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ScraperConfig::new("https://papers.nips.cc", "./NeurIPS_Papers")?
//!     .with_years(vec![2020]);
//! let scraper = Scraper::new(config)?;
//! let stats = scraper.run().await?;
//! println!("recorded {} papers", stats.papers_recorded());
//! # Ok(())
//! # }
//! ```

mod download;
mod error;
mod filename;
mod index;
mod paper;
mod parser;
mod stats;
mod year;

pub use download::download_pdf;
pub use error::ScrapeError;
pub use filename::{MAX_TITLE_CHARS, PDF_EXTENSION, pdf_filename};
pub use index::{CSV_FILE_NAME, CSV_HEADER, CsvIndex, NO_PDF_MARKER, PaperRecord, write_csv_header};
pub use paper::PaperOutcome;
pub use parser::{PaperDetail, PaperLink, parse_paper_detail, parse_year_index};
pub use stats::ScrapeStats;
pub use year::{YearOutcome, run_in_batches};

use tracing::{debug, info, instrument};

use crate::config::ScraperConfig;
use crate::fetch::HttpClient;

/// Drives a scraping run over the configured years.
///
/// Holds the configuration, one pooled HTTP client and the run statistics.
/// Statistics accumulate across calls on the same instance.
#[derive(Debug)]
pub struct Scraper {
    config: ScraperConfig,
    client: HttpClient,
    stats: ScrapeStats,
}

impl Scraper {
    /// Creates a scraper, building the HTTP client from the transport config.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError::Config`] if the configuration is invalid, or
    /// [`ScrapeError::Client`] if the HTTP client cannot be built.
    pub fn new(config: ScraperConfig) -> Result<Self, ScrapeError> {
        config.validate()?;
        let client = HttpClient::new(&config.transport)?;
        Ok(Self::with_client(config, client))
    }

    /// Creates a scraper around an existing client. The configuration is
    /// used as-is.
    #[must_use]
    pub fn with_client(config: ScraperConfig, client: HttpClient) -> Self {
        Self {
            config,
            client,
            stats: ScrapeStats::new(),
        }
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &ScraperConfig {
        &self.config
    }

    /// Returns the statistics gathered so far.
    #[must_use]
    pub fn stats(&self) -> &ScrapeStats {
        &self.stats
    }

    /// Runs the whole pipeline.
    ///
    /// Creates the output root, overwrites `output.csv` with its header, then
    /// processes each configured year in order, never two at once.
    ///
    /// # Errors
    ///
    /// Returns [`ScrapeError`] if the output root, a year directory or the
    /// CSV index cannot be written. Failed fetches never cause an error;
    /// they show up in the returned statistics.
    #[instrument(skip(self), fields(output_dir = %self.config.output_dir.display(), years = ?self.config.years))]
    pub async fn run(&self) -> Result<&ScrapeStats, ScrapeError> {
        let output_dir = &self.config.output_dir;
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(|e| ScrapeError::create_dir(output_dir, e))?;

        let csv_path = self.config.csv_path();
        write_csv_header(&csv_path)
            .await
            .map_err(|e| ScrapeError::csv_index(&csv_path, e))?;

        for &year in &self.config.years {
            info!(year, "processing year");
            let outcome = self.process_year(year).await?;
            debug!(year, ?outcome, "year finished");
        }

        info!(
            years_completed = self.stats.years_completed(),
            years_empty = self.stats.years_empty(),
            years_skipped = self.stats.years_skipped(),
            papers_recorded = self.stats.papers_recorded(),
            papers_skipped = self.stats.papers_skipped(),
            pdfs_downloaded = self.stats.pdfs_downloaded(),
            pdfs_skipped = self.stats.pdfs_skipped(),
            pdfs_missing = self.stats.pdfs_missing(),
            retries = self.stats.retries(),
            "scrape complete"
        );

        Ok(&self.stats)
    }
}
