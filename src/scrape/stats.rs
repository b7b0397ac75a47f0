//! Counters describing what a run actually produced.
//!
//! Failures never propagate out of the pipeline, so these counters are the
//! only way for a caller to tell a complete run from a partial one.

use std::sync::atomic::{AtomicUsize, Ordering};

/// Statistics from a scraping run.
///
/// Uses atomic counters so paper tasks running concurrently within a batch
/// can update them through a shared reference.
#[derive(Debug, Default)]
pub struct ScrapeStats {
    years_completed: AtomicUsize,
    years_empty: AtomicUsize,
    years_skipped: AtomicUsize,
    papers_recorded: AtomicUsize,
    papers_skipped: AtomicUsize,
    pdfs_downloaded: AtomicUsize,
    pdfs_skipped: AtomicUsize,
    pdfs_missing: AtomicUsize,
    retries: AtomicUsize,
}

impl ScrapeStats {
    /// Creates a new stats tracker with zero counts.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Years whose index was fetched and whose papers were all attempted.
    #[must_use]
    pub fn years_completed(&self) -> usize {
        self.years_completed.load(Ordering::SeqCst)
    }

    /// Years whose index page listed no papers.
    #[must_use]
    pub fn years_empty(&self) -> usize {
        self.years_empty.load(Ordering::SeqCst)
    }

    /// Years whose index page could not be fetched.
    #[must_use]
    pub fn years_skipped(&self) -> usize {
        self.years_skipped.load(Ordering::SeqCst)
    }

    /// Papers that produced a CSV row.
    #[must_use]
    pub fn papers_recorded(&self) -> usize {
        self.papers_recorded.load(Ordering::SeqCst)
    }

    /// Papers abandoned after exhausting their attempts.
    #[must_use]
    pub fn papers_skipped(&self) -> usize {
        self.papers_skipped.load(Ordering::SeqCst)
    }

    /// PDFs written to disk.
    #[must_use]
    pub fn pdfs_downloaded(&self) -> usize {
        self.pdfs_downloaded.load(Ordering::SeqCst)
    }

    /// PDFs abandoned after exhausting their attempts.
    #[must_use]
    pub fn pdfs_skipped(&self) -> usize {
        self.pdfs_skipped.load(Ordering::SeqCst)
    }

    /// Papers whose detail page linked no PDF.
    #[must_use]
    pub fn pdfs_missing(&self) -> usize {
        self.pdfs_missing.load(Ordering::SeqCst)
    }

    /// Retry sleeps taken across every level.
    #[must_use]
    pub fn retries(&self) -> usize {
        self.retries.load(Ordering::SeqCst)
    }

    pub(crate) fn increment_years_completed(&self) {
        self.years_completed.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_years_empty(&self) {
        self.years_empty.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_years_skipped(&self) {
        self.years_skipped.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_papers_recorded(&self) {
        self.papers_recorded.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_papers_skipped(&self) {
        self.papers_skipped.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_pdfs_downloaded(&self) {
        self.pdfs_downloaded.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_pdfs_skipped(&self) {
        self.pdfs_skipped.fetch_add(1, Ordering::SeqCst);
    }

    pub(crate) fn increment_pdfs_missing(&self) {
        self.pdfs_missing.fetch_add(1, Ordering::SeqCst);
    }

    /// Records the sleeps implied by a unit that took `attempts` attempts.
    pub(crate) fn record_attempts(&self, attempts: u32) {
        let sleeps = attempts.saturating_sub(1) as usize;
        self.retries.fetch_add(sleeps, Ordering::SeqCst);
    }
}
