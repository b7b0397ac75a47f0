//! The `output.csv` index: one quoted row per processed paper.
//!
//! The file is created (or truncated) with its header once per run. Each
//! year then holds one [`CsvIndex`] append handle for the duration of its
//! processing; rows from concurrent paper tasks are serialized by an async
//! mutex and flushed one by one, so an interrupted run keeps every row
//! written before the interruption.

use std::path::{Path, PathBuf};

use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// File name of the index inside the output root.
pub const CSV_FILE_NAME: &str = "output.csv";

/// Header row, without the trailing newline.
pub const CSV_HEADER: &str = "Year,Title,Authors,Paper Link,PDF Link";

/// Value written in the PDF column when a paper has no PDF link.
pub const NO_PDF_MARKER: &str = "N/A";

/// One row of the index.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperRecord {
    /// Proceedings year.
    pub year: u16,
    /// Title as listed on the year index page.
    pub title: String,
    /// Author names in page order, joined with `", "`.
    pub authors: String,
    /// Absolute URL of the paper detail page.
    pub paper_page_url: String,
    /// Absolute URL of the PDF, if any.
    pub pdf_url: Option<String>,
}

impl PaperRecord {
    /// Serializes the record as a newline-terminated CSV row.
    ///
    /// Every field is wrapped in double quotes. Quotes inside a field are
    /// written as-is, matching the index format consumers already parse.
    #[must_use]
    pub fn to_csv_line(&self) -> String {
        let fields = [
            self.year.to_string(),
            self.title.clone(),
            self.authors.clone(),
            self.paper_page_url.clone(),
            self.pdf_url
                .clone()
                .unwrap_or_else(|| NO_PDF_MARKER.to_string()),
        ];
        let mut line = fields
            .iter()
            .map(|field| quote_field(field))
            .collect::<Vec<_>>()
            .join(",");
        line.push('\n');
        line
    }
}

fn quote_field(value: &str) -> String {
    format!("\"{value}\"")
}

/// Creates or truncates the index at `path` and writes the header row.
///
/// # Errors
///
/// Returns the underlying IO error if the file cannot be written.
#[instrument(fields(path = %path.display()))]
pub async fn write_csv_header(path: &Path) -> Result<(), std::io::Error> {
    tokio::fs::write(path, format!("{CSV_HEADER}\n")).await?;
    debug!("csv header written");
    Ok(())
}

/// Append handle on the index, shared by the paper tasks of one year.
///
/// The handle is released when the value is dropped.
#[derive(Debug)]
pub struct CsvIndex {
    path: PathBuf,
    file: Mutex<File>,
}

impl CsvIndex {
    /// Opens the index at `path` for appending, creating it if needed.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the file cannot be opened.
    pub async fn open_append(path: impl Into<PathBuf>) -> Result<Self, std::io::Error> {
        let path = path.into();
        let file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&path)
            .await?;
        Ok(Self {
            path,
            file: Mutex::new(file),
        })
    }

    /// Path of the underlying file.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one row and flushes it.
    ///
    /// # Errors
    ///
    /// Returns the underlying IO error if the write or flush fails.
    pub async fn append(&self, record: &PaperRecord) -> Result<(), std::io::Error> {
        let line = record.to_csv_line();
        let mut file = self.file.lock().await;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;
        Ok(())
    }
}
