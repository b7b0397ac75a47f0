//! Title-to-filename mapping for downloaded PDFs.

/// Extension appended to every saved paper.
pub const PDF_EXTENSION: &str = ".pdf";

/// Maximum characters kept from the title, extension excluded.
pub const MAX_TITLE_CHARS: usize = 200;

/// Maps a paper title to a filesystem-safe PDF filename.
///
/// Replaces characters that are invalid on common filesystems
/// (`< > : " / \ | ? *`) with `_`, trims surrounding whitespace, keeps at most
/// [`MAX_TITLE_CHARS`] characters and appends [`PDF_EXTENSION`].
///
/// ```
/// use proceedings_core::scrape::pdf_filename;
///
/// assert_eq!(pdf_filename("  A/B: Testing?  "), "A_B_ Testing_.pdf");
/// ```
#[must_use]
pub fn pdf_filename(title: &str) -> String {
    let replaced: String = title
        .chars()
        .map(|c| match c {
            '<' | '>' | ':' | '"' | '/' | '\\' | '|' | '?' | '*' => '_',
            c => c,
        })
        .collect();

    let mut name: String = replaced.trim().chars().take(MAX_TITLE_CHARS).collect();
    name.push_str(PDF_EXTENSION);
    name
}
