//! HTML extraction for year index pages and paper detail pages.
//!
//! Parsing never fails: anchors without a usable `href` are skipped with a
//! log line, and a missing PDF link is reported as `None`. Relative links are
//! resolved against the configured base URL, not the page URL.

use std::sync::LazyLock;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, warn};
use url::Url;

/// Anchors listing the papers of one year.
static PAPER_LINKS: LazyLock<Selector> = LazyLock::new(|| selector("ul.paper-list li a"));

/// Italic nodes on a detail page carry the author names.
static AUTHORS: LazyLock<Selector> = LazyLock::new(|| selector("i"));

/// First anchor pointing at a PDF.
static PDF_LINK: LazyLock<Selector> = LazyLock::new(|| selector(r#"a[href$=".pdf"]"#));

#[allow(clippy::expect_used)]
fn selector(css: &'static str) -> Selector {
    Selector::parse(css).expect("static CSS selector is valid")
}

/// One entry of a year index page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaperLink {
    /// Anchor text, trimmed.
    pub title: String,
    /// Absolute URL of the paper detail page.
    pub page_url: Url,
}

/// What a paper detail page yields.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PaperDetail {
    /// Author names in page order.
    pub authors: Vec<String>,
    /// Absolute URL of the PDF, if the page links one.
    pub pdf_url: Option<Url>,
}

impl PaperDetail {
    /// Authors joined for display, `"A, B"`.
    #[must_use]
    pub fn authors_joined(&self) -> String {
        self.authors.join(", ")
    }
}

/// Extracts every paper link listed on a year index page.
#[must_use]
pub fn parse_year_index(html: &str, base_url: &Url) -> Vec<PaperLink> {
    let document = Html::parse_document(html);
    document
        .select(&PAPER_LINKS)
        .filter_map(|anchor| {
            let title = element_text(anchor);
            let page_url = resolve_href(anchor, base_url)?;
            Some(PaperLink { title, page_url })
        })
        .collect()
}

/// Extracts the author list and PDF link from a paper detail page.
#[must_use]
pub fn parse_paper_detail(html: &str, base_url: &Url) -> PaperDetail {
    let document = Html::parse_document(html);

    let authors = document
        .select(&AUTHORS)
        .map(element_text)
        .collect();

    let pdf_url = document
        .select(&PDF_LINK)
        .next()
        .and_then(|anchor| resolve_href(anchor, base_url));

    PaperDetail { authors, pdf_url }
}

fn element_text(element: ElementRef<'_>) -> String {
    element.text().collect::<String>().trim().to_string()
}

fn resolve_href(anchor: ElementRef<'_>, base_url: &Url) -> Option<Url> {
    let Some(href) = anchor.value().attr("href") else {
        debug!(text = %element_text(anchor), "anchor without href skipped");
        return None;
    };
    match base_url.join(href.trim()) {
        Ok(url) => Some(url),
        Err(e) => {
            warn!(href, base = %base_url, error = %e, "failed to resolve link");
            None
        }
    }
}
