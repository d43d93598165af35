//! Page fetching and main-content extraction.
//!
//! Fetching is modeled as an ordered list of extraction strategies tried in
//! sequence: first the doc site's article container, then the whole document
//! body as a fallback. Each strategy is independent: an empty or missing
//! region simply falls through to the next one.
//!
//! # Architecture
//!
//! The [`PageSource`] trait is the seam between the driver and the network:
//! - [`HttpPageSource`]: the real implementation over a shared `reqwest`
//!   client with a configured per-request timeout
//! - test doubles implement the same trait with canned HTML, so the full
//!   driver loop runs without a network

use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use std::time::Duration;
use tracing::{debug, info, instrument};

/// One way of locating the main content region in a fetched document.
#[derive(Debug, Clone, Copy)]
pub struct ExtractStrategy {
    /// Short name used in logs.
    pub name: &'static str,
    /// CSS selector for the candidate region.
    pub selector: &'static str,
}

/// Extraction strategies in the order they are tried.
///
/// `div.doc-content` is the article container used across the doc site;
/// `body` catches pages where that container is absent or renamed.
pub const EXTRACT_STRATEGIES: &[ExtractStrategy] = &[
    ExtractStrategy { name: "doc-content", selector: "div.doc-content" },
    ExtractStrategy { name: "full-body", selector: "body" },
];

static SELECTORS: Lazy<Vec<Selector>> = Lazy::new(|| {
    EXTRACT_STRATEGIES
        .iter()
        .map(|s| Selector::parse(s.selector).unwrap())
        .collect()
});

/// A source of page content for the driver.
///
/// Given a URL, returns the raw HTML of the page's main content region.
pub trait PageSource {
    /// Fetch one page and return its main-content HTML.
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>>;
}

/// [`PageSource`] over HTTP, with selector-based content extraction.
#[derive(Debug, Clone)]
pub struct HttpPageSource {
    client: reqwest::Client,
}

impl HttpPageSource {
    /// Build a source with one shared client and a per-request timeout.
    ///
    /// The timeout bounds every blocking wait in the run; a hung request
    /// fails that URL and the driver moves on to the next line.
    pub fn new(timeout: Duration) -> Result<Self, Box<dyn Error>> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { client })
    }
}

impl PageSource for HttpPageSource {
    #[instrument(level = "info", skip_all, fields(%url))]
    async fn fetch(&self, url: &str) -> Result<String, Box<dyn Error>> {
        let body = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        debug!(bytes = body.len(), "Fetched document");

        match extract_main_content(&body) {
            Some((strategy, html)) => {
                info!(strategy, bytes = html.len(), "Extracted main content");
                Ok(html)
            }
            None => Err(format!("no extraction strategy matched {}", url).into()),
        }
    }
}

/// Try each extraction strategy in order and return the first non-empty
/// region's inner HTML, tagged with the strategy name that produced it.
///
/// Returns `None` when every strategy comes up empty.
pub fn extract_main_content(html: &str) -> Option<(&'static str, String)> {
    let document = Html::parse_document(html);
    for (strategy, selector) in EXTRACT_STRATEGIES.iter().zip(SELECTORS.iter()) {
        if let Some(element) = document.select(selector).next() {
            let inner = element.inner_html();
            if !inner.trim().is_empty() {
                return Some((strategy.name, inner));
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_prefers_doc_content_region() {
        let html = r#"<html><body>
            <nav>site chrome</nav>
            <div class="doc-content"><h1>Overview</h1><p>Body.</p></div>
        </body></html>"#;

        let (strategy, inner) = extract_main_content(html).unwrap();
        assert_eq!(strategy, "doc-content");
        assert!(inner.contains("<h1>Overview</h1>"));
        assert!(!inner.contains("site chrome"));
    }

    #[test]
    fn test_extract_falls_back_to_body() {
        let html = "<html><body><p>No container here.</p></body></html>";

        let (strategy, inner) = extract_main_content(html).unwrap();
        assert_eq!(strategy, "full-body");
        assert!(inner.contains("No container here."));
    }

    #[test]
    fn test_empty_doc_content_falls_through() {
        let html = r#"<html><body><div class="doc-content">   </div><p>Fallback.</p></body></html>"#;

        let (strategy, inner) = extract_main_content(html).unwrap();
        assert_eq!(strategy, "full-body");
        assert!(inner.contains("Fallback."));
    }

    #[test]
    fn test_nothing_extractable() {
        assert!(extract_main_content("").is_none());
    }
}
