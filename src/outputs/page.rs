//! Per-URL Markdown file output.
//!
//! Each mirrored page is written under the output directory with a filename
//! derived from the URL's last non-empty path segment. Segments are
//! percent-decoded first (the doc site uses encoded non-ASCII slugs) and get
//! a `.md` extension appended when they don't already carry one.

use std::error::Error;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};
use url::Url;

/// Derive the output filename for a page URL.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(output_filename("https://x.dev/doc/ar-engine-overview").unwrap(), "ar-engine-overview.md");
/// ```
///
/// # Errors
///
/// Returns an error if the URL does not parse or has no non-empty path
/// segment to name the file after.
pub fn output_filename(url: &str) -> Result<String, Box<dyn Error>> {
    let parsed = Url::parse(url)?;
    let segment = parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).next_back())
        .ok_or_else(|| format!("URL has no usable path segment: {}", url))?;

    let mut name = urlencoding::decode(segment)?.into_owned();
    if !name.ends_with(".md") {
        name.push_str(".md");
    }
    Ok(name)
}

/// Expected on-disk path for a page URL's output file.
pub fn page_path(output_dir: &Path, url: &str) -> Result<PathBuf, Box<dyn Error>> {
    Ok(output_dir.join(output_filename(url)?))
}

/// Write one page's trimmed Markdown to its derived path.
///
/// # Returns
///
/// The path written, for group collection and logging.
#[instrument(level = "info", skip_all, fields(%url))]
pub async fn write_page(
    output_dir: &Path,
    url: &str,
    markdown: &str,
) -> Result<PathBuf, Box<dyn Error>> {
    let path = page_path(output_dir, url)?;
    fs::write(&path, markdown).await?;
    info!(path = %path.display(), bytes = markdown.len(), "Wrote page Markdown");
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filename_from_last_segment() {
        assert_eq!(
            output_filename("https://example.dev/doc/ar-engine-overview").unwrap(),
            "ar-engine-overview.md"
        );
    }

    #[test]
    fn test_filename_ignores_trailing_slash_and_query() {
        assert_eq!(
            output_filename("https://example.dev/doc/guide/").unwrap(),
            "guide.md"
        );
        assert_eq!(
            output_filename("https://example.dev/doc/guide?lang=en").unwrap(),
            "guide.md"
        );
    }

    #[test]
    fn test_filename_decodes_percent_encoding() {
        assert_eq!(
            output_filename("https://example.dev/doc/%E6%A6%82%E8%BF%B0").unwrap(),
            "概述.md"
        );
    }

    #[test]
    fn test_filename_keeps_existing_markdown_extension() {
        assert_eq!(
            output_filename("https://example.dev/doc/page.md").unwrap(),
            "page.md"
        );
    }

    #[test]
    fn test_filename_rejects_bare_host() {
        assert!(output_filename("https://example.dev/").is_err());
    }

    #[tokio::test]
    async fn test_write_page_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_page(dir.path(), "https://example.dev/doc/a", "# A\ncontent")
            .await
            .unwrap();

        assert_eq!(path, dir.path().join("a.md"));
        let text = tokio::fs::read_to_string(&path).await.unwrap();
        assert_eq!(text, "# A\ncontent");
    }
}
