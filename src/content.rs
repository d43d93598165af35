//! HTML-to-Markdown conversion and boilerplate trimming.
//!
//! Converted pages still open with a large block of navigation and chrome
//! ahead of the article body. The trimmer anchors on a short list of literal
//! marker phrases known from the doc site's page layouts and drops everything
//! before the first one it finds; if none matches, the text passes through
//! untrimmed. Either way, blank lines are removed afterwards.

use itertools::Itertools;

/// Marker phrases locating the start of real article content, in priority
/// order: the site's updated-time stamp in both page languages, then the
/// first Markdown heading as a generic anchor.
///
/// This list tracks the site's historical layouts; when a future layout
/// matches none of them the page is kept whole rather than mis-trimmed.
pub const CONTENT_MARKERS: &[&str] = &["更新时间", "Updated on", "# "];

/// Convert an HTML fragment to Markdown.
pub fn to_markdown(html: &str) -> String {
    html2md::parse_html(html)
}

/// Drop boilerplate ahead of the first content marker, then remove blank lines.
///
/// Markers are tried in [`CONTENT_MARKERS`] order; the first one that occurs
/// anywhere in the text wins and everything before its start offset is
/// discarded, the marker itself included in the output. Text with no marker
/// is kept unchanged. Remaining lines that are empty or whitespace-only are
/// removed, order preserved.
pub fn trim_boilerplate(text: &str) -> String {
    let mut body = text;
    for marker in CONTENT_MARKERS {
        if let Some(offset) = body.find(marker) {
            body = &body[offset..];
            break;
        }
    }
    body.lines().filter(|line| !line.trim().is_empty()).join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_marker_prefix_is_discarded_and_suffix_kept_verbatim() {
        let input = "home > docs > AR\n\n更新时间: 2024-03-01\n\nBody paragraph.\n";
        let offset = input.find("更新时间").unwrap();
        let expected: String = input[offset..]
            .lines()
            .filter(|l| !l.trim().is_empty())
            .collect::<Vec<_>>()
            .join("\n");

        assert_eq!(trim_boilerplate(input), expected);
        assert!(trim_boilerplate(input).starts_with("更新时间"));
    }

    #[test]
    fn test_marker_priority_order_beats_text_order() {
        // "# " appears first in the text, but "Updated on" is earlier in the
        // marker list, so it wins.
        let input = "# Site nav\n\nUpdated on 2024-03-01\n\nBody.\n";
        let trimmed = trim_boilerplate(input);
        assert!(trimmed.starts_with("Updated on"));
        assert!(!trimmed.contains("Site nav"));
    }

    #[test]
    fn test_heading_marker_fallback() {
        let input = "breadcrumb trail\n\n# Overview\n\nBody.\n";
        let trimmed = trim_boilerplate(input);
        assert_eq!(trimmed, "# Overview\nBody.");
    }

    #[test]
    fn test_no_marker_keeps_text_minus_blank_lines() {
        // The most likely long-term failure mode: a new page layout matching
        // no marker must pass through untrimmed.
        let input = "plain line one\n\n   \nplain line two\n";
        assert_eq!(trim_boilerplate(input), "plain line one\nplain line two");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(trim_boilerplate(""), "");
    }

    #[test]
    fn test_to_markdown_produces_text_content() {
        let md = to_markdown("<h1>Overview</h1><p>First paragraph.</p>");
        assert!(md.contains("Overview"));
        assert!(md.contains("First paragraph."));
    }
}
