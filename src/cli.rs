//! Command-line interface definitions for doc_mirror.
//!
//! This module defines the CLI arguments and options using the `clap` crate.
//! All arguments can be provided via command-line flags or environment variables.

use clap::Parser;

/// Command-line arguments for the doc_mirror application.
///
/// The worklist path and output directory are passed explicitly (never
/// hardcoded) so runs can be pointed at temporary directories for testing.
///
/// # Examples
///
/// ```sh
/// # Mirror everything still pending in pages.list into ./docs
/// doc_mirror --worklist pages.list --output-dir docs
///
/// # Slow site, longer per-request timeout
/// doc_mirror -w pages.list -o docs --timeout-secs 120
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Path to the worklist file of page URLs
    #[arg(short, long, env = "DOC_MIRROR_WORKLIST", default_value = "pages.list")]
    pub worklist: String,

    /// Directory for per-page and combined Markdown output
    #[arg(short, long, env = "DOC_MIRROR_OUTPUT_DIR", default_value = "docs")]
    pub output_dir: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "DOC_MIRROR_TIMEOUT_SECS", default_value_t = 60)]
    pub timeout_secs: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_defaults() {
        let cli = Cli::parse_from(&["doc_mirror"]);

        assert_eq!(cli.worklist, "pages.list");
        assert_eq!(cli.output_dir, "docs");
        assert_eq!(cli.timeout_secs, 60);
    }

    #[test]
    fn test_cli_long_flags() {
        let cli = Cli::parse_from(&[
            "doc_mirror",
            "--worklist",
            "/tmp/pages.list",
            "--output-dir",
            "/tmp/docs",
            "--timeout-secs",
            "120",
        ]);

        assert_eq!(cli.worklist, "/tmp/pages.list");
        assert_eq!(cli.output_dir, "/tmp/docs");
        assert_eq!(cli.timeout_secs, 120);
    }

    #[test]
    fn test_cli_short_flags() {
        let cli = Cli::parse_from(&["doc_mirror", "-w", "urls.txt", "-o", "out"]);

        assert_eq!(cli.worklist, "urls.txt");
        assert_eq!(cli.output_dir, "out");
    }
}
