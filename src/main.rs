//! # doc_mirror
//!
//! A command-line mirror for developer documentation pages. Each run walks a
//! plain-text worklist of page URLs, fetches the pages still pending,
//! converts their main content to Markdown, trims site boilerplate, and
//! writes one file per page. Completed URLs are tagged `@yes` in the
//! worklist immediately, so interrupted runs resume where they stopped.
//!
//! ## Features
//!
//! - Resumable: per-URL completion state lives in the worklist file itself
//! - Selector-based main-content extraction with a whole-body fallback
//! - Marker-anchored boilerplate trimming of the converted Markdown
//! - Named groups in the worklist concatenate their pages into a
//!   `combined--<name>.md` file, written at most once per group
//!
//! ## Usage
//!
//! ```sh
//! doc_mirror --worklist pages.list --output-dir docs
//! ```
//!
//! ## Architecture
//!
//! One sequential pass, top to bottom, over the worklist:
//! 1. **Classify**: parse each line (comment, group marker, URL entry)
//! 2. **Mirror**: fetch → convert → trim → write each pending URL
//! 3. **Record**: tag the URL done in the worklist right after its write
//! 4. **Combine**: at each group's end marker, concatenate member files

use clap::Parser;
use std::error::Error;
use std::path::Path;
use std::time::Duration;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{fmt as tfmt, EnvFilter};

mod cli;
mod content;
mod driver;
mod fetch;
mod models;
mod outputs;
mod utils;
mod worklist;

use cli::Cli;
use fetch::HttpPageSource;
use utils::ensure_writable_dir;

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("doc_mirror starting up");

    // Parse CLI
    let args = Cli::parse();
    debug!(?args.worklist, ?args.output_dir, args.timeout_secs, "Parsed CLI arguments");

    let worklist_path = Path::new(&args.worklist);
    let output_dir = Path::new(&args.output_dir);

    // A missing worklist aborts before any side effect, the output dir
    // creation below included.
    if !worklist_path.is_file() {
        error!(path = %args.worklist, "Worklist file not found");
        return Err(format!("cannot read worklist {}", args.worklist).into());
    }

    // Early check: ensure the output dir is writable before any fetch
    if let Err(e) = ensure_writable_dir(output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    let source = HttpPageSource::new(Duration::from_secs(args.timeout_secs))?;

    let stats = driver::run(&source, worklist_path, output_dir).await?;

    let elapsed = start_time.elapsed();
    info!(
        processed = stats.processed,
        skipped = stats.skipped,
        failed = stats.failed,
        malformed = stats.malformed,
        combined = stats.combined,
        secs = elapsed.as_secs(),
        millis = elapsed.subsec_millis(),
        "Execution complete"
    );

    Ok(())
}
