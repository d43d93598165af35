//! Sequential processing pass over the worklist.
//!
//! One run is a single top-to-bottom pass over the parsed worklist lines.
//! Pending URLs go through fetch → convert → trim → write; each success is
//! recorded in the worklist immediately, so a crash partway through a run
//! leaves completed URLs durably marked. A failed URL keeps its status and
//! is retried on the next run. Each URL is attempted at most once per run,
//! strictly in file order, with no concurrency.
//!
//! # Group State Machine
//!
//! Group membership is tracked with two states, `Outside` and in-group:
//!
//! - `#begin::<name>` opens a group. Nesting is unsupported; a begin marker
//!   while a group is open is logged and ignored.
//! - While a group is open, entries already done are resolved to their
//!   expected output path and collected if that file exists on disk;
//!   pending entries are scraped inline and collected on success.
//! - A matching `#end::<name>` hands the collected files to the combiner.
//!   A mismatched or stray end marker is logged and ignored; a group still
//!   open at end of file writes nothing.

use crate::content;
use crate::fetch::PageSource;
use crate::models::{ConfigLine, RunStats, UrlEntry};
use crate::outputs::{combined, page};
use crate::utils::truncate_for_log;
use crate::worklist;
use std::error::Error;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info, instrument, warn};

/// Run one pass over the worklist, mirroring every pending URL.
///
/// # Arguments
///
/// * `source` - Page source used to fetch main-content HTML
/// * `worklist_path` - The worklist file; read once, rewritten per success
/// * `output_dir` - Directory receiving per-page and combined files
///
/// # Errors
///
/// Only a missing/unreadable worklist is fatal. Per-line failures are
/// logged and the pass continues.
#[instrument(level = "info", skip_all, fields(worklist = %worklist_path.display()))]
pub async fn run<S: PageSource>(
    source: &S,
    worklist_path: &Path,
    output_dir: &Path,
) -> Result<RunStats, Box<dyn Error>> {
    let lines = worklist::load(worklist_path).await?;
    let mut stats = RunStats::default();
    let mut open_group: Option<(String, Vec<PathBuf>)> = None;

    for line in lines {
        match line {
            ConfigLine::Blank | ConfigLine::Comment => {}
            ConfigLine::Malformed => {
                stats.malformed += 1;
            }
            ConfigLine::Begin(name) => match open_group {
                Some((ref open, _)) => {
                    warn!(group = %name, open = %open, "Begin marker inside open group; ignored");
                }
                None => {
                    debug!(group = %name, "Entering group");
                    open_group = Some((name, Vec::new()));
                }
            },
            ConfigLine::End(name) => match open_group.take() {
                Some((open, files)) if open == name => {
                    match combined::write_combined(output_dir, &open, &files).await {
                        Ok(Some(path)) => {
                            stats.combined += 1;
                            info!(group = %open, path = %path.display(), "Group combined");
                        }
                        Ok(None) => {}
                        Err(e) => {
                            error!(group = %open, error = %e, "Failed to write combined file");
                        }
                    }
                }
                Some(other) => {
                    warn!(group = %name, open = %other.0, "End marker does not match open group; ignored");
                    open_group = Some(other);
                }
                None => {
                    warn!(group = %name, "End marker outside any group; ignored");
                }
            },
            ConfigLine::Url(entry) => {
                let written = if entry.is_pending() {
                    let result = process_url(source, worklist_path, output_dir, &entry).await;
                    match result {
                        Some(_) => stats.processed += 1,
                        None => stats.failed += 1,
                    }
                    result
                } else {
                    stats.skipped += 1;
                    resolve_done_entry(output_dir, &entry, open_group.is_some())
                };

                if let (Some((_, files)), Some(path)) = (open_group.as_mut(), written) {
                    files.push(path);
                }
            }
        }
    }

    if let Some((name, _)) = open_group {
        warn!(group = %name, "Group never closed; no combined file written");
    }

    Ok(stats)
}

/// Fetch, convert, trim, and write one pending URL, then record it done.
///
/// Any failure is logged and leaves the URL pending for the next run.
#[instrument(level = "info", skip_all, fields(url = %entry.url, line = entry.line_no))]
async fn process_url<S: PageSource>(
    source: &S,
    worklist_path: &Path,
    output_dir: &Path,
    entry: &UrlEntry,
) -> Option<PathBuf> {
    let html = match source.fetch(&entry.url).await {
        Ok(html) => html,
        Err(e) => {
            error!(error = %e, "Fetch failed; URL stays pending");
            return None;
        }
    };

    let markdown = content::trim_boilerplate(&content::to_markdown(&html));
    if markdown.is_empty() {
        warn!("Conversion produced no content; URL stays pending");
        return None;
    }
    debug!(preview = %truncate_for_log(&markdown, 200), "Converted page");

    let path = match page::write_page(output_dir, &entry.url, &markdown).await {
        Ok(path) => path,
        Err(e) => {
            error!(error = %e, "Write failed; URL stays pending");
            return None;
        }
    };

    // File is on disk; a failed status update just means a refetch next run.
    if let Err(e) = worklist::mark_done(worklist_path, &entry.url).await {
        error!(error = %e, "Failed to record done status");
    }

    info!(path = %path.display(), "Page mirrored");
    Some(path)
}

/// Resolve an already-done entry to its output file for group collection.
///
/// Outside a group there is nothing to resolve; inside one, the expected
/// file must actually exist on disk to be collected.
fn resolve_done_entry(output_dir: &Path, entry: &UrlEntry, in_group: bool) -> Option<PathBuf> {
    if !in_group {
        debug!(url = %entry.url, "Already done; skipping");
        return None;
    }
    match page::page_path(output_dir, &entry.url) {
        Ok(path) if path.exists() => Some(path),
        Ok(path) => {
            warn!(url = %entry.url, path = %path.display(), "Done entry's output file is missing; excluded from group");
            None
        }
        Err(e) => {
            warn!(url = %entry.url, error = %e, "Cannot derive output path for done entry");
            None
        }
    }
}
