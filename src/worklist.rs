//! Worklist parsing and per-URL status tracking.
//!
//! The worklist is a plain-text, line-oriented file that doubles as the
//! application's only durable state. Each line is one of:
//!
//! ```text
//! #begin::<group-name>      group delimiter (open)
//! #end::<group-name>        group delimiter (close)
//! # anything else           comment, ignored
//! <url>                     pending work item
//! <url>@yes                 already mirrored, skipped on re-runs
//! <url>@no                  explicitly pending (same as no tag)
//! ```
//!
//! # Line Grammar
//!
//! URL entries are matched against one anchored pattern covering the whole
//! (trimmed) line: `^(https?://\S+?)(?:@(yes|no))?$`. The `@` character is
//! reserved as the status separator at end of line; everything before it is
//! the URL verbatim. A non-blank, non-comment line that does not match is
//! malformed: it is logged with its line number and skipped, never fatal.
//!
//! A missing worklist file, by contrast, aborts the run before any side
//! effect; there is nothing sensible to do without it.

use crate::models::{ConfigLine, UrlEntry};
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::path::Path;
use tokio::fs;
use tracing::{debug, info, instrument, warn};

/// Status token marking an entry as already processed.
pub const DONE_TOKEN: &str = "yes";

const BEGIN_PREFIX: &str = "#begin::";
const END_PREFIX: &str = "#end::";

static ENTRY_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(https?://\S+?)(?:@(yes|no))?$").unwrap());

/// Classify a single worklist line.
///
/// Pure function over the line text; `line_no` is carried into [`UrlEntry`]
/// for diagnostics only.
pub fn classify(line: &str, line_no: usize) -> ConfigLine {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return ConfigLine::Blank;
    }
    if let Some(name) = trimmed.strip_prefix(BEGIN_PREFIX) {
        if !name.is_empty() {
            return ConfigLine::Begin(name.to_string());
        }
    }
    if let Some(name) = trimmed.strip_prefix(END_PREFIX) {
        if !name.is_empty() {
            return ConfigLine::End(name.to_string());
        }
    }
    if trimmed.starts_with('#') {
        return ConfigLine::Comment;
    }
    match ENTRY_RE.captures(trimmed) {
        Some(caps) => ConfigLine::Url(UrlEntry {
            url: caps[1].to_string(),
            done: caps.get(2).map(|m| m.as_str()) == Some(DONE_TOKEN),
            line_no,
        }),
        None => ConfigLine::Malformed,
    }
}

/// Parse worklist text into an ordered sequence of [`ConfigLine`]s.
///
/// Malformed lines are kept in the sequence (so callers can count them) but
/// a warning is emitted here, once, with the offending line number.
pub fn parse(text: &str) -> Vec<ConfigLine> {
    text.lines()
        .enumerate()
        .map(|(i, line)| {
            let classified = classify(line, i + 1);
            if classified == ConfigLine::Malformed {
                warn!(line = i + 1, content = line, "Worklist line has no recognizable URL; skipping");
            }
            classified
        })
        .collect()
}

/// Read and parse the worklist file.
///
/// # Errors
///
/// Returns an error if the file cannot be read (notably: it does not
/// exist). The driver treats this as fatal.
#[instrument(level = "info", skip_all, fields(path = %path.display()))]
pub async fn load(path: &Path) -> Result<Vec<ConfigLine>, Box<dyn Error>> {
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| format!("cannot read worklist {}: {}", path.display(), e))?;
    let lines = parse(&text);
    let urls = lines
        .iter()
        .filter(|l| matches!(l, ConfigLine::Url(_)))
        .count();
    info!(lines = lines.len(), urls, "Loaded worklist");
    Ok(lines)
}

/// Rewrite the worklist so every entry for `url` carries the done tag.
///
/// Non-comment lines whose anchored URL equals `url` are rewritten to
/// `<url>@yes`, replacing any previous status tag. Every other line is
/// preserved verbatim and in its original order. Called immediately after
/// each successful page write so a crash mid-run leaves completed URLs
/// durably recorded.
#[instrument(level = "info", skip_all, fields(path = %path.display(), %url))]
pub async fn mark_done(path: &Path, url: &str) -> Result<(), Box<dyn Error>> {
    let text = fs::read_to_string(path).await?;
    let mut changed = false;

    let mut out: Vec<String> = Vec::new();
    for line in text.lines() {
        let trimmed = line.trim();
        if !trimmed.starts_with('#') {
            if let Some(caps) = ENTRY_RE.captures(trimmed) {
                if &caps[1] == url {
                    out.push(format!("{}@{}", url, DONE_TOKEN));
                    changed = true;
                    continue;
                }
            }
        }
        out.push(line.to_string());
    }

    if !changed {
        warn!("No worklist line matched URL; file left untouched");
        return Ok(());
    }

    let mut body = out.join("\n");
    if text.ends_with('\n') {
        body.push('\n');
    }
    fs::write(path, body).await?;
    debug!("Worklist status updated");
    Ok(())
}
