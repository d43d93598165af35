//! Combined group output.
//!
//! A group's member files are concatenated into one Markdown file named
//! `combined--<group>.md` under the output directory. The combined file is
//! produced at most once per group name: existence of the target file is the
//! sole guard, with no content hashing and no staleness detection. Re-runs
//! log an informational skip and leave the file byte-for-byte untouched.
//!
//! # Layout
//!
//! ```text
//! # Combined: <group>
//!
//! > Generated: 2025-05-06 09:14:02
//! > Files: 2
//!
//! ## first.md
//!
//! ...first file's content...
//!
//! ---
//!
//! ## second.md
//! ...
//! ```

use chrono::Local;
use itertools::Itertools;
use std::error::Error;
use std::fmt::Write;
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::{info, instrument};

/// On-disk path of a group's combined output file.
pub fn combined_path(output_dir: &Path, group: &str) -> PathBuf {
    output_dir.join(format!("combined--{}.md", group))
}

/// Concatenate a group's member files into its combined output file.
///
/// Member files are included in worklist order, each framed by a `##`
/// heading naming the source file and a `---` divider. Duplicate member
/// paths are included once.
///
/// # Returns
///
/// The path written, or `None` when nothing was done: either the group
/// collected no files, or the combined file already exists (idempotent skip).
#[instrument(level = "info", skip_all, fields(%group, files = files.len()))]
pub async fn write_combined(
    output_dir: &Path,
    group: &str,
    files: &[PathBuf],
) -> Result<Option<PathBuf>, Box<dyn Error>> {
    if files.is_empty() {
        info!("Group collected no files; nothing to combine");
        return Ok(None);
    }

    let target = combined_path(output_dir, group);
    if target.exists() {
        info!(path = %target.display(), "Combined file already exists; skipping");
        return Ok(None);
    }

    let members: Vec<&PathBuf> = files.iter().unique().collect();

    let mut md = String::new();
    writeln!(md, "# Combined: {}\n", group).unwrap();
    writeln!(md, "> Generated: {}", Local::now().format("%Y-%m-%d %H:%M:%S")).unwrap();
    writeln!(md, "> Files: {}\n", members.len()).unwrap();

    for path in members {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        let content = fs::read_to_string(path).await?;

        writeln!(md, "## {}\n", name).unwrap();
        md.push_str(content.trim_end());
        md.push_str("\n\n---\n\n");
    }

    fs::write(&target, &md).await?;
    info!(path = %target.display(), bytes = md.len(), "Wrote combined group file");
    Ok(Some(target))
}
