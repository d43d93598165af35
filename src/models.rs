//! Data models for worklist lines and run accounting.
//!
//! This module defines the core data structures used throughout the application:
//! - [`ConfigLine`]: Classification of one worklist line
//! - [`UrlEntry`]: A page URL together with its recorded completion status
//! - [`RunStats`]: Counters accumulated over a single run
//!
//! All of these are ephemeral: the worklist file is re-parsed on every run and
//! nothing here outlives the process. The worklist file itself is the only
//! durable store.

/// Classification of a single line in the worklist file.
///
/// Every line falls into exactly one of these categories. Lines are
/// classified independently; group structure (begin/end pairing) is the
/// driver's concern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigLine {
    /// Empty or whitespace-only line.
    Blank,
    /// A `#` line that is not a group marker.
    Comment,
    /// `#begin::<name>`, opening the named group.
    Begin(String),
    /// `#end::<name>`, closing the named group.
    End(String),
    /// A page URL with its completion status.
    Url(UrlEntry),
    /// A non-blank, non-comment line with no recognizable URL.
    Malformed,
}

/// A work item parsed from the worklist: one page URL and its status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UrlEntry {
    /// The page URL, exactly as written in the worklist.
    pub url: String,
    /// Whether the line carried the `@yes` done tag.
    pub done: bool,
    /// 1-based line number in the worklist, for diagnostics.
    pub line_no: usize,
}

impl UrlEntry {
    /// True unless the entry's status tag is exactly the done token.
    ///
    /// `@no` and a missing tag are both pending.
    pub fn is_pending(&self) -> bool {
        !self.done
    }
}

/// Counters for one driver pass, reported in the completion log.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct RunStats {
    /// URLs fetched, converted, and written this run.
    pub processed: usize,
    /// URLs already marked done and therefore untouched.
    pub skipped: usize,
    /// URLs attempted this run that failed and stay pending.
    pub failed: usize,
    /// Lines that could not be classified and were ignored.
    pub malformed: usize,
    /// Combined group files written this run.
    pub combined: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_statuses() {
        let pending = UrlEntry {
            url: "https://example.com/a".to_string(),
            done: false,
            line_no: 1,
        };
        let done = UrlEntry {
            url: "https://example.com/b".to_string(),
            done: true,
            line_no: 2,
        };
        assert!(pending.is_pending());
        assert!(!done.is_pending());
    }
}
