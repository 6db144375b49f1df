//! History projection over raw store entries.
//!
//! The displayed history is the newest-first, deduplicated-by-text view of the
//! most recent `fetch_limit` raw entries, capped at `result_limit` texts. Only the
//! newest occurrence of each distinct text is kept.

use std::collections::HashSet;

use super::ClipboardEntry;

/// Number of raw entries fetched from the store for one history projection.
pub const FETCH_LIMIT: usize = 100;

/// Maximum number of distinct texts in a history projection.
pub const RESULT_LIMIT: usize = 50;

/// Text a history consumer shows when it receives an empty projection.
pub const EMPTY_HISTORY_PLACEHOLDER: &str = "No copied text yet";

/// Window sizes for the history projection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HistoryLimits {
    pub fetch_limit: usize,
    pub result_limit: usize,
}

impl HistoryLimits {
    /// Builds limits keeping `fetch_limit >= result_limit` and both at least 1.
    pub fn new(fetch_limit: usize, result_limit: usize) -> Self {
        let result_limit = result_limit.max(1);
        Self {
            fetch_limit: fetch_limit.max(result_limit),
            result_limit,
        }
    }
}

impl Default for HistoryLimits {
    fn default() -> Self {
        Self::new(FETCH_LIMIT, RESULT_LIMIT)
    }
}

/// Deduplicates newest-first entries by text.
///
/// Walks `entries` in the given order (expected newest first), keeps the first
/// occurrence of each text and stops once `result_limit` texts are kept. The
/// relative order of kept texts is preserved.
pub fn dedup_newest_first<'a, I>(entries: I, result_limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = &'a ClipboardEntry>,
{
    let mut seen: HashSet<&'a str> = HashSet::new();
    let mut kept = Vec::new();

    for entry in entries {
        if kept.len() >= result_limit {
            break;
        }
        if seen.insert(entry.text.as_str()) {
            kept.push(entry.text.clone());
        }
    }

    kept
}
