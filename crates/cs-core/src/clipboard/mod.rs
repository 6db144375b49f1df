//! Clipboard domain: remote entries, change origins and the history projection.

mod entry;
mod history;
mod origin;

pub use entry::ClipboardEntry;
pub use history::{
    dedup_newest_first, HistoryLimits, EMPTY_HISTORY_PLACEHOLDER, FETCH_LIMIT, RESULT_LIMIT,
};
pub use origin::ClipboardChangeOrigin;
