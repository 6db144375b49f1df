//! Messages exchanged with the history consumer (the popup list).
//!
//! Events only describe facts the consumer renders; commands are the only way
//! the consumer talks back to the core.

use serde::{Deserialize, Serialize};

/// Core -> history consumer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryEvent {
    /// Deduplicated history, newest first. Empty means "no data".
    HistoryUpdated { entries: Vec<String> },
}

/// History consumer -> core.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum HistoryCommand {
    /// Ask for one `HistoryUpdated` push, e.g. when the consumer becomes ready.
    RequestHistory,
    /// Copy one history entry into the local clipboard.
    SelectEntry { text: String },
}
