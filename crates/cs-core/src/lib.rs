//! # cs-core
//!
//! Core domain models and business rules for clipsync.
//!
//! This crate contains pure business logic without any infrastructure dependencies:
//! the clipboard entry model, the history projection, configuration DTOs and the
//! port traits implemented by the platform and infrastructure crates.

pub mod clipboard;
pub mod config;
pub mod ids;
pub mod ports;
pub mod view;

// Re-export commonly used types at the crate root
pub use clipboard::{
    dedup_newest_first, ClipboardChangeOrigin, ClipboardEntry, HistoryLimits,
    EMPTY_HISTORY_PLACEHOLDER, FETCH_LIMIT, RESULT_LIMIT,
};
pub use config::{AppConfig, StoreConfig, StoreCredentials, SyncConfig};
pub use ids::EntryId;
pub use view::{HistoryCommand, HistoryEvent};
