//! Port interfaces for the application layer
//!
//! Ports define the contract between the sync use cases and the
//! infrastructure implementations (OS clipboard, remote store, history
//! consumer). Use cases depend on these traits only, so every loop can be
//! driven with in-memory doubles in tests.

pub mod clipboard;
mod clock;
pub mod history_view;
pub mod sync_store;

pub use clipboard::*;
pub use clock::ClockPort;
pub use history_view::{HistoryViewError, HistoryViewPort};
pub use sync_store::{SyncStoreError, SyncStorePort};
