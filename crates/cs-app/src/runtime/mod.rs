//! Scheduling of the sync loops and the history consumer bridge.

mod history_bridge;
mod periodic;
mod sync_runtime;

pub use history_bridge::HistoryBridge;
pub use periodic::{spawn_periodic, PeriodicTask};
pub use sync_runtime::SyncRuntime;
