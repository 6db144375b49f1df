//! # cs-app
//!
//! Application layer of clipsync: the local watcher, the remote poller, the
//! history query and the runtime that schedules them. Use cases only talk to
//! the ports defined in `cs-core`.

pub mod runtime;
pub mod usecases;

#[cfg(test)]
pub(crate) mod test_support;

pub use runtime::{HistoryBridge, PeriodicTask, SyncRuntime};
pub use usecases::{
    CopyFromHistoryToSystemClipboard, ListClipboardHistory, LocalClipboardWatcher,
    LocalTickOutcome, PublishClipboardHistory, RemoteClipboardPoller, RemoteTickOutcome,
};
