use serde::{Deserialize, Serialize};

/// Who caused the next clipboard change.
///
/// The local watcher treats every change as `LocalCapture` unless a writer inside
/// this process announced the change beforehand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClipboardChangeOrigin {
    /// The user (or another application) changed the clipboard.
    LocalCapture,
    /// The remote poller applied an entry written by another device.
    RemotePush,
    /// The history consumer asked to copy one of its entries.
    HistorySelection,
}

impl ClipboardChangeOrigin {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClipboardChangeOrigin::LocalCapture => "local_capture",
            ClipboardChangeOrigin::RemotePush => "remote_push",
            ClipboardChangeOrigin::HistorySelection => "history_selection",
        }
    }
}
