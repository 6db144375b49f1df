//! Use cases of the clipboard sync loop.

pub mod clipboard;

pub use clipboard::{
    CopyFromHistoryToSystemClipboard, ListClipboardHistory, LocalClipboardWatcher,
    LocalTickOutcome, PublishClipboardHistory, RemoteClipboardPoller, RemoteTickOutcome,
};
