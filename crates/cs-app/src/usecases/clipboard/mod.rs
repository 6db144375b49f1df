pub mod copy_from_history_to_system_clipboard;
pub mod list_history;
pub mod sync_inbound;
pub mod sync_outbound;

pub use copy_from_history_to_system_clipboard::CopyFromHistoryToSystemClipboard;
pub use list_history::{ListClipboardHistory, PublishClipboardHistory};
pub use sync_inbound::{RemoteClipboardPoller, RemoteTickOutcome};
pub use sync_outbound::{LocalClipboardWatcher, LocalTickOutcome};
