//! System clipboard port - abstracts OS clipboard text access

use anyhow::Result;

/// Text access to the OS clipboard.
///
/// The OS clipboard is shared with the user and other applications, so a
/// value read here may already be stale when it is compared.
pub trait SystemClipboardPort: Send + Sync {
    /// Read the current clipboard text.
    ///
    /// Returns `Ok(None)` when the clipboard holds no text representation.
    fn read_text(&self) -> Result<Option<String>>;

    /// Replace the clipboard content with `text`.
    fn write_text(&self, text: &str) -> Result<()>;
}
