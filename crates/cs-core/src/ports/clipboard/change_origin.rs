use crate::ClipboardChangeOrigin;
use async_trait::async_trait;
use std::time::Duration;

/// Marks clipboard writes made by this process so the local watcher does not
/// mistake them for user changes.
///
/// A writer calls `set_next_origin` **before** writing `text` to the clipboard.
/// The watcher calls `consume_origin_or_default` with the text it observed; the
/// marker is returned only when the text matches and the ttl has not elapsed.
/// Every observed change clears all pending markers, matched or not.
#[async_trait]
pub trait ClipboardChangeOriginPort: Send + Sync {
    async fn set_next_origin(&self, origin: ClipboardChangeOrigin, text: &str, ttl: Duration);

    async fn consume_origin_or_default(
        &self,
        text: &str,
        default_origin: ClipboardChangeOrigin,
    ) -> ClipboardChangeOrigin;

    /// Withdraw the marker for `text` after the write it announced failed.
    async fn discard_origin(&self, text: &str);
}
