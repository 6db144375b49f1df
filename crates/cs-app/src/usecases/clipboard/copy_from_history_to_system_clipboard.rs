use anyhow::{Context, Result};
use std::sync::Arc;
use std::time::Duration;

use cs_core::ports::{ClipboardChangeOriginPort, SystemClipboardPort};
use cs_core::ClipboardChangeOrigin;
use tracing::{debug, info_span, Instrument};

/// Copy a history entry back into the system clipboard
///
/// This use case represents a user intention to reuse a text from the
/// history list.
///
/// Unless re-submission is enabled, the write is marked as a history
/// selection so the local watcher does not push it to the store again as a
/// duplicate top entry.
pub struct CopyFromHistoryToSystemClipboard {
    local_clipboard: Arc<dyn SystemClipboardPort>,
    clipboard_change_origin: Arc<dyn ClipboardChangeOriginPort>,
    origin_ttl: Duration,
    resubmit: bool,
}

impl CopyFromHistoryToSystemClipboard {
    pub fn new(
        local_clipboard: Arc<dyn SystemClipboardPort>,
        clipboard_change_origin: Arc<dyn ClipboardChangeOriginPort>,
        origin_ttl: Duration,
        resubmit: bool,
    ) -> Self {
        Self {
            local_clipboard,
            clipboard_change_origin,
            origin_ttl,
            resubmit,
        }
    }

    /// Writes `text` to the system clipboard. Returns `false` when the
    /// clipboard already held it.
    pub async fn execute(&self, text: &str) -> Result<bool> {
        let span = info_span!(
            "usecase.clipboard.copy_from_history.execute",
            text_bytes = text.len(),
            resubmit = self.resubmit,
        );

        async move {
            let current = self
                .local_clipboard
                .read_text()
                .context("failed to read clipboard before history copy")?;
            if current.as_deref() == Some(text) {
                debug!("Clipboard already holds selected history entry");
                return Ok(false);
            }

            if !self.resubmit {
                self.clipboard_change_origin
                    .set_next_origin(ClipboardChangeOrigin::HistorySelection, text, self.origin_ttl)
                    .await;
            }

            if let Err(err) = self.local_clipboard.write_text(text) {
                if !self.resubmit {
                    self.clipboard_change_origin.discard_origin(text).await;
                }
                return Err(err).context("failed to write history entry to clipboard");
            }

            debug!("History entry copied to clipboard");
            Ok(true)
        }
        .instrument(span)
        .await
    }
}
