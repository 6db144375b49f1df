use std::sync::Arc;

use async_trait::async_trait;
use cs_core::ports::{ClipboardChangeOriginPort, SyncStorePort, SystemClipboardPort};
use cs_core::ClipboardChangeOrigin;
use tracing::{debug, info_span, warn, Instrument};

use crate::runtime::PeriodicTask;

/// What one local watcher tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalTickOutcome {
    /// No text, empty text, or the same text as last time.
    Unchanged,
    /// The clipboard could not be read; state is untouched.
    ReadFailed,
    /// The change was written by this process (remote apply or history
    /// selection) and is not submitted again.
    Suppressed(ClipboardChangeOrigin),
    /// The change exceeds the configured size limit.
    TooLarge { bytes: usize },
    Submitted,
    /// The store refused or was unreachable. The text still counts as
    /// observed and is not retried.
    SubmitFailed,
}

/// Watches the local clipboard and submits each genuine text change to the
/// sync store.
///
/// The watcher owns its last observed text; nothing else reads or writes it.
pub struct LocalClipboardWatcher {
    local_clipboard: Arc<dyn SystemClipboardPort>,
    sync_store: Arc<dyn SyncStorePort>,
    clipboard_change_origin: Arc<dyn ClipboardChangeOriginPort>,
    max_text_bytes: usize,
    last_observed: Option<String>,
}

impl LocalClipboardWatcher {
    pub fn new(
        local_clipboard: Arc<dyn SystemClipboardPort>,
        sync_store: Arc<dyn SyncStorePort>,
        clipboard_change_origin: Arc<dyn ClipboardChangeOriginPort>,
        max_text_bytes: usize,
    ) -> Self {
        Self {
            local_clipboard,
            sync_store,
            clipboard_change_origin,
            max_text_bytes,
            last_observed: None,
        }
    }

    pub fn last_observed(&self) -> Option<&str> {
        self.last_observed.as_deref()
    }

    /// Read the clipboard once and submit the text if it changed.
    pub async fn check_once(&mut self) -> LocalTickOutcome {
        let text = match self.local_clipboard.read_text() {
            Ok(Some(text)) if !text.is_empty() => text,
            Ok(_) => return LocalTickOutcome::Unchanged,
            Err(err) => {
                warn!(error = %err, "Failed to read local clipboard");
                return LocalTickOutcome::ReadFailed;
            }
        };

        if self.last_observed.as_deref() == Some(text.as_str()) {
            return LocalTickOutcome::Unchanged;
        }

        let span = info_span!(
            "usecase.clipboard.sync_outbound.check_once",
            text_bytes = text.len(),
        );

        async move {
            let origin = self
                .clipboard_change_origin
                .consume_origin_or_default(&text, ClipboardChangeOrigin::LocalCapture)
                .await;
            let bytes = text.len();
            self.last_observed = Some(text.clone());

            if origin != ClipboardChangeOrigin::LocalCapture {
                debug!(origin = origin.as_str(), "Skipping clipboard change written by clipsync");
                return LocalTickOutcome::Suppressed(origin);
            }

            if bytes > self.max_text_bytes {
                warn!(
                    bytes,
                    max_text_bytes = self.max_text_bytes,
                    "Clipboard text too large to sync"
                );
                return LocalTickOutcome::TooLarge { bytes };
            }

            match self.sync_store.insert(&text).await {
                Ok(()) => {
                    debug!("Local clipboard change submitted");
                    LocalTickOutcome::Submitted
                }
                Err(err) if err.is_not_configured() => {
                    debug!("Sync store not configured, local change kept local");
                    LocalTickOutcome::SubmitFailed
                }
                Err(err) => {
                    warn!(error = %err, "Failed to submit local clipboard change");
                    LocalTickOutcome::SubmitFailed
                }
            }
        }
        .instrument(span)
        .await
    }
}

#[async_trait]
impl PeriodicTask for LocalClipboardWatcher {
    fn name(&self) -> &'static str {
        "local_watcher"
    }

    async fn tick(&mut self) {
        self.check_once().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeClipboard, MockSyncStore};
    use cs_core::ports::SyncStoreError;
    use cs_infra::{InMemoryClipboardChangeOrigin, InMemorySyncStore};
    use std::time::Duration;

    fn watcher(
        clipboard: Arc<FakeClipboard>,
        store: Arc<dyn SyncStorePort>,
        origin: Arc<InMemoryClipboardChangeOrigin>,
    ) -> LocalClipboardWatcher {
        LocalClipboardWatcher::new(clipboard, store, origin, 1024)
    }

    #[tokio::test]
    async fn test_one_insert_per_distinct_change() {
        let clipboard = Arc::new(FakeClipboard::with_text("first"));
        let store = Arc::new(InMemorySyncStore::new());
        let mut watcher = watcher(
            clipboard.clone(),
            store.clone(),
            Arc::new(InMemoryClipboardChangeOrigin::new()),
        );

        assert_eq!(watcher.check_once().await, LocalTickOutcome::Submitted);
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Unchanged);
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Unchanged);

        clipboard.set("second");
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Submitted);
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Unchanged);

        let texts: Vec<String> = store.entries().await.into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["first", "second"]);
    }

    #[tokio::test]
    async fn test_empty_clipboard_is_ignored() {
        let clipboard = Arc::new(FakeClipboard::default());
        let mut store = MockSyncStore::new();
        store.expect_insert().never();
        let mut watcher = watcher(
            clipboard.clone(),
            Arc::new(store),
            Arc::new(InMemoryClipboardChangeOrigin::new()),
        );

        assert_eq!(watcher.check_once().await, LocalTickOutcome::Unchanged);
        clipboard.set("");
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Unchanged);
        assert_eq!(watcher.last_observed(), None);
    }

    #[tokio::test]
    async fn test_submit_failure_is_not_retried() {
        let clipboard = Arc::new(FakeClipboard::with_text("offline copy"));
        let mut store = MockSyncStore::new();
        store
            .expect_insert()
            .withf(|text| text == "offline copy")
            .times(1)
            .returning(|_| Err(SyncStoreError::Unavailable("connection refused".into())));
        let mut watcher = watcher(
            clipboard,
            Arc::new(store),
            Arc::new(InMemoryClipboardChangeOrigin::new()),
        );

        assert_eq!(watcher.check_once().await, LocalTickOutcome::SubmitFailed);
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Unchanged);
        assert_eq!(watcher.last_observed(), Some("offline copy"));
    }

    #[tokio::test]
    async fn test_read_failure_keeps_state() {
        let clipboard = Arc::new(FakeClipboard::with_text("value"));
        let store = Arc::new(InMemorySyncStore::new());
        let mut watcher = watcher(
            clipboard.clone(),
            store.clone(),
            Arc::new(InMemoryClipboardChangeOrigin::new()),
        );

        clipboard.fail_reads(true);
        assert_eq!(watcher.check_once().await, LocalTickOutcome::ReadFailed);
        assert_eq!(watcher.last_observed(), None);

        clipboard.fail_reads(false);
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Submitted);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn test_self_written_text_is_suppressed() {
        let clipboard = Arc::new(FakeClipboard::with_text("user"));
        let store = Arc::new(InMemorySyncStore::new());
        let origin = Arc::new(InMemoryClipboardChangeOrigin::new());
        let mut watcher = watcher(clipboard.clone(), store.clone(), origin.clone());
        watcher.check_once().await;

        origin
            .set_next_origin(
                ClipboardChangeOrigin::RemotePush,
                "from other device",
                Duration::from_secs(5),
            )
            .await;
        clipboard.set("from other device");

        assert_eq!(
            watcher.check_once().await,
            LocalTickOutcome::Suppressed(ClipboardChangeOrigin::RemotePush)
        );
        assert_eq!(watcher.last_observed(), Some("from other device"));
        assert_eq!(store.len().await, 1);

        // Copying the same text again later is still no change
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_unseen_self_write_does_not_swallow_later_user_copy() {
        let clipboard = Arc::new(FakeClipboard::with_text("A"));
        let store = Arc::new(InMemorySyncStore::new());
        let origin = Arc::new(InMemoryClipboardChangeOrigin::new());
        let mut watcher = watcher(clipboard.clone(), store.clone(), origin.clone());
        watcher.check_once().await;

        // Remote apply of "B" is overwritten by the user before the watcher ticks
        origin
            .set_next_origin(ClipboardChangeOrigin::RemotePush, "B", Duration::from_secs(5))
            .await;
        clipboard.set("B");
        clipboard.set("C");
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Submitted);

        clipboard.set("B");
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Submitted);

        let texts: Vec<String> = store.entries().await.into_iter().map(|e| e.text).collect();
        assert_eq!(texts, vec!["A", "C", "B"]);
    }

    #[tokio::test]
    async fn test_oversized_text_is_observed_but_not_submitted() {
        let clipboard = Arc::new(FakeClipboard::with_text(&"x".repeat(2048)));
        let mut store = MockSyncStore::new();
        store.expect_insert().never();
        let mut watcher = watcher(
            clipboard,
            Arc::new(store),
            Arc::new(InMemoryClipboardChangeOrigin::new()),
        );

        assert_eq!(
            watcher.check_once().await,
            LocalTickOutcome::TooLarge { bytes: 2048 }
        );
        assert_eq!(watcher.check_once().await, LocalTickOutcome::Unchanged);
    }

    #[tokio::test]
    async fn test_not_configured_store_keeps_watching() {
        let clipboard = Arc::new(FakeClipboard::with_text("a"));
        let mut watcher = watcher(
            clipboard.clone(),
            Arc::new(cs_infra::DisabledSyncStore),
            Arc::new(InMemoryClipboardChangeOrigin::new()),
        );

        assert_eq!(watcher.check_once().await, LocalTickOutcome::SubmitFailed);
        clipboard.set("b");
        assert_eq!(watcher.check_once().await, LocalTickOutcome::SubmitFailed);
        assert_eq!(watcher.last_observed(), Some("b"));
    }
}
