use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use cs_core::ports::{ClipboardChangeOriginPort, SyncStorePort, SystemClipboardPort};
use cs_core::{ClipboardChangeOrigin, EntryId};
use tracing::{debug, info, info_span, trace, warn, Instrument};

use super::PublishClipboardHistory;
use crate::runtime::PeriodicTask;

/// What one remote poller tick did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteTickOutcome {
    /// The store holds no entries (or is not configured).
    Empty,
    /// The store could not be queried; retried next tick.
    QueryFailed,
    /// The newest entry is the one seen last tick.
    Unchanged,
    /// First successful query. The clipboard was primed if it differed.
    Bootstrapped { primed: bool },
    /// A new top entry was seen and the history pushed.
    Applied {
        wrote_clipboard: bool,
        history_len: Option<usize>,
    },
}

/// Polls the sync store for the newest entry and applies remote changes to
/// the local clipboard.
///
/// The poller owns the id of the last top entry it saw; nothing else reads
/// or writes it.
pub struct RemoteClipboardPoller {
    sync_store: Arc<dyn SyncStorePort>,
    local_clipboard: Arc<dyn SystemClipboardPort>,
    clipboard_change_origin: Arc<dyn ClipboardChangeOriginPort>,
    publish_history: Arc<PublishClipboardHistory>,
    origin_ttl: Duration,
    last_seen_id: Option<EntryId>,
    bootstrapped: bool,
}

impl RemoteClipboardPoller {
    pub fn new(
        sync_store: Arc<dyn SyncStorePort>,
        local_clipboard: Arc<dyn SystemClipboardPort>,
        clipboard_change_origin: Arc<dyn ClipboardChangeOriginPort>,
        publish_history: Arc<PublishClipboardHistory>,
        origin_ttl: Duration,
    ) -> Self {
        Self {
            sync_store,
            local_clipboard,
            clipboard_change_origin,
            publish_history,
            origin_ttl,
            last_seen_id: None,
            bootstrapped: false,
        }
    }

    pub fn last_seen_id(&self) -> Option<&EntryId> {
        self.last_seen_id.as_ref()
    }

    /// Query the newest entry once and apply it if it is new.
    pub async fn check_once(&mut self) -> RemoteTickOutcome {
        let newest = match self.sync_store.query_newest(1).await {
            Ok(entries) => entries.into_iter().next(),
            Err(err) if err.is_not_configured() => {
                trace!("Sync store not configured, skipping remote poll");
                return RemoteTickOutcome::Empty;
            }
            Err(err) => {
                warn!(error = %err, "Failed to query newest clipboard entry");
                return RemoteTickOutcome::QueryFailed;
            }
        };

        let bootstrapping = !self.bootstrapped;
        self.bootstrapped = true;

        let Some(entry) = newest else {
            return RemoteTickOutcome::Empty;
        };

        if self.last_seen_id.as_ref() == Some(&entry.id) {
            return RemoteTickOutcome::Unchanged;
        }

        let span = info_span!(
            "usecase.clipboard.sync_inbound.check_once",
            entry_id = %entry.id,
            bootstrap = bootstrapping,
        );

        async move {
            self.last_seen_id = Some(entry.id.clone());
            let wrote_clipboard = self.apply_to_clipboard(&entry.text).await;

            if bootstrapping {
                info!(primed = wrote_clipboard, "Remote clipboard bootstrap read");
                return RemoteTickOutcome::Bootstrapped {
                    primed: wrote_clipboard,
                };
            }

            let history_len = self.publish_history.execute().await;
            info!(wrote_clipboard, "Remote clipboard change applied");
            RemoteTickOutcome::Applied {
                wrote_clipboard,
                history_len,
            }
        }
        .instrument(span)
        .await
    }

    /// Write `text` to the clipboard unless it already holds it.
    async fn apply_to_clipboard(&self, text: &str) -> bool {
        match self.local_clipboard.read_text() {
            Ok(Some(current)) if current == text => {
                debug!("Local clipboard already matches newest remote entry");
                return false;
            }
            Ok(_) => {}
            Err(err) => {
                // Cannot compare; writing the same text again is harmless
                warn!(error = %err, "Failed to read local clipboard before remote apply");
            }
        }

        self.clipboard_change_origin
            .set_next_origin(ClipboardChangeOrigin::RemotePush, text, self.origin_ttl)
            .await;

        if let Err(err) = self.local_clipboard.write_text(text) {
            self.clipboard_change_origin.discard_origin(text).await;
            warn!(error = %err, "Failed to write remote entry to local clipboard");
            return false;
        }

        true
    }
}

#[async_trait]
impl PeriodicTask for RemoteClipboardPoller {
    fn name(&self) -> &'static str {
        "remote_poller"
    }

    async fn tick(&mut self) {
        self.check_once().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{FakeClipboard, MockSyncStore, RecordingHistoryView};
    use crate::usecases::clipboard::ListClipboardHistory;
    use chrono::{TimeZone, Utc};
    use cs_core::ports::SyncStoreError;
    use cs_core::{ClipboardEntry, HistoryLimits};
    use cs_infra::{InMemoryClipboardChangeOrigin, InMemorySyncStore};

    struct Harness {
        clipboard: Arc<FakeClipboard>,
        view: Arc<RecordingHistoryView>,
        origin: Arc<InMemoryClipboardChangeOrigin>,
        poller: RemoteClipboardPoller,
    }

    fn harness(store: Arc<dyn SyncStorePort>, clipboard: FakeClipboard) -> Harness {
        let clipboard = Arc::new(clipboard);
        let view = Arc::new(RecordingHistoryView::default());
        let origin = Arc::new(InMemoryClipboardChangeOrigin::new());
        let publish = Arc::new(PublishClipboardHistory::new(
            ListClipboardHistory::new(store.clone(), HistoryLimits::default()),
            view.clone(),
        ));
        let poller = RemoteClipboardPoller::new(
            store,
            clipboard.clone(),
            origin.clone(),
            publish,
            Duration::from_secs(3),
        );
        Harness {
            clipboard,
            view,
            origin,
            poller,
        }
    }

    fn entry(id: i64, text: &str) -> ClipboardEntry {
        ClipboardEntry::new(id, text, Utc.timestamp_opt(1_700_000_000 + id, 0).unwrap())
    }

    #[tokio::test]
    async fn test_bootstrap_primes_clipboard_without_history_push() {
        let store = Arc::new(InMemorySyncStore::new());
        store.insert("from phone").await.unwrap();
        let mut h = harness(store, FakeClipboard::with_text("stale"));

        let outcome = h.poller.check_once().await;

        assert_eq!(outcome, RemoteTickOutcome::Bootstrapped { primed: true });
        assert_eq!(h.clipboard.current().as_deref(), Some("from phone"));
        assert!(h.view.pushes().is_empty());
        assert_eq!(h.poller.last_seen_id().map(EntryId::as_str), Some("1"));
    }

    #[tokio::test]
    async fn test_bootstrap_skips_write_when_clipboard_matches() {
        let store = Arc::new(InMemorySyncStore::new());
        store.insert("same").await.unwrap();
        let mut h = harness(store, FakeClipboard::with_text("same"));

        let outcome = h.poller.check_once().await;

        assert_eq!(outcome, RemoteTickOutcome::Bootstrapped { primed: false });
        assert!(h.clipboard.writes().is_empty());
    }

    #[tokio::test]
    async fn test_same_top_id_twice_is_idempotent() {
        let store = Arc::new(InMemorySyncStore::new());
        let mut h = harness(store.clone(), FakeClipboard::default());
        h.poller.check_once().await;

        store.insert("new").await.unwrap();
        let first = h.poller.check_once().await;
        let writes_after_first = h.clipboard.writes().len();
        let pushes_after_first = h.view.pushes().len();

        let second = h.poller.check_once().await;

        assert_eq!(
            first,
            RemoteTickOutcome::Applied {
                wrote_clipboard: true,
                history_len: Some(1),
            }
        );
        assert_eq!(second, RemoteTickOutcome::Unchanged);
        assert_eq!(h.clipboard.writes().len(), writes_after_first);
        assert_eq!(h.view.pushes().len(), pushes_after_first);
    }

    #[tokio::test]
    async fn test_matching_clipboard_is_not_rewritten_on_new_id() {
        let store = Arc::new(InMemorySyncStore::new());
        store.insert("a").await.unwrap();
        let mut h = harness(store.clone(), FakeClipboard::with_text("a"));
        h.poller.check_once().await;

        // Another device copies the text this device already holds
        h.clipboard.set("shared");
        store.insert("shared").await.unwrap();

        let outcome = h.poller.check_once().await;

        assert_eq!(
            outcome,
            RemoteTickOutcome::Applied {
                wrote_clipboard: false,
                history_len: Some(2),
            }
        );
        assert!(h.clipboard.writes().is_empty());
        assert_eq!(
            h.view.pushes(),
            vec![vec!["shared".to_string(), "a".to_string()]]
        );
    }

    #[tokio::test]
    async fn test_remote_write_is_marked_as_remote_push() {
        let store = Arc::new(InMemorySyncStore::new());
        let mut h = harness(store.clone(), FakeClipboard::with_text("local"));
        h.poller.check_once().await;

        store.insert("remote").await.unwrap();
        h.poller.check_once().await;

        let origin = h
            .origin
            .consume_origin_or_default("remote", ClipboardChangeOrigin::LocalCapture)
            .await;
        assert_eq!(origin, ClipboardChangeOrigin::RemotePush);
    }

    #[tokio::test]
    async fn test_failed_write_clears_origin_marker() {
        let store = Arc::new(InMemorySyncStore::new());
        let clipboard = FakeClipboard::with_text("local");
        clipboard.fail_writes(true);
        let mut h = harness(store.clone(), clipboard);
        h.poller.check_once().await;

        store.insert("remote").await.unwrap();
        let outcome = h.poller.check_once().await;

        assert!(matches!(
            outcome,
            RemoteTickOutcome::Applied {
                wrote_clipboard: false,
                ..
            }
        ));
        let origin = h
            .origin
            .consume_origin_or_default("remote", ClipboardChangeOrigin::LocalCapture)
            .await;
        assert_eq!(origin, ClipboardChangeOrigin::LocalCapture);
    }

    #[tokio::test]
    async fn test_query_failure_does_nothing() {
        let mut store = MockSyncStore::new();
        store
            .expect_query_newest()
            .times(2)
            .returning(|_| Err(SyncStoreError::Unavailable("timeout".into())));
        let mut h = harness(Arc::new(store), FakeClipboard::with_text("local"));

        assert_eq!(h.poller.check_once().await, RemoteTickOutcome::QueryFailed);
        assert_eq!(h.poller.check_once().await, RemoteTickOutcome::QueryFailed);
        assert!(h.clipboard.writes().is_empty());
        assert!(h.view.pushes().is_empty());
        assert!(h.poller.last_seen_id().is_none());
    }

    #[tokio::test]
    async fn test_first_entry_after_empty_bootstrap_is_a_change() {
        let mut store = MockSyncStore::new();
        let mut calls = 0;
        store.expect_query_newest().returning(move |_| {
            calls += 1;
            if calls == 1 {
                Ok(Vec::new())
            } else {
                Ok(vec![entry(1, "first ever")])
            }
        });
        let mut h = harness(Arc::new(store), FakeClipboard::default());

        assert_eq!(h.poller.check_once().await, RemoteTickOutcome::Empty);
        let outcome = h.poller.check_once().await;

        assert!(matches!(
            outcome,
            RemoteTickOutcome::Applied {
                wrote_clipboard: true,
                ..
            }
        ));
        assert_eq!(h.view.pushes(), vec![vec!["first ever".to_string()]]);
    }

    #[tokio::test]
    async fn test_disabled_store_keeps_polling_quietly() {
        let mut h = harness(Arc::new(cs_infra::DisabledSyncStore), FakeClipboard::default());

        for _ in 0..3 {
            assert_eq!(h.poller.check_once().await, RemoteTickOutcome::Empty);
        }
        assert!(h.clipboard.writes().is_empty());
    }
}
