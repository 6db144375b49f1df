use std::sync::Arc;

use cs_core::ports::{HistoryViewError, HistoryViewPort, SyncStorePort};
use cs_core::{dedup_newest_first, HistoryLimits};
use tracing::{debug, debug_span, warn, Instrument};

/// Use case for building the deduplicated clipboard history.
///
/// Fetches the newest `fetch_limit` raw entries and keeps the newest
/// occurrence of each text, newest first, capped at `result_limit`.
pub struct ListClipboardHistory {
    sync_store: Arc<dyn SyncStorePort>,
    limits: HistoryLimits,
}

impl ListClipboardHistory {
    pub fn new(sync_store: Arc<dyn SyncStorePort>, limits: HistoryLimits) -> Self {
        Self { sync_store, limits }
    }

    /// Returns the history texts, newest first.
    ///
    /// A store failure yields an empty list: callers must read empty as
    /// "no data", not as "nothing was ever copied".
    pub async fn execute(&self) -> Vec<String> {
        let span = debug_span!(
            "usecase.clipboard.list_history.execute",
            fetch_limit = self.limits.fetch_limit,
            result_limit = self.limits.result_limit,
        );

        async {
            match self.sync_store.query_newest(self.limits.fetch_limit).await {
                Ok(entries) => {
                    let history = dedup_newest_first(&entries, self.limits.result_limit);
                    debug!(raw = entries.len(), kept = history.len(), "History built");
                    history
                }
                Err(err) if err.is_not_configured() => Vec::new(),
                Err(err) => {
                    warn!(error = %err, "Failed to query clipboard history");
                    Vec::new()
                }
            }
        }
        .instrument(span)
        .await
    }
}

/// Use case for pushing the current history to the history consumer.
pub struct PublishClipboardHistory {
    list_history: ListClipboardHistory,
    history_view: Arc<dyn HistoryViewPort>,
}

impl PublishClipboardHistory {
    pub fn new(list_history: ListClipboardHistory, history_view: Arc<dyn HistoryViewPort>) -> Self {
        Self {
            list_history,
            history_view,
        }
    }

    /// Build the history and push it once. Returns the number of texts pushed,
    /// or `None` when the push was not delivered.
    pub async fn execute(&self) -> Option<usize> {
        let history = self.list_history.execute().await;
        let len = history.len();

        match self.history_view.publish_history(history).await {
            Ok(()) => Some(len),
            Err(HistoryViewError::NoConsumer) => {
                debug!("No history consumer attached, dropping push");
                None
            }
            Err(err) => {
                warn!(error = %err, "Failed to push clipboard history");
                None
            }
        }
    }
}
