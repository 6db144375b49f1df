//! In-process history consumer channel.
//!
//! The core publishes [`HistoryEvent`]s on a broadcast channel; any number of
//! consumers (the terminal logger, a future popup) subscribe to it.

use async_trait::async_trait;
use cs_core::ports::{HistoryViewError, HistoryViewPort};
use cs_core::HistoryEvent;
use tokio::sync::broadcast;
use tracing::trace;

const DEFAULT_CAPACITY: usize = 16;

#[derive(Clone)]
pub struct BroadcastHistoryView {
    tx: broadcast::Sender<HistoryEvent>,
}

impl BroadcastHistoryView {
    pub fn new(capacity: usize) -> Self {
        let (tx, _) = broadcast::channel(capacity.max(1));
        Self { tx }
    }

    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEvent> {
        self.tx.subscribe()
    }
}

impl Default for BroadcastHistoryView {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

#[async_trait]
impl HistoryViewPort for BroadcastHistoryView {
    async fn publish_history(&self, entries: Vec<String>) -> Result<(), HistoryViewError> {
        let count = entries.len();
        self.tx
            .send(HistoryEvent::HistoryUpdated { entries })
            .map_err(|_| HistoryViewError::NoConsumer)?;
        trace!(count, "History event broadcast");
        Ok(())
    }
}
