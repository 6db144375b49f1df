use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HistoryViewError {
    /// No consumer is listening. Pushes are dropped, not queued.
    #[error("no history consumer attached")]
    NoConsumer,
}

/// Receiver of history pushes (the popup list in the desktop shell).
#[async_trait]
pub trait HistoryViewPort: Send + Sync {
    /// Push the deduplicated history, newest first.
    async fn publish_history(&self, entries: Vec<String>) -> Result<(), HistoryViewError>;
}
