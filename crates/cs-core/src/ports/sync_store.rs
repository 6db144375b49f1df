//! Remote sync store port
//!
//! The store is an append-only collection of timestamped text entries. The
//! core only inserts and asks for the newest entries; retention and expiry are
//! the store's own concern.

use async_trait::async_trait;
use thiserror::Error;

use crate::clipboard::ClipboardEntry;

#[derive(Debug, Error)]
pub enum SyncStoreError {
    /// Credentials are absent; every operation is a no-op.
    #[error("sync store is not configured")]
    NotConfigured,

    /// Transport failure (DNS, TLS, timeout, connection reset).
    #[error("sync store unavailable: {0}")]
    Unavailable(String),

    /// The store answered with a non-success status.
    #[error("sync store rejected request with status {status}: {message}")]
    Rejected { status: u16, message: String },

    /// The response body could not be decoded into entries.
    #[error("failed to decode sync store response: {0}")]
    Decode(String),
}

impl SyncStoreError {
    /// Whether the error only reflects missing configuration.
    pub fn is_not_configured(&self) -> bool {
        matches!(self, SyncStoreError::NotConfigured)
    }
}

#[async_trait]
pub trait SyncStorePort: Send + Sync {
    /// Append one entry. `id` and `created_at` are assigned by the store.
    async fn insert(&self, text: &str) -> Result<(), SyncStoreError>;

    /// Return up to `limit` entries, newest first.
    ///
    /// Ordered by `created_at` descending; ties are broken by insertion order
    /// (the newest insert wins). An empty vector is not an error.
    async fn query_newest(&self, limit: usize) -> Result<Vec<ClipboardEntry>, SyncStoreError>;
}
