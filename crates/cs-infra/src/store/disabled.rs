use async_trait::async_trait;
use cs_core::ports::{SyncStoreError, SyncStorePort};
use cs_core::ClipboardEntry;
use tracing::trace;

/// Store used when no credentials are configured.
///
/// Inserts fail with [`SyncStoreError::NotConfigured`] and queries return no
/// entries, so both loops keep ticking without touching the network.
#[derive(Debug, Default, Clone, Copy)]
pub struct DisabledSyncStore;

#[async_trait]
impl SyncStorePort for DisabledSyncStore {
    async fn insert(&self, _text: &str) -> Result<(), SyncStoreError> {
        trace!("sync store disabled, dropping insert");
        Err(SyncStoreError::NotConfigured)
    }

    async fn query_newest(&self, _limit: usize) -> Result<Vec<ClipboardEntry>, SyncStoreError> {
        Ok(Vec::new())
    }
}
