use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use cs_core::ports::{ClockPort, SyncStoreError, SyncStorePort};
use cs_core::ClipboardEntry;
use tokio::sync::Mutex;
use tracing::debug;

use crate::time::SystemClock;

/// Process-local append-only store.
///
/// Used by `run --offline` and as the shared "remote" between simulated
/// devices in tests. Ids are sequential integers; `created_at` comes from the
/// injected clock but never moves backwards.
pub struct InMemorySyncStore {
    clock: Arc<dyn ClockPort>,
    state: Mutex<State>,
    offline: AtomicBool,
}

#[derive(Default)]
struct State {
    entries: Vec<ClipboardEntry>,
    next_id: i64,
    last_created_at: Option<DateTime<Utc>>,
}

impl InMemorySyncStore {
    pub fn new() -> Self {
        Self::with_clock(Arc::new(SystemClock))
    }

    pub fn with_clock(clock: Arc<dyn ClockPort>) -> Self {
        Self {
            clock,
            state: Mutex::new(State {
                next_id: 1,
                ..State::default()
            }),
            offline: AtomicBool::new(false),
        }
    }

    /// Simulate an unreachable store. Every call fails with `Unavailable`
    /// until switched back.
    pub fn set_offline(&self, offline: bool) {
        self.offline.store(offline, Ordering::SeqCst);
    }

    pub async fn len(&self) -> usize {
        self.state.lock().await.entries.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }

    /// All entries in insertion order.
    pub async fn entries(&self) -> Vec<ClipboardEntry> {
        self.state.lock().await.entries.clone()
    }

    fn ensure_online(&self) -> Result<(), SyncStoreError> {
        if self.offline.load(Ordering::SeqCst) {
            return Err(SyncStoreError::Unavailable("store is offline".to_string()));
        }
        Ok(())
    }
}

impl Default for InMemorySyncStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SyncStorePort for InMemorySyncStore {
    async fn insert(&self, text: &str) -> Result<(), SyncStoreError> {
        self.ensure_online()?;

        let mut state = self.state.lock().await;
        let now = self.clock.now();
        let created_at = match state.last_created_at {
            Some(last) if last > now => last,
            _ => now,
        };

        let id = state.next_id;
        state.next_id += 1;
        state.last_created_at = Some(created_at);
        state
            .entries
            .push(ClipboardEntry::new(id, text, created_at));

        debug!(id, total = state.entries.len(), "in-memory store insert");
        Ok(())
    }

    async fn query_newest(&self, limit: usize) -> Result<Vec<ClipboardEntry>, SyncStoreError> {
        self.ensure_online()?;

        let state = self.state.lock().await;
        let mut newest: Vec<ClipboardEntry> = state.entries.iter().rev().cloned().collect();
        // Stable: equal timestamps keep the newest insert first
        newest.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        newest.truncate(limit);
        Ok(newest)
    }
}
