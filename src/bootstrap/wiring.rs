//! Dependency wiring: builds the adapters and hands them to the use cases.

use std::sync::Arc;

use cs_app::{
    CopyFromHistoryToSystemClipboard, HistoryBridge, ListClipboardHistory, LocalClipboardWatcher,
    PublishClipboardHistory, RemoteClipboardPoller, SyncRuntime,
};
use cs_core::ports::{
    ClipboardChangeOriginPort, HistoryViewPort, SyncStorePort, SystemClipboardPort,
};
use cs_core::{AppConfig, HistoryCommand, StoreConfig};
use cs_infra::{
    DisabledSyncStore, InMemoryClipboardChangeOrigin, InMemorySyncStore, PostgrestSyncStore,
};
use tokio::sync::mpsc;
use tracing::{info, warn};

const HISTORY_COMMAND_CAPACITY: usize = 16;

/// Which store backs the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreMode {
    /// PostgREST table from the configured credentials.
    Remote,
    /// Credentials missing; store calls are no-ops.
    Disabled,
    /// Process-local store, nothing leaves the machine.
    Offline,
}

/// Build the sync store for `config`.
///
/// Missing credentials are not an error: the store is disabled and a single
/// warning is logged.
pub fn build_sync_store(
    config: &StoreConfig,
    offline: bool,
) -> anyhow::Result<(Arc<dyn SyncStorePort>, StoreMode)> {
    if offline {
        info!("Running offline with an in-memory store");
        return Ok((Arc::new(InMemorySyncStore::new()), StoreMode::Offline));
    }

    match config.credentials() {
        Some(credentials) => {
            let store = PostgrestSyncStore::new(&credentials)?;
            info!(endpoint = store.endpoint(), "Sync store configured");
            Ok((Arc::new(store), StoreMode::Remote))
        }
        None => {
            warn!(
                "Sync store credentials missing (CLIPSYNC_STORE_URL / CLIPSYNC_STORE_KEY); \
                 clipboard is watched locally but not synced"
            );
            Ok((Arc::new(DisabledSyncStore), StoreMode::Disabled))
        }
    }
}

/// A running sync session.
pub struct SyncSession {
    pub runtime: SyncRuntime,
    /// Commands from the history consumer.
    pub commands: mpsc::Sender<HistoryCommand>,
}

/// Wire both loops and the history bridge, then start them.
///
/// Must be called inside a tokio runtime.
pub fn start_sync(
    config: &AppConfig,
    local_clipboard: Arc<dyn SystemClipboardPort>,
    sync_store: Arc<dyn SyncStorePort>,
    history_view: Arc<dyn HistoryViewPort>,
) -> SyncSession {
    let sync = &config.sync;
    let origin: Arc<dyn ClipboardChangeOriginPort> =
        Arc::new(InMemoryClipboardChangeOrigin::new());
    let origin_ttl = sync.origin_marker_ttl();

    let publish_history = Arc::new(PublishClipboardHistory::new(
        ListClipboardHistory::new(sync_store.clone(), sync.history_limits()),
        history_view,
    ));

    let watcher = LocalClipboardWatcher::new(
        local_clipboard.clone(),
        sync_store.clone(),
        origin.clone(),
        sync.max_text_bytes,
    );
    let poller = RemoteClipboardPoller::new(
        sync_store,
        local_clipboard.clone(),
        origin.clone(),
        publish_history.clone(),
        origin_ttl,
    );
    let bridge = HistoryBridge::new(
        publish_history,
        CopyFromHistoryToSystemClipboard::new(
            local_clipboard,
            origin,
            origin_ttl,
            sync.resubmit_history_selection,
        ),
    );

    let (commands, rx) = mpsc::channel(HISTORY_COMMAND_CAPACITY);
    let mut runtime = SyncRuntime::new();
    runtime.spawn_loop(watcher, sync.local_poll_interval());
    runtime.spawn_loop(poller, sync.remote_poll_interval());
    runtime.spawn_history_bridge(bridge, rx);

    info!(
        local_poll_ms = sync.local_poll_interval().as_millis() as u64,
        remote_poll_ms = sync.remote_poll_interval().as_millis() as u64,
        "Clipboard sync started"
    );

    SyncSession { runtime, commands }
}
