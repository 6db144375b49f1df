//! Entry points behind the CLI subcommands.

use std::sync::Arc;

use anyhow::{bail, Context};
use cs_app::ListClipboardHistory;
use cs_core::ports::SyncStorePort;
use cs_core::{AppConfig, HistoryCommand, HistoryEvent, EMPTY_HISTORY_PLACEHOLDER};
use cs_platform::{BroadcastHistoryView, LocalClipboard};
use tokio::sync::broadcast;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::wiring::{build_sync_store, start_sync, StoreMode};

const PREVIEW_CHARS: usize = 72;

/// Run both sync loops until Ctrl-C.
pub async fn run_sync(config: AppConfig, offline: bool) -> anyhow::Result<()> {
    let local_clipboard = Arc::new(LocalClipboard::new()?);
    let (sync_store, _mode) = build_sync_store(&config.store, offline)?;

    let history_view = BroadcastHistoryView::default();
    let events = history_view.subscribe();

    let session = start_sync(&config, local_clipboard, sync_store, Arc::new(history_view));
    let printer = spawn_history_printer(events, session.runtime.cancellation_token());

    // The printer is subscribed, ask for the initial list
    session
        .commands
        .send(HistoryCommand::RequestHistory)
        .await
        .context("history bridge stopped before startup request")?;

    tokio::signal::ctrl_c()
        .await
        .context("failed to listen for Ctrl-C")?;
    info!("Shutdown requested");

    session.runtime.shutdown().await;
    if let Err(err) = printer.await {
        warn!(error = %err, "History printer ended abnormally");
    }

    info!("Clipboard sync stopped");
    Ok(())
}

/// Print the deduplicated history once.
pub async fn print_history(config: AppConfig) -> anyhow::Result<()> {
    let (sync_store, mode) = build_sync_store(&config.store, false)?;
    if mode == StoreMode::Disabled {
        bail!("sync store is not configured");
    }

    let history = ListClipboardHistory::new(sync_store, config.sync.history_limits())
        .execute()
        .await;
    println!("{}", render_history(&history));
    Ok(())
}

/// Insert one entry, as if `text` had been copied on this device.
pub async fn push_text(config: AppConfig, text: &str) -> anyhow::Result<()> {
    if text.is_empty() {
        bail!("refusing to push empty text");
    }
    if text.len() > config.sync.max_text_bytes {
        bail!(
            "text is {} bytes, limit is {} bytes",
            text.len(),
            config.sync.max_text_bytes
        );
    }

    let (sync_store, mode) = build_sync_store(&config.store, false)?;
    if mode == StoreMode::Disabled {
        bail!("sync store is not configured");
    }

    sync_store
        .insert(text)
        .await
        .context("failed to push text to sync store")?;
    info!(text_bytes = text.len(), "Text pushed");
    Ok(())
}

fn spawn_history_printer(
    mut events: broadcast::Receiver<HistoryEvent>,
    cancel: CancellationToken,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        loop {
            let event = tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                event = events.recv() => event,
            };

            match event {
                Ok(HistoryEvent::HistoryUpdated { entries }) => {
                    info!(count = entries.len(), "History updated");
                    println!("{}", render_history(&entries));
                }
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    warn!(skipped, "History printer lagged behind");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            }
        }
    })
}

/// Render a history list for the terminal, newest first.
pub fn render_history(entries: &[String]) -> String {
    if entries.is_empty() {
        return EMPTY_HISTORY_PLACEHOLDER.to_string();
    }

    entries
        .iter()
        .enumerate()
        .map(|(index, text)| format!("{:>3}. {}", index + 1, preview(text)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// First line of `text`, shortened to a fixed number of characters.
fn preview(text: &str) -> String {
    let first_line = text.lines().next().unwrap_or_default();
    let mut preview: String = first_line.chars().take(PREVIEW_CHARS).collect();
    if first_line.chars().count() > PREVIEW_CHARS || text.lines().nth(1).is_some() {
        preview.push('…');
    }
    preview
}
