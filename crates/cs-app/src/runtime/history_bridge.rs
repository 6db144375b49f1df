use std::sync::Arc;

use cs_core::HistoryCommand;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::usecases::{CopyFromHistoryToSystemClipboard, PublishClipboardHistory};

/// Serves commands sent by the history consumer.
pub struct HistoryBridge {
    publish_history: Arc<PublishClipboardHistory>,
    copy_from_history: CopyFromHistoryToSystemClipboard,
}

impl HistoryBridge {
    pub fn new(
        publish_history: Arc<PublishClipboardHistory>,
        copy_from_history: CopyFromHistoryToSystemClipboard,
    ) -> Self {
        Self {
            publish_history,
            copy_from_history,
        }
    }

    pub async fn handle(&self, command: HistoryCommand) {
        match command {
            HistoryCommand::RequestHistory => {
                debug!("History requested by consumer");
                self.publish_history.execute().await;
            }
            HistoryCommand::SelectEntry { text } => {
                if let Err(err) = self.copy_from_history.execute(&text).await {
                    warn!(error = %err, "Failed to copy history entry");
                }
            }
        }
    }

    /// Serve commands until the channel closes or `cancel` fires.
    pub fn spawn(
        self,
        mut commands: mpsc::Receiver<HistoryCommand>,
        cancel: CancellationToken,
    ) -> JoinHandle<()> {
        tokio::spawn(async move {
            loop {
                let command = tokio::select! {
                    biased;
                    _ = cancel.cancelled() => break,
                    command = commands.recv() => command,
                };

                match command {
                    Some(command) => self.handle(command).await,
                    None => {
                        debug!("History command channel closed");
                        break;
                    }
                }
            }
            info!("History bridge stopped");
        })
    }
}
