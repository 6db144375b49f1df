use std::time::Duration;

use cs_core::HistoryCommand;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use super::periodic::{spawn_periodic, PeriodicTask};
use super::HistoryBridge;

/// Owns the background tasks of a running sync session.
///
/// Every task shares one cancellation token; [`SyncRuntime::shutdown`]
/// cancels it and waits for all of them.
pub struct SyncRuntime {
    cancel: CancellationToken,
    tasks: Vec<(&'static str, JoinHandle<()>)>,
}

impl SyncRuntime {
    pub fn new() -> Self {
        Self {
            cancel: CancellationToken::new(),
            tasks: Vec::new(),
        }
    }

    /// Start `task` ticking every `period`.
    pub fn spawn_loop<T: PeriodicTask>(&mut self, task: T, period: Duration) {
        let name = task.name();
        let handle = spawn_periodic(task, period, self.cancel.child_token());
        self.tasks.push((name, handle));
    }

    /// Start serving history consumer commands.
    pub fn spawn_history_bridge(
        &mut self,
        bridge: HistoryBridge,
        commands: mpsc::Receiver<HistoryCommand>,
    ) {
        let handle = bridge.spawn(commands, self.cancel.child_token());
        self.tasks.push(("history_bridge", handle));
    }

    pub fn task_count(&self) -> usize {
        self.tasks.len()
    }

    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    /// Cancel every task and wait for them to finish.
    pub async fn shutdown(self) {
        self.cancel.cancel();

        for (name, handle) in self.tasks {
            match handle.await {
                Ok(()) => info!(task = name, "Task finished"),
                Err(err) => warn!(task = name, error = %err, "Task ended abnormally"),
            }
        }
    }
}

impl Default for SyncRuntime {
    fn default() -> Self {
        Self::new()
    }
}
