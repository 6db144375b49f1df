//! Cancellable periodic tasks.
//!
//! Each task runs on its own tokio task with its own interval. Ticks of one
//! task never overlap; a tick that overruns its period makes the scheduler
//! skip the missed ticks instead of bursting to catch up.

use std::time::Duration;

use async_trait::async_trait;
use tokio::task::JoinHandle;
use tokio::time::{interval, MissedTickBehavior};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Body of a periodic loop. The task owns its state across ticks.
#[async_trait]
pub trait PeriodicTask: Send + 'static {
    fn name(&self) -> &'static str;

    /// One execution of the loop body. Errors are handled inside; the
    /// scheduler has no error path.
    async fn tick(&mut self);
}

/// Spawn `task` to tick every `period` until `cancel` fires.
///
/// The first tick runs immediately. Cancellation also interrupts a tick in
/// progress.
pub fn spawn_periodic<T>(mut task: T, period: Duration, cancel: CancellationToken) -> JoinHandle<()>
where
    T: PeriodicTask,
{
    tokio::spawn(async move {
        let name = task.name();
        let mut ticker = interval(period);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

        info!(task = name, period_ms = period.as_millis() as u64, "Periodic task started");

        loop {
            tokio::select! {
                biased;
                _ = cancel.cancelled() => break,
                _ = ticker.tick() => {}
            }

            tokio::select! {
                biased;
                _ = cancel.cancelled() => {
                    debug!(task = name, "Tick interrupted by shutdown");
                    break;
                }
                _ = task.tick() => {}
            }
        }

        info!(task = name, "Periodic task stopped");
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    struct CountingTask {
        started: Arc<AtomicUsize>,
        work: Duration,
    }

    #[async_trait]
    impl PeriodicTask for CountingTask {
        fn name(&self) -> &'static str {
            "counting"
        }

        async fn tick(&mut self) {
            self.started.fetch_add(1, Ordering::SeqCst);
            if !self.work.is_zero() {
                tokio::time::sleep(self.work).await;
            }
        }
    }

    #[tokio::test(start_paused = true)]
    async fn test_ticks_every_period_starting_immediately() {
        let started = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = spawn_periodic(
            CountingTask {
                started: started.clone(),
                work: Duration::ZERO,
            },
            Duration::from_secs(1),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(3500)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(started.load(Ordering::SeqCst), 4);
    }

    #[tokio::test(start_paused = true)]
    async fn test_slow_tick_never_overlaps_next_tick() {
        let started = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = spawn_periodic(
            CountingTask {
                started: started.clone(),
                work: Duration::from_millis(2500),
            },
            Duration::from_secs(1),
            cancel.clone(),
        );

        // Second tick starts when the first ends at 2.5s, third not before 5s
        tokio::time::sleep(Duration::from_millis(4000)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(started.load(Ordering::SeqCst), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_cancel_interrupts_running_tick() {
        let started = Arc::new(AtomicUsize::new(0));
        let cancel = CancellationToken::new();
        let handle = spawn_periodic(
            CountingTask {
                started: started.clone(),
                work: Duration::from_secs(60),
            },
            Duration::from_secs(1),
            cancel.clone(),
        );

        tokio::time::sleep(Duration::from_millis(10)).await;
        cancel.cancel();
        handle.await.unwrap();

        assert_eq!(started.load(Ordering::SeqCst), 1);
    }
}
