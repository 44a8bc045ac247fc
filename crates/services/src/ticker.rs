use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};

/// Periodic tick source for a running session.
///
/// The background task is aborted when the ticker is dropped, so a host only
/// has to drop it whenever the session leaves `Running`.
#[derive(Debug)]
pub struct Ticker {
    ticks: mpsc::Receiver<()>,
    task: JoinHandle<()>,
}

impl Ticker {
    /// Start ticking every `period`. The first tick arrives one period later.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn start(period: Duration) -> Self {
        let (tx, ticks) = mpsc::channel(4);
        let task = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });
        Self { ticks, task }
    }

    #[must_use]
    pub fn every_second() -> Self {
        Self::start(Duration::from_secs(1))
    }

    /// Wait for the next tick. Returns `false` once the source has stopped.
    pub async fn tick(&mut self) -> bool {
        self.ticks.recv().await.is_some()
    }
}

impl Drop for Ticker {
    fn drop(&mut self) {
        self.task.abort();
    }
}
