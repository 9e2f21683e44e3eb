use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{AbortHandle, JoinHandle};
use tokio::time::{self, MissedTickBehavior};

/// Recurring one-unit clock for a session.
///
/// The task stops when the countdown is cancelled or dropped, so a session
/// that was torn down never sees another tick.
#[derive(Debug)]
pub struct Countdown {
    rx: mpsc::Receiver<()>,
    handle: JoinHandle<()>,
}

impl Countdown {
    pub fn spawn(period: Duration) -> Self {
        let (tx, rx) = mpsc::channel(8);

        let handle = tokio::spawn(async move {
            let mut interval = time::interval_at(time::Instant::now() + period, period);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                interval.tick().await;
                if tx.send(()).await.is_err() {
                    break;
                }
            }
        });

        Self { rx, handle }
    }

    pub fn every_second() -> Self {
        Self::spawn(Duration::from_secs(1))
    }

    /// Handle on the ticking task, to observe that it has stopped.
    pub fn abort_handle(&self) -> AbortHandle {
        self.handle.abort_handle()
    }

    /// Next tick, or `None` once the countdown has been cancelled.
    pub async fn recv(&mut self) -> Option<()> {
        self.rx.recv().await
    }

    pub fn cancel(&mut self) {
        self.handle.abort();
        self.rx.close();
        // Ticks already queued belong to the cancelled clock.
        while self.rx.try_recv().is_ok() {}
    }
}

impl Drop for Countdown {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Countdown label, `m:ss`.
pub fn format_clock(total_secs: u32) -> String {
    format!("{}:{:02}", total_secs / 60, total_secs % 60)
}

/// Time taken label, `Xm Ys`.
pub fn format_elapsed(total_secs: u64) -> String {
    format!("{}m {}s", total_secs / 60, total_secs % 60)
}
