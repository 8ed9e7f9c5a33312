//! # Poll Tasks
//!
//! A [`PollTask`] runs an async tick, waits a fixed interval *after the tick
//! completes*, and repeats until cancelled. Slow ticks therefore throttle the
//! rate and two ticks of the same task never overlap.
//!
//! Every tick receives the task's [`Liveness`] token, captured when the task was
//! scheduled. Work that finishes after cancellation must check it before
//! touching shared state; cancellation also drops the tick future at its next
//! await point and skips any pending sleep.
//!
//! ```rust
//! use actor_framework::poll::PollTask;
//! use std::sync::atomic::{AtomicU32, Ordering};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! #[tokio::main(flavor = "current_thread", start_paused = true)]
//! async fn main() {
//!     let ticks = Arc::new(AtomicU32::new(0));
//!     let counter = ticks.clone();
//!     let task = PollTask::spawn("counter", Duration::from_secs(6), move |live| {
//!         let counter = counter.clone();
//!         async move {
//!             if live.is_live() {
//!                 counter.fetch_add(1, Ordering::SeqCst);
//!             }
//!         }
//!     });
//!
//!     tokio::time::sleep(Duration::from_secs(13)).await;
//!     task.stop().await;
//!     assert_eq!(ticks.load(Ordering::SeqCst), 3);
//! }
//! ```

use std::future::Future;
use std::time::Duration;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Token captured when a poll task is scheduled; goes dead when the task is cancelled.
#[derive(Debug, Clone)]
pub struct Liveness {
    token: CancellationToken,
}

impl Liveness {
    pub fn is_live(&self) -> bool {
        !self.token.is_cancelled()
    }

    /// Resolves once the owning task has been cancelled.
    pub async fn dead(&self) {
        self.token.cancelled().await
    }
}

/// A cancellable, self-rescheduling repeating task.
///
/// Dropping the task cancels it.
pub struct PollTask {
    name: &'static str,
    cancel: CancellationToken,
    handle: Option<JoinHandle<()>>,
}

impl PollTask {
    /// Spawns the task; the first tick starts right away.
    pub fn spawn<F, Fut>(name: &'static str, interval: Duration, mut tick: F) -> Self
    where
        F: FnMut(Liveness) -> Fut + Send + 'static,
        Fut: Future<Output = ()> + Send + 'static,
    {
        let cancel = CancellationToken::new();
        let liveness = Liveness {
            token: cancel.clone(),
        };

        let handle = tokio::spawn(async move {
            info!(task = name, ?interval, "Poll task started");
            let mut cycles: u64 = 0;
            loop {
                cycles += 1;
                debug!(task = name, cycle = cycles, "Tick");
                tokio::select! {
                    _ = liveness.dead() => break,
                    _ = tick(liveness.clone()) => {}
                }
                tokio::select! {
                    _ = liveness.dead() => break,
                    _ = tokio::time::sleep(interval) => {}
                }
            }
            info!(task = name, cycles, "Poll task stopped");
        });

        Self {
            name,
            cancel,
            handle: Some(handle),
        }
    }

    /// A copy of the token handed to every tick.
    pub fn liveness(&self) -> Liveness {
        Liveness {
            token: self.cancel.clone(),
        }
    }

    /// Cancels the task without waiting for it to wind down.
    pub fn cancel(&self) {
        if !self.cancel.is_cancelled() {
            debug!(task = self.name, "Cancelling poll task");
            self.cancel.cancel();
        }
    }

    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// Cancels the task and waits for its loop to exit.
    pub async fn stop(mut self) {
        self.cancel();
        if let Some(handle) = self.handle.take() {
            let _ = handle.await;
        }
    }
}

impl Drop for PollTask {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicU32, Ordering};
    use std::sync::Arc;

    fn counting_task(interval: Duration, work: Duration) -> (PollTask, Arc<AtomicU32>) {
        let started = Arc::new(AtomicU32::new(0));
        let counter = started.clone();
        let task = PollTask::spawn("test", interval, move |_| {
            let counter = counter.clone();
            async move {
                counter.fetch_add(1, Ordering::SeqCst);
                tokio::time::sleep(work).await;
            }
        });
        (task, started)
    }

    #[tokio::test(start_paused = true)]
    async fn first_tick_runs_immediately() {
        let (task, started) = counting_task(Duration::from_secs(6), Duration::ZERO);
        tokio::task::yield_now().await;
        assert_eq!(started.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(5)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(started.load(Ordering::SeqCst), 2);
        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn interval_counts_from_tick_completion() {
        // Each tick takes 4s, so ticks start at t=0, t=10, t=20.
        let (task, started) = counting_task(Duration::from_secs(6), Duration::from_secs(4));
        tokio::time::sleep(Duration::from_secs(9)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);

        tokio::time::sleep(Duration::from_secs(2)).await;
        assert_eq!(started.load(Ordering::SeqCst), 2);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(started.load(Ordering::SeqCst), 3);
        task.stop().await;
    }

    #[tokio::test(start_paused = true)]
    async fn cancel_skips_pending_tick() {
        let (task, started) = counting_task(Duration::from_secs(6), Duration::ZERO);
        tokio::task::yield_now().await;
        let live = task.liveness();
        assert!(live.is_live());

        task.stop().await;
        assert!(!live.is_live());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn drop_cancels() {
        let (task, started) = counting_task(Duration::from_secs(6), Duration::ZERO);
        tokio::task::yield_now().await;
        let live = task.liveness();
        drop(task);
        assert!(!live.is_live());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(started.load(Ordering::SeqCst), 1);
    }
}
