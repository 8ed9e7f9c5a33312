//! # Order Tracker
//!
//! Keeps a live view of one order by polling the API.
//!
//! ## States
//!
//! - **Idle**: no order number; no network activity.
//! - **Active**: an order number is set. One fetch runs right away, the next
//!   one a fixed interval after the previous one *completes*. Fetches never
//!   overlap.
//! - **Stopped**: torn down, or about to restart for a new order number. The
//!   pending tick is cancelled and a result still in flight is discarded.
//!
//! A failed poll is logged and otherwise ignored: the last good order and
//! events stay on screen and the next tick is scheduled as usual. A manual
//! [`search`](OrderTracker::search) is different; it reports the failure and
//! clears what was shown.
//!
//! ## Staleness
//!
//! The displayed state lives in a `watch` channel. A poll applies its result
//! inside the channel's write lock, and only if the [`Liveness`] token it was
//! scheduled with is still live. Stopping a poll cancels that token inside the
//! same lock, so once [`set_order_number`](OrderTracker::set_order_number) or
//! [`teardown`](OrderTracker::teardown) returns no older poll can touch the
//! state.

pub mod error;
pub mod fetcher;

pub use error::*;
pub use fetcher::*;

use crate::api::MenuApi;
use crate::model::{Order, OrderEvent, OrderNumber};
use actor_framework::{Liveness, PollTask};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Where the poll loop is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PollPhase {
    Idle,
    Active,
    Stopped,
}

/// What the tracking view displays.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TrackerState {
    pub order_number: Option<OrderNumber>,
    pub order: Option<Order>,
    pub events: Vec<OrderEvent>,
    /// True while a manual search is in flight.
    pub loading: bool,
    /// Set by a failed manual search; polls never set it.
    pub error: Option<String>,
}

pub struct OrderTracker {
    fetcher: OrderFetcher,
    interval: Duration,
    state: Arc<watch::Sender<TrackerState>>,
    poll: Option<PollTask>,
    phase: PollPhase,
}

impl OrderTracker {
    pub fn new(api: Arc<dyn MenuApi>, interval: Duration) -> Self {
        let (state, _) = watch::channel(TrackerState::default());
        Self {
            fetcher: OrderFetcher::new(api),
            interval,
            state: Arc::new(state),
            poll: None,
            phase: PollPhase::Idle,
        }
    }

    /// A snapshot of the displayed state.
    pub fn state(&self) -> TrackerState {
        self.state.borrow().clone()
    }

    /// Receives every state change from now on.
    pub fn subscribe(&self) -> watch::Receiver<TrackerState> {
        self.state.subscribe()
    }

    pub fn phase(&self) -> PollPhase {
        self.phase
    }

    /// Tracks `input` instead of the current order.
    ///
    /// A non-empty number (re)starts polling with an immediate fetch; the
    /// empty string stops polling. Setting the number already being polled
    /// changes nothing. The order on screen stays until a new one arrives.
    pub fn set_order_number(&mut self, input: &str) {
        let number = OrderNumber::new(input);
        if self.phase == PollPhase::Active && number == self.state.borrow().order_number {
            return;
        }

        self.cancel_poll();
        self.state.send_modify(|s| s.order_number = number.clone());

        match number {
            Some(number) => self.start_poll(number),
            None => self.phase = PollPhase::Idle,
        }
    }

    /// Loads the current order on demand.
    ///
    /// Unlike a poll, a failure is surfaced in [`TrackerState::error`] and
    /// clears the displayed order and events. Does nothing without an order
    /// number.
    pub async fn search(&mut self) -> Result<(), TrackError> {
        let Some(number) = self.state.borrow().order_number.clone() else {
            return Ok(());
        };

        self.state.send_modify(|s| {
            s.error = None;
            s.loading = true;
        });

        match self.fetcher.fetch(&number).await {
            Ok(snapshot) => {
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.order = Some(snapshot.order);
                    s.events = snapshot.events;
                });
                Ok(())
            }
            Err(e) => {
                let TrackError::LoadFailed { source } = &e;
                warn!(order = %number, error = %source, "Search failed");
                self.state.send_modify(|s| {
                    s.loading = false;
                    s.error = Some(e.to_string());
                    s.order = None;
                    s.events.clear();
                });
                Err(e)
            }
        }
    }

    /// Stops polling and waits for the poll task to exit.
    pub async fn teardown(&mut self) {
        if let Some(task) = self.poll.take() {
            self.state.send_if_modified(|_| {
                task.cancel();
                false
            });
            task.stop().await;
        }
        self.phase = PollPhase::Stopped;
        info!("Tracker torn down");
    }

    fn start_poll(&mut self, number: OrderNumber) {
        let fetcher = self.fetcher.clone();
        let state = self.state.clone();
        info!(order = %number, interval = ?self.interval, "Tracking order");

        let task = PollTask::spawn("order-tracker", self.interval, move |live| {
            let fetcher = fetcher.clone();
            let state = state.clone();
            let number = number.clone();
            async move { poll_once(&fetcher, &state, &number, &live).await }
        });
        self.poll = Some(task);
        self.phase = PollPhase::Active;
    }

    /// Cancels the running poll, if any, under the state lock.
    fn cancel_poll(&mut self) {
        if let Some(task) = self.poll.take() {
            self.state.send_if_modified(|_| {
                task.cancel();
                false
            });
            self.phase = PollPhase::Stopped;
        }
    }
}

impl Drop for OrderTracker {
    fn drop(&mut self) {
        self.cancel_poll();
    }
}

/// One poll cycle. Errors are logged and swallowed.
async fn poll_once(
    fetcher: &OrderFetcher,
    state: &watch::Sender<TrackerState>,
    number: &OrderNumber,
    live: &Liveness,
) {
    match fetcher.fetch(number).await {
        Ok(snapshot) => {
            let applied = state.send_if_modified(|s| {
                if !live.is_live() {
                    return false;
                }
                s.order = Some(snapshot.order);
                s.events = snapshot.events;
                true
            });
            if !applied {
                debug!(order = %number, "Discarded result of a stopped poll");
            }
        }
        Err(e) => {
            let TrackError::LoadFailed { source } = &e;
            warn!(order = %number, error = %source, "Poll failed, keeping last good state");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockMenuApi;
    use crate::model::OrderStatus;

    fn order(number: &str) -> Order {
        Order {
            order_number: OrderNumber::new(number).unwrap(),
            status: OrderStatus::Preparing,
            customer_name: None,
            customer_email: None,
            subtotal_cents: None,
            tax_cents: None,
            delivery_fee_cents: None,
            total_cents: None,
        }
    }

    /// A task whose own ticks do nothing; only its liveness token is used.
    fn idle_task() -> PollTask {
        PollTask::spawn("idle", Duration::from_secs(3600), |_| async {})
    }

    async fn settle() {
        for _ in 0..16 {
            tokio::task::yield_now().await;
        }
    }

    #[tokio::test]
    async fn test_live_poll_applies_its_result() {
        let api = Arc::new(MockMenuApi::new());
        api.order.set_ok(order("OE-1"));
        api.order_events.set_ok(vec![]);
        let fetcher = OrderFetcher::new(api);
        let (state, _) = watch::channel(TrackerState::default());

        let task = idle_task();
        let number = OrderNumber::new("OE-1").unwrap();
        poll_once(&fetcher, &state, &number, &task.liveness()).await;

        assert_eq!(state.borrow().order, Some(order("OE-1")));
        task.stop().await;
    }

    #[tokio::test]
    async fn test_fetch_completing_after_cancel_is_not_applied() {
        let api = Arc::new(MockMenuApi::new());
        api.order.set_ok(order("OE-OLD"));
        api.order_events.set_ok(vec![]);
        let gate = api.order.hold();
        let fetcher = OrderFetcher::new(api.clone());

        let current = TrackerState {
            order_number: OrderNumber::new("OE-NEW"),
            order: Some(order("OE-NEW")),
            ..Default::default()
        };
        let (state, _) = watch::channel(current.clone());
        let state = Arc::new(state);

        let task = idle_task();
        let poll = tokio::spawn({
            let fetcher = fetcher.clone();
            let state = state.clone();
            let live = task.liveness();
            async move {
                let number = OrderNumber::new("OE-OLD").unwrap();
                poll_once(&fetcher, &state, &number, &live).await
            }
        });

        settle().await;
        assert_eq!(api.order.calls(), 1);

        // the fetch is in flight when the poll is cancelled, and lands after
        state.send_if_modified(|_| {
            task.cancel();
            false
        });
        gate.release();
        poll.await.unwrap();

        assert_eq!(*state.borrow(), current);
    }
}
