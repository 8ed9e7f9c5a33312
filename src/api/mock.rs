//! # Scripted API
//!
//! [`MockMenuApi`] implements [`MenuApi`] from per-operation [`Script`]s, so the
//! fetcher, tracker, checkout and session can be tested without a server.
//!
//! - Replies are served in the order they were queued; the last one keeps
//!   being served once the queue is down to it.
//! - Every call is counted, so a test can prove a call was *not* made.
//! - [`Script::hold`] parks calls on a [`Gate`] until the test releases them,
//!   which keeps a response in flight while the test changes state around it.
//!
//! ```rust
//! use ocean_eats::api::{mock::MockMenuApi, MenuApi};
//! use ocean_eats::model::Category;
//!
//! #[tokio::main]
//! async fn main() {
//!     let api = MockMenuApi::new();
//!     api.categories.push_ok(vec![Category { id: 1, name: "Sushi".into() }]);
//!     api.logout.push_err(503, "maintenance");
//!
//!     assert_eq!(api.categories().await.unwrap()[0].name, "Sushi");
//!     assert!(api.logout().await.is_err());
//!     assert_eq!(api.categories.calls(), 1);
//! }
//! ```

use super::{ApiError, MenuApi};
use crate::model::{
    Category, CurrentUser, LoginRequest, MenuItem, Order, OrderEvent, OrderNumber,
    PlaceOrderRequest,
};
use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Semaphore;

#[derive(Debug, Clone)]
enum Reply<T> {
    Ok(T),
    Fail { status: u16, message: String },
}

/// Scripted replies for one operation.
pub struct Script<T> {
    replies: Mutex<VecDeque<Reply<T>>>,
    calls: AtomicUsize,
    gate: Mutex<Option<Arc<Semaphore>>>,
}

/// Holds calls of a [`Script`] until released.
#[derive(Clone)]
pub struct Gate(Arc<Semaphore>);

impl Gate {
    /// Lets one held call through.
    pub fn release(&self) {
        self.0.add_permits(1);
    }
}

impl<T: Clone> Script<T> {
    fn new() -> Self {
        Self {
            replies: Mutex::new(VecDeque::new()),
            calls: AtomicUsize::new(0),
            gate: Mutex::new(None),
        }
    }

    fn queue(&self) -> std::sync::MutexGuard<'_, VecDeque<Reply<T>>> {
        self.replies.lock().expect("mock script poisoned")
    }

    pub fn push_ok(&self, value: T) -> &Self {
        self.queue().push_back(Reply::Ok(value));
        self
    }

    /// Queues an `ApiError::Server` reply.
    pub fn push_err(&self, status: u16, message: &str) -> &Self {
        self.queue().push_back(Reply::Fail {
            status,
            message: message.to_string(),
        });
        self
    }

    /// Drops anything queued and serves `value` from now on.
    pub fn set_ok(&self, value: T) {
        let mut queue = self.queue();
        queue.clear();
        queue.push_back(Reply::Ok(value));
    }

    /// Drops anything queued and fails from now on.
    pub fn set_err(&self, status: u16, message: &str) {
        let mut queue = self.queue();
        queue.clear();
        queue.push_back(Reply::Fail {
            status,
            message: message.to_string(),
        });
    }

    /// How many times the operation was called.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// Parks every later call until the returned gate releases it.
    ///
    /// The reply is picked when the call starts, not when it is released.
    pub fn hold(&self) -> Gate {
        let semaphore = Arc::new(Semaphore::new(0));
        *self.gate.lock().expect("mock gate poisoned") = Some(semaphore.clone());
        Gate(semaphore)
    }

    /// Stops parking new calls. Calls already parked stay parked until released.
    pub fn unhold(&self) {
        *self.gate.lock().expect("mock gate poisoned") = None;
    }

    async fn next(&self) -> Result<T, ApiError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let reply = {
            let mut queue = self.queue();
            if queue.len() > 1 {
                queue.pop_front()
            } else {
                queue.front().cloned()
            }
        };

        let gate = self.gate.lock().expect("mock gate poisoned").clone();
        if let Some(gate) = gate {
            if let Ok(permit) = gate.acquire().await {
                permit.forget();
            }
        }

        match reply {
            Some(Reply::Ok(value)) => Ok(value),
            Some(Reply::Fail { status, message }) => Err(ApiError::Server { status, message }),
            None => Err(ApiError::Server {
                status: 404,
                message: "no scripted reply".to_string(),
            }),
        }
    }
}

/// A [`MenuApi`] answering from scripts.
pub struct MockMenuApi {
    pub categories: Script<Vec<Category>>,
    /// Filtered by `category_id` on the way out, like the server does.
    pub menu_items: Script<Vec<MenuItem>>,
    pub place_order: Script<Order>,
    pub order: Script<Order>,
    pub order_events: Script<Vec<OrderEvent>>,
    pub login: Script<()>,
    pub logout: Script<()>,
    pub current_user: Script<Option<CurrentUser>>,
    placed: Mutex<Vec<PlaceOrderRequest>>,
    menu_filters: Mutex<Vec<Option<u32>>>,
    requested_orders: Mutex<Vec<OrderNumber>>,
}

impl MockMenuApi {
    /// A mock with nothing scripted; every call fails with a 404 until scripted.
    pub fn new() -> Self {
        Self {
            categories: Script::new(),
            menu_items: Script::new(),
            place_order: Script::new(),
            order: Script::new(),
            order_events: Script::new(),
            login: Script::new(),
            logout: Script::new(),
            current_user: Script::new(),
            placed: Mutex::new(Vec::new()),
            menu_filters: Mutex::new(Vec::new()),
            requested_orders: Mutex::new(Vec::new()),
        }
    }

    /// Every order placement request received, in order.
    pub fn placed_orders(&self) -> Vec<PlaceOrderRequest> {
        self.placed.lock().expect("mock log poisoned").clone()
    }

    /// The category filter of every menu request, in order.
    pub fn menu_filters(&self) -> Vec<Option<u32>> {
        self.menu_filters.lock().expect("mock log poisoned").clone()
    }

    /// The order number of every `order` request, in order.
    pub fn requested_orders(&self) -> Vec<OrderNumber> {
        self.requested_orders.lock().expect("mock log poisoned").clone()
    }
}

impl Default for MockMenuApi {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MenuApi for MockMenuApi {
    async fn categories(&self) -> Result<Vec<Category>, ApiError> {
        self.categories.next().await
    }

    async fn menu_items(&self, category_id: Option<u32>) -> Result<Vec<MenuItem>, ApiError> {
        self.menu_filters
            .lock()
            .expect("mock log poisoned")
            .push(category_id);
        let items = self.menu_items.next().await?;
        Ok(match category_id {
            Some(id) => items
                .into_iter()
                .filter(|item| item.category_id == Some(id))
                .collect(),
            None => items,
        })
    }

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<Order, ApiError> {
        self.placed
            .lock()
            .expect("mock log poisoned")
            .push(request.clone());
        self.place_order.next().await
    }

    async fn order(&self, number: &OrderNumber) -> Result<Order, ApiError> {
        self.requested_orders
            .lock()
            .expect("mock log poisoned")
            .push(number.clone());
        self.order.next().await
    }

    async fn order_events(&self, _number: &OrderNumber) -> Result<Vec<OrderEvent>, ApiError> {
        self.order_events.next().await
    }

    async fn login(&self, _request: &LoginRequest) -> Result<(), ApiError> {
        self.login.next().await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.logout.next().await
    }

    async fn current_user(&self) -> Result<Option<CurrentUser>, ApiError> {
        self.current_user.next().await
    }
}
