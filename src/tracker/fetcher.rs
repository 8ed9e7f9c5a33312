//! # Order Fetcher
//!
//! One load of an order: the summary and the event history are requested
//! concurrently and returned together, or not at all. No retry.

use super::error::TrackError;
use crate::api::MenuApi;
use crate::model::{Order, OrderEvent, OrderNumber};
use std::sync::Arc;
use tracing::{debug, instrument};

/// An order together with its status history, oldest event first.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderSnapshot {
    pub order: Order,
    pub events: Vec<OrderEvent>,
}

#[derive(Clone)]
pub struct OrderFetcher {
    api: Arc<dyn MenuApi>,
}

impl OrderFetcher {
    pub fn new(api: Arc<dyn MenuApi>) -> Self {
        Self { api }
    }

    /// Loads `number`. Fails as soon as either request fails.
    #[instrument(skip(self, number), fields(order = %number))]
    pub async fn fetch(&self, number: &OrderNumber) -> Result<OrderSnapshot, TrackError> {
        let (order, events) =
            tokio::try_join!(self.api.order(number), self.api.order_events(number))?;
        debug!(status = ?order.status, events = events.len(), "Fetched");
        Ok(OrderSnapshot { order, events })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::mock::MockMenuApi;
    use crate::model::OrderStatus;
    use std::error::Error;

    fn order(number: &str) -> Order {
        Order {
            order_number: OrderNumber::new(number).unwrap(),
            status: OrderStatus::Preparing,
            customer_name: Some("Kai".into()),
            customer_email: None,
            subtotal_cents: Some(1300),
            tax_cents: Some(104),
            delivery_fee_cents: Some(0),
            total_cents: Some(1404),
        }
    }

    #[tokio::test]
    async fn test_fetch_returns_order_and_events() {
        let api = Arc::new(MockMenuApi::new());
        api.order.push_ok(order("OE-42"));
        api.order_events.push_ok(vec![
            OrderEvent {
                status: Some(OrderStatus::Confirmed),
                timestamp: Some("2024-05-01T18:00:00Z".into()),
            },
            OrderEvent {
                status: Some(OrderStatus::Preparing),
                timestamp: Some("2024-05-01T18:05:00Z".into()),
            },
        ]);

        let fetcher = OrderFetcher::new(api.clone());
        let snapshot = fetcher
            .fetch(&OrderNumber::new("OE-42").unwrap())
            .await
            .unwrap();

        assert_eq!(snapshot.order, order("OE-42"));
        assert_eq!(snapshot.events[0].status, Some(OrderStatus::Confirmed));
        assert_eq!(snapshot.events[1].status, Some(OrderStatus::Preparing));
        assert_eq!(api.order.calls(), 1);
        assert_eq!(api.order_events.calls(), 1);
    }

    #[tokio::test]
    async fn test_any_failure_is_normalized() {
        let api = Arc::new(MockMenuApi::new());
        api.order.push_ok(order("OE-42"));
        api.order_events.push_err(404, "Order not found");

        let err = OrderFetcher::new(api)
            .fetch(&OrderNumber::new("OE-42").unwrap())
            .await
            .unwrap_err();

        assert_eq!(err.to_string(), "Failed to load order.");
        let source = err.source().unwrap().to_string();
        assert!(source.contains("Order not found"), "{source}");
    }
}
