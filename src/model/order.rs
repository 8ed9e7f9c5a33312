/// Orders as the server reports them, plus the request that places one.
///
/// Everything here except [`PlaceOrderRequest`] is server-authoritative:
/// the client fetches it and replaces its copy wholesale, never edits it.
use crate::model::{CartTotals, MenuItemId};
use chrono::{DateTime, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// A non-empty order identifier.
///
/// Constructing one is the only way to reach the order endpoints, so an empty
/// identifier never turns into a network call.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct OrderNumber(String);

impl OrderNumber {
    /// Returns `None` for the empty string. Whitespace is kept as typed.
    pub fn new(raw: impl Into<String>) -> Option<Self> {
        let raw = raw.into();
        if raw.is_empty() {
            None
        } else {
            Some(Self(raw))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for OrderNumber {
    type Error = String;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        Self::new(raw).ok_or_else(|| "order number must not be empty".to_string())
    }
}

impl From<OrderNumber> for String {
    fn from(number: OrderNumber) -> Self {
        number.0
    }
}

impl Display for OrderNumber {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an order is in its lifecycle.
///
/// Statuses the client does not know about are kept verbatim in `Other` so
/// they still render.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    Pending,
    Confirmed,
    Preparing,
    Ready,
    OutForDelivery,
    Delivered,
    Cancelled,
    Other(String),
}

impl OrderStatus {
    /// Human-readable label: "OUT_FOR_DELIVERY" becomes "Out For Delivery".
    pub fn label(&self) -> String {
        format_status(&String::from(self.clone()))
    }
}

impl From<String> for OrderStatus {
    fn from(raw: String) -> Self {
        match raw.to_ascii_uppercase().replace(['-', ' '], "_").as_str() {
            "PENDING" => Self::Pending,
            "CONFIRMED" => Self::Confirmed,
            "PREPARING" => Self::Preparing,
            "READY" => Self::Ready,
            "OUT_FOR_DELIVERY" => Self::OutForDelivery,
            "DELIVERED" => Self::Delivered,
            "CANCELLED" | "CANCELED" => Self::Cancelled,
            _ => Self::Other(raw),
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Pending => "PENDING".into(),
            OrderStatus::Confirmed => "CONFIRMED".into(),
            OrderStatus::Preparing => "PREPARING".into(),
            OrderStatus::Ready => "READY".into(),
            OrderStatus::OutForDelivery => "OUT_FOR_DELIVERY".into(),
            OrderStatus::Delivered => "DELIVERED".into(),
            OrderStatus::Cancelled => "CANCELLED".into(),
            OrderStatus::Other(raw) => raw,
        }
    }
}

/// Capitalizes each `_`, `-` or space separated word of a raw status.
pub fn format_status(raw: &str) -> String {
    raw.split(['_', '-', ' '])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let lower = word.to_lowercase();
            let mut chars = lower.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub order_number: OrderNumber,
    pub status: OrderStatus,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub subtotal_cents: Option<u64>,
    #[serde(default)]
    pub tax_cents: Option<u64>,
    #[serde(default)]
    pub delivery_fee_cents: Option<u64>,
    #[serde(default)]
    pub total_cents: Option<u64>,
}

impl Order {
    /// The server's totals; a missing amount counts as zero.
    pub fn totals(&self) -> CartTotals {
        CartTotals {
            subtotal_cents: self.subtotal_cents.unwrap_or(0),
            tax_cents: self.tax_cents.unwrap_or(0),
            delivery_cents: self.delivery_fee_cents.unwrap_or(0),
            total_cents: self.total_cents.unwrap_or(0),
        }
    }
}

/// One entry of an order's status history, oldest first.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderEvent {
    #[serde(default)]
    pub status: Option<OrderStatus>,
    #[serde(default)]
    pub timestamp: Option<String>,
}

impl OrderEvent {
    /// Label for the timeline; events without a status read "Updated".
    pub fn label(&self) -> String {
        match &self.status {
            Some(status) => status.label(),
            None => format_status("UPDATED"),
        }
    }

    /// The event time, if the server sent one chrono can read.
    pub fn recorded_at(&self) -> Option<NaiveDateTime> {
        let raw = self.timestamp.as_deref()?;
        DateTime::parse_from_rfc3339(raw)
            .map(|t| t.naive_local())
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f"))
            .or_else(|_| NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S%.f"))
            .ok()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItemRequest {
    pub menu_item_id: MenuItemId,
    pub quantity: u32,
}

/// Body of `POST /api/orders`, built from the cart at checkout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaceOrderRequest {
    pub customer: Customer,
    pub items: Vec<OrderItemRequest>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub special_instructions: Option<String>,
    pub delivery_fee_cents: u64,
}
