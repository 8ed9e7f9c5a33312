//! # Checkout
//!
//! Turns the cart into a `POST /api/orders`. The request is only sent when the
//! cart has at least one line and both name and email are filled in; on
//! success the cart is cleared, on failure it is left as it was.

use crate::api::{ApiError, MenuApi};
use crate::cart_actor::CartError;
use crate::clients::CartClient;
use crate::model::{CartLine, Customer, Order, OrderItemRequest, PlaceOrderRequest};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// The customer fields of the checkout form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckoutForm {
    pub name: String,
    pub email: String,
    pub special_instructions: String,
}

impl CheckoutForm {
    /// Name and email are both non-empty. Whitespace counts as filled in.
    pub fn is_complete(&self) -> bool {
        !self.name.is_empty() && !self.email.is_empty()
    }
}

#[derive(Debug, thiserror::Error)]
pub enum CheckoutError {
    #[error("the cart is empty")]
    EmptyCart,

    #[error("name and email are required")]
    MissingCustomer,

    #[error("order rejected: {0}")]
    Rejected(#[source] ApiError),

    #[error(transparent)]
    Cart(#[from] CartError),
}

impl CheckoutError {
    /// The message shown above the menu.
    pub fn user_message(&self) -> String {
        match self {
            CheckoutError::Rejected(e) => e.user_message("Failed to place order."),
            other => other.to_string(),
        }
    }
}

/// Whether the place-order action is enabled.
pub fn can_place(lines: &[CartLine], form: &CheckoutForm) -> bool {
    !lines.is_empty() && form.is_complete()
}

/// The request body for `lines`. Delivery is free; blank instructions are left out.
pub fn build_request(lines: &[CartLine], form: &CheckoutForm) -> PlaceOrderRequest {
    PlaceOrderRequest {
        customer: Customer {
            name: form.name.clone(),
            email: form.email.clone(),
        },
        items: lines
            .iter()
            .map(|line| OrderItemRequest {
                menu_item_id: line.id(),
                quantity: line.quantity,
            })
            .collect(),
        special_instructions: Some(form.special_instructions.clone())
            .filter(|s| !s.is_empty()),
        delivery_fee_cents: 0,
    }
}

#[derive(Clone)]
pub struct Checkout {
    api: Arc<dyn MenuApi>,
    cart: CartClient,
}

impl Checkout {
    pub fn new(api: Arc<dyn MenuApi>, cart: CartClient) -> Self {
        Self { api, cart }
    }

    /// Places the order and empties the cart.
    #[instrument(skip(self, form))]
    pub async fn place_order(&self, form: &CheckoutForm) -> Result<Order, CheckoutError> {
        let lines = self.cart.lines().await?;
        if lines.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }
        if !form.is_complete() {
            return Err(CheckoutError::MissingCustomer);
        }

        let request = build_request(&lines, form);
        let order = self.api.place_order(&request).await.map_err(|e| {
            warn!(error = %e, "Order rejected");
            CheckoutError::Rejected(e)
        })?;

        let cleared = self.cart.clear().await?;
        info!(order = %order.order_number, lines = cleared, "Order placed");
        Ok(order)
    }
}
