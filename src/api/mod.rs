//! # Menu API
//!
//! The remote HTTP/JSON service this client presents. [`MenuApi`] is the seam:
//! [`HttpMenuApi`] talks to the real server, [`mock::MockMenuApi`] answers from
//! scripted replies in tests.
//!
//! | Operation | Method & path |
//! |---|---|
//! | [`MenuApi::categories`] | `GET /api/categories` |
//! | [`MenuApi::menu_items`] | `GET /api/menu-items[?category_id=N]` |
//! | [`MenuApi::place_order`] | `POST /api/orders` |
//! | [`MenuApi::order`] | `GET /api/orders/{order_number}` |
//! | [`MenuApi::order_events`] | `GET /api/orders/{order_number}/events` |
//! | [`MenuApi::login`] | `POST /api/auth/login` |
//! | [`MenuApi::logout`] | `POST /api/auth/logout` |
//! | [`MenuApi::current_user`] | `GET /api/auth/me` |

pub mod http;
pub mod mock;

pub use http::HttpMenuApi;

use crate::model::{
    Category, CurrentUser, LoginRequest, MenuItem, Order, OrderEvent, OrderNumber,
    PlaceOrderRequest,
};
use async_trait::async_trait;

/// Path segments of every endpoint, relative to the configured base URL.
pub mod paths {
    pub const API: &str = "api";
    pub const CATEGORIES: [&str; 2] = [API, "categories"];
    pub const MENU_ITEMS: [&str; 2] = [API, "menu-items"];
    pub const ORDERS: [&str; 2] = [API, "orders"];
    pub const EVENTS: &str = "events";
    pub const LOGIN: [&str; 3] = [API, "auth", "login"];
    pub const LOGOUT: [&str; 3] = [API, "auth", "logout"];
    pub const ME: [&str; 3] = [API, "auth", "me"];

    /// Query parameter filtering menu items by category.
    pub const CATEGORY_ID: &str = "category_id";
}

/// Errors from talking to the API.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("HTTP {status}: {message}")]
    Server { status: u16, message: String },

    #[error("network: {0}")]
    Network(#[from] reqwest::Error),

    #[error("decode: {0}")]
    Decode(String),

    #[error("invalid url: {0}")]
    Url(String),
}

impl ApiError {
    /// The server's own explanation, when it sent one.
    pub fn server_message(&self) -> Option<&str> {
        match self {
            ApiError::Server { message, .. } if !message.trim().is_empty() => Some(message),
            _ => None,
        }
    }

    /// The message to show a user, or `fallback` when there is nothing better.
    pub fn user_message(&self, fallback: &str) -> String {
        self.server_message().unwrap_or(fallback).to_string()
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Server { status, .. } => Some(*status),
            ApiError::Network(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}

/// Every remote operation the client consumes.
#[async_trait]
pub trait MenuApi: Send + Sync + 'static {
    async fn categories(&self) -> Result<Vec<Category>, ApiError>;

    /// Menu items, optionally restricted to one category.
    async fn menu_items(&self, category_id: Option<u32>) -> Result<Vec<MenuItem>, ApiError>;

    async fn place_order(&self, request: &PlaceOrderRequest) -> Result<Order, ApiError>;

    async fn order(&self, number: &OrderNumber) -> Result<Order, ApiError>;

    /// Status history, oldest first. A `null` body is an empty history.
    async fn order_events(&self, number: &OrderNumber) -> Result<Vec<OrderEvent>, ApiError>;

    /// Establishes a session. The credential lives in the HTTP client's cookie jar.
    async fn login(&self, request: &LoginRequest) -> Result<(), ApiError>;

    async fn logout(&self) -> Result<(), ApiError>;

    /// The session's user, or `None` when there is no session (401/404).
    async fn current_user(&self) -> Result<Option<CurrentUser>, ApiError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn user_message_prefers_server_text() {
        let err = ApiError::Server {
            status: 422,
            message: "Email is invalid".into(),
        };
        assert_eq!(err.user_message("Failed to place order."), "Email is invalid");
        assert_eq!(err.status(), Some(422));
    }

    #[test]
    fn user_message_falls_back_on_blank_body() {
        let err = ApiError::Server {
            status: 500,
            message: "  ".into(),
        };
        assert_eq!(err.user_message("Login failed."), "Login failed.");
        let err = ApiError::Decode("eof".into());
        assert_eq!(err.user_message("Login failed."), "Login failed.");
    }
}
