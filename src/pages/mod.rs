//! Page state for the menu and auth screens.
//!
//! Each page owns what its screen shows and exposes the user's actions as
//! async methods. The tracking screen is an [`OrderTracker`](crate::tracker::OrderTracker).

pub mod auth;
pub mod menu;

pub use auth::AuthPage;
pub use menu::{CartView, CategoryTab, MenuPage};
