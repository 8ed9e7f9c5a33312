#![doc(html_logo_url = "https://www.rust-lang.org/logos/rust-logo-128x128.png")]
#![doc(html_favicon_url = "https://www.rust-lang.org/favicon.ico")]
//! # Ocean Eats
//!
//! > **Menu, cart and live order tracking for the Ocean Eats API.**
//!
//! A client for a restaurant's menu API: browse the menu by category, build a
//! cart, place an order, follow it while the kitchen works on it, and log in
//! or out.
//!
//! ## 🏗️ Design
//!
//! ### The cart is an actor
//! The cart is a [`ResourceActor`](actor_framework::ResourceActor) of
//! [`CartLine`](model::CartLine)s keyed by menu item. Adding an item already
//! in the cart bumps its quantity instead of adding a second line. Totals are
//! derived from the lines on every read, never stored.
//!
//! ### The tracker polls
//! [`OrderTracker`](tracker::OrderTracker) fetches the order and its events
//! right away, then again a fixed interval after each fetch completes. Failed
//! polls keep the last good state. Changing the order number or tearing the
//! tracker down cancels the pending poll, and a result still in flight is
//! dropped instead of applied.
//!
//! ### One seam to the server
//! Everything remote goes through the [`MenuApi`](api::MenuApi) trait.
//! [`HttpMenuApi`](api::HttpMenuApi) is the real one;
//! [`MockMenuApi`](api::mock::MockMenuApi) scripts replies for tests.
//!
//! ## 🗺️ Module Tour
//!
//! - [`model`]: wire types and cart arithmetic.
//! - [`api`]: the `MenuApi` trait, its HTTP implementation and the mock.
//! - [`cart_actor`], [`clients`]: the cart actor and its typed client.
//! - [`checkout`]: turning the cart into an order.
//! - [`tracker`]: polling one order.
//! - [`session`]: who is logged in.
//! - [`pages`], [`render`], [`routes`]: page state, text screens, URL routing.
//! - [`config`], [`lifecycle`]: environment config, wiring and shutdown, logging.
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! OCEAN_API_URL=http://localhost:3001 cargo run -- /
//! cargo run -- "/track?order=OE-42"
//! ```

pub mod api;
pub mod cart_actor;
pub mod checkout;
pub mod clients;
pub mod config;
pub mod lifecycle;
pub mod model;
pub mod pages;
pub mod render;
pub mod routes;
pub mod session;
pub mod tracker;
