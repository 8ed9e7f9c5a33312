//! # Storefront Lifecycle
//!
//! Starting, wiring and stopping the pieces of the app.
//!
//! The [`Storefront`] owns the one actor ([`cart_actor`](crate::cart_actor))
//! and the shared API handle, and hands out pages built on top of them:
//!
//! ```rust,ignore
//! let storefront = Storefront::new(&config)?;
//! let mut menu = storefront.menu_page();
//! menu.load().await;
//! // ...
//! storefront.shutdown().await?;
//! ```
//!
//! ## Shutdown
//!
//! 1. Drop every client handle, closing the cart actor's channel.
//! 2. The actor sees `recv()` return `None` and leaves its loop.
//! 3. Await the actor task.
//!
//! Pages hold client clones too, so drop them before calling
//! [`Storefront::shutdown`]. An [`OrderTracker`](crate::tracker::OrderTracker)
//! holds no actor handle but should be torn down first so its poll task exits.
//!
//! ## Tracing
//!
//! [`setup_tracing`] installs the subscriber once, at startup.

pub mod storefront;
pub mod tracing;

pub use storefront::*;
pub use tracing::*;
