//! # Cart Actor
//!
//! Holds the shopping cart in a [`ResourceActor`] so it is only ever mutated
//! from one task, one request at a time.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](actor_framework::ActorEntity) implementation for [`CartLine`]
//! - [`error`] - [`CartError`]
//! - [`actions`] - [`CartAction`] for the quantity steppers
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use ocean_eats::cart_actor;
//! use ocean_eats::model::{MenuItem, MenuItemId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, cart) = cart_actor::new();
//!     tokio::spawn(actor.run(()));
//!
//!     let item = MenuItem {
//!         id: MenuItemId(1),
//!         name: "Miso Soup".into(),
//!         description: None,
//!         price_cents: 450,
//!         image_url: None,
//!         is_available: true,
//!         category_id: Some(2),
//!     };
//!     cart.add_item(item.clone()).await?;
//!     cart.add_item(item).await?;
//!     assert_eq!(cart.lines().await?[0].quantity, 2);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::CartClient;
use crate::model::CartLine;
use actor_framework::ResourceActor;

/// Creates a new cart actor and its client.
pub fn new() -> (ResourceActor<CartLine>, CartClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, CartClient::new(generic_client))
}
