//! [`ActorEntity`] implementation for [`CartLine`].
//!
//! Lines are keyed by menu item. A second `Create` for the same item merges
//! into the existing line instead of failing, which is what "add to cart"
//! means.

use super::actions::{CartAction, CartActionResult};
use super::error::CartError;
use crate::model::{CartLine, CartLineCreate, CartLineUpdate, MenuItemId};
use actor_framework::ActorEntity;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for CartLine {
    type Id = MenuItemId;
    type Create = CartLineCreate;
    type Update = CartLineUpdate;
    type Action = CartAction;
    type ActionResult = CartActionResult;
    type Context = ();
    type Error = CartError;

    fn key_for(params: &CartLineCreate, _next_id: u32) -> MenuItemId {
        params.item.id
    }

    /// Starts a line; unavailable items are refused.
    fn from_create_params(_id: MenuItemId, params: CartLineCreate) -> Result<Self, CartError> {
        if !params.item.is_available {
            return Err(CartError::Unavailable(params.item.name));
        }
        Ok(Self {
            item: params.item,
            quantity: params.quantity.max(1),
        })
    }

    /// Adding an item already in the cart bumps its quantity, unless the item
    /// has since become unavailable.
    async fn on_merge(&mut self, params: CartLineCreate, _ctx: &()) -> Result<bool, CartError> {
        if !params.item.is_available {
            return Err(CartError::Unavailable(params.item.name));
        }
        self.quantity = self.quantity.saturating_add(params.quantity.max(1));
        Ok(true)
    }

    /// Sets the quantity, clamped to at least 1.
    async fn on_update(&mut self, update: CartLineUpdate, _ctx: &()) -> Result<(), CartError> {
        self.quantity = update.quantity.max(1);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: CartAction,
        _ctx: &(),
    ) -> Result<CartActionResult, CartError> {
        self.quantity = match action {
            CartAction::Increase => self.quantity.saturating_add(1),
            CartAction::Decrease => self.quantity.saturating_sub(1).max(1),
        };
        Ok(self.quantity)
    }
}
