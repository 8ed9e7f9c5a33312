//! # Cart Client
//!
//! Cart operations on top of a `ResourceClient<CartLine>`. Requests for items
//! that are not in the cart are no-ops rather than errors.
use crate::cart_actor::{CartAction, CartError};
use crate::model::{CartLine, CartLineCreate, CartLineUpdate, CartTotals, MenuItem, MenuItemId};
use actor_framework::{ActorClient, FrameworkError, ResourceClient};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the cart actor.
#[derive(Clone)]
pub struct CartClient {
    inner: ResourceClient<CartLine>,
}

impl CartClient {
    pub fn new(inner: ResourceClient<CartLine>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<CartLine> for CartClient {
    type Error = CartError;

    fn inner(&self) -> &ResourceClient<CartLine> {
        &self.inner
    }

    /// Recovers the cart's own error from an entity failure.
    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(source) => match source.downcast::<CartError>() {
                Ok(err) => *err,
                Err(other) => CartError::ActorCommunicationError(other.to_string()),
            },
            other => CartError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// `Ok(None)` for a line that is not in the cart.
fn absent_as_none<T>(result: Result<T, FrameworkError>) -> Result<Option<T>, CartError> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(FrameworkError::NotFound(_)) => Ok(None),
        Err(e) => Err(CartClient::map_error(e)),
    }
}

impl CartClient {
    /// Adds one of `item`: a new line with quantity 1, or +1 on the existing line.
    #[instrument(skip(self, item), fields(item = %item.id))]
    pub async fn add_item(&self, item: MenuItem) -> Result<MenuItemId, CartError> {
        debug!("Sending request");
        self.inner
            .create(CartLineCreate::one(item))
            .await
            .map_err(Self::map_error)
    }

    /// Sets a line's quantity; values below 1 become 1.
    ///
    /// Returns the updated line, or `None` when the item is not in the cart.
    #[instrument(skip(self))]
    pub async fn set_quantity(
        &self,
        id: MenuItemId,
        quantity: u32,
    ) -> Result<Option<CartLine>, CartError> {
        debug!("Sending request");
        absent_as_none(self.inner.update(id, CartLineUpdate { quantity }).await)
    }

    /// Bumps a line by one and returns its new quantity.
    #[instrument(skip(self))]
    pub async fn increase(&self, id: MenuItemId) -> Result<Option<u32>, CartError> {
        debug!("Sending request");
        absent_as_none(self.inner.perform_action(id, CartAction::Increase).await)
    }

    /// Lowers a line by one, stopping at 1, and returns its new quantity.
    #[instrument(skip(self))]
    pub async fn decrease(&self, id: MenuItemId) -> Result<Option<u32>, CartError> {
        debug!("Sending request");
        absent_as_none(self.inner.perform_action(id, CartAction::Decrease).await)
    }

    /// Drops a line. Returns whether it was there.
    #[instrument(skip(self))]
    pub async fn remove(&self, id: MenuItemId) -> Result<bool, CartError> {
        debug!("Sending request");
        Ok(absent_as_none(self.inner.delete(id).await)?.is_some())
    }

    /// Every line, in the order the items were first added.
    pub async fn lines(&self) -> Result<Vec<CartLine>, CartError> {
        self.list().await
    }

    pub async fn totals(&self) -> Result<CartTotals, CartError> {
        Ok(CartTotals::for_lines(&self.lines().await?))
    }

    /// Empties the cart and returns how many lines it had.
    #[instrument(skip(self))]
    pub async fn clear(&self) -> Result<usize, CartError> {
        debug!("Sending request");
        self.inner.clear().await.map_err(Self::map_error)
    }
}
