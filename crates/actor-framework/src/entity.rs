//! # ActorEntity Trait
//!
//! The contract every resource managed by a [`ResourceActor`](crate::ResourceActor)
//! implements. Associated types pin down the id, the DTOs, the custom actions, the
//! injected context and the error type, so a cart actor can never be sent a
//! payload meant for some other resource.
//!
//! # Provided Methods (Hooks)
//!
//! - [`ActorEntity::key_for`] picks the key of a new entity (sequential by default)
//! - [`ActorEntity::on_create`] runs after construction, before insertion
//! - [`ActorEntity::on_merge`] runs when a create targets a key that already exists
//! - [`ActorEntity::on_delete`] runs before removal
//!
//! Only `from_create_params`, `on_update` and `handle_action` are required.

use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Trait that any resource entity must implement to be managed by `ResourceActor`.
///
/// # Async & Context
/// Hooks are `async` so they may call other actors or services. The `Context`
/// is injected through `ResourceActor::run()` rather than at construction time.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// The unique identifier for this entity.
    /// Must be convertible from u32 for automatic ID generation.
    type Id: Eq + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// The data required to create a new instance.
    type Create: Send + Sync + Debug;

    /// The data required to update an existing instance.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations.
    type Action: Send + Sync + Debug;

    /// The result type returned by custom actions.
    type ActionResult: Send + Sync + Debug;

    /// The runtime context (dependencies) injected into the actor.
    /// Use `()` if no dependencies are needed.
    type Context: Send + Sync;

    /// One error enum per actor, the union of everything its hooks can fail with.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Chooses the key a new entity is stored under.
    ///
    /// The default hands out the actor's next sequential id. Entities that are
    /// naturally keyed by their payload (a cart line by its menu item) override it.
    fn key_for(_params: &Self::Create, next_id: u32) -> Self::Id {
        Self::Id::from(next_id)
    }

    /// Construct the full entity from the key and payload.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    // --- Lifecycle Hooks (Async) ---

    /// Called after the entity is constructed and before it is stored.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Called when a create request targets a key that is already stored.
    ///
    /// Returning `Ok(false)` rejects the request with
    /// [`FrameworkError::AlreadyExists`](crate::FrameworkError::AlreadyExists).
    async fn on_merge(
        &mut self,
        _params: Self::Create,
        _ctx: &Self::Context,
    ) -> Result<bool, Self::Error> {
        Ok(false)
    }

    /// Called when an update request is received.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Called immediately before the entity is removed.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    // --- Action Handler (Async) ---

    /// Handle a custom resource-specific action.
    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}
