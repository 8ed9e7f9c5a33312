//! # Actor Framework
//!
//! Building blocks for keeping client-side state in tokio actors instead of
//! behind locks, plus the cancellable repeating task used for background
//! refreshes.
//!
//! ## Layers
//!
//! 1. **Entity** ([`ActorEntity`]): the business logic of one resource type.
//! 2. **Runtime** ([`ResourceActor`]): owns an insertion-ordered store and
//!    processes requests one at a time.
//! 3. **Interface** ([`ResourceClient`], [`ActorClient`]): cloneable, typed
//!    handles that send requests over an `mpsc` channel and await `oneshot`
//!    replies.
//! 4. **Background work** ([`poll`]): [`PollTask`] re-runs a tick a fixed delay
//!    after the previous one completes and hands every tick a [`Liveness`]
//!    token that goes dead on cancellation.
//!
//! ## Keyed creation
//!
//! By default every `Create` gets the next sequential id. An entity can key
//! itself from its payload instead ([`ActorEntity::key_for`]); a `Create` for a
//! key that is already stored then goes through [`ActorEntity::on_merge`], which
//! lets a cart line absorb a second "add" of the same item.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task.
//! - Requests are processed sequentially within an actor.
//! - An actor stops once every client handle has been dropped.
//!
//! ## Testing
//!
//! [`mock::MockClient`] answers requests from a queue of expectations, and
//! [`mock::create_mock_client`] exposes the raw request stream.

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;
pub mod poll;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::ActorEntity;
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
pub use poll::{Liveness, PollTask};
