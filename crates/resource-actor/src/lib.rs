//! # Resource Actor
//!
//! In-process resource store built on the actor model. Each resource type (products,
//! brands, sale logs, ...) lives in its own [`ResourceActor`] task that owns the data and
//! processes requests one at a time, so the state needs no locks.
//!
//! ## Pieces
//!
//! - [`ActorEntity`]: what a resource type implements (create/update payloads, custom
//!   actions, lifecycle hooks, injected context).
//! - [`ResourceActor`]: the server half. Owns a `BTreeMap` keyed by id and runs the loop.
//! - [`ResourceClient`]: the cloneable async handle. CRUD plus `list`, `clear` and
//!   `perform_action`.
//! - [`ActorClient`]: trait for domain clients that wrap a `ResourceClient` and map
//!   [`FrameworkError`] into their own error type.
//! - [`mock`]: a scripted stand-in for a resource, used to inject failures in tests.
//!
//! ## Request flow
//!
//! ```text
//! ResourceClient::create ──mpsc──▶ ResourceActor::run
//!        ▲                              │ from_create_params
//!        │                              │ on_create(ctx)
//!        └──────────oneshot─────────────┘ insert + respond
//! ```
//!
//! Ids are handed out by the actor from a `u32` counter and never reused, even after
//! [`ResourceClient::clear`].
//!
//! ## Example
//!
//! ```rust
//! use resource_actor::{ActorEntity, ResourceActor};
//! use async_trait::async_trait;
//!
//! #[derive(Clone, Debug)] struct Shelf { id: u32, slots: u32 }
//! #[derive(Debug)] struct ShelfCreate { slots: u32 }
//! #[derive(Debug)] struct ShelfUpdate;
//! #[derive(Debug)] enum ShelfAction {}
//! #[derive(Debug, thiserror::Error)] #[error("shelf error")] struct ShelfError;
//!
//! #[async_trait]
//! impl ActorEntity for Shelf {
//!     type Id = u32; type Create = ShelfCreate; type Update = ShelfUpdate;
//!     type Action = ShelfAction; type ActionResult = (); type Context = (); type Error = ShelfError;
//!     fn from_create_params(id: u32, params: ShelfCreate) -> Result<Self, Self::Error> {
//!         Ok(Self { id, slots: params.slots })
//!     }
//!     async fn on_update(&mut self, _: ShelfUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
//!     async fn handle_action(&mut self, _: ShelfAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let (actor, client) = ResourceActor::<Shelf>::new(8);
//!     tokio::spawn(actor.run(()));
//!     let id = client.create(ShelfCreate { slots: 4 }).await.unwrap();
//!     assert_eq!(client.list().await.unwrap().len(), 1);
//!     assert_eq!(client.get(id).await.unwrap().unwrap().slots, 4);
//! }
//! ```

pub mod actor;
pub mod client;
pub mod client_trait;
pub mod entity;
pub mod error;
pub mod message;
pub mod mock;

pub use actor::ResourceActor;
pub use client::ResourceClient;
pub use client_trait::ActorClient;
pub use entity::{ActorEntity, Immutable};
pub use error::FrameworkError;
pub use message::{ResourceRequest, Response};
