//! # Product Actor
//!
//! The inventory store: one [`ResourceActor`] holding every [`Product`], with stock
//! actions on top of CRUD.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](resource_actor::ActorEntity) implementation for [`Product`]
//! - [`error`] - [`ProductError`]
//! - [`actions`] - [`ProductAction`] and [`ProductActionResult`]
//! - [`new()`] - factory returning the actor and a [`ProductClient`]
//!
//! ## Stock actions
//!
//! ```rust,ignore
//! let stock = products.check_stock(id).await?;
//! // Absolute write: callers compute the new level from the stock they last read.
//! let change = products.set_stock(id, stock - 1).await?;
//! ```
//!
//! ## Usage
//!
//! ```rust
//! use pos_core::model::ProductDraft;
//! use pos_core::product_actor;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, products) = product_actor::new(32);
//!     tokio::spawn(actor.run(()));
//!
//!     let draft = ProductDraft::new("Action Camera", "CAM-1001", "CAM-1001-0001", 250.0, 4);
//!     let id = products.create_product(draft).await?;
//!     assert_eq!(products.check_stock(id).await?, 4);
//!     Ok(())
//! }
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::ProductClient;
use crate::model::Product;
use resource_actor::ResourceActor;

/// Creates the product store and its client.
pub fn new(buffer_size: usize) -> (ResourceActor<Product>, ProductClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, ProductClient::new(generic_client))
}
