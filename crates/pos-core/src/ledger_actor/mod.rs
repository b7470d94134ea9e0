//! # Ledger Actors
//!
//! Append-only transaction logs: warranty sales, the legacy sale log, purchases and
//! returns. One generic [`ActorEntity`](resource_actor::ActorEntity) implementation covers
//! every [`Recorded<E>`]; each log is its own [`ResourceActor`] task.
//!
//! Records cannot be updated. `Update` and `Action` are
//! [`Immutable`](resource_actor::Immutable), so there is no request a caller could send
//! to change one. Logs can only grow, or be cleared as a whole by an administrator.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::LedgerClient;
use crate::model::{LedgerEntry, Recorded};
use resource_actor::ResourceActor;

/// Creates a log for entries of type `E` and its client.
pub fn new<E: LedgerEntry>(buffer_size: usize) -> (ResourceActor<Recorded<E>>, LedgerClient<E>) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, LedgerClient::new(generic_client))
}
