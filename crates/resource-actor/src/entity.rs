use async_trait::async_trait;
use std::fmt::{Debug, Display};
use std::hash::Hash;

/// Contract a resource type fulfils to be stored by a [`ResourceActor`](crate::ResourceActor).
///
/// Associated types pin every payload to its resource: a sale log cannot be sent a
/// product update, the compiler rejects it.
///
/// # Context
/// Hooks receive `&Self::Context`, handed to `run()` after construction. Resources that
/// need nothing use `()`.
///
/// # Immutable resources
/// Append-only resources (transaction logs) use [`Immutable`] for `Update` and
/// `Action`. The hooks then reduce to `match update {}` and no caller can build a request
/// that mutates a stored record.
#[async_trait]
pub trait ActorEntity: Clone + Send + Sync + 'static {
    /// Identifier assigned by the actor from its counter.
    /// `Ord` keeps listings in creation order.
    type Id: Eq + Ord + Hash + Clone + Send + Sync + Display + Debug + From<u32>;

    /// Creation payload.
    type Create: Send + Sync + Debug;

    /// Partial update payload.
    type Update: Send + Sync + Debug;

    /// Resource-specific operations (e.g. setting stock).
    type Action: Send + Sync + Debug;

    /// Result of an [`Self::Action`].
    type ActionResult: Send + Sync + Debug;

    /// Dependencies injected at `run()`.
    type Context: Send + Sync;

    /// One error enum per resource. Boxed into [`FrameworkError::EntityError`] on the way
    /// back to the client.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the entity from its assigned id and payload. Runs before `on_create`.
    fn from_create_params(id: Self::Id, params: Self::Create) -> Result<Self, Self::Error>;

    /// Runs after construction, before the entity is stored. An error discards it.
    async fn on_create(&mut self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    /// Applies an update in place.
    async fn on_update(
        &mut self,
        update: Self::Update,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error>;

    /// Runs before removal. An error keeps the entity.
    async fn on_delete(&self, _ctx: &Self::Context) -> Result<(), Self::Error> {
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: Self::Action,
        _ctx: &Self::Context,
    ) -> Result<Self::ActionResult, Self::Error>;
}

/// Payload type with no values, for resources that accept no updates or actions.
///
/// `match immutable {}` is exhaustive, so hooks taking it need no body.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Immutable {}
