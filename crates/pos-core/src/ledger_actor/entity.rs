use super::error::LedgerError;
use crate::model::{LedgerEntry, RecordId, Recorded};
use async_trait::async_trait;
use resource_actor::{ActorEntity, Immutable};

#[async_trait]
impl<E: LedgerEntry> ActorEntity for Recorded<E> {
    type Id = RecordId;
    type Create = E;
    type Update = Immutable;
    type Action = Immutable;
    type ActionResult = ();
    type Context = ();
    type Error = LedgerError;

    fn from_create_params(id: RecordId, entry: E) -> Result<Self, Self::Error> {
        if entry.quantity() == 0 {
            return Err(LedgerError::ZeroQuantity { kind: E::KIND });
        }
        Ok(Recorded { id, entry })
    }

    async fn on_update(&mut self, update: Immutable, _ctx: &()) -> Result<(), Self::Error> {
        match update {}
    }

    async fn handle_action(&mut self, action: Immutable, _ctx: &()) -> Result<(), Self::Error> {
        match action {}
    }
}
