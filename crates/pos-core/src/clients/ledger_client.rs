//! # Ledger Client
//!
//! Append and read access to one transaction log.
use crate::ledger_actor::LedgerError;
use crate::model::{LedgerEntry, RecordId, Recorded};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

pub struct LedgerClient<E: LedgerEntry> {
    inner: ResourceClient<Recorded<E>>,
}

impl<E: LedgerEntry> Clone for LedgerClient<E> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
        }
    }
}

impl<E: LedgerEntry> LedgerClient<E> {
    pub fn new(inner: ResourceClient<Recorded<E>>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self, entry), fields(log = E::KIND))]
    pub async fn append(&self, entry: E) -> Result<RecordId, LedgerError> {
        debug!("Appending record");
        self.inner.create(entry).await.map_err(Self::map_error)
    }

    /// Removes every record; returns how many there were.
    #[instrument(skip(self), fields(log = E::KIND))]
    pub async fn clear(&self) -> Result<usize, LedgerError> {
        debug!("Clearing log");
        self.inner.clear().await.map_err(Self::map_error)
    }
}

#[async_trait]
impl<E: LedgerEntry> ActorClient<Recorded<E>> for LedgerClient<E> {
    type Error = LedgerError;

    fn inner(&self) -> &ResourceClient<Recorded<E>> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        LedgerError::ActorCommunicationError(e.to_string())
    }
}
