use crate::{ActorEntity, FrameworkError, ResourceClient};
use async_trait::async_trait;

/// Shared read/delete surface for domain clients wrapping a [`ResourceClient`].
///
/// Implementors supply `inner()` and `map_error()`; `get`, `list` and `delete` come for
/// free with the domain error type.
///
/// ```rust
/// use resource_actor::{ActorClient, ActorEntity, FrameworkError, ResourceClient};
/// use async_trait::async_trait;
///
/// #[derive(Clone, Debug)] struct Bin { id: u32 }
/// #[derive(Debug)] struct BinCreate;
/// #[derive(Debug)] struct BinUpdate;
/// #[derive(Debug)] enum BinAction {}
/// #[derive(Debug, thiserror::Error)] #[error("{0}")] struct BinError(String);
/// impl From<String> for BinError { fn from(s: String) -> Self { BinError(s) } }
///
/// #[async_trait]
/// impl ActorEntity for Bin {
///     type Id = u32; type Create = BinCreate; type Update = BinUpdate;
///     type Action = BinAction; type ActionResult = (); type Context = (); type Error = BinError;
///     fn from_create_params(id: u32, _: BinCreate) -> Result<Self, Self::Error> { Ok(Self { id }) }
///     async fn on_update(&mut self, _: BinUpdate, _: &()) -> Result<(), Self::Error> { Ok(()) }
///     async fn handle_action(&mut self, _: BinAction, _: &()) -> Result<(), Self::Error> { Ok(()) }
/// }
///
/// struct BinClient { inner: ResourceClient<Bin> }
///
/// #[async_trait]
/// impl ActorClient<Bin> for BinClient {
///     type Error = BinError;
///     fn inner(&self) -> &ResourceClient<Bin> { &self.inner }
///     fn map_error(e: FrameworkError) -> Self::Error { BinError(e.to_string()) }
/// }
///
/// async fn usage(client: BinClient) {
///     let _ = client.list().await;
///     let _ = client.delete(1).await;
/// }
/// ```
#[async_trait]
pub trait ActorClient<T: ActorEntity>: Send + Sync {
    /// Domain error type of the client.
    type Error: From<String> + Send + Sync;

    fn inner(&self) -> &ResourceClient<T>;

    fn map_error(e: FrameworkError) -> Self::Error;

    #[tracing::instrument(skip(self))]
    async fn get(&self, id: T::Id) -> Result<Option<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().get(id).await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn list(&self) -> Result<Vec<T>, Self::Error> {
        tracing::debug!("Sending request");
        self.inner().list().await.map_err(Self::map_error)
    }

    #[tracing::instrument(skip(self))]
    async fn delete(&self, id: T::Id) -> Result<(), Self::Error> {
        tracing::debug!("Sending request");
        self.inner().delete(id).await.map_err(Self::map_error)
    }
}
