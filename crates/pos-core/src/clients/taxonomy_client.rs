use crate::model::{Brand, BrandCreate, BrandId, Category, CategoryCreate, CategoryId};
use crate::taxonomy_actor::TaxonomyError;
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

#[derive(Clone)]
pub struct BrandClient {
    inner: ResourceClient<Brand>,
}

impl BrandClient {
    pub fn new(inner: ResourceClient<Brand>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_brand(&self, params: BrandCreate) -> Result<BrandId, TaxonomyError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_brand(&self, id: BrandId, params: BrandCreate) -> Result<Brand, TaxonomyError> {
        debug!("Sending request");
        self.inner.update(id, params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Brand> for BrandClient {
    type Error = TaxonomyError;

    fn inner(&self) -> &ResourceClient<Brand> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        TaxonomyError::ActorCommunicationError(e.to_string())
    }
}

#[derive(Clone)]
pub struct CategoryClient {
    inner: ResourceClient<Category>,
}

impl CategoryClient {
    pub fn new(inner: ResourceClient<Category>) -> Self {
        Self { inner }
    }

    #[instrument(skip(self))]
    pub async fn create_category(&self, params: CategoryCreate) -> Result<CategoryId, TaxonomyError> {
        debug!("Sending request");
        self.inner.create(params).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_category(
        &self,
        id: CategoryId,
        params: CategoryCreate,
    ) -> Result<Category, TaxonomyError> {
        debug!("Sending request");
        self.inner.update(id, params).await.map_err(Self::map_error)
    }
}

#[async_trait]
impl ActorClient<Category> for CategoryClient {
    type Error = TaxonomyError;

    fn inner(&self) -> &ResourceClient<Category> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        TaxonomyError::ActorCommunicationError(e.to_string())
    }
}
