//! Product management: the only place that mutates the [`UsedIdRegistry`].
use crate::backend::{BackendError, InventoryBackend};
use crate::identity::{
    format_common_id, format_unique_id, generate_incremental_unique_id, generate_unique_id,
    validate_common_id, validate_unique_id, IdValidation, UsedIdRegistry,
};
use crate::model::{
    Brand, BrandCreate, Category, CategoryCreate, Product, ProductDraft, ProductId,
    ProductUpdate,
};
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Invalid product id: {}", .0.message)]
    InvalidId(IdValidation),

    #[error("Product not found: {0}")]
    NotFound(ProductId),

    #[error(transparent)]
    Backend(#[from] BackendError),
}

fn ensure_valid(validation: IdValidation) -> Result<(), CatalogError> {
    if validation.is_valid {
        Ok(())
    } else {
        Err(CatalogError::InvalidId(validation))
    }
}

/// Cached product list plus the registry of Unique IDs it holds.
///
/// Ids are validated before anything is sent to the backend, and the registry is only
/// changed after the backend accepted the write.
pub struct Catalog<B: InventoryBackend> {
    backend: Arc<B>,
    registry: UsedIdRegistry,
    products: Vec<Product>,
}

impl<B: InventoryBackend> Catalog<B> {
    pub fn new(backend: Arc<B>) -> Self {
        Self {
            backend,
            registry: UsedIdRegistry::new(),
            products: Vec::new(),
        }
    }

    /// Fetches every product and rebuilds the registry from it.
    #[instrument(skip(self))]
    pub async fn load(&mut self) -> Result<&[Product], CatalogError> {
        let products = self.backend.list_products().await?;
        self.registry.initialize(&products);
        self.products = products;
        info!(products = self.products.len(), "Catalog loaded");
        Ok(&self.products)
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn find_by_unique_id(&self, unique_id: &str) -> Option<&Product> {
        let wanted = format_unique_id(unique_id);
        self.products
            .iter()
            .find(|p| p.unique_id.eq_ignore_ascii_case(&wanted))
    }

    /// Every product sharing `common_id`.
    pub fn units_of(&self, common_id: &str) -> Vec<&Product> {
        let wanted = format_common_id(common_id);
        self.products
            .iter()
            .filter(|p| p.common_id.eq_ignore_ascii_case(&wanted))
            .collect()
    }

    pub fn registry(&self) -> &UsedIdRegistry {
        &self.registry
    }

    pub fn validate_common_id(&self, id: &str) -> IdValidation {
        validate_common_id(&format_common_id(id))
    }

    /// Normalizes both `id` and `exclude_id` before checking.
    pub fn validate_unique_id(&self, id: &str, exclude_id: Option<&str>) -> IdValidation {
        let exclude_id = exclude_id.map(format_unique_id);
        validate_unique_id(
            &self.registry,
            &format_unique_id(id),
            exclude_id.as_deref(),
        )
    }

    /// Next sequential Unique ID for `common_id` among the ids in use.
    pub fn next_unique_id(&self, common_id: &str) -> String {
        generate_incremental_unique_id(&format_common_id(common_id), self.registry.iter())
    }

    /// Timestamped Unique ID for `common_id`; may collide, see [`generate_unique_id`].
    pub fn random_unique_id(&self, common_id: &str) -> String {
        generate_unique_id(&format_common_id(common_id))
    }

    #[instrument(skip(self, draft), fields(unique_id = %draft.unique_id))]
    pub async fn add_product(&mut self, mut draft: ProductDraft) -> Result<Product, CatalogError> {
        draft.common_id = format_common_id(&draft.common_id);
        draft.unique_id = format_unique_id(&draft.unique_id);
        ensure_valid(validate_common_id(&draft.common_id))?;
        ensure_valid(validate_unique_id(&self.registry, &draft.unique_id, None))?;

        let product = self.backend.create_product(draft).await?;
        self.registry.add(product.unique_id.clone());
        self.products.push(product.clone());
        info!(product_id = %product.id, "Product added");
        Ok(product)
    }

    /// Applies `update`. A new Unique ID is checked against every id except the
    /// product's current one.
    #[instrument(skip(self, update))]
    pub async fn edit_product(
        &mut self,
        id: ProductId,
        mut update: ProductUpdate,
    ) -> Result<Product, CatalogError> {
        let current_unique_id = self
            .product(id)
            .map(|p| p.unique_id.clone())
            .ok_or(CatalogError::NotFound(id))?;

        if let Some(common_id) = update.common_id.as_mut() {
            *common_id = format_common_id(common_id);
            ensure_valid(validate_common_id(common_id))?;
        }
        if let Some(unique_id) = update.unique_id.as_mut() {
            *unique_id = format_unique_id(unique_id);
            ensure_valid(validate_unique_id(
                &self.registry,
                unique_id,
                Some(current_unique_id.as_str()),
            ))?;
        }

        let updated = self.backend.update_product(id, update).await?;
        if updated.unique_id != current_unique_id {
            self.registry.remove(&current_unique_id);
            self.registry.add(updated.unique_id.clone());
            info!(from = %current_unique_id, to = %updated.unique_id, "Unique ID changed");
        }
        if let Some(slot) = self.products.iter_mut().find(|p| p.id == id) {
            *slot = updated.clone();
        }
        Ok(updated)
    }

    #[instrument(skip(self))]
    pub async fn delete_product(&mut self, id: ProductId) -> Result<(), CatalogError> {
        self.backend.delete_product(id).await?;
        match self.products.iter().position(|p| p.id == id) {
            Some(index) => {
                let removed = self.products.remove(index);
                self.registry.remove(&removed.unique_id);
                info!(product_id = %id, unique_id = %removed.unique_id, "Product deleted");
            }
            None => warn!(product_id = %id, "Deleted product was not in the loaded catalog"),
        }
        Ok(())
    }

    pub async fn brands(&self) -> Result<Vec<Brand>, CatalogError> {
        Ok(self.backend.list_brands().await?)
    }

    pub async fn add_brand(&self, brand: BrandCreate) -> Result<Brand, CatalogError> {
        Ok(self.backend.create_brand(brand).await?)
    }

    pub async fn categories(&self) -> Result<Vec<Category>, CatalogError> {
        Ok(self.backend.list_categories().await?)
    }

    pub async fn add_category(&self, category: CategoryCreate) -> Result<Category, CatalogError> {
        Ok(self.backend.create_category(category).await?)
    }
}
