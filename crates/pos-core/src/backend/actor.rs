use super::{BackendError, BackendResult, InventoryBackend};
use crate::clients::{BrandClient, CategoryClient, LedgerClient, ProductClient};
use crate::model::{
    Brand, BrandCreate, Category, CategoryCreate, Product, ProductDraft, ProductId,
    ProductUpdate, PurchaseEntry, PurchaseRecord, RecordId, ReturnEntry, ReturnRecord,
    SaleEntry, SaleRecord, WarrantySaleEntry, WarrantySaleRecord,
};
use async_trait::async_trait;
use resource_actor::ActorClient;
use tracing::info;

/// Backend over the in-process resource stores.
#[derive(Clone)]
pub struct ActorBackend {
    pub products: ProductClient,
    pub brands: BrandClient,
    pub categories: CategoryClient,
    pub warranty_sales: LedgerClient<WarrantySaleEntry>,
    pub sales: LedgerClient<SaleEntry>,
    pub purchases: LedgerClient<PurchaseEntry>,
    pub returns: LedgerClient<ReturnEntry>,
}

#[async_trait]
impl InventoryBackend for ActorBackend {
    async fn list_products(&self) -> BackendResult<Vec<Product>> {
        Ok(self.products.list().await?)
    }

    async fn create_product(&self, draft: ProductDraft) -> BackendResult<Product> {
        let id = self.products.create_product(draft).await?;
        self.products
            .get(id)
            .await?
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> BackendResult<Product> {
        Ok(self.products.update_product(id, update).await?)
    }

    async fn delete_product(&self, id: ProductId) -> BackendResult<()> {
        Ok(self.products.delete(id).await?)
    }

    async fn update_stock(&self, id: ProductId, stock: u32) -> BackendResult<Product> {
        Ok(self.products.set_stock(id, stock).await?.product)
    }

    async fn list_brands(&self) -> BackendResult<Vec<Brand>> {
        Ok(self.brands.list().await?)
    }

    async fn create_brand(&self, brand: BrandCreate) -> BackendResult<Brand> {
        let id = self.brands.create_brand(brand).await?;
        self.brands
            .get(id)
            .await?
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn list_categories(&self) -> BackendResult<Vec<Category>> {
        Ok(self.categories.list().await?)
    }

    async fn create_category(&self, category: CategoryCreate) -> BackendResult<Category> {
        let id = self.categories.create_category(category).await?;
        self.categories
            .get(id)
            .await?
            .ok_or_else(|| BackendError::NotFound(id.to_string()))
    }

    async fn create_warranty_sale(&self, entry: WarrantySaleEntry) -> BackendResult<RecordId> {
        Ok(self.warranty_sales.append(entry).await?)
    }

    async fn log_sale(&self, entry: SaleEntry) -> BackendResult<RecordId> {
        Ok(self.sales.append(entry).await?)
    }

    async fn log_purchase(&self, entry: PurchaseEntry) -> BackendResult<RecordId> {
        Ok(self.purchases.append(entry).await?)
    }

    async fn log_return(&self, entry: ReturnEntry) -> BackendResult<RecordId> {
        Ok(self.returns.append(entry).await?)
    }

    async fn list_sales(&self) -> BackendResult<Vec<SaleRecord>> {
        Ok(self.sales.list().await?)
    }

    async fn list_warranty_sales(&self) -> BackendResult<Vec<WarrantySaleRecord>> {
        Ok(self.warranty_sales.list().await?)
    }

    async fn list_purchases(&self) -> BackendResult<Vec<PurchaseRecord>> {
        Ok(self.purchases.list().await?)
    }

    async fn list_returns(&self) -> BackendResult<Vec<ReturnRecord>> {
        Ok(self.returns.list().await?)
    }

    async fn clear_transactions(&self) -> BackendResult<()> {
        let removed = self.warranty_sales.clear().await?
            + self.sales.clear().await?
            + self.purchases.clear().await?
            + self.returns.clear().await?;
        info!(removed, "Transaction logs cleared");
        Ok(())
    }
}
