//! # Inventory Backends
//!
//! Everything the POS core needs from the inventory store, behind one async trait.
//!
//! - [`ActorBackend`]: the in-process stores of [`PosSystem`](crate::lifecycle::PosSystem).
//! - [`HttpBackend`]: the shop's REST API.
//!
//! Calls are independent. Nothing ties a stock update to the log write that follows
//! it; grouping them is the job of the
//! [`TransactionCoordinator`](crate::transaction::TransactionCoordinator).

pub mod actor;
pub mod http;

pub use actor::ActorBackend;
pub use http::HttpBackend;

use crate::ledger_actor::LedgerError;
use crate::model::{
    Brand, BrandCreate, Category, CategoryCreate, Product, ProductDraft, ProductId,
    ProductUpdate, PurchaseEntry, PurchaseRecord, RecordId, ReturnEntry, ReturnRecord,
    SaleEntry, SaleRecord, WarrantySaleEntry, WarrantySaleRecord,
};
use crate::product_actor::ProductError;
use crate::taxonomy_actor::TaxonomyError;
use async_trait::async_trait;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error(transparent)]
    Product(#[from] ProductError),

    #[error(transparent)]
    Ledger(#[from] LedgerError),

    #[error(transparent)]
    Taxonomy(#[from] TaxonomyError),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-2xx answer, or an envelope with `success: false`.
    #[error("Server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

/// Remote inventory store.
#[async_trait]
pub trait InventoryBackend: Send + Sync {
    async fn list_products(&self) -> BackendResult<Vec<Product>>;

    async fn create_product(&self, draft: ProductDraft) -> BackendResult<Product>;

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> BackendResult<Product>;

    async fn delete_product(&self, id: ProductId) -> BackendResult<()>;

    /// Writes an absolute stock level.
    async fn update_stock(&self, id: ProductId, stock: u32) -> BackendResult<Product>;

    async fn list_brands(&self) -> BackendResult<Vec<Brand>>;

    async fn create_brand(&self, brand: BrandCreate) -> BackendResult<Brand>;

    async fn list_categories(&self) -> BackendResult<Vec<Category>>;

    async fn create_category(&self, category: CategoryCreate) -> BackendResult<Category>;

    async fn create_warranty_sale(&self, entry: WarrantySaleEntry) -> BackendResult<RecordId>;

    /// Legacy sale log, still written next to the warranty record.
    async fn log_sale(&self, entry: SaleEntry) -> BackendResult<RecordId>;

    async fn log_purchase(&self, entry: PurchaseEntry) -> BackendResult<RecordId>;

    async fn log_return(&self, entry: ReturnEntry) -> BackendResult<RecordId>;

    async fn list_sales(&self) -> BackendResult<Vec<SaleRecord>>;

    async fn list_warranty_sales(&self) -> BackendResult<Vec<WarrantySaleRecord>>;

    async fn list_purchases(&self) -> BackendResult<Vec<PurchaseRecord>>;

    async fn list_returns(&self) -> BackendResult<Vec<ReturnRecord>>;

    /// Empties every transaction log. Products are untouched.
    async fn clear_transactions(&self) -> BackendResult<()>;
}
