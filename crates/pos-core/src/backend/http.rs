use super::{BackendError, BackendResult, InventoryBackend};
use crate::config::PosConfig;
use crate::model::{
    Brand, BrandCreate, Category, CategoryCreate, Product, ProductDraft, ProductId,
    ProductUpdate, PurchaseEntry, PurchaseRecord, RecordId, ReturnEntry, ReturnRecord,
    SaleEntry, SaleRecord, WarrantySaleEntry, WarrantySaleRecord,
};
use async_trait::async_trait;
use reqwest::{Client, Method};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// `{success, data, error}` wrapper every API answer comes in.
#[derive(Deserialize)]
struct ApiResponse<T> {
    success: bool,
    data: Option<T>,
    error: Option<String>,
}

#[derive(Deserialize)]
struct Created {
    id: RecordId,
}

#[derive(Serialize)]
struct StockBody {
    stock: u32,
}

/// Unpacks an API answer. `Ok(None)` means success without data.
pub(crate) fn decode_envelope<T: DeserializeOwned>(
    status: u16,
    body: &str,
) -> BackendResult<Option<T>> {
    let success_status = (200..300).contains(&status);
    let parsed = serde_json::from_str::<ApiResponse<T>>(body);

    if !success_status {
        let message = parsed
            .ok()
            .and_then(|envelope| envelope.error)
            .unwrap_or_else(|| body.to_string());
        return Err(if status == 404 {
            BackendError::NotFound(message)
        } else {
            BackendError::Rejected { status, message }
        });
    }

    let envelope = parsed.map_err(|e| BackendError::InvalidResponse(e.to_string()))?;
    if !envelope.success {
        return Err(BackendError::Rejected {
            status,
            message: envelope.error.unwrap_or_else(|| "Unknown error".into()),
        });
    }
    Ok(envelope.data)
}

/// Backend over the shop's REST API. Paths live under `api/`.
#[derive(Debug, Clone)]
pub struct HttpBackend {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl HttpBackend {
    pub fn new(base_url: &str, token: Option<String>, timeout: Duration) -> BackendResult<Self> {
        let client = Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
        })
    }

    pub fn from_config(config: &PosConfig) -> BackendResult<Self> {
        Self::new(
            &config.api_base_url,
            config.api_token.clone(),
            config.request_timeout,
        )
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    #[instrument(skip(self, body), fields(base_url = %self.base_url))]
    async fn send<T, B>(&self, method: Method, path: &str, body: Option<&B>) -> BackendResult<Option<T>>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        let url = format!("{}/api/{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(token) = &self.token {
            req = req.bearer_auth(token);
        }
        if let Some(body) = body {
            req = req.json(body);
        }
        let response = req.send().await?;
        let status = response.status().as_u16();
        let text = response.text().await?;
        debug!(status, "Response received");

        let decoded = decode_envelope(status, &text);
        if let Err(e) = &decoded {
            warn!(status, error = %e, "Request failed");
        }
        decoded
    }

    async fn fetch<T: DeserializeOwned>(&self, path: &str) -> BackendResult<T> {
        self.send::<T, ()>(Method::GET, path, None)
            .await?
            .ok_or_else(|| BackendError::InvalidResponse(format!("GET {path}: missing data")))
    }

    async fn submit<T, B>(&self, method: Method, path: &str, body: &B) -> BackendResult<T>
    where
        T: DeserializeOwned,
        B: Serialize + Sync,
    {
        self.send(method.clone(), path, Some(body))
            .await?
            .ok_or_else(|| BackendError::InvalidResponse(format!("{method} {path}: missing data")))
    }

    async fn append<B: Serialize + Sync>(&self, path: &str, entry: &B) -> BackendResult<RecordId> {
        let created: Created = self.submit(Method::POST, path, entry).await?;
        Ok(created.id)
    }
}

#[async_trait]
impl InventoryBackend for HttpBackend {
    async fn list_products(&self) -> BackendResult<Vec<Product>> {
        self.fetch("products").await
    }

    async fn create_product(&self, draft: ProductDraft) -> BackendResult<Product> {
        self.submit(Method::POST, "products", &draft).await
    }

    async fn update_product(&self, id: ProductId, update: ProductUpdate) -> BackendResult<Product> {
        self.submit(Method::PUT, &format!("products/{}", id.0), &update)
            .await
    }

    async fn delete_product(&self, id: ProductId) -> BackendResult<()> {
        self.send::<serde_json::Value, ()>(Method::DELETE, &format!("products/{}", id.0), None)
            .await?;
        Ok(())
    }

    async fn update_stock(&self, id: ProductId, stock: u32) -> BackendResult<Product> {
        self.submit(
            Method::PUT,
            &format!("products/{}/stock", id.0),
            &StockBody { stock },
        )
        .await
    }

    async fn list_brands(&self) -> BackendResult<Vec<Brand>> {
        self.fetch("brands").await
    }

    async fn create_brand(&self, brand: BrandCreate) -> BackendResult<Brand> {
        self.submit(Method::POST, "brands", &brand).await
    }

    async fn list_categories(&self) -> BackendResult<Vec<Category>> {
        self.fetch("categories").await
    }

    async fn create_category(&self, category: CategoryCreate) -> BackendResult<Category> {
        self.submit(Method::POST, "categories", &category).await
    }

    async fn create_warranty_sale(&self, entry: WarrantySaleEntry) -> BackendResult<RecordId> {
        self.append("warranty-sales", &entry).await
    }

    async fn log_sale(&self, entry: SaleEntry) -> BackendResult<RecordId> {
        self.append("sales", &entry).await
    }

    async fn log_purchase(&self, entry: PurchaseEntry) -> BackendResult<RecordId> {
        self.append("purchases", &entry).await
    }

    async fn log_return(&self, entry: ReturnEntry) -> BackendResult<RecordId> {
        self.append("returns", &entry).await
    }

    async fn list_sales(&self) -> BackendResult<Vec<SaleRecord>> {
        self.fetch("sales").await
    }

    async fn list_warranty_sales(&self) -> BackendResult<Vec<WarrantySaleRecord>> {
        self.fetch("warranty-sales").await
    }

    async fn list_purchases(&self) -> BackendResult<Vec<PurchaseRecord>> {
        self.fetch("purchases").await
    }

    async fn list_returns(&self) -> BackendResult<Vec<ReturnRecord>> {
        self.fetch("returns").await
    }

    async fn clear_transactions(&self) -> BackendResult<()> {
        self.send::<serde_json::Value, ()>(Method::DELETE, "transactions", None)
            .await?;
        Ok(())
    }
}
