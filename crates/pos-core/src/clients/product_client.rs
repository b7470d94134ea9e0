//! # Product Client
//!
//! High-level API over the product store: creation, partial edits and the two stock
//! actions.
use crate::model::{Product, ProductDraft, ProductId, ProductUpdate};
use crate::product_actor::{ProductAction, ProductActionResult, ProductError};
use async_trait::async_trait;
use resource_actor::{ActorClient, FrameworkError, ResourceClient};
use tracing::{debug, instrument};

/// Stock levels around a [`ProductClient::set_stock`] call.
#[derive(Debug, Clone, PartialEq)]
pub struct StockChange {
    pub previous: u32,
    pub product: Product,
}

#[derive(Clone)]
pub struct ProductClient {
    inner: ResourceClient<Product>,
}

impl ProductClient {
    pub fn new(inner: ResourceClient<Product>) -> Self {
        Self { inner }
    }
}

#[async_trait]
impl ActorClient<Product> for ProductClient {
    type Error = ProductError;

    fn inner(&self) -> &ResourceClient<Product> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::NotFound(id) => ProductError::NotFound(id),
            other => ProductError::ActorCommunicationError(other.to_string()),
        }
    }
}

impl ProductClient {
    #[instrument(skip(self, draft), fields(unique_id = %draft.unique_id))]
    pub async fn create_product(&self, draft: ProductDraft) -> Result<ProductId, ProductError> {
        debug!("Sending request");
        self.inner.create(draft).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn update_product(
        &self,
        id: ProductId,
        update: ProductUpdate,
    ) -> Result<Product, ProductError> {
        debug!("Sending request");
        self.inner.update(id, update).await.map_err(Self::map_error)
    }

    #[instrument(skip(self))]
    pub async fn check_stock(&self, id: ProductId) -> Result<u32, ProductError> {
        debug!("Checking stock");
        match self
            .inner
            .perform_action(id, ProductAction::CheckStock)
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::Stock(level) => Ok(level),
            other => Err(ProductError::ActorCommunicationError(format!(
                "CheckStock answered with {other:?}"
            ))),
        }
    }

    /// Overwrites the stock level and reports what it was.
    #[instrument(skip(self))]
    pub async fn set_stock(&self, id: ProductId, stock: u32) -> Result<StockChange, ProductError> {
        debug!("Setting stock");
        match self
            .inner
            .perform_action(id, ProductAction::SetStock(stock))
            .await
            .map_err(Self::map_error)?
        {
            ProductActionResult::StockSet { previous, product } => {
                Ok(StockChange { previous, product })
            }
            other => Err(ProductError::ActorCommunicationError(format!(
                "SetStock answered with {other:?}"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use resource_actor::mock::{create_mock_client, expect_action, expect_create};

    fn product(stock: u32) -> Product {
        Product::from_draft(
            ProductId(1),
            NaiveDate::from_ymd_opt(2025, 1, 15).unwrap(),
            ProductDraft::new("Action Camera", "CAM-1001", "CAM-1001-0001", 250.0, stock),
        )
    }

    #[tokio::test]
    async fn test_check_stock_returns_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.check_stock(ProductId(1)).await });

        let (id, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(id, ProductId(1));
        assert_eq!(action, ProductAction::CheckStock);
        responder.send(Ok(ProductActionResult::Stock(42))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), 42);
    }

    #[tokio::test]
    async fn test_set_stock_sends_absolute_level() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.set_stock(ProductId(1), 3).await });

        let (_, action, responder) = expect_action(&mut receiver)
            .await
            .expect("Expected Action request");
        assert_eq!(action, ProductAction::SetStock(3));
        responder
            .send(Ok(ProductActionResult::StockSet {
                previous: 5,
                product: product(3),
            }))
            .unwrap();

        let change = task.await.unwrap().unwrap();
        assert_eq!(change.previous, 5);
        assert_eq!(change.product.stock, 3);
    }

    #[tokio::test]
    async fn test_not_found_is_mapped() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let task = tokio::spawn(async move { products.set_stock(ProductId(9), 1).await });

        let (_, _, responder) = expect_action(&mut receiver).await.unwrap();
        responder
            .send(Err(FrameworkError::NotFound("product_9".to_string())))
            .unwrap();

        assert_eq!(
            task.await.unwrap(),
            Err(ProductError::NotFound("product_9".to_string()))
        );
    }

    #[tokio::test]
    async fn test_create_forwards_draft() {
        let (client, mut receiver) = create_mock_client::<Product>(10);
        let products = ProductClient::new(client);

        let draft = ProductDraft::new("Tripod", "TRI-200", "TRI-200-0001", 40.0, 2);
        let task = tokio::spawn(async move { products.create_product(draft).await });

        let (params, responder) = expect_create(&mut receiver).await.unwrap();
        assert_eq!(params.unique_id, "TRI-200-0001");
        responder.send(Ok(ProductId(7))).unwrap();

        assert_eq!(task.await.unwrap().unwrap(), ProductId(7));
    }
}
