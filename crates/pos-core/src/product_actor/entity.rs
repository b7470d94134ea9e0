//! [`ActorEntity`] implementation for [`Product`].

use super::actions::{ProductAction, ProductActionResult};
use super::error::ProductError;
use crate::model::{Product, ProductDraft, ProductId, ProductUpdate};
use async_trait::async_trait;
use chrono::Local;
use resource_actor::ActorEntity;

fn check_price(price: f64) -> Result<(), ProductError> {
    if price.is_finite() && price >= 0.0 {
        Ok(())
    } else {
        Err(ProductError::InvalidPrice(price))
    }
}

#[async_trait]
impl ActorEntity for Product {
    type Id = ProductId;
    type Create = ProductDraft;
    type Update = ProductUpdate;
    type Action = ProductAction;
    type ActionResult = ProductActionResult;
    type Context = ();
    type Error = ProductError;

    /// Stamps the draft with its id and today's date.
    fn from_create_params(id: ProductId, draft: ProductDraft) -> Result<Self, Self::Error> {
        if draft.name.trim().is_empty() {
            return Err(ProductError::MissingName);
        }
        check_price(draft.price_per_unit)?;
        Ok(Product::from_draft(id, Local::now().date_naive(), draft))
    }

    async fn on_update(
        &mut self,
        update: ProductUpdate,
        _ctx: &Self::Context,
    ) -> Result<(), Self::Error> {
        if let Some(price) = update.price_per_unit {
            check_price(price)?;
        }
        if matches!(&update.name, Some(name) if name.trim().is_empty()) {
            return Err(ProductError::MissingName);
        }
        self.apply(update);
        Ok(())
    }

    async fn handle_action(
        &mut self,
        action: ProductAction,
        _ctx: &Self::Context,
    ) -> Result<ProductActionResult, Self::Error> {
        match action {
            ProductAction::CheckStock => Ok(ProductActionResult::Stock(self.stock)),
            ProductAction::SetStock(stock) => {
                let previous = std::mem::replace(&mut self.stock, stock);
                Ok(ProductActionResult::StockSet {
                    previous,
                    product: self.clone(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn draft() -> ProductDraft {
        ProductDraft::new("Action Camera", "CAM-1001", "CAM-1001-0001", 250.0, 4)
    }

    #[tokio::test]
    async fn test_create_rejects_bad_price_and_name() {
        let bad_price = ProductDraft {
            price_per_unit: f64::NAN,
            ..draft()
        };
        assert!(matches!(
            Product::from_create_params(ProductId(1), bad_price),
            Err(ProductError::InvalidPrice(_))
        ));

        let no_name = ProductDraft {
            name: "  ".to_string(),
            ..draft()
        };
        assert_eq!(
            Product::from_create_params(ProductId(1), no_name),
            Err(ProductError::MissingName)
        );
    }

    #[tokio::test]
    async fn test_set_stock_reports_previous_level() {
        let mut product = Product::from_create_params(ProductId(1), draft()).unwrap();
        let result = product
            .handle_action(ProductAction::SetStock(9), &())
            .await
            .unwrap();

        match result {
            ProductActionResult::StockSet { previous, product } => {
                assert_eq!(previous, 4);
                assert_eq!(product.stock, 9);
            }
            other => panic!("Expected StockSet, got {other:?}"),
        }
        assert_eq!(product.stock, 9);
    }

    #[tokio::test]
    async fn test_update_rejects_negative_price() {
        let mut product = Product::from_create_params(ProductId(1), draft()).unwrap();
        let update = ProductUpdate {
            price_per_unit: Some(-1.0),
            ..ProductUpdate::default()
        };
        assert!(product.on_update(update, &()).await.is_err());
    }
}
