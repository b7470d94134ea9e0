//! # Terminal
//!
//! One dashboard session: the catalog, the three carts, the transaction coordinator
//! and the aggregate views shown next to them. Methods take `&mut self`, so a terminal
//! runs one transaction at a time. Separate terminals are not coordinated.
//!
//! Every reload re-points the open carts at the fresh products, so a transaction
//! always starts from the stock this terminal last saw. A reload that fails after a
//! commit does not undo the commit: the result is returned and the views are marked
//! stale, to be reloaded before the next submission.
use crate::backend::{BackendError, InventoryBackend};
use crate::cart::{Cart, CartError, PurchaseItem, ReturnItem, SaleItem};
use crate::catalog::{Catalog, CatalogError};
use crate::config::PosConfig;
use crate::model::{Operator, Product, ProductId, WarrantySaleRecord};
use crate::receipt::{receipt_number, Receipt};
use crate::transaction::{
    CompensationPolicy, LogKind, TransactionCoordinator, TransactionError, TransactionReport,
};
use crate::warranty::{find_warranty, WarrantyStatus};
use chrono::NaiveDate;
use serde::Serialize;
use std::sync::Arc;
use thiserror::Error;
use tracing::{info, instrument, warn};

#[derive(Debug, Error)]
pub enum TerminalError {
    #[error("Unknown product: {0}")]
    UnknownProduct(ProductId),

    #[error(transparent)]
    Cart(#[from] CartError),

    #[error(transparent)]
    Catalog(#[from] CatalogError),

    #[error(transparent)]
    Transaction(#[from] TransactionError),

    #[error(transparent)]
    Backend(#[from] BackendError),

    /// The submission stopped part-way; the report lists what was written.
    #[error("{0}")]
    Incomplete(Box<TransactionReport>),
}

/// Sales figures for one day.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyTotals {
    pub date: NaiveDate,
    pub sales: usize,
    pub units: u32,
    pub revenue: f64,
}

impl DailyTotals {
    /// Totals of the records whose date of sale is `date`.
    pub fn from_sales(records: &[WarrantySaleRecord], date: NaiveDate) -> Self {
        records
            .iter()
            .filter(|r| r.entry.date_of_sale == date)
            .fold(
                Self {
                    date,
                    sales: 0,
                    units: 0,
                    revenue: 0.0,
                },
                |mut totals, r| {
                    totals.sales += 1;
                    totals.units += r.entry.sale.quantity;
                    totals.revenue += r.entry.sale.total_price;
                    totals
                },
            )
    }
}

pub struct Terminal<B: InventoryBackend> {
    backend: Arc<B>,
    store_name: String,
    operator: Operator,
    catalog: Catalog<B>,
    coordinator: TransactionCoordinator<B>,
    sale_cart: Cart<SaleItem>,
    purchase_cart: Cart<PurchaseItem>,
    return_cart: Cart<ReturnItem>,
    sales: Vec<WarrantySaleRecord>,
    today: Option<DailyTotals>,
    stale: bool,
}

impl<B: InventoryBackend> Terminal<B> {
    pub fn new(backend: Arc<B>, config: &PosConfig, operator: Operator) -> Self {
        Self {
            catalog: Catalog::new(backend.clone()),
            coordinator: TransactionCoordinator::new(
                backend.clone(),
                config.warranty_period,
                config.currency.clone(),
            ),
            backend,
            store_name: config.store_name.clone(),
            operator,
            sale_cart: Cart::new(),
            purchase_cart: Cart::new(),
            return_cart: Cart::new(),
            sales: Vec::new(),
            today: None,
            stale: true,
        }
    }

    pub fn with_compensation(mut self, policy: CompensationPolicy) -> Self {
        self.coordinator = self.coordinator.with_compensation(policy);
        self
    }

    /// Loads products, the registry, the sale log and the totals for `today`.
    #[instrument(skip(self))]
    pub async fn open(&mut self, today: NaiveDate) -> Result<(), TerminalError> {
        self.refresh(today).await
    }

    async fn refresh(&mut self, today: NaiveDate) -> Result<(), TerminalError> {
        self.stale = true;
        self.catalog.load().await?;
        self.sales = self.backend.list_warranty_sales().await?;
        self.sync_carts();
        let totals = DailyTotals::from_sales(&self.sales, today);
        info!(
            products = self.catalog.products().len(),
            sales_today = totals.sales,
            "Views refreshed"
        );
        self.today = Some(totals);
        self.stale = false;
        Ok(())
    }

    fn sync_carts(&mut self) {
        let products = self.catalog.products();
        let issues = self
            .sale_cart
            .sync(products)
            .into_iter()
            .chain(self.purchase_cart.sync(products))
            .chain(self.return_cart.sync(products));
        for issue in issues {
            warn!(error = %issue, "Cart line changed by reload");
        }
    }

    /// Reloads before a submission if the last reload failed.
    async fn ensure_fresh(&mut self, today: NaiveDate) -> Result<(), TerminalError> {
        if self.stale {
            self.refresh(today).await?;
        }
        Ok(())
    }

    async fn reload_after_commit(&mut self, today: NaiveDate) {
        if let Err(e) = self.refresh(today).await {
            warn!(error = %e, "Committed, but reloading the views failed; views are stale");
        }
    }

    /// Whether the cached views and cart products may be behind the backend.
    pub fn is_stale(&self) -> bool {
        self.stale
    }

    pub fn operator(&self) -> &Operator {
        &self.operator
    }

    pub fn catalog(&self) -> &Catalog<B> {
        &self.catalog
    }

    pub fn catalog_mut(&mut self) -> &mut Catalog<B> {
        &mut self.catalog
    }

    pub fn coordinator(&self) -> &TransactionCoordinator<B> {
        &self.coordinator
    }

    pub fn sale_cart(&self) -> &Cart<SaleItem> {
        &self.sale_cart
    }

    pub fn sale_cart_mut(&mut self) -> &mut Cart<SaleItem> {
        &mut self.sale_cart
    }

    pub fn purchase_cart(&self) -> &Cart<PurchaseItem> {
        &self.purchase_cart
    }

    pub fn return_cart(&self) -> &Cart<ReturnItem> {
        &self.return_cart
    }

    /// Cached warranty sale log, as of the last refresh.
    pub fn sales(&self) -> &[WarrantySaleRecord] {
        &self.sales
    }

    /// Totals cached by the last refresh.
    pub fn cached_totals(&self) -> Option<DailyTotals> {
        self.today
    }

    fn product(&self, id: ProductId) -> Result<Product, TerminalError> {
        self.catalog
            .product(id)
            .cloned()
            .ok_or(TerminalError::UnknownProduct(id))
    }

    pub fn add_to_sale(&mut self, id: ProductId, quantity: u32) -> Result<&SaleItem, TerminalError> {
        let product = self.product(id)?;
        Ok(self.sale_cart.add_product(product, quantity)?)
    }

    /// Adds a purchase line; `unit_cost` defaults to the selling price.
    pub fn add_to_purchase(
        &mut self,
        id: ProductId,
        quantity: u32,
        unit_cost: Option<f64>,
    ) -> Result<&PurchaseItem, TerminalError> {
        let product = self.product(id)?;
        let line = match unit_cost {
            Some(cost) => PurchaseItem::new(product, quantity, cost),
            None => PurchaseItem::at_list_price(product, quantity),
        };
        Ok(self.purchase_cart.add(line)?)
    }

    pub fn add_to_return(
        &mut self,
        id: ProductId,
        quantity: u32,
        reason: Option<String>,
    ) -> Result<&ReturnItem, TerminalError> {
        let product = self.product(id)?;
        Ok(self.return_cart.add(ReturnItem::new(product, quantity, reason))?)
    }

    /// Submits the sale cart. On commit the views are reloaded and a receipt is
    /// returned, even if the reload fails; otherwise the cart is kept and the report
    /// says what went through.
    #[instrument(skip(self))]
    pub async fn checkout_sale(&mut self, date_of_sale: NaiveDate) -> Result<Receipt, TerminalError> {
        self.ensure_fresh(date_of_sale).await?;
        let items = self.sale_cart.lines().to_vec();
        let report = self
            .coordinator
            .complete_sale(&mut self.sale_cart, &self.operator, date_of_sale)
            .await?;
        if !report.is_committed() {
            return Err(TerminalError::Incomplete(Box::new(report)));
        }

        let first_record = report.record_ids(LogKind::WarrantySale).first().copied();
        let receipt = Receipt::new(
            receipt_number(date_of_sale, first_record),
            self.store_name.clone(),
            report.started_at,
            self.operator.clone(),
            &items,
            date_of_sale,
            self.coordinator.warranty_period(),
            self.coordinator.currency(),
        );
        self.reload_after_commit(date_of_sale).await;
        info!(receipt = %receipt.receipt_number, total = receipt.grand_total, "Sale completed");
        Ok(receipt)
    }

    #[instrument(skip(self))]
    pub async fn complete_purchase(&mut self, today: NaiveDate) -> Result<TransactionReport, TerminalError> {
        self.ensure_fresh(today).await?;
        let report = self
            .coordinator
            .complete_purchase(&mut self.purchase_cart, &self.operator)
            .await?;
        self.finish(report, today).await
    }

    #[instrument(skip(self))]
    pub async fn complete_return(&mut self, today: NaiveDate) -> Result<TransactionReport, TerminalError> {
        self.ensure_fresh(today).await?;
        let report = self
            .coordinator
            .complete_return(&mut self.return_cart, &self.operator)
            .await?;
        self.finish(report, today).await
    }

    async fn finish(
        &mut self,
        report: TransactionReport,
        today: NaiveDate,
    ) -> Result<TransactionReport, TerminalError> {
        if !report.is_committed() {
            return Err(TerminalError::Incomplete(Box::new(report)));
        }
        self.reload_after_commit(today).await;
        Ok(report)
    }

    /// Sales, units and revenue for `date`, read fresh from the sale log.
    pub async fn today_totals(&mut self, date: NaiveDate) -> Result<DailyTotals, TerminalError> {
        self.sales = self.backend.list_warranty_sales().await?;
        let totals = DailyTotals::from_sales(&self.sales, date);
        self.today = Some(totals);
        Ok(totals)
    }

    /// Warranty of the unit `unique_id` as of `today`, from the cached sale log.
    pub fn warranty_lookup(
        &self,
        unique_id: &str,
        today: NaiveDate,
    ) -> Option<(&WarrantySaleRecord, WarrantyStatus)> {
        find_warranty(&self.sales, unique_id, today)
    }

    /// Empties every transaction log on the backend. Products keep their stock.
    #[instrument(skip(self))]
    pub async fn clear_transactions(&mut self) -> Result<(), TerminalError> {
        warn!(operator = %self.operator.email, "Clearing all transaction logs");
        self.backend.clear_transactions().await?;
        self.sales.clear();
        self.today = self.today.map(|t| DailyTotals::from_sales(&[], t.date));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{
        ProductDraft, ProductSnapshot, RecordId, Recorded, SaleEntry, WarrantySaleEntry,
    };
    use crate::warranty::WarrantyPeriod;
    use chrono::Utc;

    fn record(id: u32, date: NaiveDate, quantity: u32, total: f64) -> WarrantySaleRecord {
        let product = Product::from_draft(
            ProductId(1),
            date,
            ProductDraft::new("Mouse", "MOU-10", format!("MOU-10-{id:04}"), 10.0, 5),
        );
        Recorded {
            id: RecordId(id),
            entry: WarrantySaleEntry {
                sale: SaleEntry {
                    product: ProductSnapshot::from(&product),
                    quantity,
                    unit_price: 10.0,
                    total_price: total,
                    sold_at: Utc::now(),
                    sold_by: Operator::new("u1", "seller@shop.test"),
                },
                date_of_sale: date,
                warranty_period: WarrantyPeriod::years(1),
                warranty_end_date: WarrantyPeriod::years(1).end_date(date),
                currency: "BDT".into(),
            },
        }
    }

    #[test]
    fn test_daily_totals_only_count_the_day() {
        let day = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let before = NaiveDate::from_ymd_opt(2025, 2, 28).unwrap();
        let records = vec![
            record(1, before, 4, 40.0),
            record(2, day, 2, 20.0),
            record(3, day, 1, 10.0),
        ];

        let totals = DailyTotals::from_sales(&records, day);
        assert_eq!(totals.sales, 2);
        assert_eq!(totals.units, 3);
        assert_eq!(totals.revenue, 30.0);
    }
}
