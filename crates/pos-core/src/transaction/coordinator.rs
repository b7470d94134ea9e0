use super::report::{
    AppliedStep, Compensation, FailedLine, LogKind, TransactionKind, TransactionReport,
    TransactionState,
};
use super::TransactionError;
use crate::backend::InventoryBackend;
use crate::cart::{Cart, CartLine, PurchaseItem, ReturnItem, SaleItem};
use crate::model::{
    Operator, Product, ProductId, ProductSnapshot, PurchaseEntry, ReturnEntry, SaleEntry,
    WarrantySaleEntry,
};
use crate::warranty::WarrantyPeriod;
use chrono::{DateTime, NaiveDate, Utc};
use std::sync::Arc;
use tracing::{info, instrument, warn};

/// What happens to already-applied stock writes when a line fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompensationPolicy {
    /// Leave them; the operator reconciles by hand.
    #[default]
    None,
    /// Write back each product's previous stock, newest first. Log records stay.
    RestoreStock,
}

/// Runs sale, purchase and return submissions against a backend.
pub struct TransactionCoordinator<B: InventoryBackend> {
    backend: Arc<B>,
    policy: CompensationPolicy,
    warranty_period: WarrantyPeriod,
    currency: String,
    state: TransactionState,
}

impl<B: InventoryBackend> TransactionCoordinator<B> {
    pub fn new(backend: Arc<B>, warranty_period: WarrantyPeriod, currency: impl Into<String>) -> Self {
        Self {
            backend,
            policy: CompensationPolicy::default(),
            warranty_period,
            currency: currency.into(),
            state: TransactionState::Idle,
        }
    }

    pub fn with_compensation(mut self, policy: CompensationPolicy) -> Self {
        self.policy = policy;
        self
    }

    /// State of the latest submission.
    pub fn state(&self) -> TransactionState {
        self.state
    }

    pub fn warranty_period(&self) -> WarrantyPeriod {
        self.warranty_period
    }

    pub fn currency(&self) -> &str {
        &self.currency
    }

    fn begin<L: CartLine>(
        &mut self,
        kind: TransactionKind,
        cart: &Cart<L>,
    ) -> Result<TransactionReport, TransactionError> {
        self.state = TransactionState::Idle;
        if cart.is_empty() {
            return Err(TransactionError::EmptyCart);
        }
        self.state = TransactionState::Submitting;
        info!(%kind, lines = cart.len(), total = cart.total(), "Submitting");
        Ok(TransactionReport::new(kind, cart.len(), cart.total()))
    }

    fn commit<L: CartLine>(&mut self, report: &mut TransactionReport, cart: &mut Cart<L>) {
        cart.clear();
        self.state = TransactionState::Committed;
        report.state = TransactionState::Committed;
        info!(kind = %report.kind, lines = report.lines_completed, "Committed");
    }

    async fn fail(
        &mut self,
        report: &mut TransactionReport,
        line: usize,
        product_id: ProductId,
        error: TransactionError,
    ) {
        warn!(
            kind = %report.kind,
            line,
            %product_id,
            error = %error,
            stock_mutations = report.stock_mutations(),
            log_writes = report.log_writes(),
            "Submission aborted"
        );
        self.state = TransactionState::Failed;
        report.state = TransactionState::Failed;
        report.failure = Some(FailedLine {
            line,
            product_id,
            error,
        });
        if self.policy == CompensationPolicy::RestoreStock {
            self.compensate(report).await;
        }
    }

    async fn write_stock(
        &self,
        report: &mut TransactionReport,
        line: usize,
        product: &Product,
        new: u32,
    ) -> Result<(), TransactionError> {
        self.backend.update_stock(product.id, new).await?;
        report.record(
            line,
            AppliedStep::Stock {
                product_id: product.id,
                previous: product.stock,
                new,
            },
        );
        Ok(())
    }

    /// Sells every line: stock down, warranty record, legacy sale record.
    ///
    /// Stock is written as the cart's snapshot minus the quantity; a concurrent
    /// change made by another terminal since the snapshot is overwritten.
    #[instrument(skip_all, fields(operator = %operator.email))]
    pub async fn complete_sale(
        &mut self,
        cart: &mut Cart<SaleItem>,
        operator: &Operator,
        date_of_sale: NaiveDate,
    ) -> Result<TransactionReport, TransactionError> {
        let mut report = self.begin(TransactionKind::Sale, cart)?;
        let sold_at = report.started_at;
        for (line, item) in cart.lines().iter().enumerate() {
            if let Err(error) = self
                .sell_line(&mut report, line, item, operator, sold_at, date_of_sale)
                .await
            {
                self.fail(&mut report, line, item.product.id, error).await;
                return Ok(report);
            }
            report.lines_completed += 1;
        }
        self.commit(&mut report, cart);
        Ok(report)
    }

    async fn sell_line(
        &self,
        report: &mut TransactionReport,
        line: usize,
        item: &SaleItem,
        operator: &Operator,
        sold_at: DateTime<Utc>,
        date_of_sale: NaiveDate,
    ) -> Result<(), TransactionError> {
        let product = &item.product;
        let new_stock =
            product
                .stock
                .checked_sub(item.quantity)
                .ok_or(TransactionError::InsufficientStock {
                    product_id: product.id,
                    requested: item.quantity,
                    available: product.stock,
                })?;
        self.write_stock(report, line, product, new_stock).await?;

        let sale = SaleEntry {
            product: ProductSnapshot::from(product),
            quantity: item.quantity,
            unit_price: item.unit_price(),
            total_price: item.total_price,
            sold_at,
            sold_by: operator.clone(),
        };
        let warranty = WarrantySaleEntry {
            sale: sale.clone(),
            date_of_sale,
            warranty_period: self.warranty_period,
            warranty_end_date: self.warranty_period.end_date(date_of_sale),
            currency: self.currency.clone(),
        };

        let record_id = self.backend.create_warranty_sale(warranty).await?;
        report.record(
            line,
            AppliedStep::Log {
                log: LogKind::WarrantySale,
                record_id,
            },
        );

        let record_id = self.backend.log_sale(sale).await?;
        report.record(
            line,
            AppliedStep::Log {
                log: LogKind::Sale,
                record_id,
            },
        );
        Ok(())
    }

    /// Receives every line into stock and logs the purchase.
    #[instrument(skip_all, fields(operator = %operator.email))]
    pub async fn complete_purchase(
        &mut self,
        cart: &mut Cart<PurchaseItem>,
        operator: &Operator,
    ) -> Result<TransactionReport, TransactionError> {
        let mut report = self.begin(TransactionKind::Purchase, cart)?;
        let purchased_at = report.started_at;
        for (line, item) in cart.lines().iter().enumerate() {
            if let Err(error) = self
                .purchase_line(&mut report, line, item, operator, purchased_at)
                .await
            {
                self.fail(&mut report, line, item.product.id, error).await;
                return Ok(report);
            }
            report.lines_completed += 1;
        }
        self.commit(&mut report, cart);
        Ok(report)
    }

    async fn purchase_line(
        &self,
        report: &mut TransactionReport,
        line: usize,
        item: &PurchaseItem,
        operator: &Operator,
        purchased_at: DateTime<Utc>,
    ) -> Result<(), TransactionError> {
        let product = &item.product;
        let new_stock = product
            .stock
            .checked_add(item.quantity)
            .ok_or(TransactionError::StockOverflow(product.id))?;
        self.write_stock(report, line, product, new_stock).await?;

        let record_id = self
            .backend
            .log_purchase(PurchaseEntry {
                product: ProductSnapshot::from(product),
                quantity: item.quantity,
                unit_cost: item.unit_cost,
                total_cost: item.total_cost,
                purchased_at,
                purchased_by: operator.clone(),
            })
            .await?;
        report.record(
            line,
            AppliedStep::Log {
                log: LogKind::Purchase,
                record_id,
            },
        );
        Ok(())
    }

    /// Takes every returned line back into stock and logs the return.
    #[instrument(skip_all, fields(operator = %operator.email))]
    pub async fn complete_return(
        &mut self,
        cart: &mut Cart<ReturnItem>,
        operator: &Operator,
    ) -> Result<TransactionReport, TransactionError> {
        let mut report = self.begin(TransactionKind::Return, cart)?;
        let returned_at = report.started_at;
        for (line, item) in cart.lines().iter().enumerate() {
            if let Err(error) = self
                .return_line(&mut report, line, item, operator, returned_at)
                .await
            {
                self.fail(&mut report, line, item.product.id, error).await;
                return Ok(report);
            }
            report.lines_completed += 1;
        }
        self.commit(&mut report, cart);
        Ok(report)
    }

    async fn return_line(
        &self,
        report: &mut TransactionReport,
        line: usize,
        item: &ReturnItem,
        operator: &Operator,
        returned_at: DateTime<Utc>,
    ) -> Result<(), TransactionError> {
        let product = &item.product;
        let new_stock = product
            .stock
            .checked_add(item.quantity)
            .ok_or(TransactionError::StockOverflow(product.id))?;
        self.write_stock(report, line, product, new_stock).await?;

        let record_id = self
            .backend
            .log_return(ReturnEntry {
                product: ProductSnapshot::from(product),
                quantity: item.quantity,
                unit_price: product.price_per_unit,
                refund_amount: item.refund_amount,
                reason: item.reason.clone(),
                returned_at,
                returned_by: operator.clone(),
            })
            .await?;
        report.record(
            line,
            AppliedStep::Log {
                log: LogKind::Return,
                record_id,
            },
        );
        Ok(())
    }

    /// Writes back the previous stock of every applied stock step, newest first.
    ///
    /// Steps already restored by an earlier call are skipped, so a failed restore can
    /// be retried by calling this again. Log records are never touched. Returns the
    /// number of steps restored by this call.
    #[instrument(skip_all, fields(kind = %report.kind))]
    pub async fn compensate(&self, report: &mut TransactionReport) -> usize {
        let done: Vec<usize> = report.restored_steps().collect();
        let pending: Vec<(usize, ProductId, u32)> = report
            .steps
            .iter()
            .enumerate()
            .rev()
            .filter(|(index, _)| !done.contains(index))
            .filter_map(|(index, record)| match record.step {
                AppliedStep::Stock {
                    product_id,
                    previous,
                    ..
                } => Some((index, product_id, previous)),
                AppliedStep::Log { .. } => None,
            })
            .collect();

        let mut restored = 0;
        for (step, product_id, previous) in pending {
            let outcome = match self.backend.update_stock(product_id, previous).await {
                Ok(_) => {
                    restored += 1;
                    info!(%product_id, stock = previous, "Stock restored");
                    Ok(())
                }
                Err(e) => {
                    warn!(%product_id, error = %e, "Stock restore failed");
                    Err(e.to_string())
                }
            };
            report.compensations.push(Compensation {
                step,
                product_id,
                restored_to: previous,
                outcome,
            });
        }
        restored
    }
}
