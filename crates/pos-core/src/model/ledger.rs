//! Append-only transaction records.
//!
//! Every record carries a snapshot of the product identity at the time of the
//! transaction, so later edits to the product do not rewrite history.
use crate::model::{Product, ProductId};
use crate::warranty::WarrantyPeriod;
use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt::{Debug, Display};

/// Identifier assigned to a record by its log.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct RecordId(pub u32);

impl From<u32> for RecordId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for RecordId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "record_{}", self.0)
    }
}

/// The user a transaction is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Operator {
    pub user_id: String,
    pub email: String,
}

impl Operator {
    pub fn new(user_id: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            user_id: user_id.into(),
            email: email.into(),
        }
    }
}

/// Product identity as it was when the record was written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductSnapshot {
    pub product_id: ProductId,
    pub product_name: String,
    pub common_id: String,
    pub unique_id: String,
}

impl From<&Product> for ProductSnapshot {
    fn from(product: &Product) -> Self {
        Self {
            product_id: product.id,
            product_name: product.name.clone(),
            common_id: product.common_id.clone(),
            unique_id: product.unique_id.clone(),
        }
    }
}

/// Payload types that can be appended to a log.
pub trait LedgerEntry: Clone + Debug + Send + Sync + 'static {
    /// Log name used in tracing and errors.
    const KIND: &'static str;

    /// Units the entry accounts for. Logs reject zero.
    fn quantity(&self) -> u32;
}

/// A record as stored: the entry plus the id its log assigned.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recorded<E> {
    pub id: RecordId,
    #[serde(flatten)]
    pub entry: E,
}

/// Legacy sale log entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleEntry {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub unit_price: f64,
    pub total_price: f64,
    pub sold_at: DateTime<Utc>,
    pub sold_by: Operator,
}

impl LedgerEntry for SaleEntry {
    const KIND: &'static str = "sale";

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

/// Sale entry with warranty coverage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WarrantySaleEntry {
    #[serde(flatten)]
    pub sale: SaleEntry,
    pub date_of_sale: NaiveDate,
    pub warranty_period: WarrantyPeriod,
    pub warranty_end_date: NaiveDate,
    pub currency: String,
}

impl LedgerEntry for WarrantySaleEntry {
    const KIND: &'static str = "warranty_sale";

    fn quantity(&self) -> u32 {
        self.sale.quantity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseEntry {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub unit_cost: f64,
    pub total_cost: f64,
    pub purchased_at: DateTime<Utc>,
    pub purchased_by: Operator,
}

impl LedgerEntry for PurchaseEntry {
    const KIND: &'static str = "purchase";

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnEntry {
    #[serde(flatten)]
    pub product: ProductSnapshot,
    pub quantity: u32,
    pub unit_price: f64,
    pub refund_amount: f64,
    #[serde(default)]
    pub reason: Option<String>,
    pub returned_at: DateTime<Utc>,
    pub returned_by: Operator,
}

impl LedgerEntry for ReturnEntry {
    const KIND: &'static str = "return";

    fn quantity(&self) -> u32 {
        self.quantity
    }
}

pub type SaleRecord = Recorded<SaleEntry>;
pub type WarrantySaleRecord = Recorded<WarrantySaleEntry>;
pub type PurchaseRecord = Recorded<PurchaseEntry>;
pub type ReturnRecord = Recorded<ReturnEntry>;
