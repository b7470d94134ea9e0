//! A stocked product.
//!
//! Stored by a [`ResourceActor`](resource_actor::ResourceActor); see
//! [`crate::product_actor`] for how drafts, updates and stock actions are applied.
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Type-safe identifier for Products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ProductId(pub u32);

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "product_{}", self.0)
    }
}

/// One product as the inventory store knows it.
///
/// `common_id` groups interchangeable units of the same model, `unique_id` names
/// exactly one physical unit and is unique across the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub supplier: Option<String>,
    pub added_date: NaiveDate,
    pub price_per_unit: f64,
    pub stock: u32,
    pub unit: String,
    pub category: String,
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub specifications: Option<String>,
    pub common_id: String,
    pub unique_id: String,
}

impl Product {
    /// Builds the stored product from a draft and the values the store assigns.
    pub fn from_draft(id: ProductId, added_date: NaiveDate, draft: ProductDraft) -> Self {
        Self {
            id,
            name: draft.name,
            brand: draft.brand,
            supplier: draft.supplier,
            added_date,
            price_per_unit: draft.price_per_unit,
            stock: draft.stock,
            unit: draft.unit,
            category: draft.category,
            rating: draft.rating,
            image: draft.image,
            description: draft.description,
            specifications: draft.specifications,
            common_id: draft.common_id,
            unique_id: draft.unique_id,
        }
    }

    /// Applies every field present in `update`.
    pub fn apply(&mut self, update: ProductUpdate) {
        let ProductUpdate {
            name,
            brand,
            supplier,
            price_per_unit,
            stock,
            unit,
            category,
            rating,
            image,
            description,
            specifications,
            common_id,
            unique_id,
        } = update;

        if let Some(v) = name {
            self.name = v;
        }
        if let Some(v) = brand {
            self.brand = Some(v);
        }
        if let Some(v) = supplier {
            self.supplier = Some(v);
        }
        if let Some(v) = price_per_unit {
            self.price_per_unit = v;
        }
        if let Some(v) = stock {
            self.stock = v;
        }
        if let Some(v) = unit {
            self.unit = v;
        }
        if let Some(v) = category {
            self.category = v;
        }
        if let Some(v) = rating {
            self.rating = v;
        }
        if let Some(v) = image {
            self.image = v;
        }
        if let Some(v) = description {
            self.description = v;
        }
        if let Some(v) = specifications {
            self.specifications = Some(v);
        }
        if let Some(v) = common_id {
            self.common_id = v;
        }
        if let Some(v) = unique_id {
            self.unique_id = v;
        }
    }
}

/// Payload for adding a product. The store assigns `id` and `added_date`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductDraft {
    pub name: String,
    pub brand: Option<String>,
    pub supplier: Option<String>,
    pub price_per_unit: f64,
    pub stock: u32,
    pub unit: String,
    pub category: String,
    pub rating: f32,
    pub image: String,
    pub description: String,
    pub specifications: Option<String>,
    pub common_id: String,
    pub unique_id: String,
}

impl ProductDraft {
    /// Minimal draft; the remaining fields can be filled with struct update syntax.
    pub fn new(
        name: impl Into<String>,
        common_id: impl Into<String>,
        unique_id: impl Into<String>,
        price_per_unit: f64,
        stock: u32,
    ) -> Self {
        Self {
            name: name.into(),
            brand: None,
            supplier: None,
            price_per_unit,
            stock,
            unit: "pcs".to_string(),
            category: "General".to_string(),
            rating: 0.0,
            image: String::new(),
            description: String::new(),
            specifications: None,
            common_id: common_id.into(),
            unique_id: unique_id.into(),
        }
    }
}

/// Partial product update.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub supplier: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price_per_unit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stock: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub rating: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub specifications: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub common_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unique_id: Option<String>,
}

impl ProductUpdate {
    pub fn stock(stock: u32) -> Self {
        Self {
            stock: Some(stock),
            ..Self::default()
        }
    }
}
