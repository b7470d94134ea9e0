//! Sale, purchase and return carts.
//!
//! A cart holds at most one line per product. Adding a product that is already in
//! the cart merges the two lines: quantities are summed and the newer line's product
//! snapshot, price and note are kept.
//!
//! Lines hold a copy of the product. [`Cart::sync`] swaps in freshly loaded copies so
//! stock deltas are computed from the latest known level.
use crate::model::{Product, ProductId};
use serde::Serialize;
use std::fmt::Debug;
use thiserror::Error;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum CartError {
    #[error("Quantity for {0} must be at least 1")]
    ZeroQuantity(ProductId),

    #[error("Only {available} of {product_id} in stock, {requested} requested")]
    ExceedsStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("{0} is not in the cart")]
    NotInCart(ProductId),

    #[error("{0} is no longer in the catalog")]
    Discontinued(ProductId),
}

/// A line of a cart.
pub trait CartLine: Clone + Debug + Send + Sync {
    /// Cart name used in logs.
    const KIND: &'static str;

    fn product(&self) -> &Product;

    fn quantity(&self) -> u32;

    fn total(&self) -> f64;

    /// Sets the quantity and recomputes the total.
    fn set_quantity(&mut self, quantity: u32);

    /// Replaces the product copy, keeping the quantity.
    fn set_product(&mut self, product: Product);

    /// Largest quantity the line may hold; `None` is unbounded.
    fn max_quantity(&self) -> Option<u32> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SaleItem {
    pub product: Product,
    pub quantity: u32,
    pub total_price: f64,
}

impl SaleItem {
    pub fn new(product: Product, quantity: u32) -> Self {
        let total_price = product.price_per_unit * f64::from(quantity);
        Self {
            product,
            quantity,
            total_price,
        }
    }

    pub fn unit_price(&self) -> f64 {
        self.product.price_per_unit
    }
}

impl CartLine for SaleItem {
    const KIND: &'static str = "sale";

    fn product(&self) -> &Product {
        &self.product
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn total(&self) -> f64 {
        self.total_price
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_price = self.product.price_per_unit * f64::from(quantity);
    }

    fn set_product(&mut self, product: Product) {
        self.product = product;
        self.set_quantity(self.quantity);
    }

    /// A sale cannot take more units than the product's last known stock.
    fn max_quantity(&self) -> Option<u32> {
        Some(self.product.stock)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PurchaseItem {
    pub product: Product,
    pub quantity: u32,
    pub unit_cost: f64,
    pub total_cost: f64,
}

impl PurchaseItem {
    pub fn new(product: Product, quantity: u32, unit_cost: f64) -> Self {
        Self {
            product,
            quantity,
            unit_cost,
            total_cost: unit_cost * f64::from(quantity),
        }
    }

    /// Restocks at the product's selling price.
    pub fn at_list_price(product: Product, quantity: u32) -> Self {
        let unit_cost = product.price_per_unit;
        Self::new(product, quantity, unit_cost)
    }
}

impl CartLine for PurchaseItem {
    const KIND: &'static str = "purchase";

    fn product(&self) -> &Product {
        &self.product
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn total(&self) -> f64 {
        self.total_cost
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.total_cost = self.unit_cost * f64::from(quantity);
    }

    /// The agreed unit cost stays.
    fn set_product(&mut self, product: Product) {
        self.product = product;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReturnItem {
    pub product: Product,
    pub quantity: u32,
    pub refund_amount: f64,
    pub reason: Option<String>,
}

impl ReturnItem {
    pub fn new(product: Product, quantity: u32, reason: Option<String>) -> Self {
        let refund_amount = product.price_per_unit * f64::from(quantity);
        Self {
            product,
            quantity,
            refund_amount,
            reason,
        }
    }
}

impl CartLine for ReturnItem {
    const KIND: &'static str = "return";

    fn product(&self) -> &Product {
        &self.product
    }

    fn quantity(&self) -> u32 {
        self.quantity
    }

    fn total(&self) -> f64 {
        self.refund_amount
    }

    fn set_quantity(&mut self, quantity: u32) {
        self.quantity = quantity;
        self.refund_amount = self.product.price_per_unit * f64::from(quantity);
    }

    fn set_product(&mut self, product: Product) {
        self.product = product;
        self.set_quantity(self.quantity);
    }
}

fn check_line<L: CartLine>(line: &L) -> Result<(), CartError> {
    let product_id = line.product().id;
    if line.quantity() == 0 {
        return Err(CartError::ZeroQuantity(product_id));
    }
    match line.max_quantity() {
        Some(available) if line.quantity() > available => Err(CartError::ExceedsStock {
            product_id,
            requested: line.quantity(),
            available,
        }),
        _ => Ok(()),
    }
}

#[derive(Debug, Clone)]
pub struct Cart<L: CartLine> {
    lines: Vec<L>,
}

impl<L: CartLine> Default for Cart<L> {
    fn default() -> Self {
        Self { lines: Vec::new() }
    }
}

impl<L: CartLine> Cart<L> {
    pub fn new() -> Self {
        Self::default()
    }

    fn position(&self, product_id: ProductId) -> Option<usize> {
        self.lines.iter().position(|l| l.product().id == product_id)
    }

    /// Adds `line`, merging it into an existing line for the same product.
    /// On error the cart is unchanged.
    pub fn add(&mut self, line: L) -> Result<&L, CartError> {
        if line.quantity() == 0 {
            return Err(CartError::ZeroQuantity(line.product().id));
        }
        match self.position(line.product().id) {
            Some(index) => {
                let mut merged = line;
                let quantity = self.lines[index].quantity().saturating_add(merged.quantity());
                merged.set_quantity(quantity);
                check_line(&merged)?;
                self.lines[index] = merged;
                Ok(&self.lines[index])
            }
            None => {
                check_line(&line)?;
                self.lines.push(line);
                Ok(&self.lines[self.lines.len() - 1])
            }
        }
    }

    pub fn set_quantity(&mut self, product_id: ProductId, quantity: u32) -> Result<&L, CartError> {
        let index = self
            .position(product_id)
            .ok_or(CartError::NotInCart(product_id))?;
        let mut line = self.lines[index].clone();
        line.set_quantity(quantity);
        check_line(&line)?;
        self.lines[index] = line;
        Ok(&self.lines[index])
    }

    pub fn remove(&mut self, product_id: ProductId) -> Option<L> {
        self.position(product_id).map(|index| self.lines.remove(index))
    }

    pub fn get(&self, product_id: ProductId) -> Option<&L> {
        self.lines.iter().find(|l| l.product().id == product_id)
    }

    pub fn lines(&self) -> &[L] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn total(&self) -> f64 {
        self.lines.iter().map(CartLine::total).sum()
    }

    pub fn units(&self) -> u32 {
        self.lines.iter().map(CartLine::quantity).sum()
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Points every line at its product in `products`.
    ///
    /// Lines whose product is gone are dropped (`Discontinued`). Lines now above
    /// their cap are kept as they are and reported (`ExceedsStock`); submitting them
    /// fails on that line until the quantity is lowered.
    pub fn sync(&mut self, products: &[Product]) -> Vec<CartError> {
        let mut issues = Vec::new();
        self.lines.retain_mut(|line| {
            let id = line.product().id;
            match products.iter().find(|p| p.id == id) {
                Some(fresh) => {
                    line.set_product(fresh.clone());
                    if let Err(e) = check_line(line) {
                        issues.push(e);
                    }
                    true
                }
                None => {
                    issues.push(CartError::Discontinued(id));
                    false
                }
            }
        });
        issues
    }
}

impl Cart<SaleItem> {
    pub fn add_product(&mut self, product: Product, quantity: u32) -> Result<&SaleItem, CartError> {
        self.add(SaleItem::new(product, quantity))
    }
}
