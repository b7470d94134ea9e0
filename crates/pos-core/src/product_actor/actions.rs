//! Stock operations on a stored [`Product`](crate::model::Product).

use crate::model::Product;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProductAction {
    /// Reads the stock level without modifying it.
    CheckStock,
    /// Overwrites the stock level.
    ///
    /// The store does not compare against the level the caller last saw; two
    /// terminals writing from the same snapshot lose one of the changes.
    SetStock(u32),
}

/// Results from [`ProductAction`]s, one variant per action.
#[derive(Debug, Clone, PartialEq)]
pub enum ProductActionResult {
    Stock(u32),
    StockSet { previous: u32, product: Product },
}
