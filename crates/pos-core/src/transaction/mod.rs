//! # Transaction Coordination
//!
//! Completing a cart is a sequence of independent remote writes per line: a stock
//! update followed by one or two log records. Nothing makes them atomic. The
//! [`TransactionCoordinator`] runs them in order, stops at the first failure and
//! returns a [`TransactionReport`] listing exactly which writes went through.
//!
//! ```text
//! Idle ──complete_*──▶ Submitting ──all lines ok──▶ Committed (cart cleared)
//!   │                      │
//!   └─ empty cart          └─ first error ──▶ Failed (cart kept, optional stock restore)
//! ```

pub mod coordinator;
pub mod report;

pub use coordinator::*;
pub use report::*;

use crate::backend::BackendError;
use crate::model::ProductId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransactionError {
    #[error("Cart is empty")]
    EmptyCart,

    /// The snapshot in the cart no longer covers the quantity.
    #[error("Only {available} of {product_id} in stock, {requested} requested")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    #[error("Stock of {0} would overflow")]
    StockOverflow(ProductId),

    #[error(transparent)]
    Backend(#[from] BackendError),
}
