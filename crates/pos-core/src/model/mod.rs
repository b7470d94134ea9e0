//! Plain data: products, brands/categories and transaction records.

pub mod ledger;
pub mod product;
pub mod taxonomy;

pub use ledger::*;
pub use product::*;
pub use taxonomy::*;
