//! Typed wrappers around [`ResourceClient`](resource_actor::ResourceClient), one per store.

pub mod ledger_client;
pub mod product_client;
pub mod taxonomy_client;

pub use ledger_client::*;
pub use product_client::*;
pub use taxonomy_client::*;
