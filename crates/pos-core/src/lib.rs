//! # POS Core
//!
//! Point-of-sale and inventory core for the FRIENDS IT ZONE shop.
//!
//! ## Modules
//!
//! - [`model`]: products, brands, categories and transaction records.
//! - [`identity`]: Common/Unique ID validation, generation and the used-id registry.
//! - [`warranty`]: warranty periods, end dates and lookup.
//! - [`cart`]: sale, purchase and return carts.
//! - [`catalog`]: product management on top of the registry.
//! - [`transaction`]: sequential submission of carts with a per-step report.
//! - [`terminal`]: a dashboard session tying the above together.
//! - [`receipt`]: plain-text receipt of a committed sale.
//! - [`backend`]: the inventory store interface, in-process and HTTP.
//! - [`product_actor`], [`taxonomy_actor`], [`ledger_actor`], [`clients`]: the in-process
//!   stores built on [`resource_actor`].
//! - [`lifecycle`]: starting and stopping the stores; logging setup.
//! - [`config`]: settings from the environment.

pub mod backend;
pub mod cart;
pub mod catalog;
pub mod clients;
pub mod config;
pub mod identity;
pub mod ledger_actor;
pub mod lifecycle;
pub mod model;
pub mod product_actor;
pub mod receipt;
pub mod taxonomy_actor;
pub mod terminal;
pub mod transaction;
pub mod warranty;
