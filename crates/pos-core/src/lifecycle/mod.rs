//! # Lifecycle
//!
//! Starting and stopping the in-process stores, and logging setup.
//!
//! ## Startup
//!
//! [`PosSystem::new`] creates one [`ResourceActor`](resource_actor::ResourceActor) per
//! resource (products, brands, categories and the four transaction logs), spawns each on
//! its own task and bundles the clients into an
//! [`ActorBackend`](crate::backend::ActorBackend).
//!
//! ## Shutdown
//!
//! 1. Drop every terminal and catalog holding the backend.
//! 2. [`PosSystem::shutdown`] drops the last client handles; each store sees its channel
//!    close, logs its final size and exits.
//! 3. The task handles are awaited; a panicked store is reported as an error.
//!
//! ## Logging
//!
//! [`setup_tracing`] installs a `tracing-subscriber` formatter filtered by `RUST_LOG`:
//!
//! ```bash
//! RUST_LOG=info cargo run                       # lifecycle, commits, failures
//! RUST_LOG=debug cargo run                      # every request with its payload
//! POS_LOG_FORMAT=json RUST_LOG=info cargo run   # one JSON object per event
//! ```

pub mod pos_system;
pub mod tracing;

pub use pos_system::*;
pub use self::tracing::*;
