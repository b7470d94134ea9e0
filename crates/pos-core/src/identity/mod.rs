//! Two-tier product identifiers.
//!
//! A *Common ID* (`CAM-1001`) is shared by every unit of one model; a *Unique ID*
//! (`CAM-1001-0001`) names exactly one physical unit. This module validates and
//! generates both and tracks which Unique IDs are taken.

pub mod generator;
pub mod registry;
pub mod validation;

pub use generator::{
    format_common_id, format_unique_id, generate_incremental_unique_id, generate_unique_id,
    generate_unique_id_at,
};
pub use registry::UsedIdRegistry;
pub use validation::{validate_common_id, validate_unique_id, IdValidation};
