//! # Brand and Category Actors
//!
//! Small reference tables products are filed under. Both accept create, replace and
//! delete; neither has custom actions.

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::{BrandClient, CategoryClient};
use crate::model::{Brand, Category};
use resource_actor::ResourceActor;

pub fn new_brands(buffer_size: usize) -> (ResourceActor<Brand>, BrandClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, BrandClient::new(generic_client))
}

pub fn new_categories(buffer_size: usize) -> (ResourceActor<Category>, CategoryClient) {
    let (actor, generic_client) = ResourceActor::new(buffer_size);
    (actor, CategoryClient::new(generic_client))
}
