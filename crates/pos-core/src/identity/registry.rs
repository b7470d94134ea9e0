use crate::model::Product;
use std::collections::HashSet;
use tracing::debug;

/// The set of Unique IDs currently held by products.
///
/// Rebuilt from the product list every session and never persisted. Callers that
/// change a product's Unique ID remove the old id before adding the new one.
#[derive(Debug, Clone, Default)]
pub struct UsedIdRegistry {
    ids: HashSet<String>,
    initialized: bool,
}

impl UsedIdRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replaces the contents with the Unique IDs of `products`.
    pub fn initialize<'a, I>(&mut self, products: I)
    where
        I: IntoIterator<Item = &'a Product>,
    {
        self.ids.clear();
        self.ids
            .extend(products.into_iter().map(|p| p.unique_id.clone()));
        self.initialized = true;
        debug!(count = self.ids.len(), "Unique ID registry initialized");
    }

    /// Returns `false` if the id was already present.
    pub fn add(&mut self, id: impl Into<String>) -> bool {
        self.ids.insert(id.into())
    }

    /// Returns `false` if the id was not present.
    pub fn remove(&mut self, id: &str) -> bool {
        self.ids.remove(id)
    }

    pub fn is_used(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    /// Whether [`initialize`](Self::initialize) has run at least once.
    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ProductDraft, ProductId};
    use chrono::NaiveDate;

    fn product(id: u32, unique_id: &str) -> Product {
        let added = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        Product::from_draft(
            ProductId(id),
            added,
            ProductDraft::new("Camera", "CAM-1001", unique_id, 100.0, 1),
        )
    }

    #[test]
    fn test_add_remove_round_trip() {
        let mut registry = UsedIdRegistry::new();
        assert!(registry.add("CAM-1001-0001"));
        assert!(registry.is_used("CAM-1001-0001"));
        assert!(!registry.add("CAM-1001-0001"));

        assert!(registry.remove("CAM-1001-0001"));
        assert!(!registry.is_used("CAM-1001-0001"));
        assert!(!registry.remove("CAM-1001-0001"));
    }

    #[test]
    fn test_initialize_replaces_contents() {
        let mut registry = UsedIdRegistry::new();
        assert!(!registry.is_initialized());
        registry.add("STALE-0001");

        let products = vec![product(1, "CAM-1001-0001"), product(2, "CAM-1001-0002")];
        registry.initialize(&products);

        assert!(registry.is_initialized());
        assert_eq!(registry.len(), 2);
        assert!(!registry.is_used("STALE-0001"));
        assert!(registry.is_used("CAM-1001-0002"));
    }
}
