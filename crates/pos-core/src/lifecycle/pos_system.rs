use crate::backend::ActorBackend;
use crate::config::PosConfig;
use crate::{ledger_actor, product_actor, taxonomy_actor};
use std::sync::Arc;
use tracing::{error, info, warn};

/// The in-process inventory store: one actor per resource, wired into an
/// [`ActorBackend`].
///
/// # Example
///
/// ```rust
/// use pos_core::lifecycle::PosSystem;
/// use pos_core::backend::InventoryBackend;
///
/// #[tokio::main]
/// async fn main() -> Result<(), String> {
///     let system = PosSystem::new(32);
///     let products = system.backend().list_products().await.map_err(|e| e.to_string())?;
///     assert!(products.is_empty());
///     system.shutdown().await
/// }
/// ```
pub struct PosSystem {
    backend: Arc<ActorBackend>,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl PosSystem {
    /// Spawns every store. Must be called inside a tokio runtime.
    pub fn new(buffer_size: usize) -> Self {
        let (product_actor, products) = product_actor::new(buffer_size);
        let (brand_actor, brands) = taxonomy_actor::new_brands(buffer_size);
        let (category_actor, categories) = taxonomy_actor::new_categories(buffer_size);
        let (warranty_actor, warranty_sales) = ledger_actor::new(buffer_size);
        let (sale_actor, sales) = ledger_actor::new(buffer_size);
        let (purchase_actor, purchases) = ledger_actor::new(buffer_size);
        let (return_actor, returns) = ledger_actor::new(buffer_size);

        // No store depends on another; every context is ().
        let handles = vec![
            tokio::spawn(product_actor.run(())),
            tokio::spawn(brand_actor.run(())),
            tokio::spawn(category_actor.run(())),
            tokio::spawn(warranty_actor.run(())),
            tokio::spawn(sale_actor.run(())),
            tokio::spawn(purchase_actor.run(())),
            tokio::spawn(return_actor.run(())),
        ];
        info!(stores = handles.len(), "POS stores started");

        Self {
            backend: Arc::new(ActorBackend {
                products,
                brands,
                categories,
                warranty_sales,
                sales,
                purchases,
                returns,
            }),
            handles,
        }
    }

    pub fn from_config(config: &PosConfig) -> Self {
        Self::new(config.actor_buffer)
    }

    /// Shared handle for catalogs and terminals.
    pub fn backend(&self) -> Arc<ActorBackend> {
        self.backend.clone()
    }

    /// Closes every store and waits for its task.
    ///
    /// Stores stop once their last client is gone, so every handle obtained from
    /// [`backend`](Self::backend) (terminals included) must be dropped first or this
    /// waits for them.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down POS stores...");
        let holders = Arc::strong_count(&self.backend);
        if holders > 1 {
            warn!(holders, "Backend still shared; waiting for other holders to drop it");
        }
        drop(self.backend);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("POS stores shut down.");
        Ok(())
    }
}
