use tracing::{error, info};

use crate::actor_framework::StoreActor;
use crate::catalog_source::CatalogSource;
use crate::clients::{CategoryStoreClient, ProductStoreClient};
use crate::controller::FilterController;
use crate::domain::{Category, Product};

const STORE_BUFFER: usize = 32;

/// Owns the store actors and the controller wired to them.
///
/// The stores are injected into the controller here; nothing else reaches
/// them except through the clients this struct hands out.
pub struct CatalogSystem<S: CatalogSource> {
    pub controller: FilterController<S>,
    pub products: ProductStoreClient,
    pub categories: CategoryStoreClient,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl<S: CatalogSource> CatalogSystem<S> {
    pub fn new(source: S) -> Self {
        let (product_actor, product_store) = StoreActor::<Product>::new(STORE_BUFFER);
        let products = ProductStoreClient::new(product_store);
        let product_handle = tokio::spawn(product_actor.run());

        let (category_actor, category_store) = StoreActor::<Category>::new(STORE_BUFFER);
        let categories = CategoryStoreClient::new(category_store);
        let category_handle = tokio::spawn(category_actor.run());

        let controller = FilterController::new(source, products.clone(), categories.clone());

        Self {
            controller,
            products,
            categories,
            handles: vec![product_handle, category_handle],
        }
    }

    /// Drops every client so the store actors see their channels close, then
    /// waits for them. Clients cloned elsewhere must be dropped first.
    pub async fn shutdown(self) -> Result<(), String> {
        info!("Shutting down catalog system...");
        drop(self.controller);
        drop(self.products);
        drop(self.categories);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Store task failed: {:?}", e);
                return Err(format!("Store task failed: {:?}", e));
            }
        }

        info!("Catalog system shutdown complete.");
        Ok(())
    }
}
