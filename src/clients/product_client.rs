use crate::actor_framework::{Record, StoreClient};
use crate::domain::Product;

impl Record for Product {
    type Key = u64;
    const KIND: &'static str = "products";

    fn key(&self) -> &u64 {
        &self.id
    }
}

/// Client for the product store.
#[derive(Clone)]
pub struct ProductStoreClient {
    inner: StoreClient<Product>,
}

impl_store_client!(ProductStoreClient, Product, products);
