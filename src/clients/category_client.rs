use crate::actor_framework::{Record, StoreClient};
use crate::domain::Category;

impl Record for Category {
    type Key = String;
    const KIND: &'static str = "categories";

    fn key(&self) -> &String {
        &self.slug
    }
}

/// Client for the category store.
#[derive(Clone)]
pub struct CategoryStoreClient {
    inner: StoreClient<Category>,
}

impl_store_client!(CategoryStoreClient, Category, categories);
