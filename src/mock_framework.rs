//! # Mock Framework
//!
//! Utilities for testing the controller and clients in isolation.
//!
//! - [`create_mock_store`] returns a store client wired to a receiver the test
//!   reads, with helpers like [`expect_begin_fetch`] to assert each request.
//! - [`MemoryCatalog`] is a catalog source over fixed fixtures.
//! - [`ScriptedCatalog`] parks every product fetch until the test answers it,
//!   so completion order is under test control.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Mutex;

use tokio::sync::{mpsc, oneshot, watch};

use crate::actor_framework::{
    FetchToken, Record, Response, StoreClient, StoreRequest, StoreSnapshot,
};
use crate::catalog_source::CatalogSource;
use crate::domain::{filter_by_title, CatalogQuery, Product, ProductPage, RawCategory};
use crate::error::CatalogError;

/// Creates a store client and the receiver its requests arrive on.
pub fn create_mock_store<T: Record>(
    buffer_size: usize,
) -> (StoreClient<T>, mpsc::Receiver<StoreRequest<T>>) {
    let (sender, receiver) = mpsc::channel(buffer_size);
    let (_publisher, observer) = watch::channel(StoreSnapshot::default());
    (StoreClient::new(sender, observer), receiver)
}

/// Helper to verify that the next message is a BeginFetch request
pub async fn expect_begin_fetch<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<Response<FetchToken>> {
    match receiver.recv().await {
        Some(StoreRequest::BeginFetch { respond_to }) => Some(respond_to),
        _ => None,
    }
}

/// Helper to verify that the next message is a FinishFetch request
#[allow(clippy::type_complexity)]
pub async fn expect_finish_fetch<T: Record>(
    receiver: &mut mpsc::Receiver<StoreRequest<T>>,
) -> Option<(FetchToken, Result<Vec<T>, String>, Response<bool>)> {
    match receiver.recv().await {
        Some(StoreRequest::FinishFetch { token, outcome, respond_to }) => {
            Some((token, outcome, respond_to))
        }
        _ => None,
    }
}

fn unavailable(path: &str) -> CatalogError {
    CatalogError::Http {
        status: 503,
        url: format!("memory://{}", path),
    }
}

pub fn fixture_products() -> Vec<Product> {
    vec![
        Product::new(1, "iPhone 9", "smartphones", 549.0),
        Product::new(2, "Samsung Universe 9", "smartphones", 1249.0),
        Product::new(3, "Apple Watch", "smartwatches", 399.0),
        Product::new(4, "Samsung TV", "electronics", 899.0),
    ]
}

pub fn fixture_categories() -> Vec<RawCategory> {
    vec![
        RawCategory::Name("smartphones".into()),
        RawCategory::Name("electronics".into()),
        RawCategory::Object {
            name: Some("Smart Watches".into()),
            slug: Some("smartwatches".into()),
        },
    ]
}

/// Catalog source over fixed fixtures. Category scoping matches the product
/// category exactly; search matches titles case-insensitively.
pub struct MemoryCatalog {
    products: Vec<Product>,
    categories: Vec<RawCategory>,
    page_limit: usize,
    fail_products: AtomicBool,
    fail_categories: AtomicBool,
    requests: Mutex<Vec<CatalogQuery>>,
}

impl MemoryCatalog {
    pub fn new(products: Vec<Product>, categories: Vec<RawCategory>, page_limit: usize) -> Self {
        Self {
            products,
            categories,
            page_limit,
            fail_products: AtomicBool::new(false),
            fail_categories: AtomicBool::new(false),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn with_fixtures() -> Self {
        Self::new(fixture_products(), fixture_categories(), 10)
    }

    pub fn fail_products(&self, fail: bool) {
        self.fail_products.store(fail, Ordering::SeqCst);
    }

    pub fn fail_categories(&self, fail: bool) {
        self.fail_categories.store(fail, Ordering::SeqCst);
    }

    /// Every product query received, in order.
    pub fn requests(&self) -> Vec<CatalogQuery> {
        self.requests.lock().unwrap().clone()
    }
}

impl CatalogSource for MemoryCatalog {
    async fn fetch_products(&self, query: &CatalogQuery) -> Result<ProductPage, CatalogError> {
        self.requests.lock().unwrap().push(query.clone());
        if self.fail_products.load(Ordering::SeqCst) {
            return Err(unavailable("products"));
        }
        let matching: Vec<Product> = match query {
            CatalogQuery::All => self.products.clone(),
            CatalogQuery::Category(slug) => self
                .products
                .iter()
                .filter(|p| &p.category == slug)
                .cloned()
                .collect(),
            CatalogQuery::Search(term) => filter_by_title(&self.products, term)
                .into_iter()
                .cloned()
                .collect(),
        };
        let mut page = ProductPage::new(matching);
        page.products.truncate(self.page_limit);
        Ok(page)
    }

    async fn fetch_categories(&self) -> Result<Vec<RawCategory>, CatalogError> {
        if self.fail_categories.load(Ordering::SeqCst) {
            return Err(unavailable("categories"));
        }
        Ok(self.categories.clone())
    }
}

/// A product fetch parked inside [`ScriptedCatalog`].
pub struct PendingFetch {
    pub query: CatalogQuery,
    pub respond_to: oneshot::Sender<Result<ProductPage, CatalogError>>,
}

/// Catalog source whose product fetches complete only when the test answers
/// the matching [`PendingFetch`]. Categories resolve immediately and empty.
pub struct ScriptedCatalog {
    pending: mpsc::UnboundedSender<PendingFetch>,
}

impl ScriptedCatalog {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<PendingFetch>) {
        let (pending, receiver) = mpsc::unbounded_channel();
        (Self { pending }, receiver)
    }
}

impl CatalogSource for ScriptedCatalog {
    async fn fetch_products(&self, query: &CatalogQuery) -> Result<ProductPage, CatalogError> {
        let (respond_to, response) = oneshot::channel();
        self.pending
            .send(PendingFetch { query: query.clone(), respond_to })
            .map_err(|_| unavailable("script"))?;
        response.await.map_err(|_| unavailable("script"))?
    }

    async fn fetch_categories(&self) -> Result<Vec<RawCategory>, CatalogError> {
        Ok(Vec::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::ProductStoreClient;

    #[tokio::test]
    async fn test_mock_store() {
        let (inner, mut receiver) = create_mock_store::<Product>(10);
        let client = ProductStoreClient::new(inner);

        let task = tokio::spawn(async move { client.begin_fetch().await });

        let responder = expect_begin_fetch(&mut receiver).await.expect("Expected BeginFetch request");
        responder.send(FetchToken(7)).unwrap();

        let result = task.await.unwrap();
        assert_eq!(result, Ok(FetchToken(7)));
    }

    #[tokio::test]
    async fn test_memory_catalog_scopes_queries() {
        let catalog = MemoryCatalog::with_fixtures();

        let all = catalog.fetch_products(&CatalogQuery::All).await.unwrap();
        assert_eq!(all.products.len(), 4);

        let phones = catalog
            .fetch_products(&CatalogQuery::Category("smartphones".into()))
            .await
            .unwrap();
        assert_eq!(phones.products.len(), 2);

        let search = catalog
            .fetch_products(&CatalogQuery::Search("sam".into()))
            .await
            .unwrap();
        let titles: Vec<_> = search.products.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["Samsung Universe 9", "Samsung TV"]);

        assert_eq!(catalog.requests().len(), 3);
    }
}
