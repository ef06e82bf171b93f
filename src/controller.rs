//! Filter controller: turns user interactions into scoped fetches.
//!
//! Every interaction (mount, category click, search submit, reload) issues
//! exactly one product fetch whose scope matches the current selection. The
//! selection is published on a watch channel and serializes to the URL query
//! string, so a reload with that string reproduces the same view.

use tokio::sync::{watch, Mutex};
use tracing::{debug, error, info, instrument};

use crate::actor_framework::FetchToken;
use crate::catalog_source::CatalogSource;
use crate::clients::{CategoryStoreClient, ProductStoreClient};
use crate::domain::{normalize_categories, CatalogQuery};
use crate::error::StoreError;

pub const PRODUCTS_ERROR: &str = "Failed to fetch products. Please try again later.";
pub const CATEGORIES_ERROR: &str = "Failed to fetch categories. Please try again later.";

pub struct FilterController<S: CatalogSource> {
    source: S,
    products: ProductStoreClient,
    categories: CategoryStoreClient,
    query: watch::Sender<CatalogQuery>,
    /// Held while a product fetch token is issued and the selection published.
    selecting: Mutex<()>,
}

impl<S: CatalogSource> FilterController<S> {
    pub fn new(source: S, products: ProductStoreClient, categories: CategoryStoreClient) -> Self {
        let (query, _) = watch::channel(CatalogQuery::All);
        Self {
            source,
            products,
            categories,
            query,
            selecting: Mutex::new(()),
        }
    }

    /// Initial page load: restores the selection from `url_query` and loads
    /// categories and the scoped product list concurrently.
    #[instrument(skip(self))]
    pub async fn mount(&self, url_query: &str) -> Result<(), StoreError> {
        let query = CatalogQuery::from_url_query(url_query);
        info!(%query, "Mounting catalog view");
        let (token, query) = self.issue(Some(query)).await?;

        let (categories, products) =
            tokio::join!(self.refresh_categories(), self.fetch_products(token, query));
        categories?;
        products?;
        Ok(())
    }

    /// Category chip click. An empty slug is the "All Products" chip.
    #[instrument(skip(self))]
    pub async fn select_category(&self, slug: &str) -> Result<(), StoreError> {
        self.apply(CatalogQuery::category(slug)).await
    }

    #[instrument(skip(self))]
    pub async fn submit_search(&self, term: &str) -> Result<(), StoreError> {
        self.apply(CatalogQuery::search(term)).await
    }

    #[instrument(skip(self))]
    pub async fn show_all(&self) -> Result<(), StoreError> {
        self.apply(CatalogQuery::All).await
    }

    /// Re-issues the fetch for the current selection.
    #[instrument(skip(self))]
    pub async fn reload(&self) -> Result<(), StoreError> {
        let (token, query) = self.issue(None).await?;
        self.fetch_products(token, query).await.map(|_| ())
    }

    /// Loads and normalizes the category list. On failure the previous list
    /// stays in place and the category store carries the error.
    #[instrument(skip(self))]
    pub async fn refresh_categories(&self) -> Result<bool, StoreError> {
        let token = self.categories.begin_fetch().await?;
        let outcome = match self.source.fetch_categories().await {
            Ok(raw) => Ok(normalize_categories(raw)),
            Err(e) => {
                error!(error = %e, "Failed to fetch categories");
                Err(CATEGORIES_ERROR.to_string())
            }
        };
        let applied = self.categories.finish_fetch(token, outcome).await?;
        if !applied {
            debug!(%token, "Category fetch superseded");
        }
        Ok(applied)
    }

    #[cfg(test)]
    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn current_query(&self) -> CatalogQuery {
        self.query.borrow().clone()
    }

    /// The current selection as a URL query string.
    pub fn url_query(&self) -> String {
        self.query.borrow().to_url_query()
    }

    pub fn subscribe_query(&self) -> watch::Receiver<CatalogQuery> {
        self.query.subscribe()
    }

    async fn apply(&self, query: CatalogQuery) -> Result<(), StoreError> {
        info!(%query, url = %query.to_url_query(), "Selection changed");
        let (token, query) = self.issue(Some(query)).await?;
        self.fetch_products(token, query).await.map(|_| ())
    }

    /// Issues the next product fetch token and publishes `next` as one step,
    /// so the published selection always belongs to the latest token. With
    /// `None` the current selection is kept.
    async fn issue(
        &self,
        next: Option<CatalogQuery>,
    ) -> Result<(FetchToken, CatalogQuery), StoreError> {
        let _selecting = self.selecting.lock().await;
        let token = self.products.begin_fetch().await?;
        let query = match next {
            Some(query) => {
                self.query.send_replace(query.clone());
                query
            }
            None => self.current_query(),
        };
        Ok((token, query))
    }

    /// Returns whether the result reached the store; a fetch superseded by a
    /// newer one is dropped.
    #[instrument(skip(self, query), fields(query = %query))]
    async fn fetch_products(&self, token: FetchToken, query: CatalogQuery) -> Result<bool, StoreError> {
        let outcome = match self.source.fetch_products(&query).await {
            Ok(page) => Ok(page.products),
            Err(e) => {
                error!(error = %e, "Failed to fetch products");
                Err(PRODUCTS_ERROR.to_string())
            }
        };
        let applied = self.products.finish_fetch(token, outcome).await?;
        if applied {
            debug!(%token, "Products updated");
        } else {
            debug!(%token, "Product fetch superseded");
        }
        Ok(applied)
    }
}
