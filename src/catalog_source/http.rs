use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};

use super::CatalogSource;
use crate::domain::{CatalogQuery, ProductPage, RawCategory};
use crate::error::CatalogError;

const USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// [`CatalogSource`] backed by the remote REST API.
#[derive(Clone)]
pub struct HttpCatalog {
    http: Client,
    base: Url,
    page_limit: usize,
}

impl HttpCatalog {
    pub fn new(base_url: &str, page_limit: usize) -> Result<Self, CatalogError> {
        let base = Url::parse(base_url)
            .map_err(|e| CatalogError::InvalidBaseUrl(format!("{}: {}", base_url, e)))?;
        if base.cannot_be_a_base() {
            return Err(CatalogError::InvalidBaseUrl(base_url.to_string()));
        }
        let http = Client::builder().user_agent(USER_AGENT).build()?;
        Ok(Self { http, base, page_limit })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let mut url = self.base.clone();
        url.path_segments_mut()
            .map_err(|_| CatalogError::InvalidBaseUrl(self.base.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// URL of the product listing for `query`, including the page limit.
    pub fn products_url(&self, query: &CatalogQuery) -> Result<Url, CatalogError> {
        let mut url = match query {
            CatalogQuery::All => self.endpoint(&["products"])?,
            CatalogQuery::Category(slug) => self.endpoint(&["products", "category", slug.as_str()])?,
            CatalogQuery::Search(term) => {
                let mut url = self.endpoint(&["products", "search"])?;
                url.query_pairs_mut().append_pair("q", term);
                url
            }
        };
        url.query_pairs_mut()
            .append_pair("limit", &self.page_limit.to_string());
        Ok(url)
    }

    pub fn categories_url(&self) -> Result<Url, CatalogError> {
        self.endpoint(&["products", "categories"])
    }

    async fn get_json<T: DeserializeOwned>(&self, url: Url) -> Result<T, CatalogError> {
        debug!(%url, "GET");
        let response = self.http.get(url.clone()).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Http {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }
        let body = response.bytes().await?;
        Ok(serde_json::from_slice(&body)?)
    }
}

impl CatalogSource for HttpCatalog {
    #[instrument(name = "http_fetch_products", skip(self, query), fields(query = %query))]
    async fn fetch_products(&self, query: &CatalogQuery) -> Result<ProductPage, CatalogError> {
        let url = self.products_url(query)?;
        let mut page: ProductPage = self.get_json(url).await?;
        if page.products.len() > self.page_limit {
            warn!(
                received = page.products.len(),
                limit = self.page_limit,
                "Server returned more products than requested, truncating"
            );
            page.products.truncate(self.page_limit);
        }
        debug!(count = page.products.len(), total = ?page.total, "Products received");
        Ok(page)
    }

    #[instrument(name = "http_fetch_categories", skip(self))]
    async fn fetch_categories(&self) -> Result<Vec<RawCategory>, CatalogError> {
        let url = self.categories_url()?;
        let categories: Vec<RawCategory> = self.get_json(url).await?;
        debug!(count = categories.len(), "Categories received");
        Ok(categories)
    }
}
