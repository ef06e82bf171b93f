//! Remote catalog access.

use std::future::Future;

use crate::domain::{CatalogQuery, ProductPage, RawCategory};
use crate::error::CatalogError;

pub mod http;

pub use http::HttpCatalog;

/// Where product and category listings come from.
pub trait CatalogSource: Send + Sync + 'static {
    /// Fetches one page of products scoped to `query`.
    fn fetch_products(
        &self,
        query: &CatalogQuery,
    ) -> impl Future<Output = Result<ProductPage, CatalogError>> + Send;

    /// Fetches the raw category listing.
    fn fetch_categories(&self) -> impl Future<Output = Result<Vec<RawCategory>, CatalogError>> + Send;
}
