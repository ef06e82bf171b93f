use clap::{Args, Parser};

use crate::domain::unknown_params;
use crate::error::ConfigError;

pub const DEFAULT_BASE_URL: &str = "https://dummyjson.com";
pub const DEFAULT_PAGE_LIMIT: usize = 10;
pub const DEFAULT_GRID_COLUMNS: usize = 3;
pub const DEFAULT_IMAGE_HOST: &str = "cdn.dummyjson.com";

#[derive(Debug, Parser)]
#[command(name = "catalog_browser", about = "Browse a remote product catalog from the terminal")]
pub struct Cli {
    /// Page URL query to restore (e.g. "?category=smartphones" or "?search=phone").
    #[arg(value_parser = parse_url_query)]
    pub url_query: Option<String>,

    #[command(flatten)]
    pub config: CatalogConfig,
}

/// Runtime settings. Every flag falls back to its `CATALOG_*` environment
/// variable, then to the default.
#[derive(Debug, Clone, PartialEq, Args)]
pub struct CatalogConfig {
    /// Root URL of the product API.
    #[arg(long, env = "CATALOG_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Products requested per fetch.
    #[arg(long, env = "CATALOG_PAGE_LIMIT", default_value_t = DEFAULT_PAGE_LIMIT, value_parser = positive_number)]
    pub page_limit: usize,

    /// Product cards per grid row.
    #[arg(long, env = "CATALOG_GRID_COLUMNS", default_value_t = DEFAULT_GRID_COLUMNS, value_parser = positive_number)]
    pub grid_columns: usize,

    /// Only thumbnails served from this host under `/products/` are shown.
    #[arg(long, env = "CATALOG_IMAGE_HOST", default_value = DEFAULT_IMAGE_HOST)]
    pub image_host: String,
}

fn positive_number(value: &str) -> Result<usize, ConfigError> {
    match value.trim().parse::<usize>() {
        Ok(n) if n > 0 => Ok(n),
        _ => Err(ConfigError::InvalidNumber(value.to_string())),
    }
}

fn parse_url_query(value: &str) -> Result<String, ConfigError> {
    match unknown_params(value).into_iter().next() {
        Some(param) => Err(ConfigError::UnknownQueryParam(param)),
        None => Ok(value.to_string()),
    }
}
