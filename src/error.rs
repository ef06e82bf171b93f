use thiserror::Error;

/// Failures at the fetch boundary.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("network error: {0}")]
    Network(#[from] reqwest::Error),
    #[error("HTTP {status} from {url}")]
    Http { status: u16, url: String },
    #[error("malformed response: {0}")]
    Malformed(#[from] serde_json::Error),
    #[error("invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Errors returned by the typed store clients.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum StoreError {
    #[error("Actor communication error: {0}")]
    ActorCommunicationError(String),
}

/// Rejected command-line or environment settings.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ConfigError {
    #[error("expected a positive integer, got {0:?}")]
    InvalidNumber(String),
    #[error("unknown URL query parameter {0:?} (expected category or search)")]
    UnknownQueryParam(String),
}
