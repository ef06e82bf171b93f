use std::fmt;

use reqwest::Url;
use tracing::debug;

const CATEGORY_PARAM: &str = "category";
const SEARCH_PARAM: &str = "search";

/// The active selection. At most one of category or search is active.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum CatalogQuery {
    #[default]
    All,
    Category(String),
    Search(String),
}

impl CatalogQuery {
    /// An empty slug selects "All Products". Slugs are lowercase.
    pub fn category(slug: &str) -> Self {
        let slug = slug.trim();
        if slug.is_empty() {
            Self::All
        } else {
            Self::Category(slug.to_lowercase())
        }
    }

    /// An empty or blank term selects "All Products".
    pub fn search(term: &str) -> Self {
        let term = term.trim();
        if term.is_empty() {
            Self::All
        } else {
            Self::Search(term.to_string())
        }
    }

    pub fn active_category(&self) -> Option<&str> {
        match self {
            Self::Category(slug) => Some(slug),
            _ => None,
        }
    }

    pub fn search_term(&self) -> Option<&str> {
        match self {
            Self::Search(term) => Some(term),
            _ => None,
        }
    }

    /// Parses `category`/`search` from a URL query string, with or without
    /// the leading `?`. When both are present the category wins.
    pub fn from_url_query(query: &str) -> Self {
        let mut category = None;
        let mut search = None;
        for (key, value) in query_pairs(query) {
            match key.as_str() {
                CATEGORY_PARAM => category = Some(value),
                SEARCH_PARAM => search = Some(value),
                other => debug!(param = %other, "Ignoring unknown query parameter"),
            }
        }

        match (category.as_deref().map(Self::category), search) {
            (Some(Self::Category(slug)), search) => {
                if search.is_some() {
                    debug!(category = %slug, "Both category and search present, keeping category");
                }
                Self::Category(slug)
            }
            (_, Some(term)) => Self::search(&term),
            _ => Self::All,
        }
    }

    /// Serializes the selection as a query string including the leading `?`,
    /// or an empty string for "All Products".
    pub fn to_url_query(&self) -> String {
        let (key, value) = match self {
            Self::All => return String::new(),
            Self::Category(slug) => (CATEGORY_PARAM, slug),
            Self::Search(term) => (SEARCH_PARAM, term),
        };
        let mut url = match Url::parse("http://catalog.local/") {
            Ok(url) => url,
            Err(_) => return String::new(),
        };
        url.query_pairs_mut().append_pair(key, value);
        format!("?{}", url.query().unwrap_or_default())
    }
}

/// Parameter names in a URL query string other than `category` and `search`.
pub fn unknown_params(query: &str) -> Vec<String> {
    query_pairs(query)
        .into_iter()
        .map(|(key, _)| key)
        .filter(|key| key != CATEGORY_PARAM && key != SEARCH_PARAM)
        .collect()
}

fn query_pairs(query: &str) -> Vec<(String, String)> {
    let query = query.trim().trim_start_matches('?');
    let mut url = match Url::parse("http://catalog.local/") {
        Ok(url) => url,
        Err(_) => return Vec::new(),
    };
    url.set_query(Some(query));
    url.query_pairs()
        .map(|(key, value)| (key.into_owned(), value.into_owned()))
        .collect()
}

impl fmt::Display for CatalogQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => write!(f, "all"),
            Self::Category(slug) => write!(f, "category:{}", slug),
            Self::Search(term) => write!(f, "search:{}", term),
        }
    }
}
