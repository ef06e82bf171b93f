use serde::Deserialize;

/// A product as listed by the remote catalog.
///
/// Products are never created locally; a successful fetch replaces the whole
/// list held by the product store.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Product {
    pub id: u64,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub price: f64,
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub rating: f64,
    #[serde(default)]
    pub thumbnail: String,
}

/// Listing envelope returned by every product endpoint.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(default)]
    pub total: Option<u64>,
    #[serde(default)]
    #[allow(dead_code)]
    pub skip: Option<u64>,
    #[serde(default)]
    #[allow(dead_code)]
    pub limit: Option<u64>,
}

#[cfg(test)]
impl Product {
    pub fn new(id: u64, title: impl Into<String>, category: impl Into<String>, price: f64) -> Self {
        Self {
            id,
            title: title.into(),
            description: String::new(),
            price,
            category: category.into(),
            stock: 0,
            rating: 0.0,
            thumbnail: String::new(),
        }
    }

    /// Case-insensitive substring match on the title.
    pub fn title_matches(&self, term: &str) -> bool {
        self.title.to_lowercase().contains(&term.to_lowercase())
    }
}

#[cfg(test)]
impl ProductPage {
    pub fn new(products: Vec<Product>) -> Self {
        let total = products.len() as u64;
        Self {
            products,
            total: Some(total),
            skip: Some(0),
            limit: None,
        }
    }
}

/// Client-side title filter. An empty term keeps every product.
#[cfg(test)]
pub fn filter_by_title<'a>(products: &'a [Product], term: &str) -> Vec<&'a Product> {
    let term = term.trim();
    products
        .iter()
        .filter(|p| term.is_empty() || p.title_matches(term))
        .collect()
}
