use serde::Deserialize;
use tracing::warn;

/// A normalized category, as shown in the chip bar.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    pub slug: String,
    pub name: String,
    /// Category path derived from the slug.
    #[allow(dead_code)]
    pub url: String,
}

/// Category payload as the remote source returns it: older API versions send
/// bare strings, newer ones send objects.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    Name(String),
    Object {
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        slug: Option<String>,
    },
}

impl Category {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        let slug = slug.into();
        Self {
            url: category_path(&slug),
            slug,
            name: name.into(),
        }
    }
}

pub fn category_path(slug: &str) -> String {
    format!("/products/category/{}", slug)
}

fn capitalize_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl RawCategory {
    /// Resolves name and slug. Returns `None` for an object carrying neither.
    pub fn normalize(self) -> Option<Category> {
        match self {
            RawCategory::Name(s) => Some(Category::new(s.to_lowercase(), capitalize_first(&s))),
            RawCategory::Object { name, slug } => {
                let (name, slug) = match (name, slug) {
                    (Some(name), Some(slug)) => (name, slug),
                    (Some(name), None) => {
                        let slug = name.to_lowercase();
                        (name, slug)
                    }
                    (None, Some(slug)) => (slug.clone(), slug),
                    (None, None) => return None,
                };
                Some(Category::new(slug, name))
            }
        }
    }
}

/// Normalizes a remote category listing. Duplicates and empty strings pass
/// through untouched; entries with neither name nor slug are dropped.
pub fn normalize_categories(raw: Vec<RawCategory>) -> Vec<Category> {
    raw.into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let normalized = entry.normalize();
            if normalized.is_none() {
                warn!(index, "Skipping category with neither name nor slug");
            }
            normalized
        })
        .collect()
}
