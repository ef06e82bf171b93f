//! Text rendering of the catalog: chip bar, search box, banners and the
//! product grid. Rendering is a pure function of store snapshots and the
//! current selection.

use std::io::Write;

use reqwest::Url;
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::actor_framework::StoreSnapshot;
use crate::domain::{CatalogQuery, Category, Product};

const CARD_WIDTH: usize = 34;
const GUTTER: &str = "  ";
const DESCRIPTION_LINES: usize = 2;
const ALL_PRODUCTS: &str = "All Products";

/// Thumbnails are only shown when served over https from the configured host
/// under `/products/`.
#[derive(Debug, Clone)]
pub struct ImagePolicy {
    host: String,
}

impl ImagePolicy {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn allows(&self, thumbnail: &str) -> bool {
        match Url::parse(thumbnail) {
            Ok(url) => {
                url.scheme() == "https"
                    && url.host_str() == Some(self.host.as_str())
                    && url.path().starts_with("/products/")
            }
            Err(_) => false,
        }
    }
}

/// Everything one frame is rendered from.
pub struct ViewState<'a> {
    pub products: &'a StoreSnapshot<Product>,
    pub categories: &'a StoreSnapshot<Category>,
    pub query: &'a CatalogQuery,
}

pub struct ListView {
    columns: usize,
    images: ImagePolicy,
}

impl ListView {
    pub fn new(columns: usize, images: ImagePolicy) -> Self {
        Self {
            columns: columns.max(1),
            images,
        }
    }

    fn line_width(&self) -> usize {
        self.columns * CARD_WIDTH + (self.columns - 1) * GUTTER.len()
    }

    pub fn render(&self, state: &ViewState<'_>) -> String {
        let mut lines = vec!["Product List".to_string(), String::new()];

        lines.extend(self.chip_bar(&state.categories.items, state.query.active_category()));
        lines.push(format!("Search: [{}]", state.query.search_term().unwrap_or(" ")));
        lines.push(String::new());

        if let Some(error) = &state.categories.error {
            lines.push(format!("! {}", error));
        }
        if let Some(error) = &state.products.error {
            lines.push(format!("! {}", error));
        }

        if state.products.loading {
            lines.push("Loading...".to_string());
        } else if state.products.items.is_empty() {
            lines.push("No products found.".to_string());
        } else {
            lines.extend(self.grid(&state.products.items));
        }

        let mut out = lines.join("\n");
        out.push('\n');
        out
    }

    /// "All Products" plus one chip per category, wrapped to the grid width.
    /// The active chip is starred.
    fn chip_bar(&self, categories: &[Category], active: Option<&str>) -> Vec<String> {
        let chip = |label: &str, is_active: bool| {
            if is_active {
                format!("[*{}*]", label)
            } else {
                format!("[{}]", label)
            }
        };

        let mut chips = vec![chip(ALL_PRODUCTS, active.is_none())];
        chips.extend(
            categories
                .iter()
                .map(|c| chip(&c.name, active == Some(c.slug.as_str()))),
        );

        let width = self.line_width();
        let mut lines = Vec::new();
        let mut current = String::new();
        for chip in chips {
            if !current.is_empty() && current.chars().count() + 1 + chip.chars().count() > width {
                lines.push(std::mem::take(&mut current));
            }
            if !current.is_empty() {
                current.push(' ');
            }
            current.push_str(&chip);
        }
        if !current.is_empty() {
            lines.push(current);
        }
        lines
    }

    fn grid(&self, products: &[Product]) -> Vec<String> {
        let mut lines = Vec::new();
        let rule = "-".repeat(self.line_width());
        for row in products.chunks(self.columns) {
            let cards: Vec<Vec<String>> = row.iter().map(|p| self.card(p)).collect();
            let height = cards.iter().map(Vec::len).max().unwrap_or(0);
            for i in 0..height {
                let cells: Vec<String> = cards
                    .iter()
                    .map(|card| pad(card.get(i).map(String::as_str).unwrap_or(""), CARD_WIDTH))
                    .collect();
                lines.push(cells.join(GUTTER).trim_end().to_string());
            }
            lines.push(rule.clone());
        }
        lines
    }

    fn card(&self, product: &Product) -> Vec<String> {
        let mut lines = vec![clip(&product.title, CARD_WIDTH)];

        let mut description = wrap(&product.description, CARD_WIDTH);
        if description.len() > DESCRIPTION_LINES {
            description.truncate(DESCRIPTION_LINES);
            let last = &mut description[DESCRIPTION_LINES - 1];
            *last = clip(&format!("{}…", last), CARD_WIDTH);
        }
        description.resize(DESCRIPTION_LINES, String::new());
        lines.extend(description);

        lines.push(format!("Price: ${:.2}", product.price));
        lines.push(clip(&format!("Category: {}", product.category), CARD_WIDTH));
        lines.push(format!("Stock: {}", product.stock));
        lines.push(format!("Rating: {:.1} ★", product.rating));
        if self.images.allows(&product.thumbnail) {
            lines.push(clip(&product.thumbnail, CARD_WIDTH));
        } else {
            lines.push("[image unavailable]".to_string());
        }
        lines
    }
}

fn clip(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut clipped: String = text.chars().take(width.saturating_sub(1)).collect();
        clipped.push('…');
        clipped
    }
}

fn pad(text: &str, width: usize) -> String {
    let len = text.chars().count();
    format!("{}{}", text, " ".repeat(width.saturating_sub(len)))
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let word = clip(word, width);
        if !current.is_empty() && current.chars().count() + 1 + word.chars().count() > width {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn write_frame<W: Write>(out: &mut W, frame: &str, clear: bool) -> std::io::Result<()> {
    if clear {
        write!(out, "\x1b[2J\x1b[H{}", frame)?;
    } else {
        writeln!(out, "{}", frame)?;
    }
    out.flush()
}

/// Re-renders to `out` whenever a store or the selection changes. Once a
/// publisher is gone, renders a final frame and hands `out` back.
pub async fn render_on_change<W: Write>(
    view: ListView,
    mut out: W,
    clear: bool,
    mut products: watch::Receiver<StoreSnapshot<Product>>,
    mut categories: watch::Receiver<StoreSnapshot<Category>>,
    mut query: watch::Receiver<CatalogQuery>,
) -> W {
    let mut closed = false;
    loop {
        let frame = {
            let products = products.borrow_and_update().clone();
            let categories = categories.borrow_and_update().clone();
            let query = query.borrow_and_update().clone();
            view.render(&ViewState {
                products: &products,
                categories: &categories,
                query: &query,
            })
        };

        if let Err(e) = write_frame(&mut out, &frame, clear) {
            warn!(error = %e, "Failed to write frame");
            return out;
        }
        if closed {
            debug!("Publishers closed, render loop exiting");
            return out;
        }

        let changed = tokio::select! {
            r = products.changed() => r,
            r = categories.changed() => r,
            r = query.changed() => r,
        };
        closed = changed.is_err();
    }
}
