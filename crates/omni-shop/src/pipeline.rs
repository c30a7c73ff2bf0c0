//! Filter/sort pipeline over the product list.
//!
//! Every function here is a pure recompute from its inputs. Nothing is
//! cached between calls.

use std::cmp::Ordering;
use std::fmt;

use omni_core::{PaginationConfig, PaginationMode, Product};
use serde::{Deserialize, Serialize};

pub const DEFAULT_MAX_PRICE: u64 = 50_000;
pub const RELATED_LIMIT: usize = 4;
pub const SUGGESTION_LIMIT: usize = 5;

/// Search terms this short produce no suggestions.
const MIN_SUGGESTION_CHARS: usize = 3;

/// Shop filter state.
///
/// `category: None` and an empty `brands` list both mean "no restriction".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterState {
    pub category: Option<String>,
    /// Kept in the state but not applied by [`view`].
    pub min_price: u64,
    pub max_price: u64,
    pub brands: Vec<String>,
    /// Global header search: name, brand or category. Matched trimmed, so a
    /// blank query applies no restriction.
    pub search_query: String,
    /// Sidebar search within results: name or brand only.
    pub filter_search_query: String,
}

impl Default for FilterState {
    fn default() -> Self {
        Self {
            category: None,
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            brands: Vec::new(),
            search_query: String::new(),
            filter_search_query: String::new(),
        }
    }
}

impl FilterState {
    /// Fresh state with only the global search set.
    #[must_use]
    pub fn search_only(query: &str) -> Self {
        Self {
            search_query: query.trim().to_owned(),
            ..Self::default()
        }
    }

    /// Narrows to a single brand and clears the category.
    pub fn only_brand(&mut self, label: &str) {
        self.brands = vec![label.to_owned()];
        self.category = None;
    }

    /// Narrows to a single category and clears the brand list.
    pub fn only_category(&mut self, label: &str) {
        self.category = Some(label.to_owned());
        self.brands.clear();
    }

    /// Adds `label` to the brand allow-list, or removes it if present.
    pub fn toggle_brand(&mut self, label: &str) {
        if let Some(pos) = self.brands.iter().position(|b| b == label) {
            self.brands.remove(pos);
        } else {
            self.brands.push(label.to_owned());
        }
    }

    /// Sets the category, treating an empty string as "all categories".
    pub fn set_category(&mut self, label: Option<&str>) {
        self.category = label.filter(|l| !l.is_empty()).map(str::to_owned);
    }

    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if let Some(category) = self.category.as_deref() {
            if !category.is_empty() && product.category != category {
                return false;
            }
        }
        if product.price > self.max_price {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.iter().any(|b| *b == product.brand) {
            return false;
        }
        let needle = self.search_query.trim().to_lowercase();
        if !needle.is_empty()
            && !contains_any(&needle, &[&product.name, &product.brand, &product.category])
        {
            return false;
        }
        if !self.filter_search_query.is_empty() {
            let needle = self.filter_search_query.to_lowercase();
            if !contains_any(&needle, &[&product.name, &product.brand]) {
                return false;
            }
        }
        true
    }
}

fn contains_any(needle: &str, fields: &[&str]) -> bool {
    fields.iter().any(|f| f.to_lowercase().contains(needle))
}

/// Shop sort order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SortKey {
    /// Rating, highest first.
    #[default]
    Featured,
    PriceLow,
    PriceHigh,
    /// New arrivals first.
    Newest,
}

impl SortKey {
    pub const ALL: [SortKey; 4] = [
        SortKey::Featured,
        SortKey::PriceLow,
        SortKey::PriceHigh,
        SortKey::Newest,
    ];

    /// Parses a sort key. Unrecognized keys fall back to [`SortKey::Featured`].
    #[must_use]
    pub fn from_key(key: &str) -> Self {
        match key.trim() {
            "price-low" => SortKey::PriceLow,
            "price-high" => SortKey::PriceHigh,
            "newest" => SortKey::Newest,
            _ => SortKey::Featured,
        }
    }

    #[must_use]
    pub fn as_key(self) -> &'static str {
        match self {
            SortKey::Featured => "featured",
            SortKey::PriceLow => "price-low",
            SortKey::PriceHigh => "price-high",
            SortKey::Newest => "newest",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            SortKey::Featured => b.rating.total_cmp(&a.rating),
            SortKey::PriceLow => a.price.cmp(&b.price),
            SortKey::PriceHigh => b.price.cmp(&a.price),
            SortKey::Newest => b.is_new.cmp(&a.is_new),
        }
    }
}

impl fmt::Display for SortKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_key())
    }
}

/// Filters `products` by `filter` and orders the result by `sort`.
///
/// The sort is stable: products that compare equal keep their list order.
#[must_use]
pub fn view<'a>(products: &'a [Product], filter: &FilterState, sort: SortKey) -> Vec<&'a Product> {
    let mut result: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
    result.sort_by(|a, b| sort.compare(a, b));
    result
}

/// Visible window over a filtered list, grown one page at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pager {
    config: PaginationConfig,
    visible: usize,
}

impl Pager {
    #[must_use]
    pub fn new(config: PaginationConfig) -> Self {
        Self {
            config,
            visible: config.page_size,
        }
    }

    #[must_use]
    pub fn visible_count(&self) -> usize {
        self.visible
    }

    #[must_use]
    pub fn has_more(&self, total: usize) -> bool {
        self.visible < total
    }

    /// Grows the window by one page. Returns `false` if nothing was left to show.
    pub fn advance(&mut self, total: usize) -> bool {
        if !self.has_more(total) {
            return false;
        }
        self.visible = self.visible.saturating_add(self.config.page_size);
        true
    }

    /// Back to the first page. Called whenever the filter or sort changes.
    pub fn reset(&mut self) {
        self.visible = self.config.page_size;
    }

    #[must_use]
    pub fn window<'a, T>(&self, items: &'a [T]) -> &'a [T] {
        &items[..self.visible.min(items.len())]
    }

    /// Only the load-more mode shows an explicit control; infinite scroll
    /// advances on its own.
    #[must_use]
    pub fn shows_load_more_button(&self, total: usize) -> bool {
        self.config.mode == PaginationMode::LoadMore && self.has_more(total)
    }
}

/// Products to show alongside `product`: same category first, then same
/// brand, then the rest of the list, without repeats and never `product`
/// itself.
#[must_use]
pub fn related_products<'a>(
    products: &'a [Product],
    product: &Product,
    limit: usize,
) -> Vec<&'a Product> {
    let others: Vec<&Product> = products.iter().filter(|p| p.id != product.id).collect();
    let mut related: Vec<&Product> = Vec::with_capacity(limit);

    let tiers = others
        .iter()
        .filter(|p| p.category == product.category)
        .chain(others.iter().filter(|p| p.brand == product.brand))
        .chain(others.iter())
        .copied();
    for candidate in tiers {
        if related.len() >= limit {
            break;
        }
        if !related.iter().any(|r| r.id == candidate.id) {
            related.push(candidate);
        }
    }
    related
}

/// Live header-search suggestions.
///
/// Terms of two characters or fewer yield nothing. Matching is a
/// case-insensitive substring test on name, category or brand.
#[must_use]
pub fn search_suggestions<'a>(products: &'a [Product], term: &str, limit: usize) -> Vec<&'a Product> {
    if term.chars().count() < MIN_SUGGESTION_CHARS {
        return Vec::new();
    }
    let needle = term.to_lowercase();
    products
        .iter()
        .filter(|p| contains_any(&needle, &[&p.name, &p.category, &p.brand]))
        .take(limit)
        .collect()
}

#[cfg(test)]
#[path = "pipeline_test.rs"]
mod tests;
