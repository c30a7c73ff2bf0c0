//! Catalogue command handlers for the CLI.

use std::path::Path;

use anyhow::Context;
use omni_catalog::{parse_feed, FeedClient};
use omni_core::{AppConfig, Product, Taxonomy};
use omni_shop::pipeline::{RELATED_LIMIT, SUGGESTION_LIMIT};
use omni_shop::{
    related_products, search_suggestions, FileStorage, FilterState, Pager, SortKey, Storefront,
    StorefrontConfig,
};

/// Shop filters as given on the command line.
#[derive(Debug, Default)]
pub(crate) struct BrowseQuery {
    pub(crate) category: Option<String>,
    pub(crate) max_price: Option<u64>,
    pub(crate) brands: Vec<String>,
    pub(crate) search: Option<String>,
    pub(crate) within: Option<String>,
    pub(crate) sort: String,
    pub(crate) pages: usize,
}

impl BrowseQuery {
    pub(crate) fn filter_state(&self) -> FilterState {
        let mut filter = FilterState::default();
        filter.set_category(self.category.as_deref());
        if let Some(max_price) = self.max_price {
            filter.max_price = max_price;
        }
        filter.brands.clone_from(&self.brands);
        if let Some(search) = &self.search {
            filter.search_query = search.trim().to_owned();
        }
        if let Some(within) = &self.within {
            filter.filter_search_query.clone_from(within);
        }
        filter
    }
}

/// Builds the storefront with the configured taxonomy and the on-disk cart.
///
/// # Errors
///
/// Returns an error if a configured taxonomy file cannot be loaded.
pub(crate) fn open_storefront(config: &AppConfig) -> anyhow::Result<Storefront<FileStorage>> {
    let taxonomy = match &config.taxonomy_path {
        Some(path) => omni_core::load_taxonomy(path)?,
        None => Taxonomy::builtin(),
    };
    Ok(Storefront::new(
        StorefrontConfig::from(config),
        taxonomy,
        FileStorage::new(&config.cart_path),
    ))
}

/// Fills the storefront's product list from `feed_file` or the live feed.
///
/// A failed live fetch is not an error: the catalogue stays empty.
///
/// # Errors
///
/// Returns an error if `feed_file` cannot be read or is not a feed, or the
/// HTTP client cannot be built.
pub(crate) async fn load_catalogue(
    store: &mut Storefront<FileStorage>,
    config: &AppConfig,
    feed_file: Option<&Path>,
) -> anyhow::Result<()> {
    if let Some(path) = feed_file {
        let body = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read feed file {}", path.display()))?;
        store.load_records(parse_feed(&body)?);
        return Ok(());
    }

    let client = FeedClient::new(config.feed_timeout_secs, &config.user_agent)
        .map_err(|e| anyhow::anyhow!("failed to build feed client: {e}"))?;
    if !store.refresh(&client).await {
        eprintln!("warning: catalogue could not be loaded; showing an empty list");
    }
    Ok(())
}

async fn loaded_storefront(
    config: &AppConfig,
    feed_file: Option<&Path>,
) -> anyhow::Result<Storefront<FileStorage>> {
    let mut store = open_storefront(config)?;
    load_catalogue(&mut store, config, feed_file).await?;
    Ok(store)
}

/// Print a catalogue summary: product count and the labels in stock.
///
/// # Errors
///
/// Returns an error if the catalogue cannot be loaded.
pub(crate) async fn run_fetch(config: &AppConfig, feed_file: Option<&Path>) -> anyhow::Result<()> {
    let store = loaded_storefront(config, feed_file).await?;

    println!("products:   {}", store.products().len());
    println!("brands:     {}", store.available_brands().join(", "));
    println!("categories: {}", store.available_categories().join(", "));
    let new_count = store.products().iter().filter(|p| p.is_new).count();
    println!("new:        {new_count}");
    Ok(())
}

/// List products through the filters, one page at a time.
///
/// # Errors
///
/// Returns an error if the catalogue cannot be loaded.
pub(crate) async fn run_browse(
    config: &AppConfig,
    feed_file: Option<&Path>,
    query: &BrowseQuery,
) -> anyhow::Result<()> {
    let mut store = loaded_storefront(config, feed_file).await?;
    store.set_filter(query.filter_state());
    store.set_sort(SortKey::from_key(&query.sort));

    let products = store.filtered_products();
    let total = products.len();
    let mut pager = Pager::new(config.pagination);
    for _ in 1..query.pages.max(1) {
        if !pager.advance(total) {
            break;
        }
    }

    if products.is_empty() {
        println!("no products match the current filters");
        return Ok(());
    }

    let currency = &config.order.currency_symbol;
    println!(
        "{:<10}{:<14}{:<16}{:>10}  NAME",
        "ID", "BRAND", "CATEGORY", "PRICE"
    );
    for product in pager.window(&products) {
        let price = format!("{currency}{}", product.price);
        let marker = if product.is_new { " [new]" } else { "" };
        println!(
            "{:<10}{:<14}{:<16}{:>10}  {}{marker}",
            product.id, product.brand, product.category, price, product.name
        );
    }

    let shown = pager.visible_count().min(total);
    println!("showing {shown} of {total} (sorted by {})", store.sort());
    let next = query.pages.max(1) + 1;
    if pager.shows_load_more_button(total) {
        println!("[load more] pass --pages {next}");
    } else if pager.has_more(total) {
        println!("more results below; pass --pages {next}");
    }
    Ok(())
}

/// Show one product with its related products.
///
/// # Errors
///
/// Returns an error if the catalogue cannot be loaded or `id` is unknown.
pub(crate) async fn run_product(
    config: &AppConfig,
    feed_file: Option<&Path>,
    id: &str,
) -> anyhow::Result<()> {
    let store = loaded_storefront(config, feed_file).await?;
    let product = store
        .product(id)
        .ok_or_else(|| anyhow::anyhow!("product '{id}' not found"))?;

    print_product(product, &config.order.currency_symbol);

    let related = related_products(store.products(), product, RELATED_LIMIT);
    if !related.is_empty() {
        println!();
        println!("You may also like:");
        for item in related {
            println!("  {:<10}{}", item.id, item.name);
        }
    }
    Ok(())
}

fn print_product(product: &Product, currency: &str) {
    println!("{}", product.name);
    println!("Brand:    {}", product.brand);
    println!("Category: {}", product.category);
    println!("Price:    {currency}{}", product.price);
    println!("Rating:   {} ({} reviews)", product.rating, product.reviews);
    println!("Sizes:    {}", product.sizes.join(", "));
    if product.in_stock() {
        println!("Stock:    {}", product.stock);
    } else {
        println!("Stock:    sold out");
    }
    if !product.description.is_empty() {
        println!();
        println!("{}", product.description);
    }
}

/// Print the header-search suggestions for `term`.
///
/// # Errors
///
/// Returns an error if the catalogue cannot be loaded.
pub(crate) async fn run_search(
    config: &AppConfig,
    feed_file: Option<&Path>,
    term: &str,
) -> anyhow::Result<()> {
    let store = loaded_storefront(config, feed_file).await?;
    let suggestions = search_suggestions(store.products(), term, SUGGESTION_LIMIT);
    if suggestions.is_empty() {
        println!("no suggestions for '{term}'");
        return Ok(());
    }
    for product in suggestions {
        println!(
            "{:<10}{} ({} / {})",
            product.id, product.name, product.brand, product.category
        );
    }
    Ok(())
}
