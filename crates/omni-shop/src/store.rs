//! The storefront state container.

use chrono::Duration;
use omni_catalog::{
    map_feed, CatalogueMapper, FeedClient, Placeholders, RandomPlaceholders, UpstreamRecord,
};
use omni_core::{
    AppConfig, OrderConfig, PricingConfig, Product, RuleTable, Taxonomy, UNCLASSIFIED_LABEL,
};

use crate::cart::Cart;
use crate::order::{format_order, order_link, CustomerInfo};
use crate::persist::{decode_cart, encode_cart, CartStorage, CART_STORAGE_KEY, DEFAULT_CART_TTL_DAYS};
use crate::pipeline::{view, FilterState, SortKey};

/// Settings the storefront needs from the application config.
#[derive(Debug, Clone, PartialEq)]
pub struct StorefrontConfig {
    pub feed_url: String,
    pub pricing: PricingConfig,
    pub order: OrderConfig,
    pub cart_ttl_days: u32,
}

impl StorefrontConfig {
    #[must_use]
    pub fn new(feed_url: impl Into<String>) -> Self {
        Self {
            feed_url: feed_url.into(),
            pricing: PricingConfig::default(),
            order: OrderConfig::default(),
            cart_ttl_days: DEFAULT_CART_TTL_DAYS,
        }
    }

    fn cart_ttl(&self) -> Duration {
        Duration::days(i64::from(self.cart_ttl_days))
    }
}

impl From<&AppConfig> for StorefrontConfig {
    fn from(config: &AppConfig) -> Self {
        Self {
            feed_url: config.feed_url.clone(),
            pricing: config.pricing,
            order: config.order.clone(),
            cart_ttl_days: config.cart_ttl_days,
        }
    }
}

/// Products, cart, and shop view state for one shopper session.
pub struct Storefront<S: CartStorage> {
    config: StorefrontConfig,
    taxonomy: Taxonomy,
    storage: S,
    products: Vec<Product>,
    cart: Cart,
    filter: FilterState,
    sort: SortKey,
    is_cart_open: bool,
    is_loading: bool,
}

impl<S: CartStorage> Storefront<S> {
    /// Creates a storefront with an empty product list and the cart restored
    /// from `storage`.
    ///
    /// The storefront reports [`Self::is_loading`] until the first catalogue
    /// load settles, successfully or not.
    pub fn new(config: StorefrontConfig, taxonomy: Taxonomy, storage: S) -> Self {
        let cart = storage
            .load(CART_STORAGE_KEY)
            .map(|raw| decode_cart(&raw))
            .unwrap_or_default();
        if !cart.is_empty() {
            tracing::debug!(lines = cart.len(), "restored persisted cart");
        }
        Self {
            config,
            taxonomy,
            storage,
            products: Vec::new(),
            cart,
            filter: FilterState::default(),
            sort: SortKey::default(),
            is_cart_open: false,
            is_loading: true,
        }
    }

    // -- catalogue ---------------------------------------------------------

    /// Fetches the feed once and replaces the product list.
    ///
    /// Records are mapped with this storefront's pricing and taxonomy. On
    /// failure the error is logged and the current list is kept. Returns
    /// `true` if the list was replaced.
    pub async fn refresh(&mut self, client: &FeedClient) -> bool {
        self.refresh_with(client, RandomPlaceholders).await
    }

    /// [`Self::refresh`] with explicit placeholder values.
    pub async fn refresh_with<P: Placeholders>(
        &mut self,
        client: &FeedClient,
        placeholders: P,
    ) -> bool {
        self.is_loading = true;
        let mapper = self.mapper(placeholders);
        let result = client.fetch_products(&self.config.feed_url, &mapper).await;
        self.is_loading = false;

        match result {
            Ok(products) => {
                tracing::info!(products = products.len(), "catalogue loaded");
                self.products = products;
                true
            }
            Err(e) => {
                tracing::error!(feed_url = %self.config.feed_url, error = %e, "failed to load catalogue");
                false
            }
        }
    }

    /// Maps already-fetched feed records and replaces the product list.
    pub fn load_records(&mut self, records: Vec<UpstreamRecord>) {
        self.load_records_with(records, RandomPlaceholders);
    }

    pub fn load_records_with<P: Placeholders>(&mut self, records: Vec<UpstreamRecord>, placeholders: P) {
        let products = map_feed(records, &self.mapper(placeholders));
        self.replace_products(products);
    }

    fn mapper<P: Placeholders>(&self, placeholders: P) -> CatalogueMapper<P> {
        CatalogueMapper::with_placeholders(self.config.pricing, &self.taxonomy, placeholders)
    }

    /// Replaces the product list with already-canonical products.
    pub fn replace_products(&mut self, products: Vec<Product>) {
        self.products = products;
        self.is_loading = false;
    }

    #[must_use]
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    #[must_use]
    pub fn product(&self, id: &str) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        self.is_loading
    }

    #[must_use]
    pub fn taxonomy(&self) -> &Taxonomy {
        &self.taxonomy
    }

    // -- shop view ---------------------------------------------------------

    #[must_use]
    pub fn filter(&self) -> &FilterState {
        &self.filter
    }

    pub fn set_filter(&mut self, filter: FilterState) {
        self.filter = filter;
    }

    pub fn update_filter(&mut self, f: impl FnOnce(&mut FilterState)) {
        f(&mut self.filter);
    }

    pub fn reset_filter(&mut self) {
        self.filter = FilterState::default();
    }

    #[must_use]
    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
    }

    /// The product list through the current filter and sort.
    #[must_use]
    pub fn filtered_products(&self) -> Vec<&Product> {
        view(&self.products, &self.filter, self.sort)
    }

    /// Brand labels that have at least one product, alphabetically.
    #[must_use]
    pub fn available_brands(&self) -> Vec<&str> {
        self.available_labels(&self.taxonomy.brands, |p| p.brand.as_str())
    }

    /// Category labels that have at least one product, alphabetically.
    #[must_use]
    pub fn available_categories(&self) -> Vec<&str> {
        self.available_labels(&self.taxonomy.categories, |p| p.category.as_str())
    }

    fn available_labels<'a>(
        &'a self,
        table: &'a RuleTable,
        field: impl Fn(&Product) -> &str,
    ) -> Vec<&'a str> {
        let mut labels: Vec<&str> = table
            .labels()
            .filter(|label| *label != UNCLASSIFIED_LABEL)
            .filter(|label| self.products.iter().any(|p| field(p) == *label))
            .collect();
        labels.sort_unstable();
        labels.dedup();
        labels
    }

    // -- cart --------------------------------------------------------------

    #[must_use]
    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub fn cart_subtotal(&self) -> u64 {
        self.cart.subtotal()
    }

    #[must_use]
    pub fn is_cart_open(&self) -> bool {
        self.is_cart_open
    }

    pub fn set_cart_open(&mut self, open: bool) {
        self.is_cart_open = open;
    }

    /// Adds to the cart and opens the cart panel.
    pub fn add_to_cart(
        &mut self,
        product: Product,
        quantity: u32,
        color: Option<String>,
        size: Option<String>,
    ) {
        tracing::debug!(product_id = %product.id, quantity, "adding to cart");
        self.cart.add(product, quantity, color, size);
        self.is_cart_open = true;
        self.persist_cart();
    }

    /// Removes every cart line for `product_id`.
    pub fn remove_from_cart(&mut self, product_id: &str) -> usize {
        let removed = self.cart.remove(product_id);
        self.persist_cart();
        removed
    }

    pub fn update_quantity(&mut self, product_id: &str, delta: i64) -> usize {
        let touched = self.cart.update_quantity(product_id, delta);
        self.persist_cart();
        touched
    }

    fn persist_cart(&self) {
        let saved = encode_cart(&self.cart).and_then(|raw| {
            self.storage
                .save(CART_STORAGE_KEY, &raw, self.config.cart_ttl())
        });
        if let Err(e) = saved {
            tracing::warn!(error = %e, "failed to persist cart");
        }
    }

    // -- checkout ----------------------------------------------------------

    /// Order text for the whole cart at its current subtotal.
    #[must_use]
    pub fn checkout_message(&self, customer: Option<&CustomerInfo>) -> String {
        format_order(
            self.cart.lines(),
            self.cart_subtotal(),
            customer,
            &self.config.order,
        )
    }

    #[must_use]
    pub fn checkout_link(&self, customer: Option<&CustomerInfo>) -> String {
        order_link(&self.config.order, &self.checkout_message(customer))
    }
}

#[cfg(test)]
mod tests {
    use omni_catalog::{parse_feed, FixedPlaceholders};
    use omni_core::TaxonomyRule;
    use wiremock::matchers::{method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::*;
    use crate::persist::MemoryStorage;
    use crate::test_support::{branded, product};

    fn storefront() -> Storefront<MemoryStorage> {
        Storefront::new(
            StorefrontConfig::new("http://unused.invalid/feed"),
            Taxonomy::builtin(),
            MemoryStorage::new(),
        )
    }

    #[test]
    fn starts_empty_and_loading_with_closed_cart() {
        let store = storefront();
        assert!(store.products().is_empty());
        assert!(store.cart().is_empty());
        assert!(!store.is_cart_open());
        assert!(store.is_loading());
        assert_eq!(store.sort(), SortKey::Featured);
    }

    #[test]
    fn replacing_products_ends_loading() {
        let mut store = storefront();
        store.replace_products(vec![product("1", 10)]);
        assert!(!store.is_loading());
    }

    #[test]
    fn cart_mutation_survives_unrepresentable_expiry() {
        let config = StorefrontConfig {
            cart_ttl_days: u32::MAX,
            ..StorefrontConfig::new("x")
        };
        let mut store = Storefront::new(config, Taxonomy::builtin(), MemoryStorage::new());
        store.add_to_cart(product("1", 500), 1, None, None);
        store.update_quantity("1", 1);
        assert_eq!(store.cart().item_count(), 2);
        assert_eq!(store.storage.load(CART_STORAGE_KEY), None);
    }

    #[test]
    fn load_records_uses_the_storefront_taxonomy() {
        let taxonomy = Taxonomy {
            brands: RuleTable::new(vec![TaxonomyRule {
                label: "Kicks Own".to_string(),
                variants: vec!["kicks".to_string()],
            }]),
            categories: Taxonomy::builtin().categories,
        };
        let mut store = Storefront::new(StorefrontConfig::new("x"), taxonomy, MemoryStorage::new());
        let records = parse_feed(
            r#"[{"productId": 1, "productBrand": "KICKS"}, {"productId": 2, "productBrand": "nike"}]"#,
        )
        .expect("valid feed");
        store.load_records_with(records, FixedPlaceholders::default());

        assert!(!store.is_loading());
        assert_eq!(store.products()[0].brand, "Kicks Own");
        assert_eq!(store.products()[1].brand, UNCLASSIFIED_LABEL);
        assert_eq!(store.available_brands(), vec!["Kicks Own"]);
    }

    #[test]
    fn add_to_cart_opens_panel_and_persists() {
        let mut store = storefront();
        store.add_to_cart(product("1", 500), 2, None, Some("UK 8".to_string()));
        assert!(store.is_cart_open());
        assert_eq!(store.cart_subtotal(), 1000);

        let saved = store.storage.load(CART_STORAGE_KEY).expect("cart persisted");
        assert_eq!(decode_cart(&saved), *store.cart());
    }

    #[test]
    fn cart_is_restored_from_storage() {
        let storage = MemoryStorage::new();
        let mut cart = Cart::new();
        cart.add(product("9", 300), 3, None, None);
        storage
            .save(
                CART_STORAGE_KEY,
                &encode_cart(&cart).expect("encode"),
                Duration::days(7),
            )
            .expect("save");

        let store = Storefront::new(StorefrontConfig::new("x"), Taxonomy::builtin(), storage);
        assert_eq!(store.cart(), &cart);
        assert_eq!(store.cart_subtotal(), 900);
    }

    #[test]
    fn malformed_persisted_cart_starts_empty() {
        let storage = MemoryStorage::new();
        storage
            .save(CART_STORAGE_KEY, "{broken", Duration::days(7))
            .expect("save");
        let store = Storefront::new(StorefrontConfig::new("x"), Taxonomy::builtin(), storage);
        assert!(store.cart().is_empty());
    }

    #[test]
    fn remove_and_update_persist_the_new_cart() {
        let mut store = storefront();
        store.add_to_cart(product("1", 100), 1, None, None);
        store.add_to_cart(product("2", 100), 1, None, None);
        store.update_quantity("2", 4);
        assert_eq!(store.remove_from_cart("1"), 1);

        let saved = decode_cart(&store.storage.load(CART_STORAGE_KEY).expect("saved"));
        assert_eq!(saved.len(), 1);
        assert_eq!(saved.lines()[0].quantity, 5);
    }

    #[test]
    fn filtered_products_follow_filter_and_sort() {
        let mut store = storefront();
        store.replace_products(vec![product("a", 300), product("b", 100), product("c", 200)]);
        store.set_sort(SortKey::PriceLow);
        store.update_filter(|f| f.max_price = 250);
        let ids: Vec<&str> = store.filtered_products().iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c"]);

        store.reset_filter();
        assert_eq!(store.filtered_products().len(), 3);
    }

    #[test]
    fn available_labels_only_list_stocked_labels() {
        let mut store = storefront();
        store.replace_products(vec![
            branded("1", "Dunk", "Nike", "Men's Shoe", 100),
            branded("2", "Samba", "Adidas", "Women's Shoe", 100),
            branded("3", "Mystery", "Other", "Other", 100),
            branded("4", "Air Max", "Nike", "Men's Shoe", 100),
        ]);
        assert_eq!(store.available_brands(), vec!["Adidas", "Nike"]);
        assert_eq!(store.available_categories(), vec!["Men's Shoe", "Women's Shoe"]);
    }

    #[test]
    fn checkout_link_carries_the_cart() {
        let mut store = storefront();
        store.add_to_cart(product("1", 2400), 1, None, None);
        let customer = CustomerInfo {
            name: "A B".to_string(),
            address: "Street".to_string(),
        };
        let message = store.checkout_message(Some(&customer));
        assert!(message.contains("*Total Order Value: ₹2400*"));
        assert!(message.contains("Name: A B"));

        let link = store.checkout_link(Some(&customer));
        assert!(link.starts_with("https://wa.me/919876543210?text="));
    }

    #[tokio::test]
    async fn refresh_loads_products_from_feed() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/feed"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                {"productId": 1, "productName": "Samba", "productBrand": "samba",
                 "catName": "Mens shoes", "productOriginalPrice": 1000}
            ])))
            .mount(&server)
            .await;

        let mut store = Storefront::new(
            StorefrontConfig::new(format!("{}/feed", server.uri())),
            Taxonomy::builtin(),
            MemoryStorage::new(),
        );
        let client = FeedClient::new(5, "omni-test").expect("client");
        assert!(store.refresh_with(&client, FixedPlaceholders::default()).await);
        assert_eq!(store.products().len(), 1);
        assert_eq!(store.products()[0].brand, "Adidas");
        assert_eq!(store.products()[0].price, 1200);
        assert!(!store.is_loading());
    }

    #[tokio::test]
    async fn failed_refresh_keeps_current_products() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .expect(1)
            .mount(&server)
            .await;

        let mut store = Storefront::new(
            StorefrontConfig::new(format!("{}/feed", server.uri())),
            Taxonomy::builtin(),
            MemoryStorage::new(),
        );
        store.replace_products(vec![product("kept", 10)]);
        let client = FeedClient::new(5, "omni-test").expect("client");
        assert!(!store.refresh_with(&client, FixedPlaceholders::default()).await);
        assert_eq!(store.products().len(), 1);
        assert_eq!(store.products()[0].id, "kept");
    }
}
