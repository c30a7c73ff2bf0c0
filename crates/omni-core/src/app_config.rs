use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

/// How the shop grid grows past the first page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaginationMode {
    /// An explicit "Load More" control appends one page per click.
    LoadMore,
    /// The next page is appended when the end of the grid scrolls into view.
    InfiniteScroll,
}

impl std::fmt::Display for PaginationMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaginationMode::LoadMore => write!(f, "load-more"),
            PaginationMode::InfiniteScroll => write!(f, "infinite-scroll"),
        }
    }
}

/// Price derivation settings handed to the catalogue mapper.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingConfig {
    /// Multiplier applied to the upstream base price, e.g. `1.20`.
    pub markup_factor: f64,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self { markup_factor: 1.20 }
    }
}

/// Settings for building the outbound order message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrderConfig {
    /// Messaging address the order is handed to (digits only, international format).
    pub phone: String,
    pub currency_symbol: String,
    pub store_name: String,
}

impl Default for OrderConfig {
    fn default() -> Self {
        Self {
            phone: "919876543210".to_string(),
            currency_symbol: "₹".to_string(),
            store_name: "OmniLuxe".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationConfig {
    pub mode: PaginationMode,
    pub page_size: usize,
}

impl Default for PaginationConfig {
    fn default() -> Self {
        Self {
            mode: PaginationMode::LoadMore,
            page_size: 12,
        }
    }
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub env: Environment,
    pub log_level: String,
    pub feed_url: String,
    pub feed_timeout_secs: u64,
    pub user_agent: String,
    pub pricing: PricingConfig,
    pub order: OrderConfig,
    pub pagination: PaginationConfig,
    pub cart_path: PathBuf,
    pub cart_ttl_days: u32,
    pub taxonomy_path: Option<PathBuf>,
}
