pub mod app_config;
pub mod cart;
pub mod config;
pub mod products;
pub mod taxonomy;

pub use app_config::{
    AppConfig, Environment, OrderConfig, PaginationConfig, PaginationMode, PricingConfig,
};
pub use cart::CartLine;
pub use config::{load_app_config, load_app_config_from_env};
pub use products::Product;
pub use taxonomy::{load_taxonomy, RuleTable, Taxonomy, TaxonomyRule, UNCLASSIFIED_LABEL};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("failed to read taxonomy file {path}: {source}")]
    TaxonomyFileIo {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse taxonomy file: {0}")]
    TaxonomyFileParse(#[source] serde_yaml::Error),

    #[error("taxonomy validation failed: {0}")]
    Validation(String),
}
