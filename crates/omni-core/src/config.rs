use std::path::PathBuf;

use crate::app_config::{
    AppConfig, Environment, OrderConfig, PaginationConfig, PaginationMode, PricingConfig,
};
use crate::ConfigError;

/// Upper bound for `OMNI_CART_TTL_DAYS` (ten years).
const MAX_CART_TTL_DAYS: u32 = 3650;

/// Load application configuration from environment variables.
///
/// Calls `dotenvy::dotenv().ok()` to load `.env` files before reading env vars.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config() -> Result<AppConfig, ConfigError> {
    dotenvy::dotenv().ok();
    load_app_config_from_env()
}

/// Load application configuration from environment variables already in the process.
///
/// Unlike [`load_app_config`], this does NOT load `.env` files.
///
/// # Errors
///
/// Returns `ConfigError` if a variable is present but its value is invalid.
pub fn load_app_config_from_env() -> Result<AppConfig, ConfigError> {
    build_app_config(|key| std::env::var(key))
}

/// Build application configuration using the provided env-var lookup function.
///
/// Every variable has a default, so an empty environment yields the stock
/// storefront configuration. Tests drive this with a `HashMap` lookup.
fn build_app_config<F>(lookup: F) -> Result<AppConfig, ConfigError>
where
    F: Fn(&str) -> Result<String, std::env::VarError>,
{
    let or_default = |var: &str, default: &str| -> String {
        lookup(var).unwrap_or_else(|_| default.to_string())
    };

    let invalid = |var: &str, reason: String| ConfigError::InvalidEnvVar {
        var: var.to_string(),
        reason,
    };

    let parse_u64 = |var: &str, default: &str| -> Result<u64, ConfigError> {
        or_default(var, default)
            .parse::<u64>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let parse_u32 = |var: &str, default: &str| -> Result<u32, ConfigError> {
        or_default(var, default)
            .parse::<u32>()
            .map_err(|e| invalid(var, e.to_string()))
    };

    let env = parse_environment(&or_default("OMNI_ENV", "development"))?;
    let log_level = or_default("OMNI_LOG_LEVEL", "info");

    let feed_url = or_default(
        "OMNI_FEED_URL",
        "https://kicksmaniaserver.onrender.com/product/all?result=9999",
    );
    if feed_url.trim().is_empty() {
        return Err(invalid("OMNI_FEED_URL", "must not be empty".to_string()));
    }
    let feed_timeout_secs = parse_u64("OMNI_FEED_TIMEOUT_SECS", "30")?;
    let user_agent = or_default("OMNI_USER_AGENT", "omni/0.1 (storefront)");

    let markup_raw = or_default("OMNI_MARKUP_FACTOR", "1.20");
    let markup_factor = markup_raw
        .parse::<f64>()
        .map_err(|e| invalid("OMNI_MARKUP_FACTOR", e.to_string()))?;
    if !markup_factor.is_finite() || markup_factor <= 0.0 {
        return Err(invalid(
            "OMNI_MARKUP_FACTOR",
            format!("must be a positive number, got {markup_raw}"),
        ));
    }

    let phone = or_default("OMNI_ORDER_PHONE", "919876543210");
    if phone.is_empty() || !phone.chars().all(|c| c.is_ascii_digit()) {
        return Err(invalid(
            "OMNI_ORDER_PHONE",
            format!("must be digits only, got '{phone}'"),
        ));
    }
    let currency_symbol = or_default("OMNI_CURRENCY_SYMBOL", "₹");
    let store_name = or_default("OMNI_STORE_NAME", "OmniLuxe");

    let mode = parse_pagination_mode(&or_default("OMNI_PAGINATION_MODE", "load-more"))?;
    let page_size_raw = or_default("OMNI_PAGE_SIZE", "12");
    let page_size = page_size_raw
        .parse::<usize>()
        .map_err(|e| invalid("OMNI_PAGE_SIZE", e.to_string()))?;
    if page_size == 0 {
        return Err(invalid("OMNI_PAGE_SIZE", "must be at least 1".to_string()));
    }

    let cart_path = PathBuf::from(or_default("OMNI_CART_PATH", "./.omni/cart.json"));
    let cart_ttl_days = parse_u32("OMNI_CART_TTL_DAYS", "7")?;
    if !(1..=MAX_CART_TTL_DAYS).contains(&cart_ttl_days) {
        return Err(invalid(
            "OMNI_CART_TTL_DAYS",
            format!("must be between 1 and {MAX_CART_TTL_DAYS}, got {cart_ttl_days}"),
        ));
    }
    let taxonomy_path = lookup("OMNI_TAXONOMY_PATH")
        .ok()
        .filter(|p| !p.trim().is_empty())
        .map(PathBuf::from);

    Ok(AppConfig {
        env,
        log_level,
        feed_url,
        feed_timeout_secs,
        user_agent,
        pricing: PricingConfig { markup_factor },
        order: OrderConfig {
            phone,
            currency_symbol,
            store_name,
        },
        pagination: PaginationConfig { mode, page_size },
        cart_path,
        cart_ttl_days,
        taxonomy_path,
    })
}

/// Parse a string into an `Environment` variant.
fn parse_environment(s: &str) -> Result<Environment, ConfigError> {
    match s {
        "development" => Ok(Environment::Development),
        "test" => Ok(Environment::Test),
        "production" => Ok(Environment::Production),
        other => Err(ConfigError::InvalidEnvVar {
            var: "OMNI_ENV".to_string(),
            reason: format!("unknown environment '{other}'"),
        }),
    }
}

fn parse_pagination_mode(s: &str) -> Result<PaginationMode, ConfigError> {
    match s {
        "load-more" => Ok(PaginationMode::LoadMore),
        "infinite-scroll" => Ok(PaginationMode::InfiniteScroll),
        other => Err(ConfigError::InvalidEnvVar {
            var: "OMNI_PAGINATION_MODE".to_string(),
            reason: format!("expected 'load-more' or 'infinite-scroll', got '{other}'"),
        }),
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
