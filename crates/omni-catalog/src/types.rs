//! Upstream product feed record.
//!
//! ## Observed shape of the product feed
//!
//! The feed is a bare JSON array. Each element carries camelCase keys plus one
//! lowercase oddity (`featuredimg`). Field types are not stable across vendors:
//!
//! - `productId` arrives as a number on most records and as a string on some.
//! - `productOriginalPrice` is usually a number, occasionally a numeric string,
//!   sometimes `0` or missing entirely.
//! - `imageUrl` and `sizeName` are JSON documents *encoded as strings*, e.g.
//!   `"[\"https://cdn/a.jpg\",\"https://cdn/b.jpg\"]"`. They are decoded in
//!   [`crate::mapper`], where malformed values degrade to defaults.
//! - `catName` and `productBrand` are free text typed by vendors; they may be
//!   URL-encoded (`"WOMANS+SHOES"`, `"women%27s+%26+men%27s+"`).
//!
//! Every field is therefore optional and decoded leniently: strings and
//! numbers are accepted where a string is expected, and any other JSON type
//! reads as absent rather than failing the whole feed.

use serde::{Deserialize, Deserializer};
use serde_json::Value;

/// One raw product entry from the upstream feed, pre-normalization.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamRecord {
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_id: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub product_name: Option<String>,

    /// Raw vendor category label, normalized against the category rules.
    #[serde(default, deserialize_with = "lenient_string")]
    pub cat_name: Option<String>,

    /// Raw vendor brand label, normalized against the brand rules.
    #[serde(default, deserialize_with = "lenient_string")]
    pub product_brand: Option<String>,

    /// Base price before markup. `None` or non-positive means "use the default base".
    #[serde(default, deserialize_with = "lenient_number")]
    pub product_original_price: Option<f64>,

    /// JSON-encoded list of image URLs.
    #[serde(default, deserialize_with = "lenient_string")]
    pub image_url: Option<String>,

    /// JSON-encoded list of size labels.
    #[serde(default, deserialize_with = "lenient_string")]
    pub size_name: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub product_description: Option<String>,

    #[serde(default, deserialize_with = "lenient_string")]
    pub product_short_description: Option<String>,

    #[serde(default, rename = "featuredimg", deserialize_with = "lenient_string")]
    pub featured_image: Option<String>,
}

impl UpstreamRecord {
    /// The record identifier, if present and non-blank.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.product_id
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }
}

fn lenient_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::String(s)) => Some(s),
        Some(Value::Number(n)) => Some(n.to_string()),
        _ => None,
    })
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        _ => None,
    })
}
