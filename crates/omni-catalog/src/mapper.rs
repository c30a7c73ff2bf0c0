//! Mapping from raw [`UpstreamRecord`]s to canonical [`Product`]s.
//!
//! Mapping never fails. Each malformed sub-field has a documented fallback:
//!
//! | Field | Fallback |
//! |-------|----------|
//! | price | base of [`DEFAULT_BASE_PRICE`] when absent, zero or negative |
//! | images | `[featuredimg]`, or `[]` when that is absent too |
//! | sizes | [`DEFAULT_SIZES`] |
//! | image / hover image | [`PLACEHOLDER_IMAGE`] |
//! | brand / category | [`omni_core::UNCLASSIFIED_LABEL`] |

use omni_core::{PricingConfig, Product, Taxonomy};
use serde_json::Value;

use crate::normalize::Normalizer;
use crate::types::UpstreamRecord;

/// Base price used when the upstream record has no usable price.
pub const DEFAULT_BASE_PRICE: f64 = 2500.0;

/// Sizes offered when the upstream size list cannot be decoded.
pub const DEFAULT_SIZES: [&str; 3] = ["UK 7", "UK 8", "UK 9"];

pub const PLACEHOLDER_IMAGE: &str = "https://via.placeholder.com/300";

/// Rating shown for every product until real ratings exist.
pub const DEFAULT_RATING: f64 = 4.5;

pub const DEFAULT_STOCK: u32 = 20;

/// Source of the stand-in values the feed does not provide.
///
/// The live storefront randomizes these; tests use [`FixedPlaceholders`].
pub trait Placeholders {
    fn review_count(&self) -> u32;
    fn is_new(&self) -> bool;
}

/// Random review count in `0..100`; roughly one product in five flagged new.
#[derive(Debug, Clone, Copy, Default)]
pub struct RandomPlaceholders;

impl Placeholders for RandomPlaceholders {
    fn review_count(&self) -> u32 {
        rand::random_range(0..100)
    }

    fn is_new(&self) -> bool {
        rand::random_bool(0.2)
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct FixedPlaceholders {
    pub reviews: u32,
    pub is_new: bool,
}

impl Placeholders for FixedPlaceholders {
    fn review_count(&self) -> u32 {
        self.reviews
    }

    fn is_new(&self) -> bool {
        self.is_new
    }
}

/// Maps upstream records into [`Product`]s using one pricing config and taxonomy.
#[derive(Debug, Clone)]
pub struct CatalogueMapper<P = RandomPlaceholders> {
    pricing: PricingConfig,
    brands: Normalizer,
    categories: Normalizer,
    placeholders: P,
}

impl CatalogueMapper<RandomPlaceholders> {
    #[must_use]
    pub fn new(pricing: PricingConfig, taxonomy: &Taxonomy) -> Self {
        Self::with_placeholders(pricing, taxonomy, RandomPlaceholders)
    }
}

impl<P: Placeholders> CatalogueMapper<P> {
    #[must_use]
    pub fn with_placeholders(pricing: PricingConfig, taxonomy: &Taxonomy, placeholders: P) -> Self {
        Self {
            pricing,
            brands: Normalizer::new(&taxonomy.brands),
            categories: Normalizer::new(&taxonomy.categories),
            placeholders,
        }
    }

    /// Transforms one upstream record into the canonical product shape.
    #[must_use]
    pub fn map_record(&self, raw: UpstreamRecord) -> Product {
        let id = raw.id().unwrap_or_default().to_owned();
        let featured = raw.featured_image.filter(|s| !s.is_empty());

        let images = match raw.image_url.as_deref().and_then(parse_string_list) {
            Some(images) => images,
            None => {
                tracing::debug!(product_id = %id, "imageUrl is not a JSON list; using featured image");
                featured.iter().cloned().collect()
            }
        };

        let sizes = raw
            .size_name
            .as_deref()
            .and_then(parse_string_list)
            .unwrap_or_else(|| {
                tracing::debug!(product_id = %id, "sizeName is not a JSON list; using default sizes");
                DEFAULT_SIZES.iter().map(|s| (*s).to_owned()).collect()
            });

        let image = featured
            .clone()
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned());
        let hover_image = images
            .get(1)
            .cloned()
            .or(featured)
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_owned());

        let price = marked_up_price(raw.product_original_price, self.pricing.markup_factor);
        let brand = self.brands.normalize(raw.product_brand.as_deref()).to_owned();
        let category = self
            .categories
            .normalize(raw.cat_name.as_deref())
            .to_owned();

        let name = raw.product_name.unwrap_or_default();
        let description = [raw.product_description, raw.product_short_description]
            .into_iter()
            .flatten()
            .find(|s| !s.is_empty())
            .unwrap_or_else(|| name.clone());

        Product {
            id,
            tags: vec![category.clone(), brand.clone()],
            name,
            category,
            brand,
            price,
            rating: DEFAULT_RATING,
            reviews: self.placeholders.review_count(),
            sizes,
            colors: Vec::new(),
            image,
            images,
            hover_image,
            description,
            stock: DEFAULT_STOCK,
            is_new: self.placeholders.is_new(),
        }
    }
}

/// `round(base * markup_factor)`, where a missing, zero, negative or
/// non-finite base falls back to [`DEFAULT_BASE_PRICE`]. Never returns 0.
#[must_use]
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
pub fn marked_up_price(base: Option<f64>, markup_factor: f64) -> u64 {
    let base = base
        .filter(|p| p.is_finite() && *p > 0.0)
        .unwrap_or(DEFAULT_BASE_PRICE);
    let price = (base * markup_factor).round();
    if price.is_finite() && price >= 1.0 {
        price as u64
    } else {
        1
    }
}

/// Decodes a JSON-encoded list of strings. Numeric entries are kept as their
/// textual form (`[7, 8]` → `["7", "8"]`); any other shape yields `None`.
fn parse_string_list(encoded: &str) -> Option<Vec<String>> {
    let values: Vec<Value> = serde_json::from_str(encoded).ok()?;
    values
        .into_iter()
        .map(|v| match v {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
        .collect()
}
