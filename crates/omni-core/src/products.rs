use serde::{Deserialize, Serialize};

/// A catalogue product after mapping from the upstream feed.
///
/// `category` and `brand` always hold a canonical taxonomy label or
/// [`crate::UNCLASSIFIED_LABEL`], never the raw upstream string.
///
/// Field names serialize in camelCase so a persisted cart keeps the shape the
/// storefront has always written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: String,
    pub name: String,
    pub category: String,
    pub brand: String,
    /// Display price in whole currency units, markup already applied.
    pub price: u64,
    pub rating: f64,
    /// Review count. Currently a placeholder assigned at mapping time.
    #[serde(default)]
    pub reviews: u32,
    #[serde(default)]
    pub sizes: Vec<String>,
    #[serde(default)]
    pub colors: Vec<String>,
    pub image: String,
    #[serde(default)]
    pub images: Vec<String>,
    pub hover_image: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub stock: u32,
    #[serde(default)]
    pub is_new: bool,
}

impl Product {
    /// The size preselected on the product page: the first listed size.
    #[must_use]
    pub fn default_size(&self) -> Option<&str> {
        self.sizes.first().map(String::as_str)
    }

    /// Returns `true` if `size` is one of the product's size options.
    #[must_use]
    pub fn offers_size(&self, size: &str) -> bool {
        self.sizes.iter().any(|s| s == size)
    }

    #[must_use]
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::Product;

    pub(crate) fn product(id: &str, price: u64) -> Product {
        Product {
            id: id.to_string(),
            name: format!("Runner {id}"),
            category: "Men's Shoe".to_string(),
            brand: "Nike".to_string(),
            price,
            rating: 4.5,
            reviews: 12,
            sizes: vec!["UK 7".to_string(), "UK 8".to_string()],
            colors: vec![],
            image: "https://cdn.example.com/a.jpg".to_string(),
            images: vec!["https://cdn.example.com/a.jpg".to_string()],
            hover_image: "https://cdn.example.com/a.jpg".to_string(),
            description: "A shoe.".to_string(),
            tags: vec!["Men's Shoe".to_string(), "Nike".to_string()],
            stock: 20,
            is_new: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::product;
    use super::*;

    #[test]
    fn default_size_is_first_option() {
        let p = product("1", 100);
        assert_eq!(p.default_size(), Some("UK 7"));
    }

    #[test]
    fn default_size_none_without_sizes() {
        let mut p = product("1", 100);
        p.sizes.clear();
        assert!(p.default_size().is_none());
    }

    #[test]
    fn offers_size_checks_exact_label() {
        let p = product("1", 100);
        assert!(p.offers_size("UK 8"));
        assert!(!p.offers_size("uk 8"));
    }

    #[test]
    fn serializes_camel_case_fields() {
        let mut p = product("7", 3000);
        p.is_new = true;
        let json = serde_json::to_value(&p).expect("serialization failed");
        assert_eq!(json["hoverImage"], "https://cdn.example.com/a.jpg");
        assert_eq!(json["isNew"], true);
        assert_eq!(json["price"], 3000);
    }

    #[test]
    fn deserializes_with_missing_optional_fields() {
        let raw = r#"{
            "id": "9",
            "name": "Slide",
            "category": "Slides/Crocs",
            "brand": "Crocs",
            "price": 1200,
            "rating": 4.5,
            "image": "https://cdn.example.com/s.jpg",
            "hoverImage": "https://cdn.example.com/s.jpg"
        }"#;
        let p: Product = serde_json::from_str(raw).expect("deserialization failed");
        assert_eq!(p.id, "9");
        assert!(p.sizes.is_empty());
        assert!(!p.is_new);
        assert_eq!(p.stock, 0);
        assert!(!p.in_stock());
    }
}
