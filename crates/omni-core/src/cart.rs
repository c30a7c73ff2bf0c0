use serde::{Deserialize, Serialize};

use crate::products::Product;

/// One entry in the cart: a product snapshot plus the shopper's choices.
///
/// Identity is `(product id, selected color, selected size)`; the ledger in
/// `omni-shop` merges lines that share it. Quantity is always at least 1.
///
/// The product fields are flattened so the persisted JSON is a product object
/// with `quantity`, `selectedColor` and `selectedSize` alongside.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLine {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_size: Option<String>,
}

impl CartLine {
    #[must_use]
    pub fn new(
        product: Product,
        quantity: u32,
        selected_color: Option<String>,
        selected_size: Option<String>,
    ) -> Self {
        Self {
            product,
            quantity: quantity.max(1),
            selected_color,
            selected_size,
        }
    }

    #[must_use]
    pub fn product_id(&self) -> &str {
        &self.product.id
    }

    /// Returns `true` if this line has the given identity key.
    #[must_use]
    pub fn has_key(&self, product_id: &str, color: Option<&str>, size: Option<&str>) -> bool {
        self.product.id == product_id
            && self.selected_color.as_deref() == color
            && self.selected_size.as_deref() == size
    }

    /// Unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> u64 {
        self.product.price.saturating_mul(u64::from(self.quantity))
    }
}
