//! Cart ledger: transitions over the list of cart lines.

use omni_core::{CartLine, Product};
use serde::Serialize;

/// The shopper's cart, in insertion order.
///
/// `add` merges on the full `(id, color, size)` identity, while `remove` and
/// `update_quantity` address every line of a product id at once.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Wraps restored lines, flooring any zero quantity at 1.
    #[must_use]
    pub fn from_lines(mut lines: Vec<CartLine>) -> Self {
        for line in &mut lines {
            line.quantity = line.quantity.max(1);
        }
        Self { lines }
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Number of distinct lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines (the header badge count).
    #[must_use]
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|l| u64::from(l.quantity)).sum()
    }

    /// Adds `quantity` units of `product` with the chosen options.
    ///
    /// A line with the same identity absorbs the quantity; otherwise a new
    /// line is appended. A quantity of 0 counts as 1.
    pub fn add(
        &mut self,
        product: Product,
        quantity: u32,
        color: Option<String>,
        size: Option<String>,
    ) {
        let quantity = quantity.max(1);
        if let Some(line) = self
            .lines
            .iter_mut()
            .find(|l| l.has_key(&product.id, color.as_deref(), size.as_deref()))
        {
            line.quantity = line.quantity.saturating_add(quantity);
            return;
        }
        self.lines.push(CartLine::new(product, quantity, color, size));
    }

    /// Removes every line for `product_id`, whatever its options. Returns the
    /// number of lines removed.
    pub fn remove(&mut self, product_id: &str) -> usize {
        let before = self.lines.len();
        self.lines.retain(|l| l.product_id() != product_id);
        before - self.lines.len()
    }

    /// Shifts the quantity of every line for `product_id` by `delta`, never
    /// going below 1. Returns the number of lines touched.
    pub fn update_quantity(&mut self, product_id: &str, delta: i64) -> usize {
        let mut touched = 0;
        for line in self.lines.iter_mut().filter(|l| l.product_id() == product_id) {
            let next = i64::from(line.quantity)
                .saturating_add(delta)
                .clamp(1, i64::from(u32::MAX));
            line.quantity = u32::try_from(next).unwrap_or(u32::MAX);
            touched += 1;
        }
        touched
    }

    #[must_use]
    pub fn subtotal(&self) -> u64 {
        subtotal(&self.lines)
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }
}

/// Sum of `price * quantity` over `lines`.
#[must_use]
pub fn subtotal(lines: &[CartLine]) -> u64 {
    lines
        .iter()
        .fold(0u64, |acc, line| acc.saturating_add(line.line_total()))
}
