//! Outbound order message: a flat text block handed to a messaging channel.

use std::fmt::Write as _;

use omni_core::{CartLine, OrderConfig, Product};
use percent_encoding::{utf8_percent_encode, NON_ALPHANUMERIC};

const SEPARATOR: &str = "----------------------------";
const CLOSING_LINE: &str = "Please confirm availability and payment options.";

/// Who the order ships to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomerInfo {
    pub name: String,
    pub address: String,
}

/// The checkout form as the shopper fills it in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ShippingForm {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub state: String,
    pub zip: String,
}

impl ShippingForm {
    /// Names of the required fields left blank.
    #[must_use]
    pub fn missing_fields(&self) -> Vec<&'static str> {
        [
            ("first name", &self.first_name),
            ("last name", &self.last_name),
            ("phone", &self.phone),
            ("address", &self.address),
            ("city", &self.city),
            ("state", &self.state),
            ("zip", &self.zip),
        ]
        .into_iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
        .collect()
    }

    /// Composes the name and a single-line address.
    #[must_use]
    pub fn customer_info(&self) -> CustomerInfo {
        CustomerInfo {
            name: format!("{} {}", self.first_name.trim(), self.last_name.trim()),
            address: format!(
                "{}, {}, {} - {}",
                self.address.trim(),
                self.city.trim(),
                self.state.trim(),
                self.zip.trim()
            ),
        }
    }
}

struct OrderItem<'a> {
    name: &'a str,
    quantity: u32,
    size: Option<&'a str>,
    unit_price: u64,
}

impl<'a> From<&'a CartLine> for OrderItem<'a> {
    fn from(line: &'a CartLine) -> Self {
        Self {
            name: &line.product.name,
            quantity: line.quantity,
            size: line.selected_size.as_deref(),
            unit_price: line.product.price,
        }
    }
}

/// Builds the order text for `lines`.
///
/// `total` is printed as given; callers pass the cart subtotal.
#[must_use]
pub fn format_order(
    lines: &[CartLine],
    total: u64,
    customer: Option<&CustomerInfo>,
    config: &OrderConfig,
) -> String {
    render(lines.iter().map(OrderItem::from), total, customer, config)
}

/// Single-product "buy now" order, bypassing the cart.
#[must_use]
pub fn buy_now_message(
    product: &Product,
    quantity: u32,
    size: Option<&str>,
    config: &OrderConfig,
) -> String {
    let quantity = quantity.max(1);
    let item = OrderItem {
        name: &product.name,
        quantity,
        size: size.filter(|s| !s.is_empty()),
        unit_price: product.price,
    };
    let total = product.price.saturating_mul(u64::from(quantity));
    render(std::iter::once(item), total, None, config)
}

/// Deep link that opens a chat with the store, prefilled with `message`.
#[must_use]
pub fn order_link(config: &OrderConfig, message: &str) -> String {
    format!(
        "https://wa.me/{}?text={}",
        config.phone,
        utf8_percent_encode(message, NON_ALPHANUMERIC)
    )
}

fn render<'a>(
    items: impl Iterator<Item = OrderItem<'a>>,
    total: u64,
    customer: Option<&CustomerInfo>,
    config: &OrderConfig,
) -> String {
    let currency = &config.currency_symbol;
    let mut out = String::new();

    // Writing to a String cannot fail.
    let _ = write!(out, "*New Order Request - {}*\n\n", config.store_name);
    for item in items {
        let size = item
            .size
            .filter(|s| !s.is_empty())
            .map(|s| format!(" | Size: {s}"))
            .unwrap_or_default();
        let _ = writeln!(out, "• {}", item.name);
        let _ = writeln!(
            out,
            "  Qty: {}{size} | Price: {currency}{}",
            item.quantity, item.unit_price
        );
    }
    let _ = writeln!(out, "\n*Total Order Value: {currency}{total}*");

    if let Some(customer) = customer {
        let _ = writeln!(out, "\n{SEPARATOR}\n*Shipping Details:*");
        let _ = writeln!(out, "Name: {}", customer.name);
        let _ = writeln!(out, "Address: {}", customer.address);
    }

    let _ = write!(out, "\n{CLOSING_LINE}");
    out
}
