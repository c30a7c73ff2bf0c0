//! Cart and checkout command handlers for the CLI.

use std::path::Path;

use clap::Subcommand;
use omni_core::AppConfig;

use crate::catalog::{load_catalogue, open_storefront};

/// Sub-commands available under `cart`.
#[derive(Debug, Subcommand)]
pub enum CartCommands {
    /// List the cart lines and subtotal
    Show,
    /// Add a product to the cart
    Add {
        id: String,

        #[arg(long, default_value_t = 1)]
        qty: u32,

        #[arg(long)]
        color: Option<String>,

        /// Defaults to the product's first listed size
        #[arg(long)]
        size: Option<String>,
    },
    /// Remove every line of a product
    Remove { id: String },
    /// Change the quantity of every line of a product
    Update {
        id: String,

        /// Signed change, e.g. 2 or -1
        #[arg(allow_hyphen_values = true)]
        delta: i64,
    },
}

/// Dispatch a `cart` sub-command.
///
/// # Errors
///
/// Returns an error if the storefront cannot be opened, or for `add`, if the
/// catalogue cannot be loaded, the product is unknown, or the size is not
/// offered.
pub(crate) async fn run_cart(
    config: &AppConfig,
    feed_file: Option<&Path>,
    command: CartCommands,
) -> anyhow::Result<()> {
    let mut store = open_storefront(config)?;

    match command {
        CartCommands::Show => {}
        CartCommands::Add {
            id,
            qty,
            color,
            size,
        } => {
            load_catalogue(&mut store, config, feed_file).await?;
            let product = store
                .product(&id)
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("product '{id}' not found"))?;
            let size = match size {
                Some(size) if !product.offers_size(&size) => {
                    anyhow::bail!(
                        "size '{size}' is not offered for '{}' (available: {})",
                        product.name,
                        product.sizes.join(", ")
                    );
                }
                Some(size) => Some(size),
                None => product.default_size().map(str::to_owned),
            };
            println!("added {qty} x {}", product.name);
            store.add_to_cart(product, qty, color, size);
        }
        CartCommands::Remove { id } => {
            if store.remove_from_cart(&id) == 0 {
                println!("'{id}' is not in the cart");
            }
        }
        CartCommands::Update { id, delta } => {
            if store.update_quantity(&id, delta) == 0 {
                println!("'{id}' is not in the cart");
            }
        }
    }

    print_cart(&store, &config.order.currency_symbol);
    Ok(())
}

fn print_cart<S: omni_shop::CartStorage>(store: &omni_shop::Storefront<S>, currency: &str) {
    let cart = store.cart();
    if cart.is_empty() {
        println!("your cart is empty");
        return;
    }

    println!("{:<10}{:<6}{:<10}{:>10}  NAME", "ID", "QTY", "SIZE", "TOTAL");
    for line in cart.lines() {
        let total = format!("{currency}{}", line.line_total());
        println!(
            "{:<10}{:<6}{:<10}{:>10}  {}",
            line.product_id(),
            line.quantity,
            line.selected_size.as_deref().unwrap_or("-"),
            total,
            line.product.name
        );
    }
    println!(
        "{} items, subtotal {currency}{}",
        cart.item_count(),
        store.cart_subtotal()
    );
}

/// Print the order message, or its messaging link, for the persisted cart.
///
/// # Errors
///
/// Returns an error if the storefront cannot be opened or a shipping field
/// is blank.
pub(crate) fn run_checkout(
    config: &AppConfig,
    form: &omni_shop::ShippingForm,
    link: bool,
) -> anyhow::Result<()> {
    let store = open_storefront(config)?;
    if store.cart().is_empty() {
        println!("your cart is empty");
        return Ok(());
    }

    let missing = form.missing_fields();
    if !missing.is_empty() {
        anyhow::bail!("missing shipping details: {}", missing.join(", "));
    }

    let customer = form.customer_info();
    if link {
        println!("{}", store.checkout_link(Some(&customer)));
    } else {
        println!("{}", store.checkout_message(Some(&customer)));
    }
    Ok(())
}
