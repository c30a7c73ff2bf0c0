mod cart;
mod catalog;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::cart::CartCommands;

#[derive(Debug, Parser)]
#[command(name = "omni")]
#[command(about = "OmniLuxe storefront command line interface")]
struct Cli {
    /// Read the product feed from a local JSON file instead of fetching it
    #[arg(long, global = true, value_name = "PATH", env = "OMNI_FEED_FILE")]
    feed_file: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Fetch the catalogue and summarise it
    Fetch,
    /// List products through the shop filters
    Browse {
        /// Only products in this category
        #[arg(long)]
        category: Option<String>,

        /// Price ceiling, inclusive
        #[arg(long)]
        max_price: Option<u64>,

        /// Allowed brand; repeat for several
        #[arg(long = "brand")]
        brands: Vec<String>,

        /// Search name, brand and category
        #[arg(long)]
        search: Option<String>,

        /// Search within results by name and brand
        #[arg(long)]
        within: Option<String>,

        /// featured, price-low, price-high or newest
        #[arg(long, default_value = "featured")]
        sort: String,

        /// Number of pages to show
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Show one product and related products
    Product { id: String },
    /// Live search suggestions for a term
    Search { term: String },
    /// Inspect or change the persisted cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Build the order message for the cart
    Checkout {
        #[arg(long)]
        first_name: String,
        #[arg(long)]
        last_name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        address: String,
        #[arg(long)]
        city: String,
        #[arg(long)]
        state: String,
        #[arg(long)]
        zip: String,

        /// Print the messaging link instead of the plain message
        #[arg(long)]
        link: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = omni_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    tracing::debug!(command = ?cli.command, env = %config.env, "running command");
    let feed_file = cli.feed_file.as_deref();
    match cli.command {
        Commands::Fetch => catalog::run_fetch(&config, feed_file).await?,
        Commands::Browse {
            category,
            max_price,
            brands,
            search,
            within,
            sort,
            pages,
        } => {
            let query = catalog::BrowseQuery {
                category,
                max_price,
                brands,
                search,
                within,
                sort,
                pages,
            };
            catalog::run_browse(&config, feed_file, &query).await?;
        }
        Commands::Product { id } => catalog::run_product(&config, feed_file, &id).await?,
        Commands::Search { term } => catalog::run_search(&config, feed_file, &term).await?,
        Commands::Cart { command } => cart::run_cart(&config, feed_file, command).await?,
        Commands::Checkout {
            first_name,
            last_name,
            phone,
            address,
            city,
            state,
            zip,
            link,
        } => {
            let form = omni_shop::ShippingForm {
                first_name,
                last_name,
                phone,
                address,
                city,
                state,
                zip,
            };
            cart::run_checkout(&config, &form, link)?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests;
