use super::*;
use crate::catalog::BrowseQuery;
use omni_shop::SortKey;

#[test]
fn parses_fetch_command() {
    let cli = Cli::try_parse_from(["omni", "fetch"]).expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Fetch));
    assert!(cli.feed_file.is_none());
}

#[test]
fn command_is_required() {
    assert!(Cli::try_parse_from(["omni"]).is_err());
}

#[test]
fn feed_file_is_global() {
    let cli = Cli::try_parse_from(["omni", "search", "nike", "--feed-file", "feed.json"])
        .expect("expected valid cli args");
    assert_eq!(cli.feed_file, Some(PathBuf::from("feed.json")));
    assert!(matches!(cli.command, Commands::Search { ref term } if term == "nike"));
}

#[test]
fn browse_defaults() {
    let cli = Cli::try_parse_from(["omni", "browse"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Browse {
            category: None,
            max_price: None,
            ref brands,
            search: None,
            within: None,
            ref sort,
            pages: 1,
        } if brands.is_empty() && sort == "featured"
    ));
}

#[test]
fn browse_accepts_repeated_brands() {
    let cli = Cli::try_parse_from([
        "omni",
        "browse",
        "--brand",
        "Nike",
        "--brand",
        "Puma",
        "--max-price",
        "9000",
        "--sort",
        "price-low",
    ])
    .expect("expected valid cli args");
    let Commands::Browse {
        brands,
        max_price,
        sort,
        ..
    } = cli.command
    else {
        panic!("expected browse command");
    };
    assert_eq!(brands, vec!["Nike", "Puma"]);
    assert_eq!(max_price, Some(9000));
    assert_eq!(SortKey::from_key(&sort), SortKey::PriceLow);
}

#[test]
fn parses_cart_add_with_options() {
    let cli = Cli::try_parse_from([
        "omni", "cart", "add", "42", "--qty", "2", "--size", "UK 9",
    ])
    .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Cart {
            command: CartCommands::Add {
                ref id,
                qty: 2,
                color: None,
                size: Some(ref size),
            }
        } if id == "42" && size == "UK 9"
    ));
}

#[test]
fn cart_add_quantity_defaults_to_one() {
    let cli = Cli::try_parse_from(["omni", "cart", "add", "42"]).expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Cart {
            command: CartCommands::Add { qty: 1, size: None, .. }
        }
    ));
}

#[test]
fn cart_update_accepts_negative_delta() {
    let cli = Cli::try_parse_from(["omni", "cart", "update", "42", "-3"])
        .expect("expected valid cli args");
    assert!(matches!(
        cli.command,
        Commands::Cart {
            command: CartCommands::Update { ref id, delta: -3 }
        } if id == "42"
    ));
}

#[test]
fn checkout_requires_shipping_fields() {
    assert!(Cli::try_parse_from(["omni", "checkout", "--first-name", "Asha"]).is_err());
}

#[test]
fn parses_checkout_with_link() {
    let cli = Cli::try_parse_from([
        "omni",
        "checkout",
        "--first-name",
        "Asha",
        "--last-name",
        "Rao",
        "--phone",
        "9999999999",
        "--address",
        "12 Hill Rd",
        "--city",
        "Pune",
        "--state",
        "MH",
        "--zip",
        "411001",
        "--link",
    ])
    .expect("expected valid cli args");
    assert!(matches!(cli.command, Commands::Checkout { link: true, .. }));
}

#[test]
fn browse_query_builds_filter_state() {
    let query = BrowseQuery {
        category: Some("Accessories".to_string()),
        max_price: Some(5000),
        brands: vec!["Coach".to_string()],
        search: Some("  bag ".to_string()),
        within: Some("Cross".to_string()),
        ..BrowseQuery::default()
    };
    let filter = query.filter_state();
    assert_eq!(filter.category.as_deref(), Some("Accessories"));
    assert_eq!(filter.max_price, 5000);
    assert_eq!(filter.brands, vec!["Coach"]);
    assert_eq!(filter.search_query, "bag");
    assert_eq!(filter.filter_search_query, "Cross");
}

#[test]
fn browse_query_without_options_is_default_filter() {
    assert_eq!(
        BrowseQuery::default().filter_state(),
        omni_shop::FilterState::default()
    );
}
