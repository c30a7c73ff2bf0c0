//! Canonical brand and category taxonomy.
//!
//! Upstream vendors label the same brand or category dozens of different ways
//! (`"WOMANS+SHOES"`, `"Women’s Footwear"`, `"womens Kicks"`). A [`RuleTable`]
//! lists, per canonical label, the raw variants known to mean it. Order is
//! significant: the first label whose variant matches wins, so a variant that
//! appears under two labels (`"bal"`) resolves to the earlier one.
//!
//! Matching itself lives in `omni-catalog::normalize`.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Label assigned when no rule matches, or the raw value is missing.
pub const UNCLASSIFIED_LABEL: &str = "Other";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxonomyRule {
    pub label: String,
    pub variants: Vec<String>,
}

/// Ordered canonical label → raw variants mapping.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RuleTable {
    rules: Vec<TaxonomyRule>,
}

impl RuleTable {
    #[must_use]
    pub fn new(rules: Vec<TaxonomyRule>) -> Self {
        Self { rules }
    }

    #[must_use]
    pub fn from_pairs(pairs: &[(&str, &[&str])]) -> Self {
        let rules = pairs
            .iter()
            .map(|(label, variants)| TaxonomyRule {
                label: (*label).to_string(),
                variants: variants.iter().map(|v| (*v).to_string()).collect(),
            })
            .collect();
        Self { rules }
    }

    #[must_use]
    pub fn rules(&self) -> &[TaxonomyRule] {
        &self.rules
    }

    /// Canonical labels in declaration order.
    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.rules.iter().map(|r| r.label.as_str())
    }

    #[must_use]
    pub fn contains_label(&self, label: &str) -> bool {
        self.rules.iter().any(|r| r.label == label)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

/// The pair of rule tables used to normalize upstream records.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Taxonomy {
    pub brands: RuleTable,
    pub categories: RuleTable,
}

impl Taxonomy {
    /// The storefront's built-in brand and category rules.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            brands: RuleTable::from_pairs(BRAND_RULES),
            categories: RuleTable::from_pairs(CATEGORY_RULES),
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Deserialize)]
struct TaxonomyFile {
    #[serde(default)]
    brands: Option<Vec<TaxonomyRule>>,
    #[serde(default)]
    categories: Option<Vec<TaxonomyRule>>,
}

/// Load a taxonomy from a YAML file.
///
/// The file may define `brands`, `categories`, or both; a table that is
/// omitted keeps its built-in rules.
///
/// # Errors
///
/// Returns `ConfigError` if the file cannot be read, parsed, or fails validation.
pub fn load_taxonomy(path: &Path) -> Result<Taxonomy, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::TaxonomyFileIo {
        path: path.display().to_string(),
        source: e,
    })?;
    parse_taxonomy(&content)
}

fn parse_taxonomy(content: &str) -> Result<Taxonomy, ConfigError> {
    let file: TaxonomyFile =
        serde_yaml::from_str(content).map_err(ConfigError::TaxonomyFileParse)?;

    let builtin = Taxonomy::builtin();
    let brands = match file.brands {
        Some(rules) => {
            validate_rules("brands", &rules)?;
            RuleTable::new(rules)
        }
        None => builtin.brands,
    };
    let categories = match file.categories {
        Some(rules) => {
            validate_rules("categories", &rules)?;
            RuleTable::new(rules)
        }
        None => builtin.categories,
    };

    Ok(Taxonomy { brands, categories })
}

fn validate_rules(table: &str, rules: &[TaxonomyRule]) -> Result<(), ConfigError> {
    let mut seen = HashSet::new();

    for rule in rules {
        let label = rule.label.trim();
        if label.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{table}: rule label must be non-empty"
            )));
        }

        if label.eq_ignore_ascii_case(UNCLASSIFIED_LABEL) {
            return Err(ConfigError::Validation(format!(
                "{table}: '{UNCLASSIFIED_LABEL}' is reserved for unmatched values"
            )));
        }

        if rule.variants.is_empty() {
            return Err(ConfigError::Validation(format!(
                "{table}: rule '{label}' has no variants"
            )));
        }

        if !seen.insert(label.to_lowercase()) {
            return Err(ConfigError::Validation(format!(
                "{table}: duplicate label '{label}'"
            )));
        }
    }

    Ok(())
}

const BRAND_RULES: &[(&str, &[&str])] = &[
    ("Nike", &["nik", "nke", "air max", "jordan", "jumpman", "Nike"]),
    (
        "Adidas",
        &["adi", "das", "yeezy", "samba", "gazelle", "superstar", "Adidas"],
    ),
    ("Puma", &["pum", "Puma"]),
    ("Reebok", &["ree", "rbk", "Reebok"]),
    (
        "New Balance",
        &["new", "bal", "nb", "550", "9060", "2002r", "New Balance"],
    ),
    ("Asics", &["asi", "onitsuka", "tiger", "Asics"]),
    ("Versace", &["ver", "Versace"]),
    ("Gucci", &["guc", "Gucci"]),
    ("Balenciaga", &["bal", "Balenciaga"]),
    ("Louis Vuitton", &["lou", "lv", "vuitton", "Louis Vuitton"]),
    ("Vans", &["van", "old skool", "Vans"]),
    ("Converse", &["con", "chuck", "Converse"]),
    ("Crocs", &["croc", "clog", "Crocs"]),
    ("Under Armour", &["under", "armour", "ua", "Under Armour"]),
    ("Skechers", &["skech", "Skechers"]),
    ("Bata", &["bata", "Bata"]),
    ("Timberland", &["timb", "Timberland"]),
    ("Lacoste", &["lacoste", "Lacoste"]),
];

const CATEGORY_RULES: &[(&str, &[&str])] = &[
    (
        "Women's Shoe",
        &[
            "WOMANS+SHOES",
            "Women Sports Shoes",
            "Women's Kick",
            "womens",
            "Ladies Shoes",
            "Women's Shoes",
            "shoes+for+women",
            "shoes+for+girls",
            "Shoe for girls",
            "PREMIUM+HEELS",
            "Shoes For Her",
            "Womans shoes",
            "women shoes",
            "Womens+Shoes",
            "women%27s+%26+men%27s+",
            "Womens's Sneakers",
            "WOMEN’S SHOES",
            "Women’s Shoes",
            "Women’s Footwear",
            "WOMENS SHOES",
            "DIWALI+WOMEN+SELL",
            "Ladies+Shoes",
            "womens Kicks",
        ],
    ),
    (
        "Slides/Crocs",
        &[
            "FLIPFLOP",
            "Flipflops/Crocs",
            "Flip+flops",
            "Flip-Flop",
            "Foam&Slide&Crocs",
            "Crocs+",
            "CROCS+SLIDE",
            "slide+",
            "crocs+%2B+slide+",
            "Crocs",
            "crocs+%2B+slide",
            "Flip-flops & Slides",
            "Birkenstock slide",
            "Slides+",
            "crocs",
            "FLIP/FLOPS",
            "Flip-flop",
            "Flipflops",
            "FLIP FLOP / SANDALS",
            "Flip Flops",
            "FlipFlop & CLOG",
            "flip flops",
            "Flip Flops & Crocs",
        ],
    ),
    ("Formal", &["Loafers Or Formals", "Formals", "Party Wear Shoes"]),
    (
        "UA Quality",
        &[
            "UA+QUALITY+SHOE",
            "UA QUALITY SHOES",
            "Men Sports Shoes",
            "wall+Clock",
            "UA+Quality+Shoes",
            "Premium Shoes",
            "UA Quality",
            "Bottle",
            "Premium Shoe",
            "UA+Models",
            "UA+QUALITY+SHOES",
            "Ua Quality",
            "Premium Article",
            "Premium kicks",
        ],
    ),
    (
        "Men's Shoe",
        &[
            "MENS+SHOES",
            "EID SALE",
            "Exclusive Offer",
            "Diwali Dhamaka Sale",
            "Winter+Dhamaka+Sale",
            "Men's Kick",
            "Diwali Special Sale",
            "PREMIUM SHOES",
            "Biggest Sale",
            "Diwali sale shoes",
            "End Of Season Sale",
            "Shoes",
            "Diwali Offer 2022",
            "Men's shoes",
            "shoes+for+men",
            "Shoe for men",
            "Biggest sale 2025",
            "DIWALI SALE",
            "Shoes for Men",
            "MENS SHOES",
            "DIWALI+SALE+",
            "Men’s Shoes",
            "Bumper Sale",
            "Diwali Sale",
            "Mens+Shoes",
            "Mega Sale",
            "Mens's Sneakers",
            "Men Shoes",
            "Sale Product",
            "Slides-Crocs",
            "Sale Products",
            "MEN’S SHOES",
            "SPECIAL SALE",
            "Men’s Footwear",
            "sell+itam",
            "DIWALI+MEN+",
            "Sale",
            "Onitsuka+Tiger+Models",
            "MENS KICKS",
            "Sale Article",
        ],
    ),
    (
        "Accessories",
        &[
            "Casual Shoes",
            "KeyChain",
            "BAG PACK",
            "Hoodie Unisex",
            "50% Off",
            "Lace",
            "Bags",
            "Hand bags",
            "Jackets",
            "FORMAL",
            "LOFFER",
            "mojdi",
            "long+boots",
            "SANDAL",
            "SPORTS",
            "Belt+",
            "Wallet+",
            "Sport Jersey",
            "Loafer/Formal Shoes",
            "Yeezy Foam Runner",
            "SALE % SALE % SALE",
            "T-Shirts",
            "Travelling Bags",
            "Wallet",
            "Belts",
            "Hoodies",
            "Clothing",
            "SALE",
            "Mens Accessories",
            "Mens Watch",
            "Cap",
            "Accessories",
            "Stoles",
        ],
    ),
];
