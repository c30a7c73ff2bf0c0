pub mod client;
pub mod error;
pub mod feed;
pub mod mapper;
pub mod normalize;
pub mod types;

pub use client::FeedClient;
pub use error::CatalogError;
pub use feed::{map_feed, parse_feed};
pub use mapper::{CatalogueMapper, FixedPlaceholders, Placeholders, RandomPlaceholders};
pub use normalize::{normalize_label, Normalizer};
pub use types::UpstreamRecord;
