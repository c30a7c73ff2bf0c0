use std::time::Duration;

use omni_core::Product;
use reqwest::{Client, Url};

use crate::error::CatalogError;
use crate::feed::{map_feed, parse_feed};
use crate::mapper::{CatalogueMapper, Placeholders};
use crate::types::UpstreamRecord;

/// HTTP client for the upstream product feed.
///
/// The feed is fetched in bulk with a single GET; there is no pagination and
/// no retry. Non-2xx responses surface as [`CatalogError::UnexpectedStatus`].
/// Dropping the returned future cancels the request.
pub struct FeedClient {
    client: Client,
}

impl FeedClient {
    /// Creates a `FeedClient` with the configured timeout and `User-Agent`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Http`] if the underlying `reqwest::Client`
    /// cannot be constructed (e.g., invalid TLS config).
    pub fn new(timeout_secs: u64, user_agent: &str) -> Result<Self, CatalogError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(user_agent)
            .build()?;
        Ok(Self { client })
    }

    /// Fetches and parses the raw feed records.
    ///
    /// # Errors
    ///
    /// - [`CatalogError::InvalidFeedUrl`]: `feed_url` is not an absolute URL.
    /// - [`CatalogError::Http`]: network or TLS failure, or timeout.
    /// - [`CatalogError::UnexpectedStatus`]: any non-2xx status.
    /// - [`CatalogError::Deserialize`]: the body is not a JSON array.
    pub async fn fetch_records(&self, feed_url: &str) -> Result<Vec<UpstreamRecord>, CatalogError> {
        let url = Url::parse(feed_url).map_err(|e| CatalogError::InvalidFeedUrl {
            url: feed_url.to_owned(),
            reason: e.to_string(),
        })?;

        tracing::info!(feed_url, "fetching product feed");
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::UnexpectedStatus {
                status: status.as_u16(),
                url: feed_url.to_owned(),
            });
        }

        let body = response.text().await?;
        let records = parse_feed(&body)?;
        tracing::info!(feed_url, records = records.len(), "fetched product feed");
        Ok(records)
    }

    /// Fetches the feed and maps it to canonical products.
    ///
    /// # Errors
    ///
    /// Propagates any error from [`Self::fetch_records`].
    pub async fn fetch_products<P: Placeholders>(
        &self,
        feed_url: &str,
        mapper: &CatalogueMapper<P>,
    ) -> Result<Vec<Product>, CatalogError> {
        let records = self.fetch_records(feed_url).await?;
        Ok(map_feed(records, mapper))
    }
}
