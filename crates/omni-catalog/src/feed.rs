//! Parsing and mapping of a whole upstream feed body.

use omni_core::Product;
use serde::Deserialize;
use serde_json::Value;

use crate::error::CatalogError;
use crate::mapper::{CatalogueMapper, Placeholders};
use crate::types::UpstreamRecord;

/// Parses a feed body: a JSON array of upstream records.
///
/// Array elements that are not objects are skipped with a warning; the rest
/// of the feed still loads.
///
/// # Errors
///
/// Returns [`CatalogError::Deserialize`] if the body is not a JSON array.
pub fn parse_feed(body: &str) -> Result<Vec<UpstreamRecord>, CatalogError> {
    let values: Vec<Value> =
        serde_json::from_str(body).map_err(|e| CatalogError::Deserialize {
            context: "product feed".to_owned(),
            source: e,
        })?;

    let total = values.len();
    let records: Vec<UpstreamRecord> = values
        .into_iter()
        .enumerate()
        .filter_map(|(idx, value)| match UpstreamRecord::deserialize(value) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::warn!(index = idx, error = %e, "skipping malformed feed entry");
                None
            }
        })
        .collect();

    tracing::debug!(total, parsed = records.len(), "parsed product feed");
    Ok(records)
}

/// Maps every record in the feed to a [`Product`].
///
/// Records without an identifier cannot be addressed by the cart and are
/// skipped with a warning.
pub fn map_feed<P: Placeholders>(
    records: Vec<UpstreamRecord>,
    mapper: &CatalogueMapper<P>,
) -> Vec<Product> {
    records
        .into_iter()
        .filter_map(|record| {
            if record.id().is_none() {
                tracing::warn!(
                    name = record.product_name.as_deref().unwrap_or_default(),
                    "skipping feed record without productId"
                );
                return None;
            }
            Some(mapper.map_record(record))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use omni_core::{PricingConfig, Taxonomy};

    use super::*;
    use crate::mapper::FixedPlaceholders;

    fn mapper() -> CatalogueMapper<FixedPlaceholders> {
        CatalogueMapper::with_placeholders(
            PricingConfig::default(),
            &Taxonomy::builtin(),
            FixedPlaceholders::default(),
        )
    }

    #[test]
    fn parse_feed_reads_array_of_records() {
        let body = r#"[
            {"productId": 1, "productName": "One"},
            {"productId": "2", "productName": "Two"}
        ]"#;
        let records = parse_feed(body).expect("valid feed");
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].id(), Some("2"));
    }

    #[test]
    fn parse_feed_skips_non_object_entries() {
        let body = r#"[{"productId": 1}, null, 42, {"productId": 3}]"#;
        let records = parse_feed(body).expect("valid feed");
        assert_eq!(records.len(), 2);
    }

    #[test]
    fn parse_feed_rejects_non_array_body() {
        let err = parse_feed(r#"{"products": []}"#).unwrap_err();
        assert!(
            matches!(err, CatalogError::Deserialize { ref context, .. } if context == "product feed"),
            "expected Deserialize error, got: {err:?}"
        );
    }

    #[test]
    fn parse_feed_rejects_invalid_json() {
        assert!(parse_feed("<html>502 Bad Gateway</html>").is_err());
    }

    #[test]
    fn map_feed_skips_records_without_id() {
        let records = parse_feed(
            r#"[
                {"productId": 10, "productName": "Kept", "productBrand": "Puma"},
                {"productName": "Dropped"},
                {"productId": "  ", "productName": "Blank id"}
            ]"#,
        )
        .expect("valid feed");
        let products = map_feed(records, &mapper());
        assert_eq!(products.len(), 1);
        assert_eq!(products[0].id, "10");
        assert_eq!(products[0].brand, "Puma");
    }

    #[test]
    fn map_feed_preserves_feed_order() {
        let records = parse_feed(r#"[{"productId": 3}, {"productId": 1}, {"productId": 2}]"#)
            .expect("valid feed");
        let ids: Vec<String> = map_feed(records, &mapper())
            .into_iter()
            .map(|p| p.id)
            .collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }
}
