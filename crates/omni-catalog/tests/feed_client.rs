//! Integration tests for `FeedClient`.
//!
//! Uses `wiremock` to stand up a local HTTP server for each test so no real
//! network traffic is made.

use omni_catalog::{CatalogError, CatalogueMapper, FeedClient, FixedPlaceholders};
use omni_core::{PricingConfig, Taxonomy};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client() -> FeedClient {
    FeedClient::new(5, "omni-test/0.1").expect("failed to build test FeedClient")
}

fn test_mapper() -> CatalogueMapper<FixedPlaceholders> {
    CatalogueMapper::with_placeholders(
        PricingConfig { markup_factor: 1.2 },
        &Taxonomy::builtin(),
        FixedPlaceholders {
            reviews: 7,
            is_new: false,
        },
    )
}

fn feed_url(server: &MockServer) -> String {
    format!("{}/product/all?result=9999", server.uri())
}

fn sample_feed() -> serde_json::Value {
    json!([
        {
            "productId": 1,
            "productName": "Samba OG",
            "catName": "Men's shoes",
            "productBrand": "samba",
            "productOriginalPrice": 2000,
            "imageUrl": "[\"https://cdn/samba-1.jpg\",\"https://cdn/samba-2.jpg\"]",
            "sizeName": "[\"UK 8\",\"UK 9\",\"UK 10\"]",
            "productDescription": "Terrace classic",
            "featuredimg": "https://cdn/samba.jpg"
        },
        {
            "productId": "2",
            "productName": "Classic Clog",
            "catName": "crocs+%2B+slide",
            "productBrand": "Crocs",
            "productOriginalPrice": 0,
            "imageUrl": "oops",
            "sizeName": "",
            "featuredimg": "https://cdn/clog.jpg"
        }
    ])
}

#[tokio::test]
async fn fetch_products_maps_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product/all"))
        .and(query_param("result", "9999"))
        .respond_with(ResponseTemplate::new(200).set_body_json(sample_feed()))
        .expect(1)
        .mount(&server)
        .await;

    let products = test_client()
        .fetch_products(&feed_url(&server), &test_mapper())
        .await
        .expect("feed should load");

    assert_eq!(products.len(), 2);

    let samba = &products[0];
    assert_eq!(samba.id, "1");
    assert_eq!(samba.brand, "Adidas");
    assert_eq!(samba.category, "Men's Shoe");
    assert_eq!(samba.price, 2400);
    assert_eq!(samba.hover_image, "https://cdn/samba-2.jpg");
    assert_eq!(samba.reviews, 7);

    let clog = &products[1];
    assert_eq!(clog.brand, "Crocs");
    assert_eq!(clog.category, "Slides/Crocs");
    assert_eq!(clog.price, 3000);
    assert_eq!(clog.images, vec!["https://cdn/clog.jpg"]);
    assert_eq!(clog.sizes, vec!["UK 7", "UK 8", "UK 9"]);
}

#[tokio::test]
async fn fetch_records_returns_empty_vec_for_empty_feed() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product/all"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    let records = test_client()
        .fetch_records(&feed_url(&server))
        .await
        .expect("empty feed is valid");
    assert!(records.is_empty());
}

#[tokio::test]
async fn fetch_records_maps_server_error_to_unexpected_status() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product/all"))
        .respond_with(ResponseTemplate::new(503))
        .expect(1)
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_records(&feed_url(&server))
        .await
        .unwrap_err();
    assert!(
        matches!(err, CatalogError::UnexpectedStatus { status: 503, .. }),
        "expected UnexpectedStatus(503), got: {err:?}"
    );
}

#[tokio::test]
async fn fetch_records_does_not_retry_on_failure() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product/all"))
        .respond_with(ResponseTemplate::new(429))
        .expect(1)
        .mount(&server)
        .await;

    let result = test_client().fetch_records(&feed_url(&server)).await;
    assert!(result.is_err());
    // `expect(1)` is verified when `server` drops.
}

#[tokio::test]
async fn fetch_records_rejects_non_array_body() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/product/all"))
        .respond_with(ResponseTemplate::new(200).set_body_string("{\"error\":\"maintenance\"}"))
        .mount(&server)
        .await;

    let err = test_client()
        .fetch_records(&feed_url(&server))
        .await
        .unwrap_err();
    assert!(matches!(err, CatalogError::Deserialize { .. }));
}

#[tokio::test]
async fn fetch_records_rejects_relative_url() {
    let err = test_client()
        .fetch_records("/product/all")
        .await
        .unwrap_err();
    assert!(
        matches!(err, CatalogError::InvalidFeedUrl { ref url, .. } if url == "/product/all"),
        "expected InvalidFeedUrl, got: {err:?}"
    );
}
