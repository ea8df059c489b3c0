//! HttpSource against a local wiremock upstream.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use drug_price_gateway::domain::value_objects::PriceQuery;
use drug_price_gateway::infrastructure::sources::{
    HttpSource, HttpSourceConfig, SourceAdapter, SourceError,
};
use serde_json::json;
use std::time::Duration;
use wiremock::matchers::{header, header_exists, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn query() -> PriceQuery {
    PriceQuery::new("Lisinopril", "95355").unwrap()
}

fn source(server: &MockServer, configure: impl FnOnce(HttpSourceConfig) -> HttpSourceConfig) -> HttpSource {
    let config = HttpSourceConfig::new("source1", format!("{}/v1/prices", server.uri()));
    HttpSource::new(configure(config)).unwrap()
}

#[tokio::test]
async fn passes_query_and_returns_payload_untouched() {
    let server = MockServer::start().await;
    let upstream = json!({
        "price": 9.87,
        "pharmacy": "Upstream Rx",
        "distanceMiles": 1.4,
        "coupons": [{ "code": "SAVE5" }]
    });
    Mock::given(method("GET"))
        .and(path("/v1/prices"))
        .and(query_param("drugName", "Lisinopril"))
        .and(query_param("zipCode", "95355"))
        .respond_with(ResponseTemplate::new(200).set_body_json(upstream.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let payload = source(&server, |c| c).fetch(&query()).await.unwrap();
    assert_eq!(payload.as_value(), &upstream);
}

#[tokio::test]
async fn sends_api_key_header_when_configured() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("x-api-key", "secret-123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "price": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let result = source(&server, |c| c.with_api_key("secret-123")).fetch(&query()).await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn custom_api_key_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header("authorization", "Bearer abc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "price": 1 })))
        .expect(1)
        .mount(&server)
        .await;

    let result = source(&server, |c| {
        c.with_api_key_header("authorization").with_api_key("Bearer abc")
    })
    .fetch(&query())
    .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn no_credential_header_without_api_key() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(header_exists("x-api-key"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "price": 2 })))
        .mount(&server)
        .await;

    assert!(source(&server, |c| c).fetch(&query()).await.is_ok());
}

#[tokio::test]
async fn slow_upstream_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(json!({ "price": 1 }))
                .set_delay(Duration::from_millis(1_000)),
        )
        .mount(&server)
        .await;

    let err = source(&server, |c| c.with_timeout_ms(100))
        .fetch(&query())
        .await
        .unwrap_err();
    assert!(err.is_timeout(), "got {err:?}");
    assert_eq!(err.timeout_ms(), Some(100));
}

#[tokio::test]
async fn server_error_maps_to_connection_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(502).set_body_string("bad gateway"))
        .mount(&server)
        .await;

    let err = source(&server, |c| c).fetch(&query()).await.unwrap_err();
    assert!(matches!(err, SourceError::Connection { .. }));
    assert!(err.to_string().contains("bad gateway"));
}

#[tokio::test]
async fn rejected_credentials_map_to_authentication_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let err = source(&server, |c| c.with_api_key("wrong")).fetch(&query()).await.unwrap_err();
    assert!(matches!(err, SourceError::Authentication { .. }));
}

#[tokio::test]
async fn rate_limit_carries_retry_hint() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "3"))
        .mount(&server)
        .await;

    let err = source(&server, |c| c).fetch(&query()).await.unwrap_err();
    assert_eq!(err.retry_after_ms(), Some(3_000));
}

#[tokio::test]
async fn malformed_body_maps_to_protocol_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>not json</html>"))
        .mount(&server)
        .await;

    let err = source(&server, |c| c).fetch(&query()).await.unwrap_err();
    assert!(matches!(err, SourceError::Protocol { .. }));
}

#[tokio::test]
async fn unreachable_upstream_maps_to_connection_error() {
    let config = HttpSourceConfig::new("source1", "http://127.0.0.1:1/prices").with_timeout_ms(1_000);
    let err = HttpSource::new(config).unwrap().fetch(&query()).await.unwrap_err();
    assert!(matches!(err, SourceError::Connection { .. }), "got {err:?}");
}
