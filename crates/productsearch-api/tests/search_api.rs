//! End-to-end tests for the HTTP API
//!
//! Runs the real router and clients against mock embedding and Elasticsearch
//! servers.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode};
use productsearch_api::{bootstrap, routes};
use productsearch_common::CORRELATION_ID_HEADER;
use productsearch_config::ApplicationConfig;
use serde_json::{Value, json};
use tower::ServiceExt;
use wiremock::matchers::{body_string_contains, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

type TestResult = Result<(), Box<dyn std::error::Error>>;

const DIMENSIONS: usize = 4;

fn search_hits(ids: &[&str]) -> Value {
    let hits: Vec<Value> = ids
        .iter()
        .map(|id| {
            json!({"_index": "products", "_id": id, "_score": 0.9, "_source": {"name": id}})
        })
        .collect();
    json!({
        "took": 2,
        "timed_out": false,
        "hits": {"total": {"value": ids.len(), "relation": "eq"}, "hits": hits}
    })
}

fn config_for(embeddings: &MockServer, elasticsearch: &MockServer) -> ApplicationConfig {
    let mut config = ApplicationConfig::default();
    config.embedding.base_url = format!("{}/v1", embeddings.uri());
    config.embedding.api_key = Some("sk-test".to_string());
    config.embedding.dimensions = DIMENSIONS;
    config.document_index.url = elasticsearch.uri();
    config
}

fn app_for(config: &ApplicationConfig) -> Result<Router, BoxError> {
    Ok(routes::create_router(bootstrap::initialize_app_state(config)?))
}

async fn mount_embedding(server: &MockServer) {
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "data": [{"embedding": [0.1, 0.2, 0.3, 0.4]}]
        })))
        .mount(server)
        .await;
}

type BoxError = Box<dyn std::error::Error>;

async fn get(app: Router, uri: &str) -> Result<(StatusCode, HeaderMap, Vec<u8>), BoxError> {
    let response = app
        .oneshot(Request::builder().uri(uri).body(Body::empty())?)
        .await?;
    let status = response.status();
    let headers = response.headers().clone();
    let body = axum::body::to_bytes(response.into_body(), usize::MAX).await?;
    Ok((status, headers, body.to_vec()))
}

#[tokio::test]
async fn test_semantic_hits_are_returned_verbatim() -> TestResult {
    let embeddings = MockServer::start().await;
    let elasticsearch = MockServer::start().await;
    mount_embedding(&embeddings).await;

    let body = search_hits(&["sku-1", "sku-2"]);
    Mock::given(method("POST"))
        .and(path("/products/_search"))
        .and(body_string_contains("\"knn\""))
        .and(body_string_contains("tags.keyword"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&elasticsearch)
        .await;

    let app = app_for(&config_for(&embeddings, &elasticsearch))?;
    let (status, headers, bytes) = get(app, "/search?q=headphones&tag=audio").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-search-mode"], "semantic");
    assert!(headers.contains_key(CORRELATION_ID_HEADER));
    assert_eq!(serde_json::from_slice::<Value>(&bytes)?, body);
    Ok(())
}

#[tokio::test]
async fn test_empty_semantic_results_fall_back_to_keyword() -> TestResult {
    let embeddings = MockServer::start().await;
    let elasticsearch = MockServer::start().await;
    mount_embedding(&embeddings).await;

    Mock::given(method("POST"))
        .and(path("/products/_search"))
        .and(body_string_contains("\"knn\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hits(&[])))
        .expect(1)
        .mount(&elasticsearch)
        .await;
    let keyword = search_hits(&["sku-9"]);
    Mock::given(method("POST"))
        .and(path("/products/_search"))
        .and(body_string_contains("multi_match"))
        .and(body_string_contains("popularity"))
        .respond_with(ResponseTemplate::new(200).set_body_json(keyword.clone()))
        .expect(1)
        .mount(&elasticsearch)
        .await;

    let app = app_for(&config_for(&embeddings, &elasticsearch))?;
    let (status, headers, bytes) = get(app, "/search?q=cable&sort=popularity").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-search-mode"], "keyword");
    assert_eq!(serde_json::from_slice::<Value>(&bytes)?, keyword);
    Ok(())
}

#[tokio::test]
async fn test_embedding_outage_uses_keyword_query_only() -> TestResult {
    let embeddings = MockServer::start().await;
    let elasticsearch = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/embeddings"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .mount(&embeddings)
        .await;

    Mock::given(method("POST"))
        .and(path("/products/_search"))
        .and(body_string_contains("\"knn\""))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hits(&["never"])))
        .expect(0)
        .mount(&elasticsearch)
        .await;
    Mock::given(method("POST"))
        .and(path("/products/_search"))
        .and(body_string_contains("multi_match"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hits(&[])))
        .expect(1)
        .mount(&elasticsearch)
        .await;

    let app = app_for(&config_for(&embeddings, &elasticsearch))?;
    let (status, headers, bytes) = get(app, "/search?q=lamp").await?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers["x-search-mode"], "keyword");
    assert_eq!(serde_json::from_slice::<Value>(&bytes)?, search_hits(&[]));
    Ok(())
}

#[tokio::test]
async fn test_index_error_is_plaintext_500_without_retry() -> TestResult {
    let embeddings = MockServer::start().await;
    let elasticsearch = MockServer::start().await;
    mount_embedding(&embeddings).await;

    Mock::given(method("POST"))
        .and(path("/products/_search"))
        .respond_with(
            ResponseTemplate::new(400).set_body_string("search_phase_execution_exception"),
        )
        .expect(1)
        .mount(&elasticsearch)
        .await;

    let app = app_for(&config_for(&embeddings, &elasticsearch))?;
    let (status, headers, bytes) = get(app, "/search?q=desk").await?;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(!headers.contains_key("x-search-mode"));
    let text = String::from_utf8(bytes)?;
    assert!(text.contains("search_phase_execution_exception"), "{text}");
    Ok(())
}

#[tokio::test]
async fn test_missing_query_never_reaches_upstreams() -> TestResult {
    let embeddings = MockServer::start().await;
    let elasticsearch = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&embeddings)
        .await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&elasticsearch)
        .await;

    let app = app_for(&config_for(&embeddings, &elasticsearch))?;
    let (status, _, bytes) = get(app, "/search?tag=audio").await?;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(String::from_utf8(bytes)?, "Query parameter 'q' is required");
    Ok(())
}

#[tokio::test]
async fn test_configured_index_name_is_queried() -> TestResult {
    let embeddings = MockServer::start().await;
    let elasticsearch = MockServer::start().await;
    mount_embedding(&embeddings).await;

    Mock::given(method("POST"))
        .and(path("/catalog-v2/_search"))
        .respond_with(ResponseTemplate::new(200).set_body_json(search_hits(&["sku-3"])))
        .expect(1)
        .mount(&elasticsearch)
        .await;

    let mut config = config_for(&embeddings, &elasticsearch);
    config.document_index.index_name = "catalog-v2".to_string();
    let (status, _, _) = get(app_for(&config)?, "/search?q=chair").await?;

    assert_eq!(status, StatusCode::OK);
    Ok(())
}
