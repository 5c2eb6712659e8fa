//! Fetch pipeline integration tests
//!
//! Exercises the catalog client against a mock HTTP server: cursor
//! pagination, the single re-authentication path, bounded page retries,
//! and the exact number of requests issued.

use carta::adapters::catalog::{AssetSource, CatalogClient};
use carta::config::{secret_string, CatalogConfig, RetryConfig};
use carta::domain::CatalogError;
use mockito::{Matcher, ServerGuard};
use serde_json::json;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

const GRAPHQL_PATH: &str = "/graphql/knowledgeGraph/v1";
const TOKEN_PATH: &str = "/rest/oauth/v2/token";
const TYPE_A: &str = "00000000-0000-0000-0000-000000000001";

fn catalog_config(instance_url: &str) -> CatalogConfig {
    CatalogConfig {
        instance_url: instance_url.to_string(),
        client_id: "carta-client".to_string(),
        client_secret: secret_string("s3cret".to_string()),
        timeout_seconds: 5,
        token_safety_margin_seconds: 30,
        retry: RetryConfig {
            max_attempts: 3,
            retry_delay_ms: 10,
        },
    }
}

fn client(server: &ServerGuard, page_size: u32) -> CatalogClient {
    CatalogClient::new(&catalog_config(&server.url()), page_size).unwrap()
}

/// Match a page request by asset type and cursor variables
fn vars(asset_type: &str, cursor: Option<&str>) -> Matcher {
    Matcher::PartialJson(json!({
        "variables": { "assetTypeId": asset_type, "cursor": cursor }
    }))
}

fn page_body(ids: &[&str], end_cursor: Option<&str>, has_next_page: bool) -> String {
    json!({
        "data": {
            "assets": {
                "nodes": ids
                    .iter()
                    .map(|id| json!({ "id": id, "displayName": id }))
                    .collect::<Vec<_>>(),
                "pageInfo": { "endCursor": end_cursor, "hasNextPage": has_next_page }
            }
        }
    })
    .to_string()
}

async fn mock_token(server: &mut ServerGuard, hits: usize) -> mockito::Mock {
    server
        .mock("POST", TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"access_token":"tok","expires_in":3600}"#)
        .expect(hits)
        .create_async()
        .await
}

#[tokio::test]
async fn test_fetcher_follows_cursor_and_preserves_order() {
    let mut server = mockito::Server::new_async().await;
    let token = mock_token(&mut server, 1).await;

    let page1 = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(vars(TYPE_A, None))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&["a-1", "a-2"], Some("a-2"), true))
        .expect(1)
        .create_async()
        .await;

    let page2 = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(vars(TYPE_A, Some("a-2")))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&["a-3", "a-4"], Some("a-4"), false))
        .expect(1)
        .create_async()
        .await;

    let records = client(&server, 2).fetch_assets(TYPE_A).await.unwrap();

    let ids: Vec<&str> = records.iter().map(|r| r.id.as_str()).collect();
    assert_eq!(ids, vec!["a-1", "a-2", "a-3", "a-4"]);

    token.assert_async().await;
    page1.assert_async().await;
    page2.assert_async().await;
}

#[tokio::test]
async fn test_two_pages_of_one_record_make_exactly_two_calls() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server, 1).await;

    let page1 = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(vars(TYPE_A, None))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&["r-1"], Some("r-1"), true))
        .expect(1)
        .create_async()
        .await;

    // Second page reports no next cursor, so no third request happens
    let page2 = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(vars(TYPE_A, Some("r-1")))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&["r-2"], None, false))
        .expect(1)
        .create_async()
        .await;

    let records = client(&server, 1).fetch_assets(TYPE_A).await.unwrap();

    assert_eq!(records.len(), 2);
    page1.assert_async().await;
    page2.assert_async().await;
}

#[tokio::test]
async fn test_zero_assets_is_success_with_empty_set() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server, 1).await;

    let page = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(vars(TYPE_A, None))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&[], None, false))
        .expect(1)
        .create_async()
        .await;

    let records = client(&server, 100).fetch_assets(TYPE_A).await.unwrap();

    assert!(records.is_empty());
    page.assert_async().await;
}

#[tokio::test]
async fn test_unauthorized_page_triggers_one_refresh_and_retry() {
    let mut server = mockito::Server::new_async().await;

    // Each exchange returns a distinct token so the retried page request
    // is distinguishable from the rejected one
    let exchanges = Arc::new(AtomicUsize::new(0));
    let counter = exchanges.clone();
    let token = server
        .mock("POST", TOKEN_PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body_from_request(move |_| {
            let n = counter.fetch_add(1, Ordering::SeqCst) + 1;
            format!(r#"{{"access_token":"tok-{n}","expires_in":3600}}"#).into_bytes()
        })
        .expect(2)
        .create_async()
        .await;

    let page1 = server
        .mock("POST", GRAPHQL_PATH)
        .match_header("authorization", "Bearer tok-1")
        .match_body(vars(TYPE_A, None))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&["a-1"], Some("a-1"), true))
        .expect(1)
        .create_async()
        .await;

    let page2_rejected = server
        .mock("POST", GRAPHQL_PATH)
        .match_header("authorization", "Bearer tok-1")
        .match_body(vars(TYPE_A, Some("a-1")))
        .with_status(401)
        .expect(1)
        .create_async()
        .await;

    let page2_retried = server
        .mock("POST", GRAPHQL_PATH)
        .match_header("authorization", "Bearer tok-2")
        .match_body(vars(TYPE_A, Some("a-1")))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&["a-2"], None, false))
        .expect(1)
        .create_async()
        .await;

    let records = client(&server, 1).fetch_assets(TYPE_A).await.unwrap();

    // Record count is unaffected by the mid-run refresh
    assert_eq!(records.len(), 2);
    // Exactly one extra token exchange happened
    assert_eq!(exchanges.load(Ordering::SeqCst), 2);

    token.assert_async().await;
    page1.assert_async().await;
    page2_rejected.assert_async().await;
    page2_retried.assert_async().await;
}

#[tokio::test]
async fn test_second_unauthorized_fails_asset_type_and_keeps_partial() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server, 2).await;

    server
        .mock("POST", GRAPHQL_PATH)
        .match_body(vars(TYPE_A, None))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(page_body(&["a-1"], Some("a-1"), true))
        .create_async()
        .await;

    let rejected = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(vars(TYPE_A, Some("a-1")))
        .with_status(401)
        .expect(2)
        .create_async()
        .await;

    let failure = client(&server, 1).fetch_assets(TYPE_A).await.unwrap_err();

    assert!(matches!(
        failure.error,
        CatalogError::AuthenticationFailed(_)
    ));
    // The page that completed before the failure is retained
    assert_eq!(failure.partial.len(), 1);
    rejected.assert_async().await;
}

#[tokio::test]
async fn test_server_errors_retry_up_to_the_bound_then_fail() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server, 1).await;

    let failing = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(vars(TYPE_A, None))
        .with_status(500)
        .with_body("boom")
        .expect(3)
        .create_async()
        .await;

    let failure = client(&server, 100).fetch_assets(TYPE_A).await.unwrap_err();

    assert!(matches!(
        failure.error,
        CatalogError::ServerError { status: 500, .. }
    ));
    assert!(failure.partial.is_empty());
    failing.assert_async().await;
}

#[tokio::test]
async fn test_graphql_errors_fail_without_retry() {
    let mut server = mockito::Server::new_async().await;
    mock_token(&mut server, 1).await;

    let rejected = server
        .mock("POST", GRAPHQL_PATH)
        .match_body(vars(TYPE_A, None))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"data":null,"errors":[{"message":"Unknown asset type"}]}"#)
        .expect(1)
        .create_async()
        .await;

    let failure = client(&server, 100).fetch_assets(TYPE_A).await.unwrap_err();

    match failure.error {
        CatalogError::QueryFailed(message) => assert!(message.contains("Unknown asset type")),
        other => panic!("expected QueryFailed, got {other}"),
    }
    rejected.assert_async().await;
}

#[tokio::test]
async fn test_rejected_credentials_fail_before_any_page() {
    let mut server = mockito::Server::new_async().await;

    server
        .mock("POST", TOKEN_PATH)
        .with_status(400)
        .with_body(r#"{"error":"invalid_client"}"#)
        .create_async()
        .await;

    let pages = server
        .mock("POST", GRAPHQL_PATH)
        .expect(0)
        .create_async()
        .await;

    let failure = client(&server, 100).fetch_assets(TYPE_A).await.unwrap_err();

    assert!(matches!(
        failure.error,
        CatalogError::AuthenticationFailed(_)
    ));
    assert!(failure.partial.is_empty());
    pages.assert_async().await;
}
