//! Integration tests for the auth module
//!
//! Drives the real `TokenExchangeClient` against a mock account service and
//! persists through a real `FileTokenStore` in a temporary directory.

#![cfg(feature = "test-utils")]

use std::sync::Arc;
use std::time::Duration as StdDuration;

use chrono::Duration;
use psnlink_common::auth::{AuthError, TokenExchangeClient, TokenManager, TokenStore};
use psnlink_common::testing::{MockClock, TempTokenStore};
use psnlink_domain::{ClientIdentity, SessionHandle};
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const TOKEN_PATH: &str = "/api/authz/v3/oauth/token";

fn exchange_for(server: &MockServer) -> TokenExchangeClient {
    TokenExchangeClient::with_endpoints(
        ClientIdentity::new("client-id", None),
        StdDuration::from_secs(5),
        format!("{}{TOKEN_PATH}", server.uri()),
        format!("{}/api/v1/ssocookie", server.uri()),
    )
    .expect("exchange client")
}

fn token_body(access: &str, refresh: &str) -> serde_json::Value {
    serde_json::json!({
        "access_token": access,
        "expires_in": 3600,
        "refresh_token": refresh,
        "refresh_token_expires_in": 864000
    })
}

/// Validates the full acquire, cache, refresh cycle against a file store.
///
/// # Test Steps
/// 1. First call on an empty store acquires `A1` and creates the record
/// 2. Second call inside the window returns `A1` with no network call
/// 3. After 4000s of mock time the next call refreshes to `A2`
/// 4. The record on disk now holds `A2` and the rotated refresh token
#[tokio::test(flavor = "multi_thread")]
async fn test_acquire_cache_refresh_cycle() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=sso_token"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A1", "R1")))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .and(body_string_contains("grant_type=refresh_token"))
        .and(body_string_contains("refresh_token=R1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(token_body("A2", "R2")))
        .expect(1)
        .mount(&server)
        .await;

    let temp = TempTokenStore::new().expect("temp store");
    let store = Arc::new(temp.store().clone());
    let clock = MockClock::new();
    let manager = TokenManager::with_clock(
        Arc::new(exchange_for(&server)),
        Arc::clone(&store),
        SessionHandle::new("npsso-value"),
        Arc::new(clock.clone()),
    );

    let first = manager.ensure_access_token().await.expect("acquire");
    assert_eq!(first.access.value, "A1");
    assert!(store.path().exists(), "record should be created with parent dirs");

    let cached = manager.ensure_access_token().await.expect("cached");
    assert_eq!(cached.access.value, "A1");

    clock.advance(Duration::seconds(4000));
    let refreshed = manager.ensure_access_token().await.expect("refresh");
    assert_eq!(refreshed.access.value, "A2");

    let on_disk = store.load().await.expect("record");
    assert_eq!(on_disk.pair.access.value, "A2");
    assert_eq!(on_disk.pair.refresh.value, "R2");
}

/// Validates that a rejected acquisition leaves no record behind.
///
/// # Test Steps
/// 1. Token endpoint answers 400
/// 2. `ensure_access_token` reports `AcquisitionFailed`
/// 3. No file exists at the store path
#[tokio::test(flavor = "multi_thread")]
async fn test_rejected_acquisition_persists_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(400).set_body_string("{\"error\":\"invalid_grant\"}"))
        .mount(&server)
        .await;

    let temp = TempTokenStore::new().expect("temp store");
    let store = Arc::new(temp.store().clone());
    let manager = TokenManager::new(
        Arc::new(exchange_for(&server)),
        Arc::clone(&store),
        SessionHandle::new("bad-npsso"),
    );

    let err = manager.ensure_access_token().await.expect_err("rejected");
    assert!(matches!(err, AuthError::AcquisitionFailed(_)));
    assert!(!store.path().exists());
}

/// Validates that an unreachable token endpoint is an acquisition failure.
#[tokio::test(flavor = "multi_thread")]
async fn test_unreachable_endpoint_is_acquisition_failure() {
    let server = MockServer::start().await;
    let exchange = exchange_for(&server);
    drop(server);

    let temp = TempTokenStore::new().expect("temp store");
    let manager = TokenManager::new(
        Arc::new(exchange),
        Arc::new(temp.store().clone()),
        SessionHandle::new("npsso"),
    );

    let err = manager.ensure_access_token().await.expect_err("no server");
    assert!(matches!(err, AuthError::AcquisitionFailed(_)));
}

/// Validates that a persisted record with an out-of-range lifetime is served
/// from disk instead of crashing the caller.
#[tokio::test]
async fn test_record_with_maximal_lifetime_is_served() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(TOKEN_PATH))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let temp = TempTokenStore::new().expect("temp store");
    let store = Arc::new(temp.store().clone());
    if let Some(parent) = store.path().parent() {
        tokio::fs::create_dir_all(parent).await.expect("parent dir");
    }
    let record = serde_json::json!({
        "access": { "value": "A1", "expires_in": i64::MAX },
        "refresh": { "value": "R1", "expires_in": i64::MAX }
    });
    tokio::fs::write(store.path(), record.to_string()).await.expect("write record");

    let manager = TokenManager::new(
        Arc::new(exchange_for(&server)),
        Arc::clone(&store),
        SessionHandle::new("npsso-value"),
    );

    let pair = tokio::spawn(async move { manager.ensure_access_token().await })
        .await
        .expect("task should not panic")
        .expect("cached pair");
    assert_eq!(pair.access.value, "A1");
}
