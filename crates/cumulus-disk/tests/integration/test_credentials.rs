//! Integration tests for the credential probe
//!
//! The probe distinguishes "credential is wrong" (fatal, immediate) from
//! "network is temporarily down" (bounded backoff, cancellable).

use std::time::{Duration, Instant};

use cumulus_core::domain::errors::SyncError;
use cumulus_core::ports::remote_store::IRemoteStore;
use tokio_util::sync::CancellationToken;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_valid_credential_passes() {
    let (server, store) = common::setup_store().await;
    common::mount_listing(&server, serde_json::json!([])).await;

    let cancel = CancellationToken::new();
    store
        .check_credentials(&cancel)
        .await
        .expect("probe should accept a 200");
}

#[tokio::test]
async fn test_rejected_credential_fails_immediately() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let start = Instant::now();
    let err = store.check_credentials(&cancel).await.unwrap_err();

    assert!(matches!(err, SyncError::Auth { status: 401 }));
    // No backoff for a definitive rejection.
    assert!(start.elapsed() < Duration::from_millis(500));
}

#[tokio::test]
async fn test_forbidden_is_also_a_definitive_rejection() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(403))
        .mount(&server)
        .await;

    let cancel = CancellationToken::new();
    let err = store.check_credentials(&cancel).await.unwrap_err();
    assert!(matches!(err, SyncError::Auth { status: 403 }));
}

#[tokio::test]
async fn test_cancellation_aborts_the_backoff() {
    // Connection refused on every attempt; without cancellation the probe
    // would back off for up to 31 seconds before giving up.
    let store = common::store_for("http://127.0.0.1:1");

    let cancel = CancellationToken::new();
    let canceller = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        canceller.cancel();
    });

    let start = Instant::now();
    let err = store.check_credentials(&cancel).await.unwrap_err();

    assert!(err.is_connectivity());
    assert!(
        start.elapsed() < Duration::from_secs(1),
        "cancellation must interrupt the backoff promptly"
    );
}
