//! Integration tests for remote snapshot retrieval
//!
//! Verifies listing parsing, timestamp normalization, and the failure
//! classification that keeps an unreachable or misbehaving remote from
//! degrading into a falsely-empty snapshot.

use cumulus_core::domain::errors::SyncError;
use cumulus_core::domain::newtypes::FileName;
use cumulus_core::ports::remote_store::IRemoteStore;
use cumulus_disk::timestamp::{host_utc_offset_hours, normalize_to_epoch, parse_remote_timestamp};
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

/// Expected epoch value for a remote timestamp string, computed the same
/// way the adapter computes it
fn expected_epoch(raw: &str) -> i64 {
    normalize_to_epoch(parse_remote_timestamp(raw).unwrap(), host_utc_offset_hours())
}

#[tokio::test]
async fn test_fetch_snapshot_parses_and_normalizes() {
    let (server, store) = common::setup_store().await;

    common::mount_listing(
        &server,
        serde_json::json!([
            {"name": "a.txt", "modified": "2024-01-01T10:00:00"},
            {"name": "b.txt", "modified": "2024-03-15T23:59:59"}
        ]),
    )
    .await;

    let snapshot = store.fetch_snapshot().await.expect("listing failed");

    assert_eq!(snapshot.len(), 2);
    assert_eq!(
        snapshot.modified_at(&FileName::new("a.txt").unwrap()),
        Some(expected_epoch("2024-01-01T10:00:00"))
    );
    assert_eq!(
        snapshot.modified_at(&FileName::new("b.txt").unwrap()),
        Some(expected_epoch("2024-03-15T23:59:59"))
    );
}

#[tokio::test]
async fn test_fetch_snapshot_empty_folder() {
    let (server, store) = common::setup_store().await;
    common::mount_listing(&server, serde_json::json!([])).await;

    let snapshot = store.fetch_snapshot().await.expect("listing failed");
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn test_malformed_body_is_a_protocol_error() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(
            ResponseTemplate::new(200).set_body_json(serde_json::json!({"name": "disk"})),
        )
        .mount(&server)
        .await;

    let err = store.fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, SyncError::Protocol { operation: "listing", .. }));
}

#[tokio::test]
async fn test_unparseable_timestamp_is_a_protocol_error() {
    let (server, store) = common::setup_store().await;

    common::mount_listing(
        &server,
        serde_json::json!([{"name": "a.txt", "modified": "yesterday"}]),
    )
    .await;

    let err = store.fetch_snapshot().await.unwrap_err();
    assert!(matches!(err, SyncError::Protocol { operation: "listing", .. }));
}

#[tokio::test]
async fn test_server_error_is_an_api_error_not_connectivity() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("GET"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let err = store.fetch_snapshot().await.unwrap_err();
    assert!(matches!(
        err,
        SyncError::Api {
            operation: "listing",
            status: 500
        }
    ));
    assert!(!err.is_connectivity());
}

#[tokio::test]
async fn test_unreachable_server_is_a_connectivity_error() {
    // Nothing listens on port 1; the connection is refused immediately.
    let store = common::store_for("http://127.0.0.1:1");

    let err = store.fetch_snapshot().await.unwrap_err();
    assert!(err.is_connectivity());
}
