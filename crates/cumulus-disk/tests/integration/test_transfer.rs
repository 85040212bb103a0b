//! Integration tests for upload and delete execution
//!
//! Verifies the two-phase upload protocol (destination handle, then raw
//! bytes to the returned href), the overwrite flag, and delete semantics.

use cumulus_core::domain::errors::SyncError;
use cumulus_core::domain::newtypes::FileName;
use cumulus_core::ports::remote_store::IRemoteStore;
use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};

use crate::common;

#[tokio::test]
async fn test_upload_runs_both_phases() {
    let (server, store) = common::setup_store().await;

    let dir = tempfile::TempDir::new().unwrap();
    let source = dir.path().join("new.txt");
    tokio::fs::write(&source, b"fresh content").await.unwrap();

    common::mount_upload_href(&server, "app/backups/new.txt", false, "/upload-target/1").await;
    common::mount_put_target(&server, "/upload-target/1", b"fresh content").await;

    let name = FileName::new("new.txt").unwrap();
    store
        .upload(&name, &source, false)
        .await
        .expect("upload failed");

    // MockServer verifies the .expect(1) counts on drop: exactly one href
    // request and exactly one transfer happened.
}

#[tokio::test]
async fn test_upload_overwrite_flag_reaches_the_wire() {
    let (server, store) = common::setup_store().await;

    let dir = tempfile::TempDir::new().unwrap();
    let source = dir.path().join("existing.txt");
    tokio::fs::write(&source, b"newer bytes").await.unwrap();

    common::mount_upload_href(&server, "app/backups/existing.txt", true, "/upload-target/2").await;
    common::mount_put_target(&server, "/upload-target/2", b"newer bytes").await;

    let name = FileName::new("existing.txt").unwrap();
    store
        .upload(&name, &source, true)
        .await
        .expect("overwrite upload failed");
}

#[tokio::test]
async fn test_upload_missing_local_file_is_a_filesystem_error() {
    let (_server, store) = common::setup_store().await;

    let name = FileName::new("ghost.txt").unwrap();
    let err = store
        .upload(&name, std::path::Path::new("/nonexistent/ghost.txt"), false)
        .await
        .unwrap_err();

    assert!(matches!(err, SyncError::Filesystem { .. }));
}

#[tokio::test]
async fn test_upload_href_rejection_is_an_api_error() {
    let (server, store) = common::setup_store().await;

    let dir = tempfile::TempDir::new().unwrap();
    let source = dir.path().join("clash.txt");
    tokio::fs::write(&source, b"data").await.unwrap();

    // Creating without overwrite when the object already exists.
    Mock::given(method("GET"))
        .and(path("/resources/upload"))
        .respond_with(ResponseTemplate::new(409))
        .mount(&server)
        .await;

    let name = FileName::new("clash.txt").unwrap();
    let err = store.upload(&name, &source, false).await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::Api {
            operation: "upload",
            status: 409
        }
    ));
}

#[tokio::test]
async fn test_delete_targets_the_composed_remote_path() {
    let (server, store) = common::setup_store().await;

    common::mount_delete(&server, "app/backups/old.txt").await;

    let name = FileName::new("old.txt").unwrap();
    store.delete(&name).await.expect("delete failed");
}

#[tokio::test]
async fn test_delete_rejection_is_an_api_error() {
    let (server, store) = common::setup_store().await;

    Mock::given(method("DELETE"))
        .and(path("/resources"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    let name = FileName::new("gone.txt").unwrap();
    let err = store.delete(&name).await.unwrap_err();

    assert!(matches!(
        err,
        SyncError::Api {
            operation: "delete",
            status: 404
        }
    ));
}
