//! Shared test helpers for disk API integration tests
//!
//! Provides wiremock-based mock server setup for the disk REST endpoints.
//! Each helper mounts one endpoint; tests combine them as needed and get a
//! [`DiskRemoteStore`] pointing at the mock server.

use cumulus_disk::store::{DiskConfig, DiskRemoteStore};
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Remote root used by every test
pub const REMOTE_ROOT: &str = "app/backups";

/// Field filter the adapter sends with every listing request
pub const LISTING_FIELDS: &str = "_embedded.items.name,_embedded.items.modified";

/// Starts a mock server and a store pointing at it
pub async fn setup_store() -> (MockServer, DiskRemoteStore) {
    let server = MockServer::start().await;
    let store = store_for(&server.uri());
    (server, store)
}

/// Builds a store for an arbitrary base URL (e.g. an unreachable one)
pub fn store_for(base_url: &str) -> DiskRemoteStore {
    DiskRemoteStore::with_base_url(
        DiskConfig {
            token: "test-token".to_string(),
            remote_root: REMOTE_ROOT.to_string(),
        },
        base_url,
    )
}

/// Mounts the listing endpoint with the given `_embedded.items` array
pub async fn mount_listing(server: &MockServer, items: serde_json::Value) {
    Mock::given(method("GET"))
        .and(path("/resources"))
        .and(query_param("path", REMOTE_ROOT))
        .and(query_param("fields", LISTING_FIELDS))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "_embedded": { "items": items }
        })))
        .mount(server)
        .await;
}

/// Mounts the upload-destination endpoint for one remote path, returning an
/// href that points back into the mock server
pub async fn mount_upload_href(
    server: &MockServer,
    remote_path: &str,
    overwrite: bool,
    href_path: &str,
) {
    Mock::given(method("GET"))
        .and(path("/resources/upload"))
        .and(query_param("path", remote_path))
        .and(query_param("overwrite", if overwrite { "true" } else { "false" }))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
            "href": format!("{}{}", server.uri(), href_path),
            "method": "PUT"
        })))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts the raw-transfer target for phase two of an upload
pub async fn mount_put_target(server: &MockServer, href_path: &str, expected_body: &[u8]) {
    Mock::given(method("PUT"))
        .and(path(href_path))
        .and(wiremock::matchers::body_bytes(expected_body.to_vec()))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(server)
        .await;
}

/// Mounts the delete endpoint for one remote path
pub async fn mount_delete(server: &MockServer, remote_path: &str) {
    Mock::given(method("DELETE"))
        .and(path("/resources"))
        .and(query_param("path", remote_path))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(server)
        .await;
}
