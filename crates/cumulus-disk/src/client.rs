//! Disk REST API client
//!
//! Provides a typed HTTP client for the disk service's resource endpoints.
//! Handles the authorization header, query construction, JSON
//! deserialization, and classification of failures into the core taxonomy.
//!
//! Every request takes its parameters as explicit per-call arguments;
//! nothing request-scoped is stored on the client.

use cumulus_core::domain::errors::SyncError;
use reqwest::{Client, Method, RequestBuilder};
use serde::Deserialize;
use tracing::debug;

/// Base URL for the disk REST API
const DISK_BASE_URL: &str = "https://cloud-api.yandex.net/v1/disk";

/// Field filter for listing requests: only names and modification times are
/// needed to build a snapshot
const LISTING_FIELDS: &str = "_embedded.items.name,_embedded.items.modified";

// ============================================================================
// Disk API response types
// ============================================================================

/// Response from the resource listing endpoint
#[derive(Debug, Deserialize)]
struct ListingResponse {
    /// Embedded folder contents
    #[serde(rename = "_embedded")]
    embedded: EmbeddedItems,
}

/// The `_embedded` object of a folder resource
#[derive(Debug, Deserialize)]
struct EmbeddedItems {
    /// Items directly inside the folder
    #[serde(default)]
    items: Vec<ListedItem>,
}

/// A single item from the listing response
///
/// This is a wire-level DTO; the store maps it into a domain snapshot
/// entry, normalizing the timestamp along the way.
#[derive(Debug, Clone, Deserialize)]
pub struct ListedItem {
    /// Item name (file or folder name)
    pub name: String,
    /// Last-modified time as reported by the service: an ISO-8601-like
    /// local string without an explicit offset
    pub modified: String,
}

/// Response from the upload-destination endpoint
#[derive(Debug, Deserialize)]
struct UploadTarget {
    /// URL the file bytes must be transmitted to
    href: String,
}

// ============================================================================
// DiskClient
// ============================================================================

/// HTTP client for disk REST API calls
///
/// Wraps `reqwest::Client` with the authorization header and base URL
/// construction. The base URL is injectable for tests.
pub struct DiskClient {
    /// The underlying HTTP client
    client: Client,
    /// Base URL for API requests
    base_url: String,
    /// OAuth token for the service
    token: String,
}

impl DiskClient {
    /// Creates a new `DiskClient` with the given OAuth token
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: DISK_BASE_URL.to_string(),
            token: token.into(),
        }
    }

    /// Creates a new `DiskClient` with a custom base URL (useful for testing)
    pub fn with_base_url(token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            token: token.into(),
        }
    }

    /// Creates an authorized request builder for the given method and path
    ///
    /// Automatically prepends the base URL and adds the `Authorization`
    /// header in the service's `OAuth <token>` scheme.
    pub fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        self.client
            .request(method, &url)
            .header(reqwest::header::AUTHORIZATION, format!("OAuth {}", self.token))
    }

    /// Lists the contents of a remote folder
    ///
    /// Requests only the `name` and `modified` fields per item. Returns the
    /// raw wire items; timestamp normalization is the store's concern.
    pub async fn list_folder(&self, folder: &str) -> Result<Vec<ListedItem>, SyncError> {
        debug!(folder, "listing remote folder");

        let response = self
            .request(Method::GET, "/resources")
            .query(&[("path", folder), ("fields", LISTING_FIELDS)])
            .send()
            .await
            .map_err(|e| connectivity("listing", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Api {
                operation: "listing",
                status: status.as_u16(),
            });
        }

        let listing: ListingResponse = response.json().await.map_err(|e| SyncError::Protocol {
            operation: "listing",
            message: e.to_string(),
        })?;

        debug!(items = listing.embedded.items.len(), "listing complete");
        Ok(listing.embedded.items)
    }

    /// Requests a write destination for an upload (phase one of two)
    ///
    /// # Arguments
    /// * `remote_path` - Full remote path, `root + "/" + name`
    /// * `overwrite` - `false` for first-time creation, `true` for updates
    pub async fn upload_href(&self, remote_path: &str, overwrite: bool) -> Result<String, SyncError> {
        debug!(remote_path, overwrite, "requesting upload destination");

        let overwrite_param = if overwrite { "true" } else { "false" };
        let response = self
            .request(Method::GET, "/resources/upload")
            .query(&[("path", remote_path), ("overwrite", overwrite_param)])
            .send()
            .await
            .map_err(|e| connectivity("upload", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Api {
                operation: "upload",
                status: status.as_u16(),
            });
        }

        let target: UploadTarget = response.json().await.map_err(|e| SyncError::Protocol {
            operation: "upload",
            message: e.to_string(),
        })?;

        Ok(target.href)
    }

    /// Transmits raw file bytes to an upload destination (phase two)
    ///
    /// The destination is an absolute URL handed out by
    /// [`upload_href`](Self::upload_href), so this request bypasses the
    /// base-URL prefix.
    pub async fn put_bytes(&self, href: &str, data: Vec<u8>) -> Result<(), SyncError> {
        debug!(href, bytes = data.len(), "transmitting file content");

        let response = self
            .client
            .put(href)
            .body(data)
            .send()
            .await
            .map_err(|e| connectivity("upload", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Api {
                operation: "upload",
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    /// Deletes a remote resource
    pub async fn delete_resource(&self, remote_path: &str) -> Result<(), SyncError> {
        debug!(remote_path, "deleting remote resource");

        let response = self
            .request(Method::DELETE, "/resources")
            .query(&[("path", remote_path)])
            .send()
            .await
            .map_err(|e| connectivity("delete", &e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyncError::Api {
                operation: "delete",
                status: status.as_u16(),
            });
        }

        Ok(())
    }

    /// Issues the listing request as a credential probe, checking only the
    /// HTTP status
    ///
    /// A success status means the token is valid. Any other status is a
    /// definitive rejection; the response body is not consulted.
    pub async fn probe(&self, folder: &str) -> Result<(), SyncError> {
        let response = self
            .request(Method::GET, "/resources")
            .query(&[("path", folder), ("fields", LISTING_FIELDS)])
            .send()
            .await
            .map_err(|e| connectivity("credential probe", &e))?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(SyncError::Auth {
                status: status.as_u16(),
            })
        }
    }
}

/// Maps a transport-level `reqwest` failure to the connectivity variant
///
/// Anything that failed before a status line arrived (connect, DNS,
/// timeout, interrupted transfer) counts as connectivity.
fn connectivity(operation: &'static str, err: &reqwest::Error) -> SyncError {
    SyncError::Connectivity {
        operation,
        message: err.to_string(),
    }
}
