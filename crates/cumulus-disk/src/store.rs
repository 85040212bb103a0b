//! DiskRemoteStore - IRemoteStore implementation for the disk REST API
//!
//! Delegates HTTP work to [`DiskClient`] and maps wire items into domain
//! snapshots, normalizing every remote timestamp onto the absolute epoch
//! basis the local collector uses.
//!
//! ## Design Notes
//!
//! - Remote paths are composed per call as `root + "/" + name`; nothing
//!   request-scoped is shared between calls.
//! - A listing that cannot be fetched or parsed never degrades into an
//!   empty snapshot - the typed error reaches the engine, which treats the
//!   remote as unavailable for the cycle.

use std::path::Path;

use cumulus_core::domain::errors::SyncError;
use cumulus_core::domain::newtypes::FileName;
use cumulus_core::domain::snapshot::{FileRecord, Snapshot};
use cumulus_core::ports::remote_store::IRemoteStore;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::client::DiskClient;
use crate::probe;
use crate::timestamp::{host_utc_offset_hours, normalize_to_epoch, parse_remote_timestamp};

/// Connection settings for the disk service
///
/// An explicit value passed to the constructor; no process-wide implicit
/// state.
#[derive(Debug, Clone)]
pub struct DiskConfig {
    /// OAuth token for the service
    pub token: String,
    /// Base path on the service under which synchronized files live
    pub remote_root: String,
}

/// Remote store implementation backed by the disk REST API
pub struct DiskRemoteStore {
    /// The underlying API client
    client: DiskClient,
    /// Remote folder that mirrors the watched directory
    remote_root: String,
}

impl DiskRemoteStore {
    /// Creates a store talking to the production API endpoint
    pub fn new(config: DiskConfig) -> Self {
        Self {
            client: DiskClient::new(config.token),
            remote_root: config.remote_root,
        }
    }

    /// Creates a store with a custom base URL (useful for testing)
    pub fn with_base_url(config: DiskConfig, base_url: impl Into<String>) -> Self {
        Self {
            client: DiskClient::with_base_url(config.token, base_url),
            remote_root: config.remote_root,
        }
    }

    /// Full remote path for a sync key
    fn remote_path(&self, name: &FileName) -> String {
        format!("{}/{}", self.remote_root, name.as_str())
    }
}

#[async_trait::async_trait]
impl IRemoteStore for DiskRemoteStore {
    async fn fetch_snapshot(&self) -> Result<Snapshot, SyncError> {
        let items = self.client.list_folder(&self.remote_root).await?;

        // One offset per listing: every entry of the snapshot is normalized
        // against the same basis.
        let offset_hours = host_utc_offset_hours();

        let mut snapshot = Snapshot::new();
        for item in items {
            let name = FileName::new(item.name).map_err(|e| SyncError::Protocol {
                operation: "listing",
                message: e.to_string(),
            })?;
            let naive = parse_remote_timestamp(&item.modified).map_err(|e| SyncError::Protocol {
                operation: "listing",
                message: format!("bad modified timestamp for '{name}': {e}"),
            })?;
            snapshot.insert(FileRecord::new(name, normalize_to_epoch(naive, offset_hours)));
        }

        debug!(
            files = snapshot.len(),
            offset_hours, "remote snapshot collected"
        );
        Ok(snapshot)
    }

    async fn upload(
        &self,
        name: &FileName,
        source_path: &Path,
        overwrite: bool,
    ) -> Result<(), SyncError> {
        let data = tokio::fs::read(source_path)
            .await
            .map_err(|e| SyncError::filesystem(source_path, e))?;

        let href = self
            .client
            .upload_href(&self.remote_path(name), overwrite)
            .await?;
        self.client.put_bytes(&href, data).await?;

        debug!(file = %name, overwrite, "upload complete");
        Ok(())
    }

    async fn delete(&self, name: &FileName) -> Result<(), SyncError> {
        self.client.delete_resource(&self.remote_path(name)).await?;
        debug!(file = %name, "delete complete");
        Ok(())
    }

    async fn check_credentials(&self, cancel: &CancellationToken) -> Result<(), SyncError> {
        probe::check_credentials(&self.client, &self.remote_root, cancel).await
    }
}
