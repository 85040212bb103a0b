//! Remote store port (driven/secondary port)
//!
//! Interface for the remote storage backend that mirrors the watched
//! directory. The primary implementation targets a disk-style REST service,
//! but the trait is storage-agnostic.
//!
//! ## Design Notes
//!
//! - Methods return typed [`SyncError`] rather than an opaque error so the
//!   caller can classify failures: connectivity makes the remote
//!   unavailable for the cycle, auth rejections are fatal at startup.
//! - There is no in-cycle retry in any of these operations except the
//!   credential probe; retry-by-repetition is the polling loop's job.

use std::path::Path;

use tokio_util::sync::CancellationToken;

use crate::domain::errors::SyncError;
use crate::domain::newtypes::FileName;
use crate::domain::snapshot::Snapshot;

/// Port trait for remote storage operations
#[async_trait::async_trait]
pub trait IRemoteStore: Send + Sync {
    /// Lists the remote folder and returns a complete snapshot
    ///
    /// Timestamps in the returned snapshot are already normalized to the
    /// same absolute epoch basis the local collector uses.
    ///
    /// # Errors
    /// [`SyncError::Connectivity`] when the service is unreachable (the
    /// caller must treat the remote as unavailable, never as empty),
    /// [`SyncError::Protocol`] / [`SyncError::Api`] for malformed or
    /// rejected responses.
    async fn fetch_snapshot(&self) -> Result<Snapshot, SyncError>;

    /// Uploads a local file to the remote folder
    ///
    /// Reads `source_path` fully, then runs the two-phase transfer: obtain
    /// a write destination for the remote path, then transmit the bytes.
    ///
    /// # Arguments
    /// * `name` - Sync key; the remote object is `root + "/" + name`
    /// * `source_path` - Local file to read
    /// * `overwrite` - `false` for first-time creation, `true` for updates
    async fn upload(
        &self,
        name: &FileName,
        source_path: &Path,
        overwrite: bool,
    ) -> Result<(), SyncError>;

    /// Deletes the remote object `root + "/" + name`
    async fn delete(&self, name: &FileName) -> Result<(), SyncError>;

    /// Probes the credential by issuing the listing request
    ///
    /// A success status means the credential is valid. Any other HTTP
    /// status is a definitive rejection ([`SyncError::Auth`], no retry).
    /// Connectivity failures are retried with bounded exponential backoff;
    /// `cancel` aborts the backoff promptly so startup can be interrupted
    /// deterministically.
    async fn check_credentials(&self, cancel: &CancellationToken) -> Result<(), SyncError>;
}
