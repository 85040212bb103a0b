//! Local snapshot collection
//!
//! Lists the regular files directly inside the watched directory and maps
//! each to its modification time in epoch seconds. Subdirectories are
//! skipped, not recursed - the mirror is flat.

use std::path::Path;

use chrono::{DateTime, Utc};
use cumulus_core::domain::errors::SyncError;
use cumulus_core::domain::newtypes::FileName;
use cumulus_core::domain::snapshot::{FileRecord, Snapshot};
use tracing::{debug, warn};

/// Captures a snapshot of all regular files directly inside `dir`
///
/// The caller has already verified that `dir` exists; a directory that
/// cannot be listed or a file whose metadata cannot be read fails the whole
/// collection with [`SyncError::Filesystem`] - fatal for the current cycle,
/// not for the process.
pub async fn collect_local(dir: &Path) -> Result<Snapshot, SyncError> {
    let mut entries = tokio::fs::read_dir(dir)
        .await
        .map_err(|e| SyncError::filesystem(dir, e))?;

    let mut snapshot = Snapshot::new();

    while let Some(entry) = entries
        .next_entry()
        .await
        .map_err(|e| SyncError::filesystem(dir, e))?
    {
        let metadata = entry
            .metadata()
            .await
            .map_err(|e| SyncError::filesystem(entry.path(), e))?;

        // Regular files only: directories and symlinks are not mirrored.
        if !metadata.is_file() {
            continue;
        }

        let raw_name = match entry.file_name().into_string() {
            Ok(name) => name,
            Err(os_name) => {
                warn!(name = ?os_name, "Skipping file with non-UTF-8 name");
                continue;
            }
        };
        let name = match FileName::new(raw_name) {
            Ok(name) => name,
            Err(err) => {
                warn!(error = %err, "Skipping file with unusable name");
                continue;
            }
        };

        let modified = metadata
            .modified()
            .map_err(|e| SyncError::filesystem(entry.path(), e))?;
        let modified_at = DateTime::<Utc>::from(modified).timestamp();

        snapshot.insert(FileRecord::new(name, modified_at));
    }

    debug!(dir = %dir.display(), files = snapshot.len(), "local snapshot collected");
    Ok(snapshot)
}
