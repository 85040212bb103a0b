//! Sync cycle driver
//!
//! The [`CycleDriver`] orchestrates one collect/reconcile/execute pass:
//!
//! 1. Capture the local snapshot
//! 2. Capture the remote snapshot (or find the remote unavailable)
//! 3. Diff the two snapshots
//! 4. Execute the resulting actions sequentially
//!
//! No failure below the cycle boundary terminates the process: a failed
//! local listing or remote listing skips the cycle, a failed upload or
//! delete abandons that action while the rest are still attempted, and
//! retry-by-repetition is left to the outer polling loop. The driver holds
//! no state between cycles.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use cumulus_core::domain::action::{Action, RemoteAvailability};
use cumulus_core::ports::remote_store::IRemoteStore;
use tracing::{error, info, warn};

use crate::collector::collect_local;
use crate::reconciler::reconcile;

/// Summary of a completed synchronization cycle
#[derive(Debug, Clone, Default)]
pub struct CycleOutcome {
    /// Number of files uploaded to the remote
    pub files_uploaded: u32,
    /// Number of remote files deleted
    pub files_deleted: u32,
    /// Errors encountered during the cycle (non-fatal)
    pub errors: Vec<String>,
    /// Whether the remote could not be reached (cycle was a no-op)
    pub remote_unavailable: bool,
    /// Wall-clock duration of the cycle in milliseconds
    pub duration_ms: u64,
}

/// One-way synchronization cycle driver
///
/// Depends only on the remote-store port, so it can be exercised with an
/// in-memory double.
pub struct CycleDriver {
    /// Remote storage backend
    remote_store: Arc<dyn IRemoteStore>,
    /// Watched local directory (existence verified at startup)
    local_dir: PathBuf,
}

impl CycleDriver {
    /// Creates a new driver for the given store and watched directory
    pub fn new(remote_store: Arc<dyn IRemoteStore>, local_dir: impl Into<PathBuf>) -> Self {
        Self {
            remote_store,
            local_dir: local_dir.into(),
        }
    }

    /// Runs one full synchronization cycle and reports its outcome
    ///
    /// Never returns an error: every failure is folded into the outcome and
    /// the process lives on to the next scheduled tick.
    #[tracing::instrument(skip(self))]
    pub async fn run_cycle(&self) -> CycleOutcome {
        let start = Instant::now();
        let mut outcome = CycleOutcome::default();

        // Step 1: local snapshot. A filesystem failure aborts the cycle.
        let local = match collect_local(&self.local_dir).await {
            Ok(snapshot) => snapshot,
            Err(err) => {
                error!(error = %err, "Failed to collect local snapshot, skipping cycle");
                outcome.errors.push(format!("local listing: {err}"));
                return finish(outcome, start);
            }
        };

        // Step 2: remote snapshot. An unreachable remote is never read as
        // an empty listing - that would re-upload everything.
        let remote = match self.collect_remote(&mut outcome).await {
            RemoteAvailability::Available(snapshot) => snapshot,
            RemoteAvailability::Unavailable => return finish(outcome, start),
        };

        // Step 3: diff.
        let actions = reconcile(&local, &remote, &self.local_dir);
        info!(
            local_files = local.len(),
            remote_files = remote.len(),
            actions = actions.len(),
            "Reconciliation complete"
        );

        // Step 4: execute sequentially; one failed action does not stop the rest.
        for action in &actions {
            match self.execute(action).await {
                Ok(()) => match action {
                    Action::Upload { name, overwrite, .. } => {
                        info!(file = %name, overwrite, "Uploaded");
                        outcome.files_uploaded += 1;
                    }
                    Action::Delete { name } => {
                        info!(file = %name, "Deleted from remote");
                        outcome.files_deleted += 1;
                    }
                },
                Err(err) => {
                    warn!(file = %action.name(), error = %err, "Action failed, continuing");
                    outcome.errors.push(format!("{}: {err}", action.name()));
                }
            }
        }

        finish(outcome, start)
    }

    /// Captures the remote snapshot, classifying failures
    ///
    /// Connectivity makes the remote [`RemoteAvailability::Unavailable`];
    /// protocol and API failures likewise yield no snapshot but are
    /// recorded as cycle errors.
    async fn collect_remote(&self, outcome: &mut CycleOutcome) -> RemoteAvailability {
        match self.remote_store.fetch_snapshot().await {
            Ok(snapshot) => RemoteAvailability::Available(snapshot),
            Err(err) if err.is_connectivity() => {
                warn!(error = %err, "Remote unavailable, cycle is a no-op");
                outcome.remote_unavailable = true;
                RemoteAvailability::Unavailable
            }
            Err(err) => {
                error!(error = %err, "Remote listing failed, skipping cycle");
                outcome.errors.push(format!("remote listing: {err}"));
                RemoteAvailability::Unavailable
            }
        }
    }

    /// Executes a single action through the port
    async fn execute(&self, action: &Action) -> Result<(), cumulus_core::domain::errors::SyncError> {
        match action {
            Action::Upload {
                name,
                source_path,
                overwrite,
            } => {
                self.remote_store
                    .upload(name, source_path, *overwrite)
                    .await
            }
            Action::Delete { name } => self.remote_store.delete(name).await,
        }
    }
}

/// Stamps the duration and logs the closing summary line
fn finish(mut outcome: CycleOutcome, start: Instant) -> CycleOutcome {
    outcome.duration_ms = start.elapsed().as_millis() as u64;
    info!(
        uploaded = outcome.files_uploaded,
        deleted = outcome.files_deleted,
        errors = outcome.errors.len(),
        remote_unavailable = outcome.remote_unavailable,
        duration_ms = outcome.duration_ms,
        "Sync cycle completed"
    );
    outcome
}
