//! Remote-side actions and remote availability
//!
//! [`Action`] values are produced fresh by the reconciler each cycle and
//! never persisted. Within one cycle a name is the target of at most one
//! action, so execution order carries no correctness dependency.

use std::path::PathBuf;

use super::newtypes::FileName;
use super::snapshot::Snapshot;

/// A single remote-side mutation required to converge
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    /// Transfer a local file to the remote folder
    ///
    /// `overwrite` is `false` for first-time creation and `true` for
    /// updates; whether the flag matches remote reality is the remote
    /// service's concern, not validated locally.
    Upload {
        /// Sync key
        name: FileName,
        /// Absolute path of the local file to read
        source_path: PathBuf,
        /// Whether the remote object is expected to already exist
        overwrite: bool,
    },

    /// Remove a remote object that no longer exists locally
    Delete {
        /// Sync key
        name: FileName,
    },
}

impl Action {
    /// The file name this action targets
    pub fn name(&self) -> &FileName {
        match self {
            Self::Upload { name, .. } | Self::Delete { name } => name,
        }
    }
}

/// Result of remote snapshot collection
///
/// Either a complete [`Snapshot`] or an explicit marker that the remote
/// could not be reached - never a partial snapshot. Treating an unreachable
/// remote as an empty listing would make every local file look new and
/// trigger a spurious mass re-upload, so the distinction is load-bearing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteAvailability {
    /// The remote answered with a complete listing
    Available(Snapshot),
    /// The remote could not be reached; the cycle must produce zero actions
    Unavailable,
}
