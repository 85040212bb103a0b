//! Snapshot reconciliation
//!
//! [`reconcile`] is the heart of the engine: a pure function from the two
//! per-cycle snapshots to the ordered list of remote mutations needed to
//! converge. No I/O, no shared state - identical inputs always produce the
//! identical action list, which is what lets the whole decision surface be
//! tested without a network or a filesystem.

use std::path::Path;

use cumulus_core::domain::action::Action;
use cumulus_core::domain::snapshot::Snapshot;

/// Computes the remote-side actions needed to make `remote` match `local`
///
/// Decision table, per name:
///
/// | local | remote          | action                        |
/// |-------|-----------------|-------------------------------|
/// | yes   | absent          | `Upload { overwrite: false }` |
/// | yes   | older           | `Upload { overwrite: true }`  |
/// | yes   | same or newer   | none                          |
/// | no    | present         | `Delete`                      |
///
/// Equal timestamps are treated as already synchronized - the tie-break
/// favors idempotence over a redundant transfer. Uploads precede deletes;
/// a name is never the target of both in one cycle, so the ordering carries
/// no correctness dependency. Both groups come out in name order.
///
/// `local_dir` is only used to compose each upload's source path.
pub fn reconcile(local: &Snapshot, remote: &Snapshot, local_dir: &Path) -> Vec<Action> {
    let mut actions = Vec::new();

    for (name, local_time) in local.iter() {
        let upload = |overwrite: bool| Action::Upload {
            name: name.clone(),
            source_path: local_dir.join(name.as_str()),
            overwrite,
        };

        match remote.modified_at(name) {
            None => actions.push(upload(false)),
            Some(remote_time) if remote_time < local_time => actions.push(upload(true)),
            Some(_) => {}
        }
    }

    for name in remote.names() {
        if !local.contains(name) {
            actions.push(Action::Delete { name: name.clone() });
        }
    }

    actions
}
