//! Domain model for one-way directory mirroring
//!
//! Everything here is cycle-scoped: snapshots and actions are created at the
//! start of a sync cycle, consumed by its end, and discarded. The system
//! keeps no durable synchronization journal.

pub mod action;
pub mod errors;
pub mod newtypes;
pub mod snapshot;
