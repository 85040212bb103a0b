//! Cumulus Core - domain model, configuration, and ports
//!
//! This crate holds everything the synchronization engine and its adapters
//! share, without depending on any concrete I/O:
//!
//! - [`domain`] - snapshots, actions, validated names, and the error taxonomy
//! - [`config`] - typed YAML configuration with defaults and validation
//! - [`ports`] - the remote-store interface implemented by adapter crates

pub mod config;
pub mod domain;
pub mod ports;
