//! Cumulus Disk - remote storage adapter
//!
//! Implements the [`IRemoteStore`](cumulus_core::ports::remote_store::IRemoteStore)
//! port against a disk-style cloud REST API:
//!
//! - [`client`] - typed HTTP client (listing, upload href, raw transfer, delete)
//! - [`timestamp`] - remote timestamp parsing and epoch normalization
//! - [`store`] - the port implementation with failure classification
//!
//! ## Failure classification
//!
//! Every remote call is classified into the core taxonomy at this boundary:
//! transport failures become `Connectivity` (the engine treats the remote as
//! unavailable), non-success statuses become `Api`, and unexpected response
//! shapes become `Protocol`. The engine never sees a raw `reqwest` error.

pub mod client;
pub mod store;
pub mod timestamp;

mod probe;
