//! Error taxonomy
//!
//! Two layers of errors live here:
//!
//! - [`DomainError`] - validation failures when constructing domain values.
//! - [`SyncError`] - everything that can go wrong while collecting snapshots
//!   or executing remote actions. The variants map one-to-one onto the
//!   handling policy: connectivity failures make the remote *unavailable*
//!   for the cycle, auth rejections are fatal at startup, and everything
//!   else is logged and skipped.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur when constructing domain values
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Invalid file name (empty, or contains a path separator or NUL)
    #[error("Invalid file name: {0}")]
    InvalidFileName(String),
}

/// Errors raised by snapshot collection and remote operations
///
/// The `operation` fields name the remote call that failed ("listing",
/// "upload", "delete", "credential probe") so a single log line is enough
/// to diagnose a failed cycle.
#[derive(Debug, Error)]
pub enum SyncError {
    /// The local directory could not be listed, or a file could not be
    /// read or stat-ed
    #[error("Filesystem error at {path}: {source}")]
    Filesystem {
        /// Path that failed
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// A transport-level failure: the remote service could not be reached
    /// at all (connect, DNS, timeout, broken transfer)
    #[error("Connectivity failure during {operation}: {message}")]
    Connectivity {
        /// Remote operation that was in flight
        operation: &'static str,
        /// Transport error description
        message: String,
    },

    /// The credential probe was answered with a non-success status
    #[error("Credential rejected by the remote service (HTTP {status})")]
    Auth {
        /// HTTP status of the rejection
        status: u16,
    },

    /// The remote service answered, but the response body did not have the
    /// expected shape
    #[error("Malformed response during {operation}: {message}")]
    Protocol {
        /// Remote operation that was in flight
        operation: &'static str,
        /// What was wrong with the response
        message: String,
    },

    /// The remote service answered with a non-success status
    #[error("Remote service returned HTTP {status} during {operation}")]
    Api {
        /// Remote operation that was in flight
        operation: &'static str,
        /// HTTP status code
        status: u16,
    },
}

impl SyncError {
    /// Builds a [`SyncError::Filesystem`] from a path and I/O error
    pub fn filesystem(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            path: path.into(),
            source,
        }
    }

    /// Returns true if this error means the remote service could not be
    /// reached at all.
    ///
    /// This is the classification that drives the unavailable-remote rule:
    /// a connectivity failure during listing must yield zero actions, never
    /// an empty snapshot.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Self::Connectivity { .. })
    }

    /// Returns true for a definitive credential rejection (fatal at startup)
    pub fn is_auth(&self) -> bool {
        matches!(self, Self::Auth { .. })
    }
}
