//! Credential probe with bounded, cancellable retry
//!
//! The probe reuses the listing request and inspects only its status. The
//! two failure families get opposite handling: a non-success status is a
//! definitive rejection and returns immediately, while a connectivity
//! failure ("network is down" rather than "token is wrong") is retried
//! with exponential backoff - bounded, and abortable through a
//! cancellation token so startup can be interrupted deterministically.

use std::time::Duration;

use cumulus_core::domain::errors::SyncError;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::client::DiskClient;

/// Maximum number of retries after the initial probe attempt
const MAX_RETRIES: u32 = 5;

/// Base delay for exponential backoff (1 second)
const BASE_DELAY_SECS: u64 = 1;

/// Backoff delay before retry number `attempt` (1-based): 1s, 2s, 4s, 8s, 16s
fn backoff_delay(attempt: u32) -> Duration {
    Duration::from_secs(BASE_DELAY_SECS * 2u64.pow(attempt.saturating_sub(1)))
}

/// Runs the credential probe against `folder`
///
/// Returns `Ok(())` on a success status, [`SyncError::Auth`] immediately on
/// any other status, and the last [`SyncError::Connectivity`] once retries
/// are exhausted or `cancel` fires during backoff.
pub(crate) async fn check_credentials(
    client: &DiskClient,
    folder: &str,
    cancel: &CancellationToken,
) -> Result<(), SyncError> {
    let mut last_error: Option<SyncError> = None;

    for attempt in 0..=MAX_RETRIES {
        if attempt > 0 {
            let delay = backoff_delay(attempt);
            warn!(
                attempt,
                delay_secs = delay.as_secs(),
                "Credential probe hit a connectivity failure, backing off"
            );
            tokio::select! {
                () = cancel.cancelled() => {
                    info!("Credential probe cancelled during backoff");
                    return Err(last_error.unwrap_or_else(cancelled_error));
                }
                () = tokio::time::sleep(delay) => {}
            }
        }

        match client.probe(folder).await {
            Ok(()) => {
                if attempt > 0 {
                    info!(attempt, "Credential probe succeeded after retry");
                }
                return Ok(());
            }
            Err(err) if err.is_connectivity() => {
                last_error = Some(err);
            }
            // Auth rejection: definitive, no retry.
            Err(err) => return Err(err),
        }
    }

    Err(last_error.unwrap_or_else(cancelled_error))
}

/// Fallback error for the paths where no probe failure was recorded yet
fn cancelled_error() -> SyncError {
    SyncError::Connectivity {
        operation: "credential probe",
        message: "probe aborted before completing".to_string(),
    }
}
