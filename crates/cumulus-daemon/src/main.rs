//! Cumulus Daemon - background synchronization service
//!
//! Runs the one-way mirror indefinitely: load configuration, verify the
//! preconditions (local directory exists, credential is valid), then run a
//! sync cycle on a fixed polling interval until SIGTERM/SIGINT.
//!
//! # Architecture
//!
//! The daemon wires the disk adapter into the cycle driver and enters a
//! polling loop controlled by a `CancellationToken` that is triggered on
//! receipt of a shutdown signal. Per-cycle failures never terminate the
//! process; only the two startup preconditions are fatal.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Parser;
use cumulus_core::config::Config;
use cumulus_core::ports::remote_store::IRemoteStore;
use cumulus_disk::store::{DiskConfig, DiskRemoteStore};
use cumulus_sync::CycleDriver;
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Command-line arguments
#[derive(Debug, Parser)]
#[command(
    name = "cumulusd",
    about = "One-way local-to-remote directory mirror",
    version
)]
struct Args {
    /// Path to the YAML configuration file
    #[arg(long)]
    config: Option<PathBuf>,
}

/// Main daemon service wiring configuration, adapter, and driver together
struct DaemonService {
    /// Application configuration loaded from YAML
    config: Config,
    /// Remote store, kept for the startup credential probe
    remote_store: Arc<DiskRemoteStore>,
    /// Cycle driver executing one pass per tick
    driver: CycleDriver,
    /// Token for signalling graceful shutdown
    shutdown: CancellationToken,
}

impl DaemonService {
    /// Creates the service from a validated configuration
    fn new(config: Config, shutdown: CancellationToken) -> Result<Self> {
        let token = config
            .token()
            .context("No remote-service token configured")?;

        let remote_store = Arc::new(DiskRemoteStore::new(DiskConfig {
            token,
            remote_root: config.sync.remote_root.clone(),
        }));
        let driver = CycleDriver::new(
            Arc::clone(&remote_store) as Arc<dyn IRemoteStore>,
            &config.sync.local_dir,
        );

        Ok(Self {
            config,
            remote_store,
            driver,
            shutdown,
        })
    }

    /// Verifies the startup preconditions
    ///
    /// Both checks are fatal: a missing local directory and a definitive
    /// credential rejection terminate startup before any cycle runs. A
    /// temporarily unreachable remote is not fatal - the probe backs off
    /// and retries until it gets a definitive answer or shutdown fires.
    async fn preflight(&self) -> Result<()> {
        let dir = &self.config.sync.local_dir;
        let metadata = tokio::fs::metadata(dir)
            .await
            .with_context(|| format!("Local directory {} is not accessible", dir.display()))?;
        if !metadata.is_dir() {
            anyhow::bail!("{} is not a directory", dir.display());
        }
        info!(dir = %dir.display(), "Local directory verified");

        self.remote_store
            .check_credentials(&self.shutdown)
            .await
            .context("Credential check failed")?;
        info!("Remote credential accepted");

        Ok(())
    }

    /// Runs the daemon: preflight, then the periodic polling loop
    async fn run(&self) -> Result<()> {
        self.preflight().await?;

        let poll_secs = self.config.sync.poll_interval;
        info!(
            poll_interval_secs = poll_secs,
            local_dir = %self.config.sync.local_dir.display(),
            remote_root = %self.config.sync.remote_root,
            "Starting sync loop"
        );

        let mut interval = tokio::time::interval(Duration::from_secs(poll_secs));
        // A cycle that outlasts the period delays the next tick; cycles
        // never overlap or burst.
        interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

        // The first tick fires immediately; we want to sync right away.
        interval.tick().await;

        loop {
            self.driver.run_cycle().await;

            tokio::select! {
                _ = interval.tick() => {}
                () = self.shutdown.cancelled() => {
                    info!("Shutdown signal received");
                    break;
                }
            }
        }

        info!("Sync loop terminated");
        Ok(())
    }
}

/// Waits for SIGTERM or SIGINT and triggers the cancellation token
async fn shutdown_signal(token: CancellationToken) {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received SIGINT (Ctrl+C)");
        }
        _ = terminate => {
            info!("Received SIGTERM");
        }
    }

    token.cancel();
}

/// Initializes tracing from the logging configuration
///
/// `RUST_LOG` wins over the configured level; output goes to the configured
/// log file when one is set, stderr otherwise.
fn init_tracing(config: &Config) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.logging.level.clone()));

    match &config.logging.file {
        Some(path) => {
            let file = std::fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_writer(Arc::new(file))
                .with_ansi(false)
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(env_filter)
                .with_target(true)
                .init();
        }
    }

    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    let config_path = args.config.unwrap_or_else(Config::default_path);
    let config = Config::load_or_default(&config_path);

    init_tracing(&config)?;
    info!(config_path = %config_path.display(), "Cumulus daemon starting (cumulusd)");

    config.validate().context("Invalid configuration")?;

    let shutdown_token = CancellationToken::new();
    let signal_token = shutdown_token.clone();
    tokio::spawn(async move {
        shutdown_signal(signal_token).await;
    });

    let service = DaemonService::new(config, shutdown_token)?;
    let result = service.run().await;

    match &result {
        Ok(()) => info!("Cumulus daemon shut down gracefully"),
        Err(e) => error!(error = %e, "Cumulus daemon exiting with error"),
    }

    result
}
