//! Configuration module for Cumulus.
//!
//! Provides typed configuration structs that map to the YAML configuration
//! file, with loading, validation, and defaults. Parsing happens once at
//! startup; components receive explicit values, never a shared mutable
//! configuration object.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Environment variable that overrides `auth.token`, so the secret can stay
/// out of the configuration file.
pub const TOKEN_ENV_VAR: &str = "CUMULUS_TOKEN";

/// Top-level configuration for Cumulus.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    pub sync: SyncConfig,
    pub auth: AuthConfig,
    pub logging: LoggingConfig,
}

/// Synchronization settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Local directory whose contents are mirrored.
    pub local_dir: PathBuf,
    /// Base path on the remote service under which synchronized files live.
    pub remote_root: String,
    /// Seconds between sync cycles.
    pub poll_interval: u64,
}

/// Authentication settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AuthConfig {
    /// OAuth token for the remote service. `None` here is allowed when the
    /// token is supplied via [`TOKEN_ENV_VAR`] instead.
    pub token: Option<String>,
}

/// Logging / tracing settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level: `trace`, `debug`, `info`, `warn`, or `error`.
    pub level: String,
    /// Optional path to a log file; stderr is used when absent.
    pub file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a YAML file at `path`.
    pub fn load(path: &Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_yaml::from_str(&content)?;
        Ok(config)
    }

    /// Try to load from `path`; fall back to [`Config::default`] on any error.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_default()
    }

    /// Platform-appropriate default path for the configuration file.
    ///
    /// Typically `$XDG_CONFIG_HOME/cumulus/config.yaml` on Linux.
    pub fn default_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("~/.config"))
            .join("cumulus")
            .join("config.yaml")
    }

    /// Resolve the remote-service token: the environment variable wins over
    /// the configuration file.
    pub fn token(&self) -> Option<String> {
        std::env::var(TOKEN_ENV_VAR)
            .ok()
            .filter(|t| !t.is_empty())
            .or_else(|| self.auth.token.clone())
    }

    /// Validate the values a sync run depends on.
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.sync.local_dir.as_os_str().is_empty() {
            anyhow::bail!("sync.local_dir must not be empty");
        }
        if self.sync.remote_root.is_empty() {
            anyhow::bail!("sync.remote_root must not be empty");
        }
        if self.sync.poll_interval == 0 {
            anyhow::bail!("sync.poll_interval must be at least 1 second");
        }
        if self.token().is_none() {
            anyhow::bail!(
                "no token configured: set auth.token or the {} environment variable",
                TOKEN_ENV_VAR
            );
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            local_dir: dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("~"))
                .join("Cumulus"),
            remote_root: "cumulus".to_string(),
            poll_interval: 60,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
        }
    }
}
