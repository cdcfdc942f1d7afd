//! Daemon configuration loading
//!
//! Configuration comes from a JSON file named by the `DYNDNSD_CONFIG`
//! environment variable (default `/etc/dyndnsd.json`):
//!
//! ```json
//! {
//!     "listen": "0.0.0.0:8080",
//!     "log_level": "info",
//!     "server": "ns1.example.org",
//!     "zone": "dyndns.example.org",
//!     "record_ttl": 300,
//!     "nsupdate_path": "/usr/bin/nsupdate",
//!     "shared_secret": "...",
//!     "nsupdate_timeout_secs": 30
//! }
//! ```
//!
//! The file is read once at startup and validated before the server binds;
//! the resulting value is read-only for the life of the process.

use std::env;
use std::fs;

use anyhow::{Context, Result};
use serde::Deserialize;

use dyndns_core::UpdateConfig;

/// Configuration file consulted when `DYNDNSD_CONFIG` is not set
pub const DEFAULT_CONFIG_PATH: &str = "/etc/dyndnsd.json";

/// Top-level daemon configuration
#[derive(Debug, Deserialize)]
pub struct DaemonConfig {
    /// Address the HTTP server binds, e.g. `0.0.0.0:8080`
    #[serde(default = "default_listen")]
    pub listen: String,

    /// Log level: trace, debug, info, warn, error
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Update pipeline configuration, consumed read-only by the core
    #[serde(flatten)]
    pub update: UpdateConfig,
}

impl DaemonConfig {
    /// Load configuration from the path in `DYNDNSD_CONFIG` (or the default)
    pub fn load() -> Result<Self> {
        let path = env::var("DYNDNSD_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
        Self::load_from(&path)
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &str) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read configuration file {path}"))?;
        let config: Self = serde_json::from_str(&raw)
            .with_context(|| format!("failed to parse configuration file {path}"))?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        if self.listen.is_empty() {
            anyhow::bail!("listen address cannot be empty");
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            other => anyhow::bail!(
                "log_level '{}' is not valid. Valid levels: trace, debug, info, warn, error",
                other
            ),
        }

        self.update.validate()?;
        Ok(())
    }
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}
