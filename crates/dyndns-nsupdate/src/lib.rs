// # nsupdate Zone Updater
//
// This crate provides the production ZoneUpdater implementation for the
// dyndns update service. It applies a directive batch by:
//
// 1. Writing the batch to a uniquely named transient file (flushed and
//    closed before the tool runs; the tool requires a complete file)
// 2. Invoking the configured nsupdate binary with the file path as its sole
//    argument, capturing stdout and stderr separately
// 3. Mapping a non-zero exit, spawn failure, or timeout to a NameServer
//    error carrying the tool's diagnostic (stderr, never stdout)
//
// The transient file is removed on every exit path, including timeouts and
// panics, via the temp-path drop guard. This is the only component in the
// workspace that touches the filesystem or spawns a process.
//
// ## What this crate does NOT do
//
// - NO retry logic (failure policy is owned by UpdateEngine)
// - NO validation (requests are validated before a batch exists)
// - NO state between invocations

use std::io::Write;
use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tempfile::NamedTempFile;
use tokio::process::Command;
use tracing::{debug, error};

use dyndns_core::batch::DirectiveBatch;
use dyndns_core::config::UpdateConfig;
use dyndns_core::error::{Error, Result};
use dyndns_core::traits::ZoneUpdater;

/// Zone updater that drives the external nsupdate tool
///
/// One [`apply`][ZoneUpdater::apply] call is one tool invocation and one
/// transaction against the zone. The applier is stateless; it can be shared
/// freely across concurrent requests.
pub struct NsupdateApplier {
    /// Path to the nsupdate binary
    nsupdate_path: PathBuf,
    /// Upper bound on one tool invocation
    timeout: Duration,
}

impl NsupdateApplier {
    /// Create a new applier
    pub fn new(nsupdate_path: impl Into<PathBuf>, timeout: Duration) -> Self {
        Self {
            nsupdate_path: nsupdate_path.into(),
            timeout,
        }
    }

    /// Create an applier from the update configuration
    pub fn from_config(config: &UpdateConfig) -> Self {
        Self::new(
            &config.nsupdate_path,
            Duration::from_secs(config.nsupdate_timeout_secs),
        )
    }
}

#[async_trait]
impl ZoneUpdater for NsupdateApplier {
    async fn apply(&self, batch: &DirectiveBatch) -> Result<String> {
        let mut file = NamedTempFile::with_prefix("dyndns")
            .map_err(|e| Error::name_server(format!("failed to create transient file: {e}")))?;
        file.write_all(batch.render().as_bytes())
            .map_err(|e| Error::name_server(format!("failed to write transient file: {e}")))?;
        file.flush()
            .map_err(|e| Error::name_server(format!("failed to flush transient file: {e}")))?;

        // Close the handle before the tool reads the file. The returned path
        // guard still removes it when this function returns, on every path.
        let path = file.into_temp_path();

        debug!(file = %path.display(), tool = %self.nsupdate_path.display(), "applying directive batch");

        let mut command = Command::new(&self.nsupdate_path);
        command
            .arg(path.as_os_str())
            .stdin(Stdio::null())
            .kill_on_drop(true);

        let output = match tokio::time::timeout(self.timeout, command.output()).await {
            Ok(result) => result.map_err(|e| {
                Error::name_server(format!(
                    "failed to run {}: {e}",
                    self.nsupdate_path.display()
                ))
            })?,
            // The dropped in-flight invocation kills the child.
            Err(_) => {
                error!(tool = %self.nsupdate_path.display(), timeout_secs = self.timeout.as_secs(), "update tool timed out");
                return Err(Error::name_server(format!(
                    "{} timed out after {}s",
                    self.nsupdate_path.display(),
                    self.timeout.as_secs()
                )));
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            error!(status = %output.status, stderr = %stderr.trim(), "update tool failed");
            return Err(Error::name_server(format!(
                "{}: {}",
                output.status,
                stderr.trim()
            )));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn updater_name(&self) -> &'static str {
        "nsupdate"
    }
}
