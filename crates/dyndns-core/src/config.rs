//! Configuration types for the dyndns update service
//!
//! The update configuration is constructed once at process start, validated,
//! and then passed by reference into every component that needs it. It is
//! never mutated afterwards and is safe for unsynchronized concurrent reads.

use serde::Deserialize;

/// Configuration consumed by the update pipeline
///
/// The daemon owns loading (file path, environment); this struct is the
/// read-only result the core works with.
#[derive(Clone, Deserialize)]
pub struct UpdateConfig {
    /// Address of the authoritative name server the update tool talks to
    pub server: String,

    /// Base zone name; reverse pointer records point to `<domain>.<zone>`
    pub zone: String,

    /// TTL applied to added records, in seconds
    #[serde(default = "default_record_ttl")]
    pub record_ttl: u32,

    /// Path to the external update tool (nsupdate)
    #[serde(default = "default_nsupdate_path")]
    pub nsupdate_path: String,

    /// Shared secret clients must present to update records
    pub shared_secret: String,

    /// Upper bound on how long one update tool invocation may run, in seconds
    #[serde(default = "default_nsupdate_timeout_secs")]
    pub nsupdate_timeout_secs: u64,
}

// The shared secret must never end up in logs.
impl std::fmt::Debug for UpdateConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UpdateConfig")
            .field("server", &self.server)
            .field("zone", &self.zone)
            .field("record_ttl", &self.record_ttl)
            .field("nsupdate_path", &self.nsupdate_path)
            .field("shared_secret", &"<REDACTED>")
            .field("nsupdate_timeout_secs", &self.nsupdate_timeout_secs)
            .finish()
    }
}

impl UpdateConfig {
    /// Validate the configuration
    ///
    /// Performs presence and range checks so that misconfiguration fails at
    /// startup rather than on the first inbound request.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.server.is_empty() {
            return Err(crate::Error::config("name server address cannot be empty"));
        }

        if self.zone.is_empty() {
            return Err(crate::Error::config("zone cannot be empty"));
        }

        if self.shared_secret.is_empty() {
            return Err(crate::Error::config("shared secret cannot be empty"));
        }

        if self.nsupdate_path.is_empty() {
            return Err(crate::Error::config("nsupdate path cannot be empty"));
        }

        if self.record_ttl == 0 {
            return Err(crate::Error::config("record TTL must be greater than 0"));
        }

        if !(1..=300).contains(&self.nsupdate_timeout_secs) {
            return Err(crate::Error::config(format!(
                "nsupdate timeout must be between 1 and 300 seconds, got {}",
                self.nsupdate_timeout_secs
            )));
        }

        Ok(())
    }
}

fn default_record_ttl() -> u32 {
    300
}

fn default_nsupdate_path() -> String {
    "/usr/bin/nsupdate".to_string()
}

fn default_nsupdate_timeout_secs() -> u64 {
    30
}
