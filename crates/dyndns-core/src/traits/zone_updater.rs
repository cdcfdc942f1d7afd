//! Zone updater trait
//!
//! The seam between the deterministic core and the outside world. The
//! production implementation (`dyndns-nsupdate`) writes the batch to a
//! transient file and drives the external update tool; tests substitute a
//! recording fake to exercise orchestration without spawning processes.

use async_trait::async_trait;

use crate::batch::DirectiveBatch;
use crate::error::Result;

/// Trait for applying a directive batch to the authoritative zone
///
/// One call covers one transaction against the zone. Implementations must be
/// thread-safe and usable across async tasks, and must not retry on their
/// own: failure policy is owned by the engine.
#[async_trait]
pub trait ZoneUpdater: Send + Sync {
    /// Apply one directive batch
    ///
    /// # Returns
    ///
    /// - `Ok(String)`: the tool's standard output (informational, typically
    ///   empty)
    /// - `Err(Error::NameServer)`: the batch could not be applied; the
    ///   message carries the tool's diagnostic
    async fn apply(&self, batch: &DirectiveBatch) -> Result<String>;

    /// Name of the updater (for logging/debugging)
    fn updater_name(&self) -> &'static str;
}
