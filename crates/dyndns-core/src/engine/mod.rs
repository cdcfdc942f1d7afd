//! Per-request update orchestration
//!
//! The engine turns one normalized request into zone transactions:
//!
//! 1. Validate (authentication, domains, address family, reverse name)
//! 2. For each resolved domain, in order: build its directive batch and
//!    apply it through the [`ZoneUpdater`]
//! 3. Stop at the first failure and report it as the whole request's
//!    outcome; only if every domain succeeds is the request a success
//!
//! Fail-fast, no rollback: a multi-domain request can leave earlier domains
//! updated when a later one fails. Consistency across domains is not
//! guaranteed by this engine; each applied batch is atomic only with respect
//! to the update tool's own transaction.
//!
//! The engine holds no cross-request state and imposes no concurrency
//! control; overlapping requests for the same domain race at the update
//! tool.

use std::sync::Arc;

use tracing::{debug, error, info, warn};

use crate::batch::DirectiveBatch;
use crate::config::UpdateConfig;
use crate::error::{Error, Result};
use crate::plan::{validate, RawUpdate, UpdatePlan};
use crate::traits::ZoneUpdater;

/// Result of attempting one update request
///
/// Stateless, produced fresh per request; owns no external resources.
#[derive(Debug, Clone)]
pub enum UpdateOutcome {
    /// Every resolved domain was updated
    Success {
        /// The plan that was carried out
        plan: UpdatePlan,
    },
    /// Validation or a zone transaction failed
    Failure(Error),
}

impl UpdateOutcome {
    /// Whether the request succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, UpdateOutcome::Success { .. })
    }
}

/// Per-request update engine
///
/// Cheap to clone; holds the read-only configuration and the shared zone
/// updater. One [`process`][UpdateEngine::process] call handles one HTTP
/// request end to end.
#[derive(Clone)]
pub struct UpdateEngine {
    updater: Arc<dyn ZoneUpdater>,
    config: Arc<UpdateConfig>,
}

impl UpdateEngine {
    /// Create a new engine
    ///
    /// Validates the configuration so a misconfigured process fails at
    /// startup, not on the first request.
    pub fn new(updater: Arc<dyn ZoneUpdater>, config: UpdateConfig) -> Result<Self> {
        config.validate()?;

        Ok(Self {
            updater,
            config: Arc::new(config),
        })
    }

    /// The configuration the engine was built with
    pub fn config(&self) -> &UpdateConfig {
        &self.config
    }

    /// Process one normalized update request
    ///
    /// Validation failures are detected before any subprocess is spawned.
    /// Transaction failures abort the remaining per-domain loop immediately;
    /// already-updated domains are not rolled back.
    pub async fn process(&self, raw: RawUpdate) -> UpdateOutcome {
        let plan = match validate(&raw, &self.config) {
            Ok(plan) => plan,
            Err(err) => {
                warn!(hostnames = %raw.hostnames, error = %err, "update request rejected");
                return UpdateOutcome::Failure(err);
            }
        };

        for domain in &plan.domains {
            info!(
                domain = %domain,
                address = %plan.address,
                record_type = plan.kind.record_type(),
                "record update request"
            );

            let batch = DirectiveBatch::build(
                domain,
                &plan.address,
                plan.kind,
                &plan.reverse_name,
                &self.config,
            );

            match self.updater.apply(&batch).await {
                Ok(output) => {
                    if !output.trim().is_empty() {
                        debug!(domain = %domain, output = %output.trim(), "update tool output");
                    }
                }
                Err(err) => {
                    error!(
                        domain = %domain,
                        address = %plan.address,
                        record_type = plan.kind.record_type(),
                        error = %err,
                        "zone update failed"
                    );
                    return UpdateOutcome::Failure(err);
                }
            }
        }

        UpdateOutcome::Success { plan }
    }
}
