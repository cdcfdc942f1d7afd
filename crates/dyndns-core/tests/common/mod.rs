//! Test doubles and common utilities for orchestration contract tests
//!
//! The fakes here record directive batches instead of spawning the update
//! tool, so orchestration policy can be verified without a name server.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use dyndns_core::batch::DirectiveBatch;
use dyndns_core::error::{Error, Result};
use dyndns_core::traits::ZoneUpdater;
use dyndns_core::UpdateConfig;

/// A zone updater that records batches and can be scripted to fail
pub struct MockZoneUpdater {
    /// Call counter for apply()
    apply_call_count: AtomicUsize,
    /// Every batch that was applied, in order
    applied: Mutex<Vec<DirectiveBatch>>,
    /// Domains whose batches fail, mapped to the simulated error-stream text
    fail_on: Mutex<HashMap<String, String>>,
    /// Simulated standard output returned on success
    output: String,
}

impl MockZoneUpdater {
    pub fn new() -> Self {
        Self {
            apply_call_count: AtomicUsize::new(0),
            applied: Mutex::new(Vec::new()),
            fail_on: Mutex::new(HashMap::new()),
            output: String::new(),
        }
    }

    /// Create a mock whose successful applies return `output`
    pub fn with_output(output: impl Into<String>) -> Self {
        Self {
            output: output.into(),
            ..Self::new()
        }
    }

    /// Script batches targeting `domain` to fail with `detail`
    pub fn fail_domain(&self, domain: impl Into<String>, detail: impl Into<String>) {
        self.fail_on
            .lock()
            .unwrap()
            .insert(domain.into(), detail.into());
    }

    /// Get the number of times apply() was called
    pub fn apply_call_count(&self) -> usize {
        self.apply_call_count.load(Ordering::SeqCst)
    }

    /// The batches that were applied, in order
    pub fn applied_batches(&self) -> Vec<DirectiveBatch> {
        self.applied.lock().unwrap().clone()
    }

    /// How many applied batches targeted `domain`
    pub fn attempts_for(&self, domain: &str) -> usize {
        self.applied
            .lock()
            .unwrap()
            .iter()
            .filter(|b| target_domain(b) == domain)
            .count()
    }
}

#[async_trait::async_trait]
impl ZoneUpdater for MockZoneUpdater {
    async fn apply(&self, batch: &DirectiveBatch) -> Result<String> {
        self.apply_call_count.fetch_add(1, Ordering::SeqCst);
        self.applied.lock().unwrap().push(batch.clone());

        let domain = target_domain(batch);
        if let Some(detail) = self.fail_on.lock().unwrap().get(&domain) {
            return Err(Error::name_server(detail.clone()));
        }

        Ok(self.output.clone())
    }

    fn updater_name(&self) -> &'static str {
        "mock"
    }
}

/// Extract the domain a batch targets from its forward delete directive
pub fn target_domain(batch: &DirectiveBatch) -> String {
    batch.directives()[1]
        .split_whitespace()
        .nth(2)
        .expect("forward delete directive has a domain")
        .to_string()
}

/// Helper to create a minimal UpdateConfig for testing
pub fn test_config() -> UpdateConfig {
    serde_json::from_str(
        r#"{
            "server": "ns1.example.org",
            "zone": "dyndns.example.org",
            "record_ttl": 300,
            "nsupdate_path": "/usr/bin/nsupdate",
            "shared_secret": "s3cret",
            "nsupdate_timeout_secs": 30
        }"#,
    )
    .unwrap()
}
