//! Zone directive batch construction
//!
//! Renders the exact directive sequence one `nsupdate` invocation needs to
//! replace the forward and reverse records for a single domain. The
//! underlying zone-update protocol has no replace primitive, so each record
//! is deleted and re-added inside one transaction; that also avoids
//! duplicate records when a host moves between address families.
//!
//! This is a pure renderer. It performs no I/O, which keeps formatting rules
//! (TTL, zone suffixing, directive order) unit-testable without a name
//! server.

use crate::config::UpdateConfig;
use crate::plan::AddressKind;

/// An ordered sequence of zone-update directives
///
/// Scoped to the lifetime of one update tool invocation; never persisted
/// beyond it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DirectiveBatch {
    directives: Vec<String>,
}

impl DirectiveBatch {
    /// Build the directive batch for one domain
    ///
    /// Emits, in this order: server selection, forward delete, forward add,
    /// reverse delete, reverse add, commit. The reverse pointer targets
    /// `<domain>.<zone>` under the configured base zone.
    pub fn build(
        domain: &str,
        address: &str,
        kind: AddressKind,
        reverse_name: &str,
        config: &UpdateConfig,
    ) -> Self {
        let record_type = kind.record_type();
        let ttl = config.record_ttl;

        let directives = vec![
            format!("server {}", config.server),
            format!("update delete {} {}", domain, record_type),
            format!("update add {} {} {} {}", domain, ttl, record_type, address),
            format!("update delete {} IN PTR", reverse_name),
            format!(
                "update add {} {} IN PTR {}.{}",
                reverse_name, ttl, domain, config.zone
            ),
            "send".to_string(),
        ];

        Self { directives }
    }

    /// The directives in execution order
    pub fn directives(&self) -> &[String] {
        &self.directives
    }

    /// Serialize the batch, one directive per line
    pub fn render(&self) -> String {
        let mut out = String::with_capacity(self.directives.iter().map(|d| d.len() + 1).sum());
        for directive in &self.directives {
            out.push_str(directive);
            out.push('\n');
        }
        out
    }
}
