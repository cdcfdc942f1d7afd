//! Update request validation and planning
//!
//! Both wire dialects are normalized into a [`RawUpdate`] before reaching
//! this module. [`validate`] authenticates the caller, resolves the target
//! domains, classifies the address family, and derives the reverse-lookup
//! name, producing an [`UpdatePlan`] that the engine can hand to the
//! transaction stage. Invalid input is reported as a typed error before any
//! subprocess is spawned.

use std::net::IpAddr;

use crate::config::UpdateConfig;
use crate::error::{Error, Result};

/// The three raw strings a dialect extractor pulls out of an HTTP request
///
/// Which request fields these come from differs per dialect (query
/// parameters, Basic-Auth password); by the time they arrive here the
/// distinction no longer matters.
#[derive(Debug, Clone, Default)]
pub struct RawUpdate {
    /// Candidate IP address literal
    pub address: String,
    /// Candidate shared secret
    pub secret: String,
    /// Candidate hostname field, possibly naming several comma-separated hosts
    pub hostnames: String,
}

/// Address family of a validated update request
///
/// Determines the forward record type and the reverse-name construction
/// scheme.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddressKind {
    V4,
    V6,
}

impl AddressKind {
    /// The DNS record type published for this address family
    pub fn record_type(&self) -> &'static str {
        match self {
            AddressKind::V4 => "A",
            AddressKind::V6 => "AAAA",
        }
    }
}

/// A fully validated update request
///
/// A plan is only ever constructed valid: the caller authenticated, at least
/// one syntactically valid domain resolved, and the address parsed into a
/// known family. It is request-scoped and discarded once the response has
/// been rendered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UpdatePlan {
    /// Ordered, distinct hostnames to update
    pub domains: Vec<String>,
    /// The literal address string to publish, exactly as the client sent it
    pub address: String,
    /// Address family, deciding A vs AAAA
    pub kind: AddressKind,
    /// Fully qualified in-addr.arpa / ip6.arpa lookup name for `address`
    pub reverse_name: String,
    /// The raw hostname field as requested, used in the success summary
    pub hostname_field: String,
}

impl UpdatePlan {
    /// Human-readable summary of a completed update
    pub fn summary(&self) -> String {
        format!(
            "Updated {} record for {} to IP address {} ({})",
            self.kind.record_type(),
            self.hostname_field,
            self.address,
            self.reverse_name
        )
    }
}

/// Validate a raw update request against the configuration
///
/// Checks run in order: authentication, domain resolution, address
/// classification. The first failing check decides the error; nothing past
/// it is evaluated.
pub fn validate(raw: &RawUpdate, config: &UpdateConfig) -> Result<UpdatePlan> {
    if raw.secret.is_empty() || raw.secret != config.shared_secret {
        return Err(Error::AuthenticationFailed);
    }

    let mut domains: Vec<String> = Vec::new();
    for domain in raw.hostnames.split(',').map(str::trim).filter(|s| !s.is_empty()) {
        if !domains.iter().any(|seen| seen == domain) {
            domains.push(domain.to_string());
        }
    }

    if domains.is_empty() || !domains.iter().all(|d| is_valid_hostname(d)) {
        return Err(Error::DomainNotSet);
    }

    let parsed: IpAddr = raw
        .address
        .parse()
        .map_err(|_| Error::invalid_address(&raw.address))?;

    let kind = match parsed {
        IpAddr::V4(_) => AddressKind::V4,
        IpAddr::V6(_) => AddressKind::V6,
    };

    Ok(UpdatePlan {
        domains,
        address: raw.address.clone(),
        kind,
        reverse_name: reverse_name(&parsed),
        hostname_field: raw.hostnames.clone(),
    })
}

/// Derive the reverse-lookup name for an address
///
/// IPv4 addresses reverse their octets under `in-addr.arpa`; IPv6 addresses
/// expand to 32 reversed nibble labels under `ip6.arpa`.
pub fn reverse_name(address: &IpAddr) -> String {
    match address {
        IpAddr::V4(v4) => {
            let o = v4.octets();
            format!("{}.{}.{}.{}.in-addr.arpa", o[3], o[2], o[1], o[0])
        }
        IpAddr::V6(v6) => {
            let mut labels = Vec::with_capacity(32);
            for byte in v6.octets().iter().rev() {
                labels.push(format!("{:x}", byte & 0x0f));
                labels.push(format!("{:x}", byte >> 4));
            }
            format!("{}.ip6.arpa", labels.join("."))
        }
    }
}

/// Basic RFC 1035 hostname validation
///
/// Catches common garbage (empty labels, over-long names, stray characters)
/// before it is interpolated into update directives.
fn is_valid_hostname(domain: &str) -> bool {
    if domain.is_empty() || domain.len() > 253 {
        return false;
    }

    domain.split('.').all(|label| {
        !label.is_empty()
            && label.len() <= 63
            && label.chars().all(|c| c.is_ascii_alphanumeric() || c == '-')
            && !label.starts_with('-')
            && !label.ends_with('-')
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config() -> UpdateConfig {
        serde_json::from_str(
            r#"{"server": "127.0.0.1", "zone": "dyndns.example.org", "shared_secret": "s3cret"}"#,
        )
        .unwrap()
    }

    fn raw(address: &str, secret: &str, hostnames: &str) -> RawUpdate {
        RawUpdate {
            address: address.to_string(),
            secret: secret.to_string(),
            hostnames: hostnames.to_string(),
        }
    }

    #[test]
    fn matching_secret_is_accepted() {
        let plan = validate(&raw("203.0.113.5", "s3cret", "host.example.org"), &config());
        assert!(plan.is_ok());
    }

    #[test]
    fn empty_secret_is_rejected() {
        let err = validate(&raw("203.0.113.5", "", "host.example.org"), &config());
        assert_eq!(err, Err(Error::AuthenticationFailed));
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let err = validate(&raw("203.0.113.5", "nope", "host.example.org"), &config());
        assert_eq!(err, Err(Error::AuthenticationFailed));
    }

    #[test]
    fn empty_hostname_field_is_domain_not_set() {
        // A valid address and secret do not rescue a missing hostname.
        let err = validate(&raw("203.0.113.5", "s3cret", ""), &config());
        assert_eq!(err, Err(Error::DomainNotSet));
    }

    #[test]
    fn malformed_hostname_is_domain_not_set() {
        let err = validate(&raw("203.0.113.5", "s3cret", "host..example.org"), &config());
        assert_eq!(err, Err(Error::DomainNotSet));

        let err = validate(&raw("203.0.113.5", "s3cret", "-host.example.org"), &config());
        assert_eq!(err, Err(Error::DomainNotSet));
    }

    #[test]
    fn hostname_field_splits_on_commas() {
        let plan = validate(
            &raw("203.0.113.5", "s3cret", "a.example.org, b.example.org"),
            &config(),
        )
        .unwrap();

        assert_eq!(plan.domains, vec!["a.example.org", "b.example.org"]);
        assert_eq!(plan.hostname_field, "a.example.org, b.example.org");
    }

    #[test]
    fn repeated_hostnames_resolve_once() {
        let plan = validate(
            &raw(
                "203.0.113.5",
                "s3cret",
                "a.example.org,b.example.org,a.example.org",
            ),
            &config(),
        )
        .unwrap();

        assert_eq!(plan.domains, vec!["a.example.org", "b.example.org"]);
    }

    #[test]
    fn ipv4_address_is_classified_a() {
        let plan = validate(&raw("203.0.113.5", "s3cret", "host.example.org"), &config()).unwrap();
        assert_eq!(plan.kind, AddressKind::V4);
        assert_eq!(plan.kind.record_type(), "A");
    }

    #[test]
    fn ipv6_address_is_classified_aaaa() {
        let plan = validate(
            &raw("2001:db8::17", "s3cret", "host.example.org"),
            &config(),
        )
        .unwrap();
        assert_eq!(plan.kind, AddressKind::V6);
        assert_eq!(plan.kind.record_type(), "AAAA");
    }

    #[test]
    fn unparseable_address_is_invalid() {
        let err = validate(&raw("not-an-ip", "s3cret", "host.example.org"), &config());
        assert_eq!(err, Err(Error::invalid_address("not-an-ip")));
    }

    #[test]
    fn ipv4_reverse_name_reverses_octets() {
        let addr: IpAddr = "203.0.113.5".parse().unwrap();
        assert_eq!(reverse_name(&addr), "5.113.0.203.in-addr.arpa");
        // Derivation is a pure function of its input.
        assert_eq!(reverse_name(&addr), reverse_name(&addr));
    }

    #[test]
    fn ipv6_reverse_name_has_32_nibble_labels() {
        let addr: IpAddr = "2001:db8::567:89ab".parse().unwrap();
        let name = reverse_name(&addr);

        let suffix = ".ip6.arpa";
        assert!(name.ends_with(suffix));
        let labels: Vec<&str> = name[..name.len() - suffix.len()].split('.').collect();
        assert_eq!(labels.len(), 32);
        assert!(labels.iter().all(|l| l.len() == 1));
        assert_eq!(
            name,
            "b.a.9.8.7.6.5.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.0.8.b.d.0.1.0.0.2.ip6.arpa"
        );
    }

    #[test]
    fn published_address_keeps_client_spelling() {
        // The literal is republished as sent, not re-rendered from the parse.
        let plan = validate(
            &raw("2001:DB8:0::17", "s3cret", "host.example.org"),
            &config(),
        )
        .unwrap();
        assert_eq!(plan.address, "2001:DB8:0::17");
    }

    #[test]
    fn summary_names_type_field_address_and_reverse_name() {
        let plan = validate(&raw("203.0.113.5", "s3cret", "host.example.org"), &config()).unwrap();
        assert_eq!(
            plan.summary(),
            "Updated A record for host.example.org to IP address 203.0.113.5 (5.113.0.203.in-addr.arpa)"
        );
    }
}
