//! Error types for the dyndns update service
//!
//! Every failure a request can produce is one of the variants below. All of
//! them are terminal for the current request; nothing is retried by the core.

use thiserror::Error;

/// Result type alias for update operations
pub type Result<T> = std::result::Result<T, Error>;

/// Core error type for the update service
///
/// The first four variants are request-level failures and map directly onto
/// the dialect responses rendered by the daemon. `Config` only occurs during
/// startup validation and never reaches a client.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Shared secret missing or not matching the configured one
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Hostname field missing, empty, or not a valid hostname
    #[error("domain not set")]
    DomainNotSet,

    /// Address field did not parse as an IPv4 or IPv6 address
    #[error("invalid address: {0}")]
    InvalidAddress(String),

    /// The external update tool failed: transient-file I/O, spawn failure,
    /// timeout, or a non-zero exit with captured diagnostics
    #[error("name server error: {0}")]
    NameServer(String),

    /// Configuration errors
    #[error("configuration error: {0}")]
    Config(String),
}

impl Error {
    /// Create an invalid-address error
    pub fn invalid_address(addr: impl Into<String>) -> Self {
        Self::InvalidAddress(addr.into())
    }

    /// Create a name server error
    pub fn name_server(msg: impl Into<String>) -> Self {
        Self::NameServer(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
