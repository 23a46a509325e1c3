use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Storage error: {0}")]
    StorageError(String),

    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    #[error("Upstream timeout waiting for {server}")]
    UpstreamTimeout { server: String },

    #[error("No address found for {0}")]
    NoAddressFound(String),

    #[error("Invalid domain name: {0}")]
    InvalidDomain(String),

    #[error("Invalid IP address: {0}")]
    InvalidIpAddress(String),

    #[error("Domain already cached: {0}")]
    DuplicateKey(String),
}

impl DomainError {
    /// Short label for log fields.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StorageError(_) => "storage",
            Self::UpstreamUnavailable(_) => "upstream_unavailable",
            Self::UpstreamTimeout { .. } => "upstream_timeout",
            Self::NoAddressFound(_) => "no_address",
            Self::InvalidDomain(_) => "invalid_domain",
            Self::InvalidIpAddress(_) => "invalid_ip",
            Self::DuplicateKey(_) => "duplicate_key",
        }
    }
}
