use async_trait::async_trait;
use dnstoy_application::ports::UpstreamResolver;
use dnstoy_domain::{validate_domain, DomainError};
use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;
use tokio::net::lookup_host;
use tracing::debug;

/// Resolves through the operating system's resolver (`getaddrinfo`).
///
/// No server address to configure; the host's resolver settings decide where
/// the question goes.
pub struct SystemResolver {
    timeout: Duration,
}

impl SystemResolver {
    pub fn new(timeout: Duration) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl UpstreamResolver for SystemResolver {
    async fn resolve(&self, domain: &str) -> Result<Ipv4Addr, DomainError> {
        validate_domain(domain)?;

        // lookup_host needs a port; it plays no part in resolution.
        let target = format!("{}:0", domain);

        let addrs = match tokio::time::timeout(self.timeout, lookup_host(target)).await {
            Ok(Ok(addrs)) => addrs,
            Ok(Err(e)) => {
                debug!(domain = %domain, error = %e, "System resolver lookup failed");
                return Err(DomainError::NoAddressFound(format!("{} ({})", domain, e)));
            }
            Err(_) => {
                return Err(DomainError::UpstreamTimeout {
                    server: self.describe(),
                })
            }
        };

        addrs
            .filter_map(|addr| match addr.ip() {
                IpAddr::V4(v4) => Some(v4),
                IpAddr::V6(_) => None,
            })
            .next()
            .ok_or_else(|| DomainError::NoAddressFound(domain.to_string()))
    }

    fn describe(&self) -> String {
        "system".to_string()
    }
}
