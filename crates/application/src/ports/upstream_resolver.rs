use async_trait::async_trait;
use dnstoy_domain::DomainError;
use std::net::Ipv4Addr;

#[async_trait]
pub trait UpstreamResolver: Send + Sync {
    /// First IPv4 address for `domain`. Bounded by the adapter's timeout.
    async fn resolve(&self, domain: &str) -> Result<Ipv4Addr, DomainError>;

    /// Where answers come from, for logs.
    fn describe(&self) -> String;
}
