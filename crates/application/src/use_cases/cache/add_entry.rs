use crate::ports::CacheStore;
use dnstoy_domain::{validate_domain, CacheEntry, DnsQuestion, DomainError};
use std::net::IpAddr;
use std::sync::Arc;
use tracing::info;

/// Operator-driven insert that bypasses upstream resolution.
pub struct AddCacheEntryUseCase {
    cache: Arc<dyn CacheStore>,
}

impl AddCacheEntryUseCase {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self, domain: &str, address: &str) -> Result<CacheEntry, DomainError> {
        let domain = DnsQuestion::normalize_name(domain);
        validate_domain(&domain)?;

        let ip: IpAddr = address
            .trim()
            .parse()
            .map_err(|_| DomainError::InvalidIpAddress(address.to_string()))?;
        let address = ip.to_string();

        self.cache.put(&domain, &address).await?;
        info!(domain = %domain, address = %address, "Cache entry added by operator");

        Ok(CacheEntry::new(domain, address, 0))
    }
}
