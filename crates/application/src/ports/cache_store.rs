use async_trait::async_trait;
use dnstoy_domain::{CacheEntry, DomainError};

/// Durable domain → address mapping with a per-domain query counter.
///
/// Every `domain` argument is expected in normalized form
/// (see [`dnstoy_domain::DnsQuestion::normalize_name`]).
#[async_trait]
pub trait CacheStore: Send + Sync {
    /// Exact-match lookup. `Ok(None)` is a miss, not an error.
    async fn get(&self, domain: &str) -> Result<Option<CacheEntry>, DomainError>;

    /// Inserts a fresh entry with `query_count = 0`.
    ///
    /// Fails with [`DomainError::DuplicateKey`] when the domain is already
    /// present.
    async fn put(&self, domain: &str, address: &str) -> Result<(), DomainError>;

    /// Increments the counter of an existing entry and returns `true`, or
    /// inserts `(domain, address, 0)` and returns `false`.
    ///
    /// Atomic: of N concurrent first callers for the same domain exactly one
    /// observes `false`.
    async fn increment_and_check(&self, domain: &str, address: &str) -> Result<bool, DomainError>;

    /// All entries in storage order.
    async fn dump(&self) -> Result<Vec<CacheEntry>, DomainError>;

    async fn count(&self) -> Result<u64, DomainError>;
}
