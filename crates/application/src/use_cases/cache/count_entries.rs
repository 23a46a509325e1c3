use crate::ports::CacheStore;
use dnstoy_domain::DomainError;
use std::sync::Arc;

pub struct CountCacheEntriesUseCase {
    cache: Arc<dyn CacheStore>,
}

impl CountCacheEntriesUseCase {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self) -> Result<u64, DomainError> {
        self.cache.count().await
    }
}
