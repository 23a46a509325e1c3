use crate::ports::CacheStore;
use dnstoy_domain::{CacheEntry, DomainError};
use std::sync::Arc;

pub struct DumpCacheUseCase {
    cache: Arc<dyn CacheStore>,
}

impl DumpCacheUseCase {
    pub fn new(cache: Arc<dyn CacheStore>) -> Self {
        Self { cache }
    }

    pub async fn execute(&self) -> Result<Vec<CacheEntry>, DomainError> {
        self.cache.dump().await
    }
}
