use super::Repositories;
use dnstoy_application::use_cases::{
    AddCacheEntryUseCase, CountCacheEntriesUseCase, DumpCacheUseCase,
};
use std::sync::Arc;

/// Operator-facing use cases driven by the admin console.
pub struct UseCases {
    pub dump_cache: Arc<DumpCacheUseCase>,
    pub add_entry: Arc<AddCacheEntryUseCase>,
    pub count_entries: Arc<CountCacheEntriesUseCase>,
}

impl UseCases {
    pub fn new(repos: &Repositories) -> Self {
        Self {
            dump_cache: Arc::new(DumpCacheUseCase::new(repos.cache.clone())),
            add_entry: Arc::new(AddCacheEntryUseCase::new(repos.cache.clone())),
            count_entries: Arc::new(CountCacheEntriesUseCase::new(repos.cache.clone())),
        }
    }
}
