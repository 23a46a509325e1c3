mod add_entry;
mod count_entries;
mod dump_cache;

pub use add_entry::AddCacheEntryUseCase;
pub use count_entries::CountCacheEntriesUseCase;
pub use dump_cache::DumpCacheUseCase;
