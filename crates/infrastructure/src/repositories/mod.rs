pub mod cache_store_repository;

pub use cache_store_repository::SqliteCacheStore;
