use dnstoy_infrastructure::repositories::SqliteCacheStore;
use sqlx::SqlitePool;
use std::sync::Arc;

pub struct Repositories {
    pub cache: Arc<SqliteCacheStore>,
}

impl Repositories {
    pub fn new(write_pool: SqlitePool, read_pool: SqlitePool) -> Self {
        Self {
            cache: Arc::new(SqliteCacheStore::new(write_pool, read_pool)),
        }
    }
}
