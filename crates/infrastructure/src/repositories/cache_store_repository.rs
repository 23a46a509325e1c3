//! `resolutions` table backed [`CacheStore`].
//!
//! Mutations go through the write pool; `dump` and `count` read through a
//! separate pool so an operator snapshot never holds up query handling.

use async_trait::async_trait;
use dnstoy_application::ports::CacheStore;
use dnstoy_domain::{CacheEntry, DomainError};
use sqlx::{Row, SqlitePool};
use tracing::{debug, error};

pub struct SqliteCacheStore {
    write_pool: SqlitePool,
    read_pool: SqlitePool,
}

impl SqliteCacheStore {
    pub fn new(write_pool: SqlitePool, read_pool: SqlitePool) -> Self {
        Self {
            write_pool,
            read_pool,
        }
    }

    /// Single pool for both paths. Required for `sqlite::memory:` databases,
    /// where every connection sees its own private database.
    pub fn with_single_pool(pool: SqlitePool) -> Self {
        Self::new(pool.clone(), pool)
    }
}

fn storage_error(operation: &'static str, domain: &str, e: sqlx::Error) -> DomainError {
    error!(operation, domain = %domain, error = %e, "Cache storage error");
    DomainError::StorageError(format!("{} failed: {}", operation, e))
}

#[async_trait]
impl CacheStore for SqliteCacheStore {
    async fn get(&self, domain: &str) -> Result<Option<CacheEntry>, DomainError> {
        let row = sqlx::query("SELECT domain, ip, query_count FROM resolutions WHERE domain = ?")
            .bind(domain)
            .fetch_optional(&self.write_pool)
            .await
            .map_err(|e| storage_error("get", domain, e))?;

        Ok(row.map(|row| {
            CacheEntry::new(
                row.get::<String, _>("domain"),
                row.get::<Option<String>, _>("ip").unwrap_or_default(),
                row.get::<Option<i64>, _>("query_count").unwrap_or(0).max(0) as u64,
            )
        }))
    }

    async fn put(&self, domain: &str, address: &str) -> Result<(), DomainError> {
        let result = sqlx::query(
            "INSERT INTO resolutions (domain, ip, query_count) VALUES (?, ?, 0)",
        )
        .bind(domain)
        .bind(address)
        .execute(&self.write_pool)
        .await;

        match result {
            Ok(_) => {
                debug!(domain = %domain, address = %address, "Cache entry inserted");
                Ok(())
            }
            Err(sqlx::Error::Database(db_err)) if db_err.is_unique_violation() => {
                Err(DomainError::DuplicateKey(domain.to_string()))
            }
            Err(e) => Err(storage_error("put", domain, e)),
        }
    }

    async fn increment_and_check(&self, domain: &str, address: &str) -> Result<bool, DomainError> {
        let query_count: i64 = sqlx::query_scalar(
            "INSERT INTO resolutions (domain, ip, query_count) VALUES (?, ?, 0) \
             ON CONFLICT(domain) DO UPDATE SET query_count = COALESCE(query_count, 0) + 1 \
             RETURNING query_count",
        )
        .bind(domain)
        .bind(address)
        .fetch_one(&self.write_pool)
        .await
        .map_err(|e| storage_error("increment_and_check", domain, e))?;

        let existed = query_count > 0;
        debug!(domain = %domain, query_count, existed, "Cache entry counted");
        Ok(existed)
    }

    async fn dump(&self) -> Result<Vec<CacheEntry>, DomainError> {
        let rows =
            sqlx::query("SELECT domain, ip, query_count FROM resolutions ORDER BY rowid")
                .fetch_all(&self.read_pool)
                .await
                .map_err(|e| storage_error("dump", "*", e))?;

        Ok(rows
            .into_iter()
            .map(|row| {
                CacheEntry::new(
                    row.get::<String, _>("domain"),
                    row.get::<Option<String>, _>("ip").unwrap_or_default(),
                    row.get::<Option<i64>, _>("query_count").unwrap_or(0).max(0) as u64,
                )
            })
            .collect())
    }

    async fn count(&self) -> Result<u64, DomainError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM resolutions")
            .fetch_one(&self.read_pool)
            .await
            .map_err(|e| storage_error("count", "*", e))?;
        Ok(count.max(0) as u64)
    }
}
