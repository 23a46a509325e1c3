use dnstoy_domain::config::DatabaseConfig;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::debug;

const CREATE_RESOLUTIONS_TABLE: &str = "CREATE TABLE IF NOT EXISTS resolutions \
     (domain TEXT PRIMARY KEY, ip TEXT, query_count INTEGER DEFAULT 0)";

fn connect_options(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqliteConnectOptions, sqlx::Error> {
    Ok(SqliteConnectOptions::from_str(database_url)?
        .busy_timeout(Duration::from_secs(cfg.busy_timeout_secs)))
}

/// Pool used for every mutation. Creates the database file and the schema.
pub async fn create_write_pool(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(cfg.write_pool_max_connections)
        .connect_with(
            connect_options(database_url, cfg)?
                .create_if_missing(true)
                .journal_mode(SqliteJournalMode::Wal),
        )
        .await?;

    ensure_schema(&pool).await?;
    Ok(pool)
}

/// Pool for snapshots. Must be created after [`create_write_pool`], which
/// switches the database to WAL so these readers never block the writer.
pub async fn create_read_pool(
    database_url: &str,
    cfg: &DatabaseConfig,
) -> Result<SqlitePool, sqlx::Error> {
    let options = connect_options(database_url, cfg)?.read_only(true);

    SqlitePoolOptions::new()
        .max_connections(cfg.read_pool_max_connections)
        .connect_with(options)
        .await
}

/// Idempotent; safe to run on every start.
pub async fn ensure_schema(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(CREATE_RESOLUTIONS_TABLE).execute(pool).await?;
    debug!("resolutions table ready");
    Ok(())
}
