use dnstoy_domain::DatabaseConfig;
use dnstoy_infrastructure::database::{create_read_pool, create_write_pool};
use sqlx::SqlitePool;
use tracing::{error, info};

pub async fn init_database(cfg: &DatabaseConfig) -> anyhow::Result<(SqlitePool, SqlitePool)> {
    let database_url = cfg.url();
    info!(url = %database_url, "Initializing database");

    let write_pool = create_write_pool(&database_url, cfg).await.map_err(|e| {
        error!(error = %e, "Failed to initialize write pool");
        anyhow::anyhow!(e)
    })?;

    let read_pool = create_read_pool(&database_url, cfg).await.map_err(|e| {
        error!(error = %e, "Failed to initialize read pool");
        anyhow::anyhow!(e)
    })?;

    info!(
        write_pool_max = cfg.write_pool_max_connections,
        read_pool_max = cfg.read_pool_max_connections,
        "Database ready"
    );

    Ok((write_pool, read_pool))
}
