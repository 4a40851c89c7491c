use crate::config::DatabaseConfig;
use crate::error::AppResult;
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};

pub async fn create_pool(config: &DatabaseConfig) -> AppResult<DatabaseConnection> {
    let mut options = ConnectOptions::new(config.url.clone());
    options.sqlx_logging(false);
    let pool = Database::connect(options).await?;
    Ok(pool)
}

pub async fn run_migrations(pool: &DatabaseConnection) -> AppResult<()> {
    Migrator::up(pool, None).await?;
    Ok(())
}

/// In-memory database for tests. A single connection keeps every query on
/// the same SQLite memory instance.
#[cfg(test)]
pub async fn test_pool() -> DatabaseConnection {
    let mut options = ConnectOptions::new("sqlite::memory:".to_string());
    options.max_connections(1).sqlx_logging(false);
    let pool = Database::connect(options)
        .await
        .expect("in-memory sqlite connect");
    Migrator::up(&pool, None).await.expect("migrations");
    pool
}
