use sea_orm::{Database, DatabaseConnection, DbErr};
use sea_orm_migration::MigratorTrait;
use tracing::info;

use super::PostgresConfig;
use crate::common::{RetryConfig, retry_with_backoff};

/// Open a connection pool using `config`.
pub async fn connect_from_config(config: PostgresConfig) -> Result<DatabaseConnection, DbErr> {
    let db = Database::connect(config.into_connect_options()).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Open a connection pool, retrying with exponential backoff.
///
/// Useful at startup when the database container may still be booting.
/// `None` uses [`RetryConfig::default`].
pub async fn connect_from_config_with_retry(
    config: PostgresConfig,
    retry_config: Option<RetryConfig>,
) -> Result<DatabaseConnection, DbErr> {
    let retry_config = retry_config.unwrap_or_default();
    let options = config.into_connect_options();

    let db = retry_with_backoff(|| Database::connect(options.clone()), &retry_config).await?;
    info!("Connected to PostgreSQL");
    Ok(db)
}

/// Apply all pending migrations of `M`.
pub async fn run_migrations<M: MigratorTrait>(
    db: &DatabaseConnection,
    app_name: &str,
) -> Result<(), DbErr> {
    info!(app = app_name, "Running database migrations");
    M::up(db, None).await?;
    info!(app = app_name, "Migrations completed");
    Ok(())
}
