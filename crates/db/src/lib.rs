//! Database layer for counselhub.
//!
//! Entities, migrations and repositories, plus the ordered cleanup steps
//! used when a student is deactivated. Postgres and SQLite are both
//! supported; the schema avoids backend-specific column types.

pub mod cleanup;
pub mod entities;
pub mod migrations;
pub mod repositories;
pub mod test_utils;

use counselhub_common::{AppError, Config, config::DatabaseConfig};
use sea_orm::{ConnectOptions, ConnectionTrait, Database, DatabaseConnection};
use std::time::Duration;
use tracing::{info, log::LevelFilter};

/// Pool options for the configured database.
///
/// An in-memory SQLite database exists once per connection, so its pool is
/// pinned to a single connection.
#[must_use]
pub fn connect_options(config: &DatabaseConfig) -> ConnectOptions {
    let mut opt = ConnectOptions::new(&config.url);

    if config.url.starts_with("sqlite::memory:") {
        opt.max_connections(1).min_connections(1);
    } else {
        opt.max_connections(config.max_connections)
            .min_connections(config.min_connections.min(config.max_connections));
    }

    opt.connect_timeout(Duration::from_secs(10))
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .sqlx_logging(true)
        .sqlx_logging_level(LevelFilter::Debug);
    opt
}

/// Initialize database connection.
pub async fn init(config: &Config) -> Result<DatabaseConnection, AppError> {
    let db = Database::connect(connect_options(&config.database))
        .await
        .map_err(|e| AppError::Database(e.to_string()))?;

    info!(backend = ?db.get_database_backend(), "Database connected");
    Ok(db)
}

/// Run pending migrations.
pub async fn migrate(db: &DatabaseConnection) -> Result<(), AppError> {
    use sea_orm_migration::MigratorTrait;
    migrations::Migrator::up(db, None)
        .await
        .map_err(|e| AppError::Database(e.to_string()))
}
