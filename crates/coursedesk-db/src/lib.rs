//! # Coursedesk DB
//!
//! Database pool, embedded migrations and store-error translation for the
//! Coursedesk API.
//!
//! # Example
//!
//! ```ignore
//! use coursedesk_db::{init_db_pool, run_migrations};
//!
//! let pool = init_db_pool(&config.database).await?;
//! run_migrations(&pool).await?;
//! ```

pub mod errors;

use std::time::Duration;

use sqlx::migrate::{MigrateError, Migrator};
use sqlx::postgres::PgPoolOptions;
use tracing::info;

use coursedesk_config::DatabaseConfig;

pub use errors::{constraints, map_db_error};
// Re-export PgPool for convenience
pub use sqlx::PgPool;

/// Migrations from the workspace `migrations/` directory, embedded at build time.
pub static MIGRATOR: Migrator = sqlx::migrate!("../../migrations");

/// Creates the PostgreSQL connection pool shared by all request handlers.
pub async fn init_db_pool(config: &DatabaseConfig) -> Result<PgPool, sqlx::Error> {
    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .acquire_timeout(Duration::from_secs(5))
        .connect(&config.url)
        .await?;

    info!(max_connections = config.max_connections, "Database pool ready");
    Ok(pool)
}

pub async fn run_migrations(pool: &PgPool) -> Result<(), MigrateError> {
    MIGRATOR.run(pool).await?;
    info!("Database migrations applied");
    Ok(())
}
