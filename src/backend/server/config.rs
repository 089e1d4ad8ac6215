/**
 * Server Configuration
 *
 * Turns the process configuration into live resources at startup.
 *
 * # Error Handling
 *
 * Unlike request-time failures, every error here is fatal: the server does
 * not start without a reachable database and a usable schema.
 */

use thiserror::Error;

use crate::backend::database::{DbPool, SchemaError};
use crate::shared::{AppConfig, ConfigError};

/// Reasons the server cannot start
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),
    #[error("database connection failed: {0}")]
    Database(#[from] sqlx::Error),
    #[error("schema bootstrap failed: {0}")]
    Schema(#[from] SchemaError),
    #[error("failed to bind listener: {0}")]
    Io(#[from] std::io::Error),
}

/// Connect the pool and make sure the tables exist
///
/// # Errors
///
/// `StartupError::Database` if the pool cannot connect,
/// `StartupError::Schema` if the tables cannot be created
pub async fn load_database(config: &AppConfig) -> Result<DbPool, StartupError> {
    tracing::info!("Connecting to database...");

    let pool = DbPool::connect(config).await.map_err(|e| {
        tracing::error!("Failed to create database connection pool: {:?}", e);
        e
    })?;

    tracing::info!("Ensuring database schema...");
    pool.ensure_schema().await.map_err(|e| {
        tracing::error!("Failed to bootstrap schema: {}", e);
        e
    })?;

    Ok(pool)
}
