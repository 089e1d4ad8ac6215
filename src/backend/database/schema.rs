/**
 * Schema Bootstrap
 *
 * Creates the `users`, `entries` and `cars` tables when they do not exist.
 * Statements are written per dialect; everything else in the crate sticks to
 * SQL both dialects understand.
 *
 * # Column Conventions
 *
 * - ids are 64-bit auto-increment integers
 * - `created_at` is stamped by the server in the session time zone
 * - `deleted` is a 0/1 soft-delete flag; rows are never physically removed
 */

use thiserror::Error;

use crate::backend::database::lease::LeaseError;
use crate::backend::database::pool::{Backend, DbPool};

/// Failures while bootstrapping the schema
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error(transparent)]
    Lease(#[from] LeaseError),
    #[error("schema statement failed: {0}")]
    Statement(#[from] sqlx::Error),
}

/// Longest `users.username`
pub const USERNAME_MAX: usize = 255;
/// Longest `users.email`
pub const EMAIL_MAX: usize = 255;
/// Longest `entries.title`
pub const TITLE_MAX: usize = 255;
/// Longest `entries.content`
pub const CONTENT_MAX: usize = 65_535;
/// Longest `entries.mood`
pub const MOOD_MAX: usize = 64;
/// Longest `cars.make` and `cars.model`
pub const CAR_TEXT_MAX: usize = 255;

const MYSQL_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        username VARCHAR(255) NOT NULL UNIQUE,
        email VARCHAR(255) NULL,
        password_hash VARCHAR(255) NOT NULL,
        created_at DATETIME NOT NULL
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
    "CREATE TABLE IF NOT EXISTS entries (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        user_id BIGINT NOT NULL,
        title VARCHAR(255) NOT NULL,
        content MEDIUMTEXT NOT NULL,
        mood VARCHAR(64) NULL,
        created_at DATETIME NOT NULL,
        deleted TINYINT NOT NULL DEFAULT 0,
        INDEX idx_entries_user (user_id, deleted),
        CONSTRAINT fk_entries_user FOREIGN KEY (user_id) REFERENCES users(id)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
    "CREATE TABLE IF NOT EXISTS cars (
        id BIGINT NOT NULL AUTO_INCREMENT PRIMARY KEY,
        user_id BIGINT NOT NULL,
        make VARCHAR(255) NOT NULL,
        model VARCHAR(255) NOT NULL,
        year BIGINT NULL,
        created_at DATETIME NOT NULL,
        deleted TINYINT NOT NULL DEFAULT 0,
        INDEX idx_cars_user (user_id, deleted),
        CONSTRAINT fk_cars_user FOREIGN KEY (user_id) REFERENCES users(id)
    ) ENGINE=InnoDB DEFAULT CHARSET=utf8mb4",
];

const SQLITE_SCHEMA: &[&str] = &[
    "CREATE TABLE IF NOT EXISTS users (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        username TEXT NOT NULL UNIQUE,
        email TEXT,
        password_hash TEXT NOT NULL,
        created_at TEXT NOT NULL
    )",
    "CREATE TABLE IF NOT EXISTS entries (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        title TEXT NOT NULL,
        content TEXT NOT NULL,
        mood TEXT,
        created_at TEXT NOT NULL,
        deleted INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE INDEX IF NOT EXISTS idx_entries_user ON entries (user_id, deleted)",
    "CREATE TABLE IF NOT EXISTS cars (
        id INTEGER PRIMARY KEY AUTOINCREMENT,
        user_id INTEGER NOT NULL REFERENCES users(id),
        make TEXT NOT NULL,
        model TEXT NOT NULL,
        year INTEGER,
        created_at TEXT NOT NULL,
        deleted INTEGER NOT NULL DEFAULT 0
    )",
    "CREATE INDEX IF NOT EXISTS idx_cars_user ON cars (user_id, deleted)",
];

/// DDL statements for a dialect, in dependency order
pub fn statements(backend: Backend) -> &'static [&'static str] {
    match backend {
        Backend::MySql => MYSQL_SCHEMA,
        Backend::Sqlite => SQLITE_SCHEMA,
    }
}

impl DbPool {
    /// Create any missing tables
    ///
    /// Runs on a regular lease, so the same session settings apply as for
    /// request traffic. Safe to call on every startup.
    pub async fn ensure_schema(&self) -> Result<(), SchemaError> {
        let mut lease = self.acquire().await?;
        let conn = lease.connection()?;

        for statement in statements(self.settings().backend()) {
            sqlx::query(statement).execute(&mut *conn).await?;
        }

        tracing::info!("Database schema is up to date");
        Ok(())
    }
}
