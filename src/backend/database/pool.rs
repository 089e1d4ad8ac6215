/**
 * Database Pool
 *
 * This module owns the bounded connection pool and the per-session settings
 * applied to every connection handed out as a lease.
 *
 * # Backends
 *
 * The pool uses sqlx's `Any` driver so the same queries run against:
 * - MySQL/MariaDB (`mysql://`, `mariadb://`) in deployment
 * - SQLite (`sqlite://`) for tests and local runs
 *
 * All queries use `?` placeholders, which both backends accept.
 *
 * # Backpressure
 *
 * The pool is bounded by `max_connections`. A caller that cannot get a
 * connection within `acquire_timeout` receives `LeaseError::Exhausted`
 * instead of waiting forever.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use chrono::{FixedOffset, Utc};
use sqlx::any::AnyPoolOptions;
use sqlx::{AnyConnection, AnyPool};

use crate::backend::database::lease::{Lease, LeaseError};
use crate::shared::{AppConfig, ConfigError};

/// Database dialect behind a connection URL
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Backend {
    MySql,
    Sqlite,
}

impl Backend {
    /// Detect the dialect from a connection URL scheme
    pub fn from_url(url: &str) -> Result<Self, ConfigError> {
        if url.starts_with("sqlite:") {
            Ok(Self::Sqlite)
        } else if url.starts_with("mysql:") || url.starts_with("mariadb:") {
            Ok(Self::MySql)
        } else {
            Err(ConfigError::InvalidUrl(url.to_string()))
        }
    }

    /// Id generated by the most recent INSERT on `conn`
    ///
    /// The `Any` driver does not report the rowid for SQLite, so the id is
    /// always read back on the connection that ran the insert.
    pub async fn inserted_id(&self, conn: &mut AnyConnection) -> Result<i64, sqlx::Error> {
        let query = match self {
            Self::MySql => "SELECT CAST(LAST_INSERT_ID() AS SIGNED)",
            Self::Sqlite => "SELECT last_insert_rowid()",
        };
        let (id,): (i64,) = sqlx::query_as(query).fetch_one(&mut *conn).await?;
        Ok(id)
    }
}

/// Settings applied to a connection each time it is leased
#[derive(Debug, Clone, Copy)]
pub struct SessionSettings {
    backend: Backend,
    time_zone: FixedOffset,
}

impl SessionSettings {
    pub fn new(backend: Backend, time_zone: FixedOffset) -> Self {
        Self { backend, time_zone }
    }

    pub fn backend(&self) -> Backend {
        self.backend
    }

    /// Configure a freshly leased connection
    ///
    /// MySQL sessions get strict SQL mode and the configured time zone.
    /// SQLite connections get foreign key enforcement.
    pub async fn apply(&self, conn: &mut AnyConnection) -> Result<(), sqlx::Error> {
        match self.backend {
            Backend::MySql => {
                sqlx::query("SET SESSION sql_mode = 'TRADITIONAL'")
                    .execute(&mut *conn)
                    .await?;
                sqlx::query("SET SESSION time_zone = ?")
                    .bind(self.time_zone.to_string())
                    .execute(&mut *conn)
                    .await?;
            }
            Backend::Sqlite => {
                sqlx::query("PRAGMA foreign_keys = ON")
                    .execute(&mut *conn)
                    .await?;
            }
        }
        Ok(())
    }

    /// Current wall-clock time in the session zone, formatted for a DATETIME column
    pub fn local_timestamp(&self) -> String {
        Utc::now()
            .with_timezone(&self.time_zone)
            .format("%Y-%m-%d %H:%M:%S")
            .to_string()
    }
}

/// Bounded pool that hands out counted leases
#[derive(Debug, Clone)]
pub struct DbPool {
    pool: AnyPool,
    settings: SessionSettings,
    outstanding: Arc<AtomicUsize>,
}

impl DbPool {
    /// Create the pool described by the configuration
    ///
    /// Connections are opened lazily up to `max_connections`; one is opened
    /// here so a bad URL fails at startup rather than on the first request.
    ///
    /// # Errors
    /// Returns the sqlx error when the database cannot be reached
    pub async fn connect(config: &AppConfig) -> Result<Self, sqlx::Error> {
        sqlx::any::install_default_drivers();

        let backend = Backend::from_url(&config.database_url)
            .map_err(|e| sqlx::Error::Configuration(Box::new(e)))?;

        let pool = AnyPoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect(&config.database_url)
            .await?;

        tracing::info!(
            "Database pool ready ({:?}, max {} connections)",
            backend,
            config.max_connections
        );

        Ok(Self {
            pool,
            settings: SessionSettings::new(backend, config.session_time_zone),
            outstanding: Arc::new(AtomicUsize::new(0)),
        })
    }

    /// Lease one connection for the caller
    ///
    /// The connection is configured with [`SessionSettings::apply`] before it
    /// is returned. If configuration fails the lease is released here.
    ///
    /// # Errors
    /// - `LeaseError::Exhausted` when no connection frees up within the acquire timeout
    /// - `LeaseError::Unavailable` when the database cannot be reached
    /// - `LeaseError::Configure` when session setup fails
    pub async fn acquire(&self) -> Result<Lease, LeaseError> {
        let conn = match self.pool.acquire().await {
            Ok(conn) => conn,
            Err(sqlx::Error::PoolTimedOut) => return Err(LeaseError::Exhausted),
            Err(e) => return Err(LeaseError::Unavailable(e)),
        };

        let mut lease = Lease::new(conn, Arc::clone(&self.outstanding), self.settings);
        if let Err(e) = self.settings.apply(lease.connection()?).await {
            lease.release();
            return Err(LeaseError::Configure(e));
        }

        Ok(lease)
    }

    /// Number of leases currently checked out
    pub fn outstanding(&self) -> usize {
        self.outstanding.load(Ordering::SeqCst)
    }

    pub fn settings(&self) -> &SessionSettings {
        &self.settings
    }

    /// Close every connection; later acquires fail with `Unavailable`
    pub async fn close(&self) {
        self.pool.close().await;
    }
}
