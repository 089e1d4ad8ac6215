/**
 * Connection Lease
 *
 * A `Lease` is one pooled connection bound to one request.
 *
 * # Lifecycle
 *
 * ```text
 * UNLEASED --acquire--> LEASED --release--> RELEASED
 * ```
 *
 * `UNLEASED` is the absence of a lease. Releasing returns the connection to
 * the pool and decrements the outstanding count exactly once; later calls are
 * no-ops. Dropping an unreleased lease releases it, which covers early
 * returns, errors and unwinding panics.
 */

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use sqlx::AnyConnection;
use sqlx::pool::PoolConnection;
use sqlx::Any;
use thiserror::Error;

use crate::backend::database::pool::SessionSettings;

/// Observable state of a lease
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseState {
    Leased,
    Released,
}

/// Failures while obtaining or using a lease
#[derive(Debug, Error)]
pub enum LeaseError {
    /// No connection became free within the acquire timeout
    #[error("connection pool exhausted")]
    Exhausted,
    /// The database could not be reached
    #[error("database unavailable: {0}")]
    Unavailable(#[source] sqlx::Error),
    /// The session could not be configured after checkout
    #[error("failed to configure database session: {0}")]
    Configure(#[source] sqlx::Error),
    /// The lease was used after it had been released
    #[error("connection lease already released")]
    Released,
}

/// A checked-out connection that is returned to the pool exactly once
pub struct Lease {
    conn: Option<PoolConnection<Any>>,
    outstanding: Arc<AtomicUsize>,
    settings: SessionSettings,
}

impl Lease {
    pub(crate) fn new(
        conn: PoolConnection<Any>,
        outstanding: Arc<AtomicUsize>,
        settings: SessionSettings,
    ) -> Self {
        let count = outstanding.fetch_add(1, Ordering::SeqCst) + 1;
        tracing::debug!("Connection leased ({} outstanding)", count);
        Self {
            conn: Some(conn),
            outstanding,
            settings,
        }
    }

    /// Settings this lease's session was configured with
    pub fn settings(&self) -> SessionSettings {
        self.settings
    }

    pub fn state(&self) -> LeaseState {
        if self.conn.is_some() {
            LeaseState::Leased
        } else {
            LeaseState::Released
        }
    }

    /// Borrow the leased connection
    ///
    /// # Errors
    /// `LeaseError::Released` once the lease has been given back
    pub fn connection(&mut self) -> Result<&mut AnyConnection, LeaseError> {
        self.conn.as_deref_mut().ok_or(LeaseError::Released)
    }

    /// Give the connection back to the pool
    pub fn release(&mut self) {
        if let Some(conn) = self.conn.take() {
            drop(conn);
            let count = self.outstanding.fetch_sub(1, Ordering::SeqCst) - 1;
            tracing::debug!("Connection released ({} outstanding)", count);
        }
    }
}

impl std::fmt::Debug for Lease {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Lease").field("state", &self.state()).finish()
    }
}

impl Drop for Lease {
    fn drop(&mut self) {
        self.release();
    }
}
