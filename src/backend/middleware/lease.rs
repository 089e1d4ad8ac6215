/**
 * Connection Lease Middleware
 *
 * Binds one pooled connection to each request for its whole lifetime.
 *
 * # Flow
 *
 * 1. Lease a connection from the pool (503 if none frees up in time)
 * 2. Attach it to the request extensions as `RequestLease`
 * 3. Run the rest of the stack (gates and handler)
 * 4. Release the lease, whatever the response was
 *
 * If the downstream future panics or is dropped, the lease is released by
 * `Drop` while the stack unwinds.
 */

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request, State},
    http::request::Parts,
    middleware::Next,
    response::Response,
};
use tokio::sync::{Mutex, MutexGuard};

use crate::backend::database::{DbPool, Lease};
use crate::backend::error::ApiError;

/// The lease attached to the current request
#[derive(Clone, Debug)]
pub struct RequestLease(Arc<Mutex<Lease>>);

impl RequestLease {
    pub fn new(lease: Lease) -> Self {
        Self(Arc::new(Mutex::new(lease)))
    }

    /// Give the connection back to the pool
    ///
    /// Idempotent, and effective even if a handler kept a clone.
    pub async fn release(&self) {
        self.0.lock().await.release();
    }
}

/// Lease middleware
///
/// Applied with `.layer` around the whole router so public and protected
/// routes, as well as gate rejections, all run inside a lease.
///
/// # Errors
/// `ApiError::Unavailable` (503) when the pool cannot supply a connection,
/// `ApiError::Internal` (500) when the session could not be configured
pub async fn lease_middleware(
    State(pool): State<DbPool>,
    mut request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let lease = pool.acquire().await.map_err(|e| {
        tracing::error!("Could not lease a database connection: {}", e);
        ApiError::from(e)
    })?;

    let lease = RequestLease::new(lease);
    request.extensions_mut().insert(lease.clone());

    let response = next.run(request).await;

    lease.release().await;
    Ok(response)
}

/// Extractor giving handlers the request's connection
///
/// # Example
///
/// ```rust,no_run
/// use journal_api::backend::middleware::DbLease;
/// use journal_api::backend::error::ApiError;
///
/// async fn handler(db: DbLease) -> Result<(), ApiError> {
///     let mut lease = db.lock().await;
///     let conn = lease.connection()?;
///     sqlx::query("SELECT 1").execute(conn).await?;
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct DbLease(RequestLease);

impl DbLease {
    /// Exclusive access to the lease for the duration of the guard
    pub async fn lock(&self) -> MutexGuard<'_, Lease> {
        self.0 .0.lock().await
    }
}

impl<S> FromRequestParts<S> for DbLease
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestLease>()
            .cloned()
            .map(DbLease)
            .ok_or_else(|| ApiError::internal("request has no database lease"))
    }
}
