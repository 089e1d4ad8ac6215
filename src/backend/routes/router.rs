/**
 * Router Configuration
 *
 * Combines the public and protected routes into one router and wraps it in
 * the request pipeline layers.
 *
 * # Layer Order (outermost first)
 *
 * 1. `TraceLayer` - request span and latency logging
 * 2. `CatchPanicLayer` - a panicking handler becomes a 500
 * 3. lease middleware - one pooled connection per request
 *
 * The gate pipeline is attached to the protected routes only, inside the
 * lease, so a rejected request still releases its connection.
 */

use axum::{middleware::from_fn_with_state, Router};
use tower_http::{catch_panic::CatchPanicLayer, trace::TraceLayer};

use crate::backend::error::ApiError;
use crate::backend::middleware::lease_middleware;
use crate::backend::routes::api_routes::{configure_protected_routes, configure_public_routes};
use crate::backend::server::state::AppState;

/// Create the Axum router with all routes configured
///
/// # Arguments
///
/// * `app_state` - Shared application state
///
/// # Returns
///
/// Router ready to hand to `axum::serve` or a test server
pub fn create_router(app_state: AppState) -> Router<()> {
    let router = Router::new();
    let router = configure_public_routes(router);
    let router = configure_protected_routes(router, app_state.clone());

    router
        .fallback(not_found)
        .layer(from_fn_with_state(app_state.clone(), lease_middleware))
        .layer(CatchPanicLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(app_state)
}

async fn not_found() -> ApiError {
    ApiError::not_found("Not found")
}
