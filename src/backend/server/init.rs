/**
 * Server Initialization
 *
 * # Initialization Process
 *
 * 1. Connect the database pool and bootstrap the schema
 * 2. Build the token issuer, hasher and gate pipeline into `AppState`
 * 3. Assemble the router
 * 4. Bind the listener and serve
 */

use axum::Router;

use crate::backend::routes::create_router;
use crate::backend::server::config::{load_database, StartupError};
use crate::backend::server::state::AppState;
use crate::shared::AppConfig;

/// Build the shared state for a configuration
pub async fn build_state(config: &AppConfig) -> Result<AppState, StartupError> {
    let db = load_database(config).await?;
    Ok(AppState::new(db, config)?)
}

/// Create and configure the Axum application
///
/// # Returns
///
/// The router together with the state it was built from, so callers (and
/// tests) can observe the pool.
pub async fn create_app(config: &AppConfig) -> Result<(Router<()>, AppState), StartupError> {
    tracing::info!("Initializing journal API server");

    let state = build_state(config).await?;
    let app = create_router(state.clone());

    tracing::info!("Router configured");
    Ok((app, state))
}

/// Serve the application until the process is stopped
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    let (app, _state) = create_app(&config).await?;

    let addr = std::net::SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("Listening on {}", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
