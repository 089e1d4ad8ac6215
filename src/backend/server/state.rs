/**
 * Application State Management
 *
 * `AppState` is built once at startup and cloned into every request. All of
 * its parts are immutable after construction:
 * - the connection pool (`DbPool`, internally reference counted)
 * - the token signer/verifier behind an `Arc`
 * - the password hasher (just a work factor)
 * - the gate pipeline (`Arc<[Gate]>`)
 *
 * The `FromRef` implementations let handlers and middleware extract only the
 * part they need, e.g. `State<DbPool>` or `State<Arc<TokenIssuer>>`.
 */

use std::sync::Arc;

use axum::extract::FromRef;

use crate::backend::auth::password::PasswordHasher;
use crate::backend::auth::sessions::TokenIssuer;
use crate::backend::database::DbPool;
use crate::backend::middleware::auth::GatePipeline;
use crate::shared::{AppConfig, ConfigError};

/// Application state shared by all requests
#[derive(Clone, Debug)]
pub struct AppState {
    /// Connection pool leases are drawn from
    pub db: DbPool,
    /// Token signer/verifier
    pub tokens: Arc<TokenIssuer>,
    /// Password hasher
    pub hasher: PasswordHasher,
    /// Gates run before protected routes
    pub gates: GatePipeline,
}

impl AppState {
    /// Assemble state from a connected pool and the process configuration
    ///
    /// # Errors
    /// `ConfigError` if the token secret is unusable
    pub fn new(db: DbPool, config: &AppConfig) -> Result<Self, ConfigError> {
        Ok(Self {
            db,
            tokens: Arc::new(TokenIssuer::new(&config.jwt_secret, config.token_ttl)?),
            hasher: PasswordHasher::new(config.bcrypt_cost),
            gates: GatePipeline::authentication(),
        })
    }
}

impl FromRef<AppState> for DbPool {
    fn from_ref(state: &AppState) -> Self {
        state.db.clone()
    }
}

impl FromRef<AppState> for Arc<TokenIssuer> {
    fn from_ref(state: &AppState) -> Self {
        Arc::clone(&state.tokens)
    }
}

impl FromRef<AppState> for PasswordHasher {
    fn from_ref(state: &AppState) -> Self {
        state.hasher
    }
}
