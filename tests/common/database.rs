//! Database test fixtures and utilities
//!
//! Every test gets its own SQLite file in a temporary directory, so tests
//! run in parallel without sharing rows.

use std::time::Duration;

use axum_test::TestServer;
use journal_api::backend::server::{create_app, AppState};
use journal_api::shared::AppConfig;
use tempfile::TempDir;

/// Secret shared by the test server and token helpers
pub const TEST_SECRET: &str = "suite-secret";

/// Test database fixture
///
/// Owns the temporary directory; the database file is removed when the
/// fixture is dropped.
pub struct TestDatabase {
    _dir: TempDir,
    pub config: AppConfig,
    pub state: AppState,
    pub server: TestServer,
}

impl TestDatabase {
    /// Fixture with the default pool size
    pub async fn new() -> Self {
        Self::with_pool(4, Duration::from_secs(5)).await
    }

    /// Fixture with an explicit pool bound and acquire timeout
    pub async fn with_pool(max_connections: u32, acquire_timeout: Duration) -> Self {
        let dir = tempfile::tempdir().expect("Failed to create temp dir");
        let url = format!("sqlite://{}?mode=rwc", dir.path().join("suite.db").display());

        let config = AppConfig::builder()
            .database_url(url)
            .jwt_secret(TEST_SECRET)
            .port(0)
            .max_connections(max_connections)
            .acquire_timeout(acquire_timeout)
            .bcrypt_cost(4)
            .token_ttl(Duration::from_secs(3600))
            .build()
            .expect("Invalid test configuration");

        let (app, state) = create_app(&config).await.expect("Failed to create app");
        let server = TestServer::new(app).expect("Failed to start test server");

        Self {
            _dir: dir,
            config,
            state,
            server,
        }
    }

    /// Leases currently checked out of the pool
    pub fn outstanding(&self) -> usize {
        self.state.db.outstanding()
    }
}
