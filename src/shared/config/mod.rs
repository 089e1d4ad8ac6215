//! Application configuration module
//!
//! Provides the process configuration read once at startup. Every value is
//! immutable afterwards and shared by all requests.
//!
//! # Environment
//!
//! | Variable | Required | Default |
//! |---|---|---|
//! | `DATABASE_URL` | yes | |
//! | `JWT_SECRET` | yes | |
//! | `PORT` | yes | |
//! | `DB_MAX_CONNECTIONS` | no | `10` |
//! | `DB_ACQUIRE_TIMEOUT_SECS` | no | `5` |
//! | `BCRYPT_COST` | no | `10` |
//! | `JWT_TTL_SECONDS` | no | `2592000` (30 days), at most 10 years |
//! | `DB_TIME_ZONE` | no | `-08:00` |

use chrono::FixedOffset;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Default pool bound
pub const DEFAULT_MAX_CONNECTIONS: u32 = 10;
/// Default time a request waits for a pooled connection
pub const DEFAULT_ACQUIRE_TIMEOUT: Duration = Duration::from_secs(5);
/// Default bcrypt work factor
pub const DEFAULT_BCRYPT_COST: u32 = 10;
/// Tokens expire after 30 days
pub const DEFAULT_TOKEN_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);
/// Longest accepted token lifetime (10 years)
pub const MAX_TOKEN_TTL: Duration = Duration::from_secs(10 * 365 * 24 * 60 * 60);
/// Session time zone applied to every leased connection
pub const DEFAULT_TIME_ZONE: &str = "-08:00";

const MIN_BCRYPT_COST: u32 = 4;
const MAX_BCRYPT_COST: u32 = 31;

const SUPPORTED_SCHEMES: &[&str] = &["mysql:", "mariadb:", "sqlite:"];

/// Application configuration
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Database connection target
    pub database_url: String,
    /// HMAC secret used to sign and verify bearer tokens
    pub jwt_secret: String,
    /// TCP port the server listens on
    pub port: u16,
    /// Maximum number of concurrently leased connections
    pub max_connections: u32,
    /// How long a request may wait for a connection before giving up
    pub acquire_timeout: Duration,
    /// bcrypt cost for newly hashed passwords
    pub bcrypt_cost: u32,
    /// Lifetime of issued tokens
    pub token_ttl: Duration,
    /// Fixed offset every database session is pinned to
    pub session_time_zone: FixedOffset,
}

impl AppConfig {
    /// Create a new AppConfigBuilder
    pub fn builder() -> AppConfigBuilder {
        AppConfigBuilder::default()
    }

    /// Load configuration from the process environment
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration from an arbitrary key lookup
    ///
    /// `from_env` delegates here; tests pass a map instead of mutating the
    /// process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut builder = AppConfig::builder();

        if let Some(url) = lookup("DATABASE_URL") {
            builder = builder.database_url(url);
        }
        if let Some(secret) = lookup("JWT_SECRET") {
            builder = builder.jwt_secret(secret);
        }
        if let Some(port) = lookup("PORT") {
            builder = builder.port(parse_value("PORT", &port)?);
        }
        if let Some(max) = lookup("DB_MAX_CONNECTIONS") {
            builder = builder.max_connections(parse_value("DB_MAX_CONNECTIONS", &max)?);
        }
        if let Some(secs) = lookup("DB_ACQUIRE_TIMEOUT_SECS") {
            let secs: u64 = parse_value("DB_ACQUIRE_TIMEOUT_SECS", &secs)?;
            builder = builder.acquire_timeout(Duration::from_secs(secs));
        }
        if let Some(cost) = lookup("BCRYPT_COST") {
            builder = builder.bcrypt_cost(parse_value("BCRYPT_COST", &cost)?);
        }
        if let Some(secs) = lookup("JWT_TTL_SECONDS") {
            let secs: u64 = parse_value("JWT_TTL_SECONDS", &secs)?;
            builder = builder.token_ttl(Duration::from_secs(secs));
        }
        if let Some(tz) = lookup("DB_TIME_ZONE") {
            builder = builder.session_time_zone(parse_value("DB_TIME_ZONE", &tz)?);
        }

        builder.build()
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !SUPPORTED_SCHEMES.iter().any(|s| self.database_url.starts_with(s)) {
            return Err(ConfigError::InvalidUrl(self.database_url.clone()));
        }
        if self.jwt_secret.trim().is_empty() {
            return Err(ConfigError::MissingValue("JWT_SECRET"));
        }
        if self.max_connections == 0 {
            return Err(ConfigError::InvalidValue {
                key: "DB_MAX_CONNECTIONS",
                value: "0".to_string(),
            });
        }
        if !(MIN_BCRYPT_COST..=MAX_BCRYPT_COST).contains(&self.bcrypt_cost) {
            return Err(ConfigError::InvalidValue {
                key: "BCRYPT_COST",
                value: self.bcrypt_cost.to_string(),
            });
        }
        if self.token_ttl.is_zero() || self.token_ttl > MAX_TOKEN_TTL {
            return Err(ConfigError::InvalidValue {
                key: "JWT_TTL_SECONDS",
                value: self.token_ttl.as_secs().to_string(),
            });
        }
        Ok(())
    }
}

fn parse_value<T: FromStr>(key: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim().parse().map_err(|_| ConfigError::InvalidValue {
        key,
        value: raw.to_string(),
    })
}

/// Builder for AppConfig
#[derive(Debug, Default)]
pub struct AppConfigBuilder {
    database_url: Option<String>,
    jwt_secret: Option<String>,
    port: Option<u16>,
    max_connections: Option<u32>,
    acquire_timeout: Option<Duration>,
    bcrypt_cost: Option<u32>,
    token_ttl: Option<Duration>,
    session_time_zone: Option<FixedOffset>,
}

impl AppConfigBuilder {
    /// Set the database URL
    pub fn database_url(mut self, url: impl Into<String>) -> Self {
        self.database_url = Some(url.into());
        self
    }

    /// Set the token signing secret
    pub fn jwt_secret(mut self, secret: impl Into<String>) -> Self {
        self.jwt_secret = Some(secret.into());
        self
    }

    pub fn port(mut self, port: u16) -> Self {
        self.port = Some(port);
        self
    }

    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = Some(max);
        self
    }

    pub fn acquire_timeout(mut self, timeout: Duration) -> Self {
        self.acquire_timeout = Some(timeout);
        self
    }

    pub fn bcrypt_cost(mut self, cost: u32) -> Self {
        self.bcrypt_cost = Some(cost);
        self
    }

    pub fn token_ttl(mut self, ttl: Duration) -> Self {
        self.token_ttl = Some(ttl);
        self
    }

    pub fn session_time_zone(mut self, offset: FixedOffset) -> Self {
        self.session_time_zone = Some(offset);
        self
    }

    /// Build the configuration
    ///
    /// Fails if a required value was never set or if the result does not
    /// pass [`AppConfig::validate`].
    pub fn build(self) -> Result<AppConfig, ConfigError> {
        let default_zone = FixedOffset::west_opt(8 * 3600)
            .ok_or(ConfigError::MissingValue("DB_TIME_ZONE"))?;

        let config = AppConfig {
            database_url: self.database_url.ok_or(ConfigError::MissingValue("DATABASE_URL"))?,
            jwt_secret: self.jwt_secret.ok_or(ConfigError::MissingValue("JWT_SECRET"))?,
            port: self.port.ok_or(ConfigError::MissingValue("PORT"))?,
            max_connections: self.max_connections.unwrap_or(DEFAULT_MAX_CONNECTIONS),
            acquire_timeout: self.acquire_timeout.unwrap_or(DEFAULT_ACQUIRE_TIMEOUT),
            bcrypt_cost: self.bcrypt_cost.unwrap_or(DEFAULT_BCRYPT_COST),
            token_ttl: self.token_ttl.unwrap_or(DEFAULT_TOKEN_TTL),
            session_time_zone: self.session_time_zone.unwrap_or(default_zone),
        };
        config.validate()?;
        Ok(config)
    }
}

/// Configuration errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("unsupported database URL: {0}")]
    InvalidUrl(String),
    #[error("missing value: {0}")]
    MissingValue(&'static str),
    #[error("invalid value for {key}: {value:?}")]
    InvalidValue { key: &'static str, value: String },
}
