use sea_orm::ConnectOptions;
use std::time::Duration;
use tracing::log::LevelFilter;

use crate::common::RetryConfig;

#[cfg(feature = "config")]
use core_config::{ConfigError, FromEnv, env_parse, env_required};

/// Where the users table lives and how the pool around it behaves.
#[derive(Clone, Debug)]
pub struct PostgresConfig {
    pub url: String,
    pub max_connections: u32,
    pub min_connections: u32,
    pub connect_timeout: Duration,
    /// A request waiting longer than this for a pooled connection fails as unavailable
    pub acquire_timeout: Duration,
    pub idle_timeout: Duration,
    pub max_lifetime: Duration,
    /// Statement logging through sqlx, at debug level
    pub sqlx_logging: bool,
    /// Backoff used while the server is still starting
    pub retry: RetryConfig,
}

impl PostgresConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            max_connections: 20,
            min_connections: 2,
            connect_timeout: Duration::from_secs(8),
            acquire_timeout: Duration::from_secs(8),
            idle_timeout: Duration::from_secs(300),
            max_lifetime: Duration::from_secs(1800),
            sqlx_logging: false,
            retry: RetryConfig::default(),
        }
    }

    pub fn with_pool_size(mut self, max_connections: u32, min_connections: u32) -> Self {
        self.max_connections = max_connections;
        self.min_connections = min_connections.min(max_connections);
        self
    }

    pub fn with_retry(mut self, retry: RetryConfig) -> Self {
        self.retry = retry;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn connect_options(&self) -> ConnectOptions {
        let mut options = ConnectOptions::new(self.url.as_str());
        options
            .max_connections(self.max_connections)
            .min_connections(self.min_connections)
            .connect_timeout(self.connect_timeout)
            .acquire_timeout(self.acquire_timeout)
            .idle_timeout(self.idle_timeout)
            .max_lifetime(self.max_lifetime)
            .sqlx_logging(self.sqlx_logging)
            .sqlx_logging_level(LevelFilter::Debug);
        options
    }
}

/// Reads:
/// - `DATABASE_URL` (required)
/// - `DB_MAX_CONNECTIONS` (20), `DB_MIN_CONNECTIONS` (2)
/// - `DB_CONNECT_TIMEOUT_SECS`, `DB_ACQUIRE_TIMEOUT_SECS` (8 each)
/// - `DB_SQLX_LOGGING` (false)
/// - the retry variables of [`RetryConfig`]
#[cfg(feature = "config")]
impl FromEnv for PostgresConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let max_connections: u32 = env_parse("DB_MAX_CONNECTIONS", "20")?;
        let min_connections: u32 = env_parse("DB_MIN_CONNECTIONS", "2")?;
        if min_connections > max_connections {
            return Err(ConfigError::InvalidValue {
                key: "DB_MIN_CONNECTIONS".to_string(),
                details: format!("{} exceeds DB_MAX_CONNECTIONS ({})", min_connections, max_connections),
            });
        }

        let mut config = Self::new(env_required("DATABASE_URL")?)
            .with_pool_size(max_connections, min_connections)
            .with_retry(RetryConfig::from_env()?);
        config.connect_timeout = Duration::from_secs(env_parse("DB_CONNECT_TIMEOUT_SECS", "8")?);
        config.acquire_timeout = Duration::from_secs(env_parse("DB_ACQUIRE_TIMEOUT_SECS", "8")?);
        config.sqlx_logging = env_parse("DB_SQLX_LOGGING", "false")?;
        Ok(config)
    }
}
