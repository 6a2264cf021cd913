use core_config::{AppInfo, FromEnv, app_info, env_parse, server::ServerConfig};
use database::postgres::PostgresConfig;
use std::fmt;
use std::str::FromStr;

// Re-export Environment for use in other modules
pub use core_config::Environment;

/// Where user records live, from `USERS_STORE`
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Process-local, lost on exit. For local runs and demos.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(format!("expected 'postgres' or 'memory', got '{}'", other)),
        }
    }
}

impl fmt::Display for StoreBackend {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreBackend::Postgres => write!(f, "postgres"),
            StoreBackend::Memory => write!(f, "memory"),
        }
    }
}

/// Application-specific configuration
/// Composes shared config components from the `config` library
#[derive(Clone, Debug)]
pub struct Config {
    pub app: AppInfo,
    pub store: StoreBackend,
    /// Present exactly when `store` is Postgres
    pub database: Option<PostgresConfig>,
    pub server: ServerConfig,
    pub environment: Environment,
    /// Comma-separated `CORS_ALLOWED_ORIGIN`
    pub cors_origins: Option<String>,
}

impl Config {
    pub fn from_env() -> eyre::Result<Self> {
        let environment = Environment::from_env();
        let store: StoreBackend = env_parse("USERS_STORE", "postgres")?;
        let database = match store {
            StoreBackend::Postgres => Some(PostgresConfig::from_env()?), // Requires DATABASE_URL
            StoreBackend::Memory => None,
        };
        let server = ServerConfig::from_env()?; // Uses defaults: HOST=0.0.0.0, PORT=8080
        let cors_origins = std::env::var("CORS_ALLOWED_ORIGIN").ok();

        Ok(Self {
            app: app_info!(),
            store,
            database,
            server,
            environment,
            cors_origins,
        })
    }

    /// In-memory configuration with default server settings, for tests
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self {
            app: app_info!(),
            store: StoreBackend::Memory,
            database: None,
            server: ServerConfig::default(),
            environment: Environment::Development,
            cors_origins: None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_store_backend_parsing() {
        assert_eq!("memory".parse::<StoreBackend>(), Ok(StoreBackend::Memory));
        assert_eq!("Postgres".parse::<StoreBackend>(), Ok(StoreBackend::Postgres));
        assert!("sqlite".parse::<StoreBackend>().is_err());
    }

    #[test]
    fn test_memory_store_needs_no_database_url() {
        temp_env::with_vars(
            [
                ("USERS_STORE", Some("memory")),
                ("DATABASE_URL", None),
                ("CORS_ALLOWED_ORIGIN", None),
            ],
            || {
                let config = Config::from_env().unwrap();
                assert_eq!(config.store, StoreBackend::Memory);
                assert!(config.database.is_none());
                assert!(config.cors_origins.is_none());
                assert_eq!(config.app.name, "users_api");
            },
        );
    }

    #[test]
    fn test_postgres_store_requires_database_url() {
        temp_env::with_vars([("USERS_STORE", None::<&str>), ("DATABASE_URL", None)], || {
            assert!(Config::from_env().is_err());
        });
    }

    #[test]
    fn test_postgres_store_reads_database_url() {
        temp_env::with_vars(
            [
                ("USERS_STORE", Some("postgres")),
                ("DATABASE_URL", Some("postgres://u:p@localhost:5432/users")),
                ("CORS_ALLOWED_ORIGIN", Some("https://example.com")),
            ],
            || {
                let config = Config::from_env().unwrap();
                let database = config.database.unwrap();
                assert_eq!(database.url(), "postgres://u:p@localhost:5432/users");
                assert_eq!(config.cors_origins.as_deref(), Some("https://example.com"));
            },
        );
    }

    #[test]
    fn test_unknown_store_is_rejected() {
        temp_env::with_var("USERS_STORE", Some("sqlite"), || {
            let err = Config::from_env().unwrap_err();
            assert!(err.to_string().contains("USERS_STORE"));
        });
    }
}
