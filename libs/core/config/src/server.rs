use crate::{ConfigError, FromEnv, env_or_default, env_parse};
use std::fmt;
use std::net::Ipv4Addr;

/// Where the HTTP listener binds
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn new(host: impl Into<String>, port: u16) -> Self {
        Self {
            host: host.into(),
            port,
        }
    }

    /// `host:port`, as passed to the TCP listener
    pub fn address(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for ServerConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.host, self.port)
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self::new(Ipv4Addr::UNSPECIFIED.to_string(), 8080)
    }
}

impl FromEnv for ServerConfig {
    /// `HOST` (default 0.0.0.0) and `PORT` (default 8080)
    fn from_env() -> Result<Self, ConfigError> {
        let host = env_or_default("HOST", &Ipv4Addr::UNSPECIFIED.to_string());
        if host.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                key: "HOST".to_string(),
                details: "must not be empty".to_string(),
            });
        }
        Ok(Self::new(host, env_parse("PORT", "8080")?))
    }
}
