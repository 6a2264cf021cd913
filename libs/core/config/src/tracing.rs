use crate::{ConfigError, Environment, env_or_default};
use std::str::FromStr;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, prelude::*};

/// Install color-eyre for `main`'s error report, without the environment section.
pub fn install_color_eyre() {
    // A second install fails; the first hook stays in place.
    let _ = color_eyre::config::HookBuilder::default()
        .display_location_section(true)
        .display_env_section(false)
        .install();
}

/// Shape of emitted log lines
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LogFormat {
    /// One flattened JSON object per event
    Json,
    /// Multi-line human output
    Pretty,
}

impl LogFormat {
    /// JSON in production, pretty otherwise
    pub fn for_environment(environment: &Environment) -> Self {
        if environment.is_production() {
            LogFormat::Json
        } else {
            LogFormat::Pretty
        }
    }

    /// `LOG_FORMAT` (`json` or `pretty`), falling back to [`LogFormat::for_environment`]
    pub fn from_env(environment: &Environment) -> Result<Self, ConfigError> {
        match env_or_default("LOG_FORMAT", "").as_str() {
            "" => Ok(Self::for_environment(environment)),
            value => value.parse().map_err(|details| ConfigError::InvalidValue {
                key: "LOG_FORMAT".to_string(),
                details,
            }),
        }
    }
}

impl FromStr for LogFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(LogFormat::Json),
            "pretty" | "text" => Ok(LogFormat::Pretty),
            other => Err(format!("expected 'json' or 'pretty', got '{}'", other)),
        }
    }
}

/// Filter used when `RUST_LOG` is unset
pub fn default_filter(environment: &Environment) -> &'static str {
    if environment.is_production() {
        "info,sqlx=warn,sea_orm=warn"
    } else {
        "debug,sqlx=info,hyper=info,tower_http=debug"
    }
}

/// Initialize the global subscriber with an `ErrorLayer`, so `eyre` reports carry span traces.
///
/// `RUST_LOG` overrides [`default_filter`]; an unusable `LOG_FORMAT` falls back to the
/// environment's format. Calling it again leaves the first subscriber in place.
pub fn init_tracing(environment: &Environment) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_filter(environment)));
    let (format, format_error) = match LogFormat::from_env(environment) {
        Ok(format) => (format, None),
        Err(e) => (LogFormat::for_environment(environment), Some(e)),
    };

    let registry = tracing_subscriber::registry()
        .with(tracing_error::ErrorLayer::default())
        .with(filter);

    let result = match format {
        LogFormat::Json => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(false)
                    .flatten_event(true),
            )
            .try_init(),
        LogFormat::Pretty => registry
            .with(tracing_subscriber::fmt::layer().with_target(true).pretty())
            .try_init(),
    };

    match result {
        Ok(()) => info!(?environment, ?format, "Tracing initialized"),
        Err(_) => debug!("Tracing already initialized"),
    }
    if let Some(e) = format_error {
        tracing::warn!(error = %e, "Ignoring LOG_FORMAT");
    }
}
