//! PostgreSQL connection management and helpers

mod config;
mod connector;
mod errors;
mod health;

pub use config::PostgresConfig;
pub use connector::{connect, connect_from_config, connect_from_config_with_retry};
pub use errors::{DbErrorKind, classify};
pub use health::check_health;

pub use sea_orm::{ConnectOptions, DatabaseConnection, DbErr};
