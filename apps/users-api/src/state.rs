//! Application state management.
//!
//! The state carries the loaded configuration and the user store chosen by
//! `USERS_STORE`. It is cloned into every handler; both store variants share
//! their data behind the clone.

use database::postgres::DatabaseConnection;
use domain_users::InMemoryUserRepository;
use tracing::{info, warn};

/// Backing store for user records
#[derive(Clone)]
pub enum Store {
    /// PostgreSQL connection pool
    Postgres(DatabaseConnection),
    /// Process-local map, shared by every clone
    Memory(InMemoryUserRepository),
}

impl Store {
    /// Close the connection pool, if any
    pub async fn close(self) {
        match self {
            Store::Postgres(db) => match db.close().await {
                Ok(()) => info!("Database connections closed"),
                Err(e) => warn!(error = %e, "Failed to close database connections"),
            },
            Store::Memory(_) => {}
        }
    }
}

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration loaded from environment variables
    pub config: crate::config::Config,
    pub store: Store,
}
