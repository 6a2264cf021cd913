//! User directory domain.
//!
//! Users have a unique email and a unique username. Requests flow through three layers:
//!
//! - [`handlers`]: axum routes under `/users`; malformed input is rejected with 422
//!   before it reaches the service
//! - [`service`]: field validation, id and pagination checks, uniqueness pre-checks,
//!   and translation of store conflicts into [`UserError`]
//! - [`repository`]: the [`UserRepository`] seam, implemented in memory and by
//!   [`PgUserRepository`]; the store's unique constraints settle concurrent writers
//!
//! ```rust,no_run
//! use domain_users::{InMemoryUserRepository, UserService, handlers};
//!
//! let service = UserService::new(InMemoryUserRepository::new());
//! let app: axum::Router = handlers::router(service);
//! ```

pub mod entity;
pub mod error;
pub mod handlers;
pub mod models;
pub mod postgres;
pub mod repository;
pub mod schema;
pub mod service;

pub use error::{UserError, UserResult};
pub use handlers::ApiDoc;
pub use models::{CreateUser, ListParams, UpdateUser, User};
pub use postgres::PgUserRepository;
pub use repository::{InMemoryUserRepository, UserRepository};
pub use schema::ensure_schema;
pub use service::UserService;
