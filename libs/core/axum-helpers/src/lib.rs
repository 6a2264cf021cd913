//! # Axum Helpers
//!
//! Shared building blocks for the HTTP services in this workspace.
//!
//! - **[`errors`]**: `AppError`, `ErrorCode` and the JSON error body
//! - **[`extractors`]**: validated JSON, integer path id, query params with JSON rejections
//! - **[`http`]**: CORS and security headers
//! - **[`server`]**: router assembly with API docs, health endpoints, graceful shutdown

pub mod errors;
pub mod extractors;
pub mod http;
pub mod server;

pub use errors::{AppError, ErrorCode, ErrorResponse};
pub use extractors::{IdPath, QueryParams, ValidatedJson};
pub use server::{
    HealthCheckFuture, HealthResponse, ShutdownCoordinator, create_production_app, create_router,
    health_router, run_health_checks,
};
