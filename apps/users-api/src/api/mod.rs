use axum::{Router, routing::get};
use axum_helpers::server::{create_router, health_router};
use tower_http::cors::CorsLayer;

use crate::state::AppState;

pub mod health;
pub mod root;
pub mod users;

/// API routes with state already applied, mounted at the root.
pub fn routes(state: &AppState) -> Router {
    Router::new()
        .route("/", get(root::descriptor))
        .merge(users::router(state))
}

/// `GET /ready`, checking the store behind `state`.
pub fn ready_router(state: AppState) -> Router {
    Router::new()
        .route("/ready", get(health::ready_handler))
        .with_state(state)
}

/// The whole service: API routes, docs, shared layers and health endpoints.
pub fn app(state: AppState, cors: CorsLayer) -> Router {
    let app_info = state.config.app;
    create_router(routes(&state), crate::openapi::openapi(), cors)
        .merge(health_router(app_info))
        .merge(ready_router(state))
}
