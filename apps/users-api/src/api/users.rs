use crate::state::{AppState, Store};
use axum::Router;
use domain_users::{PgUserRepository, UserService, handlers};

/// User routes over whichever store the state carries
pub fn router(state: &AppState) -> Router {
    match &state.store {
        Store::Postgres(db) => handlers::router(UserService::new(PgUserRepository::new(db.clone()))),
        Store::Memory(repo) => handlers::router(UserService::new(repo.clone())),
    }
}
