//! API routes module

pub mod health;

use axum::Router;
use domain_users::{handlers, PgUserRepository, UserService};

use crate::state::AppState;

/// Create all API routes (nested under `/api` by the caller)
pub fn routes(state: &AppState) -> Router {
    let service = UserService::new(PgUserRepository::new(state.db.clone()));

    Router::new().nest("/users", handlers::router(service))
}
