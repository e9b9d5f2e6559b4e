//! Route tables.

use axum::Router;

use crate::state::AppState;

pub mod health;
pub mod movie;

/// All routes mounted under `/api/v1`.
pub fn api_routes() -> Router<AppState> {
    Router::new().nest("/movies", movie::router())
}
