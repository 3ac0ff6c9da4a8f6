//! API route definitions

mod analysis;
mod health;

use axum::Router;
use crate::AppState;

/// Create all API routes
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(analysis::routes())
        .merge(health::routes())
}
