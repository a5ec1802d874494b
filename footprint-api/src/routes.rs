//! API route configuration.

use std::sync::Arc;

use axum::{routing::get, Router};

use crate::handlers;
use crate::state::AppState;

/// Creates the API router with all routes configured.
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        // Health check
        .route("/health", get(handlers::health_check))

        // Buildings
        .route("/buildings", get(handlers::list_buildings))
        .route("/buildings/summary", get(handlers::buildings_summary))

        .with_state(state)
}
