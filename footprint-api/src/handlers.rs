//! API route handlers.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use tracing::debug;

use footprint_core::types::{FeatureCollection, SummaryStats};

use crate::dto::{BuildingsParams, HealthResponse};
use crate::error::ApiError;
use crate::state::AppState;

type Result<T> = std::result::Result<T, ApiError>;

/// GET /buildings
pub async fn list_buildings(
    State(state): State<Arc<AppState>>,
    Query(params): Query<BuildingsParams>,
) -> Result<Json<Arc<FeatureCollection>>> {
    let query = params.into_query()?;
    let buildings = state.engine.filter_buildings(&query)?;

    debug!(matched = buildings.len(), "Served buildings");
    Ok(Json(buildings))
}

/// GET /buildings/summary
pub async fn buildings_summary(State(state): State<Arc<AppState>>) -> Result<Json<SummaryStats>> {
    Ok(Json(state.engine.get_summary()?))
}

/// GET /health
pub async fn health_check(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let stats = state.engine.stats();

    Json(HealthResponse {
        status: "ok".into(),
        version: env!("CARGO_PKG_VERSION").into(),
        uptime_seconds: state.started_at.elapsed().as_secs(),
        features_loaded: stats.features_loaded,
        cache: stats.cache,
    })
}
