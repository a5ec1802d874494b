//! # Footprint API Server
//!
//! REST API over the building footprint query engine.
//!
//! ## Endpoints
//!
//! - `GET /buildings` - Features filtered by `minHeight`, `type` and `bbox`
//! - `GET /buildings/summary` - Count, per-type counts and height statistics
//! - `GET /health` - Liveness, feature count and cache counters
//!
//! ## Example
//!
//! ```rust,ignore
//! use footprint_api::{ApiServer, ApiConfig};
//!
//! let config = ApiConfig::from_env();
//! let server = ApiServer::load(config).await?;
//! server.run(([0, 0, 0, 0], 3000)).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod dto;
mod error;
mod handlers;
mod routes;
mod state;

pub use dto::{BuildingsParams, HealthResponse};
pub use error::ApiError;
pub use routes::create_router;
pub use state::{ApiConfig, AppState};

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tokio::task::JoinHandle;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::info;

use footprint_core::error::Result;
use footprint_engine::QueryEngine;

/// API server for building queries.
#[derive(Debug)]
pub struct ApiServer {
    state: Arc<AppState>,
}

impl ApiServer {
    /// Creates a server around an already-built engine.
    pub fn new(config: ApiConfig, engine: Arc<QueryEngine>) -> Self {
        Self {
            state: Arc::new(AppState::new(config, engine)),
        }
    }

    /// Loads the configured data file and creates the server.
    pub async fn load(config: ApiConfig) -> Result<Self> {
        let state = AppState::load(config).await?;
        Ok(Self {
            state: Arc::new(state),
        })
    }

    /// Returns the shared state.
    pub fn state(&self) -> &Arc<AppState> {
        &self.state
    }

    /// Creates the router with all routes configured.
    pub fn router(&self) -> Router {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);

        create_router(self.state.clone())
            .layer(cors)
            .layer(TraceLayer::new_for_http())
    }

    /// Runs the server on the given address.
    pub async fn run(self, addr: impl Into<SocketAddr>) -> std::io::Result<()> {
        let addr = addr.into();
        let listener = tokio::net::TcpListener::bind(addr).await?;

        let sweeper = self
            .state
            .config
            .sweep_interval
            .map(|period| spawn_sweeper(self.state.engine.clone(), period));

        info!(
            features = self.state.engine.stats().features_loaded,
            "Footprint API server listening on {}", addr
        );

        let served = axum::serve(listener, self.router()).await;

        if let Some(handle) = sweeper {
            handle.abort();
        }
        served
    }
}

/// Periodically drops expired cache entries.
fn spawn_sweeper(engine: Arc<QueryEngine>, period: Duration) -> JoinHandle<()> {
    info!(period_secs = period.as_secs(), "Starting cache sweep task");

    tokio::spawn(async move {
        let mut ticker = tokio::time::interval(period);
        // The first tick completes immediately.
        ticker.tick().await;
        loop {
            ticker.tick().await;
            engine.expire_stale();
        }
    })
}
