//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;
use crate::routes::{dashboard, diagnostics, grid, points, stats, validation};

/// Health endpoint path, outside the versioned API.
pub const HEALTH: &str = "/health";
/// Prefix of the versioned API.
pub const API_V1: &str = "/v1";

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    // Read-only API served to a browser dashboard
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route(dashboard::GET_DASHBOARD, get(handlers::get_dashboard))
        .route(points::GET_POINTS, get(handlers::get_points))
        .route(points::GET_MARKERS, get(handlers::get_markers))
        .route(grid::GET_GRID, get(handlers::get_grid))
        .route(stats::GET_STATS, get(handlers::get_stats))
        .route(diagnostics::GET_JOIN_DIAGNOSTICS, get(handlers::get_join_diagnostics))
        .route(validation::GET_GEO_VALIDATION, get(handlers::get_geo_validation))
        .route(validation::GET_KPI_VALIDATION, get(handlers::get_kpi_validation));

    Router::new()
        .route(HEALTH, get(handlers::health_check))
        .nest(API_V1, api_v1)
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
