//! HTTP handlers for the REST API.
//!
//! Every handler loads fresh texts from the dataset source, so edits to the
//! CSV files show up on the next request. The pipeline is CPU-bound and runs
//! on the blocking thread pool.

use axum::{
    extract::{Query, State},
    Json,
};

use super::dto::{
    DashboardData, DashboardQuery, GeoPoint, GridQuery, GridResponse, HealthResponse,
    JoinDiagnostics, JoinedPoint, StatsQuery, StatsTable, ValidationReport, YearQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::data::load_inputs;
use crate::parsing::parse_csv;
use crate::services::dashboard::{
    build_dashboard, compute_stats, filter_year, DashboardInputs, DashboardOptions, StatsMode,
};
use crate::services::diagnostics::join_diagnostics;
use crate::services::validation::{validate_geo, validate_kpi};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Load the inputs and run `f` on them off the async runtime.
async fn with_inputs<T, F>(state: &AppState, f: F) -> Result<T, AppError>
where
    T: Send + 'static,
    F: FnOnce(DashboardInputs) -> T + Send + 'static,
{
    let inputs = load_inputs(state.source.as_ref()).await?;
    Ok(tokio::task::spawn_blocking(move || f(inputs)).await?)
}

async fn run_pipeline(state: &AppState, options: DashboardOptions) -> Result<DashboardData, AppError> {
    with_inputs(state, move |inputs| build_dashboard(&inputs, &options)).await
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
///
/// Verify the service is running and the dataset source is reachable.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let reachable = state.source.health_check().await;
    let data_source = format!(
        "{} ({})",
        state.source.describe(),
        if reachable { "available" } else { "unavailable" }
    );

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        data_source,
    }))
}

// =============================================================================
// Pipeline Endpoints
// =============================================================================

/// GET /v1/dashboard?year&rows&cols&bins&join&stats
pub async fn get_dashboard(
    State(state): State<AppState>,
    Query(query): Query<DashboardQuery>,
) -> HandlerResult<DashboardData> {
    let options = query.to_options(&state.defaults)?;
    Ok(Json(run_pipeline(&state, options).await?))
}

/// GET /v1/points?year
///
/// Geo rows joined with their yield.
pub async fn get_points(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> HandlerResult<Vec<JoinedPoint>> {
    let options = DashboardOptions {
        join_yield: true,
        stats: StatsMode::Disabled,
        year: query.year(),
        ..state.defaults.clone()
    };
    Ok(Json(run_pipeline(&state, options).await?.points))
}

/// GET /v1/markers?year
///
/// Geo rows with valid coordinates, without the yield join.
pub async fn get_markers(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> HandlerResult<Vec<GeoPoint>> {
    let options = DashboardOptions {
        join_yield: false,
        stats: StatsMode::Disabled,
        year: query.year(),
        ..state.defaults.clone()
    };
    Ok(Json(run_pipeline(&state, options).await?.markers))
}

/// GET /v1/grid?year&rows&cols&bins
pub async fn get_grid(
    State(state): State<AppState>,
    Query(query): Query<GridQuery>,
) -> HandlerResult<GridResponse> {
    let options = DashboardQuery::from(query).to_options(&state.defaults)?;
    let data = run_pipeline(&state, options).await?;
    Ok(Json(GridResponse {
        grid: data.grid,
        legend: data.legend,
    }))
}

/// GET /v1/stats?year&source=computed|precomputed
pub async fn get_stats(
    State(state): State<AppState>,
    Query(query): Query<StatsQuery>,
) -> HandlerResult<StatsTable> {
    let mode = query.mode()?;
    let year = query.year.clone();

    let table = with_inputs(&state, move |inputs| {
        let kpi_rows = filter_year(parse_csv(&inputs.kpi).rows, year.as_deref());
        compute_stats(&kpi_rows, inputs.kpi_stats.as_deref(), mode)
    })
    .await?;

    table
        .map(Json)
        .ok_or_else(|| AppError::Internal("Stats table was not produced".to_string()))
}

// =============================================================================
// Data Quality Endpoints
// =============================================================================

/// GET /v1/diagnostics/join?year
pub async fn get_join_diagnostics(
    State(state): State<AppState>,
    Query(query): Query<YearQuery>,
) -> HandlerResult<JoinDiagnostics> {
    let year = query.year();
    let diagnostics = with_inputs(&state, move |inputs| {
        let geo = filter_year(parse_csv(&inputs.geo).rows, year.as_deref());
        let kpi = filter_year(parse_csv(&inputs.kpi).rows, year.as_deref());
        join_diagnostics(&geo, &kpi)
    })
    .await?;
    Ok(Json(diagnostics))
}

/// GET /v1/validation/geo
pub async fn get_geo_validation(State(state): State<AppState>) -> HandlerResult<ValidationReport> {
    let report = with_inputs(&state, |inputs| validate_geo(&parse_csv(&inputs.geo))).await?;
    Ok(Json(report))
}

/// GET /v1/validation/kpi
pub async fn get_kpi_validation(State(state): State<AppState>) -> HandlerResult<ValidationReport> {
    let report = with_inputs(&state, |inputs| validate_kpi(&parse_csv(&inputs.kpi))).await?;
    Ok(Json(report))
}
