//! One-pass dashboard pipeline.
//!
//! Parses the raw inputs, applies the year filter, joins geo rows with
//! yields, bins the joined points into the grid, builds the legend and the
//! stats table. Every stage can be switched through [`DashboardOptions`].

use std::str::FromStr;

use log::{debug, warn};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::api::{
    BoundingBox, DashboardData, GridResponse, JoinedPoint, Legend, StatsOrigin, StatsTable,
};
use crate::parsing::fields::YEAR;
use crate::parsing::{parse_csv, Row};
use crate::services::diagnostics::join_diagnostics;
use crate::services::grid::{GridConfig, YieldGrid};
use crate::services::join::{extract_geo_points, join_points};
use crate::services::scale::DEFAULT_BINS;
use crate::services::stats::{entity_stats, parse_precomputed_stats, summarize_dataset};

/// Source of the per-entity stats table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsMode {
    /// Computed from the yield table.
    #[default]
    Computed,
    /// Read from the `kpi_stats` table.
    Precomputed,
    /// No stats table.
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown stats mode '{0}' (expected computed, precomputed or none)")]
pub struct ParseStatsModeError(pub String);

impl FromStr for StatsMode {
    type Err = ParseStatsModeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "computed" => Ok(StatsMode::Computed),
            "precomputed" => Ok(StatsMode::Precomputed),
            "none" | "disabled" | "off" => Ok(StatsMode::Disabled),
            _ => Err(ParseStatsModeError(s.to_string())),
        }
    }
}

/// Raw CSV texts feeding the pipeline.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DashboardInputs {
    pub geo: String,
    pub kpi: String,
    pub kpi_stats: Option<String>,
}

/// Pipeline switches.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardOptions {
    pub grid: GridConfig,
    pub bins: usize,
    pub join_yield: bool,
    pub stats: StatsMode,
    /// Keep only rows of this year (trimmed comparison).
    pub year: Option<String>,
}

impl Default for DashboardOptions {
    fn default() -> Self {
        Self {
            grid: GridConfig::default(),
            bins: DEFAULT_BINS,
            join_yield: true,
            stats: StatsMode::default(),
            year: None,
        }
    }
}

/// Rows whose year equals `year`, or all rows when no filter is set.
pub fn filter_year(rows: Vec<Row>, year: Option<&str>) -> Vec<Row> {
    match year.map(str::trim) {
        Some(y) => rows
            .into_iter()
            .filter(|row| YEAR.pick(row).trim() == y)
            .collect(),
        None => rows,
    }
}

/// Bin `points` into a grid and derive the legend from the cell means.
///
/// Without data the legend falls back to the unit range `[0, 1]`.
pub fn compute_grid(points: &[JoinedPoint], config: GridConfig, bins: usize) -> GridResponse {
    let grid = YieldGrid::from_points(points, config);

    let legend = match grid.as_ref().and_then(YieldGrid::mean_range) {
        Some((lo, hi)) => Legend::equal_interval(lo, hi, bins),
        None => Legend::from_edges(vec![0.0, 1.0]),
    };

    GridResponse {
        grid: grid.map(|g| g.to_grid_data(Some(&legend))),
        legend: Some(legend),
    }
}

/// Stats table for `mode`. `kpi_rows` must already be year-filtered.
///
/// `Precomputed` without a (non-blank) stats text falls back to computing
/// from the yields.
pub fn compute_stats(kpi_rows: &[Row], kpi_stats: Option<&str>, mode: StatsMode) -> Option<StatsTable> {
    match mode {
        StatsMode::Disabled => None,
        StatsMode::Precomputed => match kpi_stats.filter(|t| !t.trim().is_empty()) {
            Some(text) => Some(StatsTable {
                origin: StatsOrigin::Precomputed,
                rows: parse_precomputed_stats(&parse_csv(text)),
            }),
            None => {
                warn!("Precomputed stats requested but no kpi_stats table is available; computing from yields");
                Some(computed_stats(kpi_rows))
            }
        },
        StatsMode::Computed => Some(computed_stats(kpi_rows)),
    }
}

fn computed_stats(kpi_rows: &[Row]) -> StatsTable {
    StatsTable {
        origin: StatsOrigin::Computed,
        rows: entity_stats(kpi_rows, None),
    }
}

/// Run the whole pipeline.
pub fn build_dashboard(inputs: &DashboardInputs, options: &DashboardOptions) -> DashboardData {
    let year = options.year.as_deref();
    let geo_rows = filter_year(parse_csv(&inputs.geo).rows, year);
    let kpi_rows = filter_year(parse_csv(&inputs.kpi).rows, year);

    debug!(
        "Dashboard inputs: {} geo rows, {} kpi rows (year filter: {:?})",
        geo_rows.len(),
        kpi_rows.len(),
        year
    );

    let diagnostics = join_diagnostics(&geo_rows, &kpi_rows);
    let markers = extract_geo_points(&geo_rows);

    let (points, bbox, grid, legend) = if options.join_yield {
        let points = join_points(&geo_rows, &kpi_rows);
        let bbox = BoundingBox::from_points(&points);
        let GridResponse { grid, legend } = compute_grid(&points, options.grid, options.bins);
        (points, bbox, grid, legend)
    } else {
        (Vec::new(), None, None, None)
    };

    if options.join_yield && points.is_empty() && !geo_rows.is_empty() {
        warn!(
            "No geo row matched a yield row ({} geo keys, {} kpi keys)",
            diagnostics.geo_keys, diagnostics.kpi_keys
        );
    }

    let stats = compute_stats(&kpi_rows, inputs.kpi_stats.as_deref(), options.stats);
    let summary = summarize_dataset(&points);

    DashboardData {
        points,
        markers,
        bbox,
        grid,
        legend,
        stats,
        summary,
        diagnostics,
    }
}
