//! Request and response types specific to the HTTP API.
//!
//! Pipeline payloads are the route DTOs from [`crate::api`]; this module only
//! adds the query strings and the health response.

use serde::{Deserialize, Serialize};

use super::error::AppError;
use crate::services::dashboard::{DashboardOptions, ParseStatsModeError, StatsMode};
use crate::services::grid::{GridConfig, MAX_GRID_DIM};
use crate::services::scale::MAX_BINS;

pub use crate::api::{
    DashboardData, GeoPoint, GridResponse, JoinDiagnostics, JoinedPoint, StatsTable,
    ValidationReport,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Description of the dataset source and its reachability
    pub data_source: String,
}

/// Query for `GET /v1/dashboard`. Absent values fall back to the server
/// defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DashboardQuery {
    pub year: Option<String>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub bins: Option<usize>,
    pub join: Option<bool>,
    /// `computed`, `precomputed` or `none`
    pub stats: Option<String>,
}

impl DashboardQuery {
    /// Merge the query over `defaults`.
    ///
    /// Grid dimensions above [`MAX_GRID_DIM`] and bin counts above
    /// [`MAX_BINS`] are rejected as bad requests.
    pub fn to_options(&self, defaults: &DashboardOptions) -> Result<DashboardOptions, AppError> {
        let stats = match self.stats.as_deref() {
            Some(s) => s.parse()?,
            None => defaults.stats,
        };

        let rows = at_most("rows", self.rows, MAX_GRID_DIM)?.unwrap_or(defaults.grid.rows);
        let cols = at_most("cols", self.cols, MAX_GRID_DIM)?.unwrap_or(defaults.grid.cols);
        let bins = at_most("bins", self.bins, MAX_BINS)?.unwrap_or(defaults.bins);

        Ok(DashboardOptions {
            grid: GridConfig::new(rows, cols),
            bins: bins.max(1),
            join_yield: self.join.unwrap_or(defaults.join_yield),
            stats,
            year: non_blank(self.year.as_deref()).or_else(|| defaults.year.clone()),
        })
    }
}

/// Query carrying only the year filter.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct YearQuery {
    pub year: Option<String>,
}

impl YearQuery {
    pub fn year(&self) -> Option<String> {
        non_blank(self.year.as_deref())
    }
}

/// Query for `GET /v1/grid`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GridQuery {
    pub year: Option<String>,
    pub rows: Option<usize>,
    pub cols: Option<usize>,
    pub bins: Option<usize>,
}

impl From<GridQuery> for DashboardQuery {
    fn from(q: GridQuery) -> Self {
        DashboardQuery {
            year: q.year,
            rows: q.rows,
            cols: q.cols,
            bins: q.bins,
            join: Some(true),
            stats: Some("none".to_string()),
        }
    }
}

/// Query for `GET /v1/stats`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatsQuery {
    pub year: Option<String>,
    /// `computed` (default) or `precomputed`
    pub source: Option<String>,
}

impl StatsQuery {
    pub fn mode(&self) -> Result<StatsMode, ParseStatsModeError> {
        match self.source.as_deref() {
            None => Ok(StatsMode::Computed),
            Some(s) => match s.parse()? {
                StatsMode::Disabled => Err(ParseStatsModeError(s.to_string())),
                mode => Ok(mode),
            },
        }
    }
}

fn at_most(name: &str, value: Option<usize>, max: usize) -> Result<Option<usize>, AppError> {
    match value {
        Some(v) if v > max => Err(AppError::BadRequest(format!(
            "{} must be at most {} (got {})",
            name, max, v
        ))),
        other => Ok(other),
    }
}

/// An empty `?year=` means no filter.
fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dashboard_query_defaults() {
        let defaults = DashboardOptions::default();
        let options = DashboardQuery::default().to_options(&defaults).unwrap();
        assert_eq!(options, defaults);
    }

    #[test]
    fn test_dashboard_query_overrides() {
        let query = DashboardQuery {
            year: Some("2023".to_string()),
            rows: Some(0),
            cols: Some(4),
            bins: Some(3),
            join: Some(false),
            stats: Some("precomputed".to_string()),
        };
        let options = query.to_options(&DashboardOptions::default()).unwrap();
        assert_eq!(options.grid, GridConfig { rows: 1, cols: 4 });
        assert_eq!(options.bins, 3);
        assert!(!options.join_yield);
        assert_eq!(options.stats, StatsMode::Precomputed);
        assert_eq!(options.year.as_deref(), Some("2023"));
    }

    #[test]
    fn test_blank_year_is_no_filter() {
        let query = YearQuery {
            year: Some("  ".to_string()),
        };
        assert!(query.year().is_none());
    }

    #[test]
    fn test_stats_query_rejects_none_and_unknown() {
        assert_eq!(StatsQuery::default().mode(), Ok(StatsMode::Computed));
        let query = |s: &str| StatsQuery {
            year: None,
            source: Some(s.to_string()),
        };
        assert_eq!(query("precomputed").mode(), Ok(StatsMode::Precomputed));
        assert!(query("none").mode().is_err());
        assert!(query("bogus").mode().is_err());
    }

    #[test]
    fn test_dashboard_query_rejects_oversized_grid() {
        let defaults = DashboardOptions::default();
        let query = |rows, cols, bins| DashboardQuery {
            rows: Some(rows),
            cols: Some(cols),
            bins: Some(bins),
            ..DashboardQuery::default()
        };

        let options = query(MAX_GRID_DIM, MAX_GRID_DIM, MAX_BINS)
            .to_options(&defaults)
            .unwrap();
        assert_eq!(options.grid, GridConfig::new(MAX_GRID_DIM, MAX_GRID_DIM));
        assert_eq!(options.bins, MAX_BINS);

        for q in [
            query(MAX_GRID_DIM + 1, 2, 5),
            query(2, usize::MAX, 5),
            query(2, 2, MAX_BINS + 1),
        ] {
            assert!(matches!(q.to_options(&defaults), Err(AppError::BadRequest(_))));
        }
    }
}
