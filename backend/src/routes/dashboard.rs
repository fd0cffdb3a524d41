use serde::{Deserialize, Serialize};

use super::diagnostics::JoinDiagnostics;
use super::grid::{BoundingBox, GridData, Legend};
use super::points::{GeoPoint, JoinedPoint};
use super::stats::{DatasetSummary, StatsTable};

/// Everything the dashboard renders, computed in one pass.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardData {
    /// Joined points in geo-table order. Empty when the join is disabled.
    pub points: Vec<JoinedPoint>,
    /// All geo rows with valid coordinates, joined or not.
    pub markers: Vec<GeoPoint>,
    pub bbox: Option<BoundingBox>,
    pub grid: Option<GridData>,
    pub legend: Option<Legend>,
    pub stats: Option<StatsTable>,
    pub summary: DatasetSummary,
    pub diagnostics: JoinDiagnostics,
}

/// Dashboard endpoint path.
pub const GET_DASHBOARD: &str = "/dashboard";
