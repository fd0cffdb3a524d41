//! Public API surface for the backend.
//!
//! This file consolidates the DTO types produced by the pipeline.
//! All types derive Serialize/Deserialize for JSON serialization.

pub use crate::routes::dashboard::DashboardData;
pub use crate::routes::diagnostics::JoinDiagnostics;
pub use crate::routes::diagnostics::KeySample;
pub use crate::routes::grid::BoundingBox;
pub use crate::routes::grid::CellData;
pub use crate::routes::grid::GridData;
pub use crate::routes::grid::GridResponse;
pub use crate::routes::grid::Legend;
pub use crate::routes::grid::LegendSwatch;
pub use crate::routes::points::GeoPoint;
pub use crate::routes::points::JoinedPoint;
pub use crate::routes::stats::DatasetSummary;
pub use crate::routes::stats::StatsOrigin;
pub use crate::routes::stats::StatsRow;
pub use crate::routes::stats::StatsSummary;
pub use crate::routes::stats::StatsTable;
pub use crate::routes::validation::ValidationIssue;
pub use crate::routes::validation::ValidationReport;
