//! Service layer: the pipeline stages and the data-quality checks.
//!
//! Services are pure functions over parsed tables. They sit between the
//! [`crate::data`] sources and the HTTP handlers, which only load texts and
//! serialize what these functions return.

pub mod dashboard;
pub mod diagnostics;
pub mod grid;
pub mod join;
pub mod scale;
pub mod stats;
pub mod validation;


pub use dashboard::{build_dashboard, DashboardInputs, DashboardOptions, StatsMode};
pub use diagnostics::join_diagnostics;
pub use grid::{GridConfig, YieldGrid};
pub use join::join_points;
pub use scale::{bin_index, equal_breaks, red_yellow_green};
pub use stats::{cvp, mean, sd, waasb_proxy};
pub use validation::{validate_geo, validate_kpi};
