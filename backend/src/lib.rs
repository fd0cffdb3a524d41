//! # Yieldmap Backend
//!
//! Yield dashboard engine for agronomic field data.
//!
//! The crate joins entity coordinates with per-year yields, bins the joined
//! points into a spatial grid of mean yields, colors the grid on a
//! red–yellow–green equal-interval scale and reports per-entity variability
//! statistics. An axum REST API serves the results to a map frontend.
//!
//! ## Features
//!
//! - **Parsing**: Tolerant CSV reading, header aliases, decimal-comma numbers
//! - **Join**: Inner join of geo and yield tables on `(entity, year)`
//! - **Grid**: Fixed-size spatial aggregation with clamped cell indices
//! - **Scale**: Equal-interval bins and the red–yellow–green ramp
//! - **Statistics**: Mean, sd, coefficient of variation, stability proxy
//! - **Data Quality**: Join diagnostics and table validation reports
//! - **HTTP API**: RESTful endpoints for frontend integration
//!
//! ## Architecture
//!
//! - [`parsing`]: CSV tables, field resolution and numeric coercion
//! - [`api`]: Data Transfer Objects (DTOs) for API responses
//! - [`routes`]: Route-specific DTO definitions and endpoint paths
//! - [`services`]: The pipeline stages and data-quality checks
//! - [`data`]: Dataset sources (files, memory)
//! - [`config`]: TOML and environment configuration
//! - `http`: Axum-based HTTP server and request handlers (feature `http-server`)
//!
//! ## Example
//!
//! ```
//! use yieldmap::services::{build_dashboard, DashboardInputs, DashboardOptions};
//!
//! let inputs = DashboardInputs {
//!     geo: "Контрагент,Год,Широта,Долгота\nАгро,2023,55.75,37.61\n".to_string(),
//!     kpi: "Контрагент,Год,Урожайность_ц_га\nАгро,2023,41.5\n".to_string(),
//!     kpi_stats: None,
//! };
//! let data = build_dashboard(&inputs, &DashboardOptions::default());
//! assert_eq!(data.points.len(), 1);
//! assert_eq!(data.summary.avg_yield, Some(41.5));
//! ```

pub mod api;
pub mod config;
pub mod data;
pub mod parsing;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
