//! Yieldmap HTTP Server Binary
//!
//! Loads the configuration, points a [`FileSource`] at the data directory and
//! serves the dashboard API.
//!
//! # Usage
//!
//! ```bash
//! # Serve ./data/geo.csv, ./data/kpi.csv and ./data/kpi_stats.csv
//! cargo run --bin yieldmap-server
//!
//! # Other directory and port
//! YIELDMAP_DATA_DIR=/srv/yield PORT=9000 cargo run --bin yieldmap-server
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`, `PORT`: bind address (default: 0.0.0.0:8080)
//! - `YIELDMAP_DATA_DIR`: directory holding the CSV files (default: data)
//! - `YIELDMAP_GEO_CSV`, `YIELDMAP_KPI_CSV`, `YIELDMAP_KPI_STATS_CSV`: file names
//! - `YIELDMAP_GRID_ROWS`, `YIELDMAP_GRID_COLS`, `YIELDMAP_BINS`: pipeline defaults
//! - `RUST_LOG`: Log level (default: info)

use std::env;
use std::net::SocketAddr;
use std::sync::Arc;

use tracing::{info, warn, Level};
use tracing_subscriber::FmtSubscriber;

use yieldmap::config::AppConfig;
use yieldmap::data::{DatasetSource, FileSource};
use yieldmap::http::{create_router, AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    FmtSubscriber::builder()
        .with_max_level(
            env::var("RUST_LOG")
                .ok()
                .and_then(|s| s.parse().ok())
                .unwrap_or(Level::INFO),
        )
        .with_target(true)
        .with_thread_ids(true)
        .init();

    info!("Starting yieldmap HTTP server");

    let config = AppConfig::load()?;
    let source = FileSource::from_settings(&config.data);
    if !source.health_check().await {
        warn!(
            "Data directory {} is not readable; endpoints will return empty results",
            source.data_dir().display()
        );
    }
    info!("Serving datasets from {}", source.describe());

    let state = AppState::new(Arc::new(source)).with_defaults(config.pipeline.dashboard_options());
    let app = create_router(state);

    let addr: SocketAddr = config.server.bind_addr().parse()?;
    info!("Server listening on http://{}", addr);
    info!("Health check: http://{}/health", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
