//! The dataset source trait.

use std::fmt;

use async_trait::async_trait;
use log::debug;
use serde::{Deserialize, Serialize};

use super::error::SourceResult;
use crate::services::dashboard::DashboardInputs;

/// The three tables the dashboard reads.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatasetKind {
    /// Entity coordinates per year.
    Geo,
    /// Yield observations per entity and year.
    Kpi,
    /// Optional precomputed per-entity statistics.
    KpiStats,
}

impl DatasetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            DatasetKind::Geo => "geo",
            DatasetKind::Kpi => "kpi",
            DatasetKind::KpiStats => "kpi_stats",
        }
    }
}

impl fmt::Display for DatasetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Provider of raw CSV texts.
///
/// # Thread Safety
/// Implementations must be `Send + Sync`; the HTTP state shares one source
/// across all requests.
#[async_trait]
pub trait DatasetSource: Send + Sync {
    /// Load the text of one dataset.
    ///
    /// # Returns
    /// * `Ok(Some(text))` - The dataset content
    /// * `Ok(None)` - The dataset is not available
    /// * `Err(SourceError)` - The source failed while reading
    async fn load(&self, kind: DatasetKind) -> SourceResult<Option<String>>;

    /// Whether the source is reachable.
    async fn health_check(&self) -> bool;

    /// Short description used in health responses and logs.
    fn describe(&self) -> String;
}

/// Load every dataset into pipeline inputs.
///
/// Unavailable geo or KPI tables become empty text; an unavailable stats
/// table stays `None`.
pub async fn load_inputs(source: &dyn DatasetSource) -> SourceResult<DashboardInputs> {
    let geo = source.load(DatasetKind::Geo).await?;
    let kpi = source.load(DatasetKind::Kpi).await?;
    let kpi_stats = source.load(DatasetKind::KpiStats).await?;

    debug!(
        "Loaded inputs from {}: geo={} bytes, kpi={} bytes, kpi_stats={}",
        source.describe(),
        geo.as_ref().map_or(0, String::len),
        kpi.as_ref().map_or(0, String::len),
        if kpi_stats.is_some() { "present" } else { "absent" }
    );

    Ok(DashboardInputs {
        geo: geo.unwrap_or_default(),
        kpi: kpi.unwrap_or_default(),
        kpi_stats,
    })
}
