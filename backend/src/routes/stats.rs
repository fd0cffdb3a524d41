use serde::{Deserialize, Serialize};

/// Rounded descriptive statistics of one observation set.
///
/// `waasb_proxy` is an approximation inversely related to the coefficient of
/// variation; it is not a statistically validated stability index.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StatsSummary {
    pub mean: Option<f64>,
    pub sd: Option<f64>,
    pub cvp: Option<f64>,
    pub waasb_proxy: f64,
}

/// Statistics for one entity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsRow {
    pub entity: String,
    /// Number of observations; `None` for rows read from a precomputed table.
    pub observations: Option<usize>,
    pub mean: Option<f64>,
    pub sd: Option<f64>,
    pub cvp: Option<f64>,
    pub waasb_proxy: Option<f64>,
}

impl StatsRow {
    pub fn from_summary(entity: impl Into<String>, observations: usize, s: StatsSummary) -> Self {
        Self {
            entity: entity.into(),
            observations: Some(observations),
            mean: s.mean,
            sd: s.sd,
            cvp: s.cvp,
            waasb_proxy: Some(s.waasb_proxy),
        }
    }
}

/// Where the stats table came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StatsOrigin {
    Computed,
    Precomputed,
}

/// Stats endpoint payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatsTable {
    pub origin: StatsOrigin,
    pub rows: Vec<StatsRow>,
}

/// Headline numbers over the joined points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub point_count: usize,
    pub entity_count: usize,
    pub year_count: usize,
    pub avg_yield: Option<f64>,
    pub min_yield: Option<f64>,
    pub max_yield: Option<f64>,
}

/// Stats endpoint path.
pub const GET_STATS: &str = "/stats";
