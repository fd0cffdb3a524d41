use serde::{Deserialize, Serialize};

/// A composite join key as `(entity, year)`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct KeySample {
    pub entity: String,
    pub year: String,
}

/// Key overlap between the geo and KPI tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JoinDiagnostics {
    pub geo_keys: usize,
    pub kpi_keys: usize,
    pub matched: usize,
    pub only_geo_samples: Vec<KeySample>,
    pub only_kpi_samples: Vec<KeySample>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

/// Join diagnostics endpoint path.
pub const GET_JOIN_DIAGNOSTICS: &str = "/diagnostics/join";
