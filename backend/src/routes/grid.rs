use serde::{Deserialize, Serialize};

/// Extent of the joined points.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoundingBox {
    pub min_lat: f64,
    pub max_lat: f64,
    pub min_lon: f64,
    pub max_lon: f64,
}

/// One rendered grid cell. `mean` and `color` are `null` for no-data cells.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CellData {
    pub row: usize,
    pub col: usize,
    pub count: usize,
    pub mean: Option<f64>,
    pub color: Option<String>,
}

/// Grid of mean yields. `cells[0]` is the northernmost band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridData {
    pub rows: usize,
    pub cols: usize,
    pub bbox: BoundingBox,
    pub cells: Vec<Vec<CellData>>,
}

impl GridData {
    /// Number of cells holding at least one point.
    pub fn filled_cells(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|c| c.mean.is_some())
            .count()
    }
}

/// Legend swatch for one bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LegendSwatch {
    pub label: String,
    pub min: f64,
    pub max: f64,
    pub color: String,
}

/// Color legend: bin edges plus one swatch per bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Legend {
    pub edges: Vec<f64>,
    pub swatches: Vec<LegendSwatch>,
}

/// Grid endpoint payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridResponse {
    pub grid: Option<GridData>,
    pub legend: Option<Legend>,
}

/// Grid endpoint path.
pub const GET_GRID: &str = "/grid";
