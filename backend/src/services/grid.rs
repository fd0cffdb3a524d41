//! Spatial binning of joined points into a fixed grid of mean yields.

use serde::{Deserialize, Serialize};

use crate::api::{BoundingBox, CellData, GridData, JoinedPoint, Legend};

/// Default grid height in cells.
pub const DEFAULT_GRID_ROWS: usize = 10;
/// Default grid width in cells.
pub const DEFAULT_GRID_COLS: usize = 20;
/// Largest accepted grid height or width.
pub const MAX_GRID_DIM: usize = 500;
/// Minimum span used for a degenerate (zero-width) axis.
pub const SPAN_EPSILON: f64 = 1e-9;

/// Grid dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridConfig {
    pub rows: usize,
    pub cols: usize,
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            rows: DEFAULT_GRID_ROWS,
            cols: DEFAULT_GRID_COLS,
        }
    }
}

impl GridConfig {
    /// Build a config, clamping each dimension to `1..=MAX_GRID_DIM`.
    pub fn new(rows: usize, cols: usize) -> Self {
        Self {
            rows: rows.clamp(1, MAX_GRID_DIM),
            cols: cols.clamp(1, MAX_GRID_DIM),
        }
    }

    /// Number of cells in the grid.
    pub fn cell_count(&self) -> usize {
        self.rows.saturating_mul(self.cols)
    }
}

impl BoundingBox {
    /// Extent of `points`, or `None` when there are none.
    pub fn from_points(points: &[JoinedPoint]) -> Option<Self> {
        let first = points.first()?;
        let mut bbox = BoundingBox {
            min_lat: first.lat,
            max_lat: first.lat,
            min_lon: first.lon,
            max_lon: first.lon,
        };

        for p in &points[1..] {
            bbox.min_lat = bbox.min_lat.min(p.lat);
            bbox.max_lat = bbox.max_lat.max(p.lat);
            bbox.min_lon = bbox.min_lon.min(p.lon);
            bbox.max_lon = bbox.max_lon.max(p.lon);
        }

        Some(bbox)
    }

    pub fn lat_span(&self) -> f64 {
        (self.max_lat - self.min_lat).max(SPAN_EPSILON)
    }

    pub fn lon_span(&self) -> f64 {
        (self.max_lon - self.min_lon).max(SPAN_EPSILON)
    }
}

/// Running sum and count for one cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct GridCell {
    pub sum: f64,
    pub count: usize,
}

impl GridCell {
    fn add(&mut self, value: f64) {
        self.sum += value;
        self.count += 1;
    }

    /// Mean yield, or `None` for a no-data cell.
    pub fn mean(&self) -> Option<f64> {
        if self.count > 0 {
            Some(self.sum / self.count as f64)
        } else {
            None
        }
    }
}

/// Row-major arena of cells spanning a bounding box.
#[derive(Debug, Clone, PartialEq)]
pub struct YieldGrid {
    config: GridConfig,
    bbox: BoundingBox,
    cells: Vec<GridCell>,
}

impl YieldGrid {
    /// An empty grid over `bbox`.
    pub fn new(bbox: BoundingBox, config: GridConfig) -> Self {
        let config = GridConfig::new(config.rows, config.cols);
        Self {
            config,
            bbox,
            cells: vec![GridCell::default(); config.cell_count()],
        }
    }

    /// Accumulate `points` into a grid over their own bounding box.
    /// Returns `None` for an empty point set.
    pub fn from_points(points: &[JoinedPoint], config: GridConfig) -> Option<Self> {
        let bbox = BoundingBox::from_points(points)?;
        let mut grid = Self::new(bbox, config);
        for p in points {
            grid.add(p.lat, p.lon, p.yield_value);
        }
        Some(grid)
    }

    /// Cell `(row, col)` for a coordinate. Row 0 is the northernmost band,
    /// column 0 the westernmost; indices outside the box are clamped.
    pub fn cell_index(&self, lat: f64, lon: f64) -> (usize, usize) {
        let rows = self.config.rows;
        let cols = self.config.cols;
        let lat_frac = (lat - self.bbox.min_lat) / self.bbox.lat_span();
        let lon_frac = (lon - self.bbox.min_lon) / self.bbox.lon_span();

        let row = clamp_index(((1.0 - lat_frac) * rows as f64).floor(), rows);
        let col = clamp_index((lon_frac * cols as f64).floor(), cols);
        (row, col)
    }

    pub fn add(&mut self, lat: f64, lon: f64, value: f64) {
        let (row, col) = self.cell_index(lat, lon);
        let idx = row * self.config.cols + col;
        self.cells[idx].add(value);
    }

    pub fn cell(&self, row: usize, col: usize) -> Option<&GridCell> {
        if row >= self.config.rows || col >= self.config.cols {
            return None;
        }
        self.cells.get(row * self.config.cols + col)
    }

    pub fn config(&self) -> GridConfig {
        self.config
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }

    /// Means of all cells with data, in row-major order.
    pub fn means(&self) -> Vec<f64> {
        self.cells.iter().filter_map(GridCell::mean).collect()
    }

    /// `(min, max)` of the cell means, or `None` when every cell is empty.
    pub fn mean_range(&self) -> Option<(f64, f64)> {
        self.means().into_iter().fold(None, |acc, m| match acc {
            None => Some((m, m)),
            Some((lo, hi)) => Some((lo.min(m), hi.max(m))),
        })
    }

    /// Render to the serializable grid, coloring cells through `legend`.
    pub fn to_grid_data(&self, legend: Option<&Legend>) -> GridData {
        let cols = self.config.cols;
        let cells = self
            .cells
            .chunks(cols)
            .enumerate()
            .map(|(row, band)| {
                band.iter()
                    .enumerate()
                    .map(|(col, cell)| {
                        let mean = cell.mean();
                        CellData {
                            row,
                            col,
                            count: cell.count,
                            mean,
                            color: mean.and_then(|m| legend.map(|l| l.color_for(m).to_string())),
                        }
                    })
                    .collect()
            })
            .collect();

        GridData {
            rows: self.config.rows,
            cols,
            bbox: self.bbox,
            cells,
        }
    }
}

fn clamp_index(raw: f64, len: usize) -> usize {
    if raw.is_nan() || raw < 0.0 {
        0
    } else {
        (raw as usize).min(len - 1)
    }
}
