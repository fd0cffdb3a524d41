//! Composite-key join of the geo table with the yield table.

use std::collections::HashMap;

use log::debug;

use crate::api::{GeoPoint, JoinedPoint};
use crate::parsing::fields::{ENTITY, LATITUDE, LONGITUDE, YEAR, YIELD};
use crate::parsing::numeric::{to_num, to_positive};
use crate::parsing::Row;

const KEY_SEPARATOR: &str = "||";

/// Build the composite join key from raw entity and year values.
pub fn composite_key(entity: &str, year: &str) -> String {
    format!("{}{}{}", entity.trim(), KEY_SEPARATOR, year.trim())
}

fn row_key(row: &Row) -> String {
    composite_key(ENTITY.pick(row), YEAR.pick(row))
}

/// Index positive yields by composite key.
///
/// Rows without a finite, strictly positive yield are skipped. On duplicate
/// keys the last valid row wins; a later invalid row never erases an earlier
/// valid one.
pub fn build_yield_index(rows: &[Row]) -> HashMap<String, f64> {
    let mut index = HashMap::with_capacity(rows.len());
    for row in rows {
        if let Some(y) = to_positive(YIELD.pick(row)) {
            index.insert(row_key(row), y);
        }
    }
    index
}

/// Resolve a geo row into a point, or `None` when either coordinate is missing.
pub fn geo_point(row: &Row) -> Option<GeoPoint> {
    let lat = to_num(LATITUDE.pick(row))?;
    let lon = to_num(LONGITUDE.pick(row))?;
    Some(GeoPoint {
        lat,
        lon,
        entity_key: ENTITY.pick(row).trim().to_string(),
        year: YEAR.pick(row).trim().to_string(),
    })
}

/// Every geo row with valid coordinates, in input order. Used for plain
/// markers when no yield join is wanted.
pub fn extract_geo_points(rows: &[Row]) -> Vec<GeoPoint> {
    rows.iter().filter_map(geo_point).collect()
}

/// Inner join of geo rows with yield rows on `(entity, year)`.
///
/// Output follows geo-row order and each geo row yields at most one point.
/// Unmatched rows on either side are dropped without being reported.
pub fn join_points(geo_rows: &[Row], yield_rows: &[Row]) -> Vec<JoinedPoint> {
    let index = build_yield_index(yield_rows);

    let points: Vec<JoinedPoint> = geo_rows
        .iter()
        .filter_map(|row| {
            let point = geo_point(row)?;
            let y = *index.get(&composite_key(&point.entity_key, &point.year))?;
            Some(JoinedPoint::from_geo(point, y))
        })
        .collect();

    debug!(
        "Joined {} of {} geo rows against {} yield keys",
        points.len(),
        geo_rows.len(),
        index.len()
    );

    points
}
