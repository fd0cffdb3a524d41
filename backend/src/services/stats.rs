//! Descriptive statistics and the stability proxy score.
//!
//! All functions take plain observation slices and return `None` where the
//! value is undefined (empty input, zero mean) instead of a NaN.

use std::collections::{HashMap, HashSet};

use crate::api::{DatasetSummary, JoinedPoint, StatsRow, StatsSummary};
use crate::parsing::fields::{ENTITY, STATS_CV, STATS_MEAN, STATS_SD, STATS_STABILITY, YEAR, YIELD};
use crate::parsing::numeric::{round1, to_num, to_positive};
use crate::parsing::{Row, Table};

/// Upper bound of the stability proxy.
pub const WAASB_PROXY_MAX: f64 = 100.0;

/// Arithmetic mean.
pub fn mean(xs: &[f64]) -> Option<f64> {
    if xs.is_empty() {
        return None;
    }
    Some(xs.iter().sum::<f64>() / xs.len() as f64)
}

/// Population standard deviation (divides by `n`).
pub fn sd(xs: &[f64]) -> Option<f64> {
    let m = mean(xs)?;
    let variance = xs
        .iter()
        .map(|x| {
            let diff = x - m;
            diff * diff
        })
        .sum::<f64>()
        / xs.len() as f64;
    Some(variance.sqrt())
}

/// Coefficient of variation in percent, rounded to one decimal.
/// `None` for empty input or a mean of exactly zero.
pub fn cvp(xs: &[f64]) -> Option<f64> {
    let m = mean(xs)?;
    if m == 0.0 {
        return None;
    }
    let s = sd(xs)?;
    Some(round1(100.0 * s / m))
}

/// Stability proxy: `10000 / cvp`, bounded to `[0, 100]` and rounded.
///
/// This stands in for a proper WAASB stability index and is only an
/// approximation. No variability signal (cvp missing or `<= 0`) scores as
/// fully stable.
pub fn waasb_proxy(xs: &[f64]) -> f64 {
    match cvp(xs) {
        Some(c) if c > 0.0 => round1((10_000.0 / c).clamp(0.0, WAASB_PROXY_MAX)),
        _ => WAASB_PROXY_MAX,
    }
}

/// Rounded mean and sd together with cvp and the stability proxy.
pub fn summarize(xs: &[f64]) -> StatsSummary {
    StatsSummary {
        mean: mean(xs).map(round1),
        sd: sd(xs).map(round1),
        cvp: cvp(xs),
        waasb_proxy: waasb_proxy(xs),
    }
}

/// Per-entity statistics over the yield table.
///
/// Only finite, strictly positive yields count as observations. Entities are
/// listed in order of first appearance; rows with an empty entity are
/// skipped. `year` restricts the rows to one (trimmed) year.
pub fn entity_stats(rows: &[Row], year: Option<&str>) -> Vec<StatsRow> {
    let mut order: Vec<String> = Vec::new();
    let mut groups: HashMap<String, Vec<f64>> = HashMap::new();

    for row in rows {
        if let Some(y) = year {
            if YEAR.pick(row).trim() != y.trim() {
                continue;
            }
        }
        let entity = ENTITY.pick(row).trim();
        if entity.is_empty() {
            continue;
        }
        let Some(value) = to_positive(YIELD.pick(row)) else {
            continue;
        };

        groups
            .entry(entity.to_string())
            .or_insert_with(|| {
                order.push(entity.to_string());
                Vec::new()
            })
            .push(value);
    }

    order
        .into_iter()
        .filter_map(|entity| {
            let xs = groups.remove(&entity)?;
            Some(StatsRow::from_summary(entity, xs.len(), summarize(&xs)))
        })
        .collect()
}

/// Read a precomputed `kpi_stats` table as-is.
///
/// Rows without an entity are skipped; unparseable numbers stay `None`.
pub fn parse_precomputed_stats(table: &Table) -> Vec<StatsRow> {
    table
        .rows
        .iter()
        .filter_map(|row| {
            let entity = ENTITY.pick(row).trim();
            if entity.is_empty() {
                return None;
            }
            Some(StatsRow {
                entity: entity.to_string(),
                observations: None,
                mean: to_num(STATS_MEAN.pick(row)),
                sd: to_num(STATS_SD.pick(row)),
                cvp: to_num(STATS_CV.pick(row)),
                waasb_proxy: to_num(STATS_STABILITY.pick(row)),
            })
        })
        .collect()
}

/// Headline numbers over joined points.
pub fn summarize_dataset(points: &[JoinedPoint]) -> DatasetSummary {
    let yields: Vec<f64> = points.iter().map(|p| p.yield_value).collect();
    let entities: HashSet<&str> = points.iter().map(|p| p.entity_key.as_str()).collect();
    let years: HashSet<&str> = points.iter().map(|p| p.year.as_str()).collect();

    DatasetSummary {
        point_count: points.len(),
        entity_count: entities.len(),
        year_count: years.len(),
        avg_yield: mean(&yields).map(round1),
        min_yield: yields.iter().copied().reduce(f64::min),
        max_yield: yields.iter().copied().reduce(f64::max),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parsing::parse_csv;

    #[test]
    fn test_mean_and_sd() {
        let xs = [1.0, 2.0, 3.0, 4.0, 5.0];
        assert_eq!(mean(&xs), Some(3.0));
        assert!((sd(&xs).unwrap() - std::f64::consts::SQRT_2).abs() < 1e-12);
    }

    #[test]
    fn test_empty_inputs() {
        assert_eq!(mean(&[]), None);
        assert_eq!(sd(&[]), None);
        assert_eq!(cvp(&[]), None);
        assert_eq!(waasb_proxy(&[]), 100.0);
    }

    #[test]
    fn test_constant_series_is_fully_stable() {
        let xs = [5.0, 5.0, 5.0];
        assert_eq!(cvp(&xs), Some(0.0));
        assert_eq!(waasb_proxy(&xs), 100.0);
    }

    #[test]
    fn test_zero_mean_has_no_cvp() {
        let xs = [-1.0, 1.0];
        assert_eq!(mean(&xs), Some(0.0));
        assert_eq!(cvp(&xs), None);
        assert_eq!(waasb_proxy(&xs), 100.0);
    }

    #[test]
    fn test_cvp_and_proxy_values() {
        // mean 40, population sd 10 -> cv 25% -> proxy 400, clamped to 100
        let xs = [30.0, 50.0];
        assert_eq!(cvp(&xs), Some(25.0));
        assert_eq!(waasb_proxy(&xs), 100.0);

        let xs = [1.0, 1.0, 1.0, 397.0];
        // mean 100, sd = sqrt((3*99^2 + 297^2)/4) = 171.47... -> cv 171.5
        assert_eq!(cvp(&xs), Some(171.5));
        assert_eq!(waasb_proxy(&xs), 58.3);
    }

    #[test]
    fn test_summarize_rounds() {
        // mean 41, sd sqrt(6) = 2.449..., cv 5.97...
        let s = summarize(&[38.0, 41.0, 44.0]);
        assert_eq!(s.mean, Some(41.0));
        assert_eq!(s.sd, Some(2.4));
        assert_eq!(s.cvp, Some(6.0));
        assert_eq!(s.waasb_proxy, 100.0);
    }

    #[test]
    fn test_entity_stats_groups_in_first_seen_order() {
        let kpi = parse_csv(
            "Контрагент,Год,Урожайность_ц_га\nB,2022,30\nA,2022,40\nB,2023,50\nA,2023,0\nC,2023,\n,2023,10\n",
        );
        let rows = entity_stats(&kpi.rows, None);

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].entity, "B");
        assert_eq!(rows[0].observations, Some(2));
        assert_eq!(rows[0].mean, Some(40.0));
        assert_eq!(rows[0].sd, Some(10.0));
        assert_eq!(rows[0].cvp, Some(25.0));
        assert_eq!(rows[1].entity, "A");
        assert_eq!(rows[1].observations, Some(1));
        assert_eq!(rows[1].waasb_proxy, Some(100.0));
    }

    #[test]
    fn test_entity_stats_year_filter() {
        let kpi = parse_csv("client,year,yield\nA,2022,30\nA,2023,50\n");
        let rows = entity_stats(&kpi.rows, Some("2023"));
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].mean, Some(50.0));
    }

    #[test]
    fn test_parse_precomputed_stats() {
        let table = parse_csv(
            "Контрагент,Mean,SD,CV_%,WAASB_proxy_%\nАгро,41.5,3.2,7.7,100\nНива,,x,12,83.3\n,1,1,1,1\n",
        );
        let rows = parse_precomputed_stats(&table);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].mean, Some(41.5));
        assert_eq!(rows[0].observations, None);
        assert_eq!(rows[1].mean, None);
        assert_eq!(rows[1].sd, None);
        assert_eq!(rows[1].waasb_proxy, Some(83.3));
    }

    #[test]
    fn test_summarize_dataset() {
        let point = |entity: &str, year: &str, y: f64| JoinedPoint {
            lat: 0.0,
            lon: 0.0,
            entity_key: entity.to_string(),
            year: year.to_string(),
            yield_value: y,
        };
        let points = vec![
            point("A", "2022", 30.0),
            point("A", "2023", 41.0),
            point("B", "2023", 50.0),
        ];
        let summary = summarize_dataset(&points);
        assert_eq!(summary.point_count, 3);
        assert_eq!(summary.entity_count, 2);
        assert_eq!(summary.year_count, 2);
        assert_eq!(summary.avg_yield, Some(40.3));
        assert_eq!(summary.min_yield, Some(30.0));
        assert_eq!(summary.max_yield, Some(50.0));

        let empty = summarize_dataset(&[]);
        assert_eq!(empty.avg_yield, None);
        assert_eq!(empty.min_yield, None);
    }
}
