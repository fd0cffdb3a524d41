//! Key overlap report between the geo and KPI tables.

use std::collections::BTreeSet;

use crate::api::{JoinDiagnostics, KeySample};
use crate::parsing::fields::{ENTITY, YEAR};
use crate::parsing::Row;

/// Maximum number of unmatched keys listed per side.
pub const MAX_SAMPLES: usize = 10;

const NO_MATCH_HINT: &str =
    "No matching keys: check the entity and year columns and their values in both tables";

fn key_set(rows: &[Row]) -> BTreeSet<KeySample> {
    rows.iter()
        .filter_map(|row| {
            let entity = ENTITY.pick(row).trim();
            let year = YEAR.pick(row).trim();
            if entity.is_empty() || year.is_empty() {
                return None;
            }
            Some(KeySample {
                entity: entity.to_string(),
                year: year.to_string(),
            })
        })
        .collect()
}

/// Count distinct `(entity, year)` keys on each side and their overlap.
///
/// Samples are the first keys (sorted) present on only one side.
pub fn join_diagnostics(geo_rows: &[Row], kpi_rows: &[Row]) -> JoinDiagnostics {
    let geo = key_set(geo_rows);
    let kpi = key_set(kpi_rows);
    let matched = geo.intersection(&kpi).count();

    JoinDiagnostics {
        geo_keys: geo.len(),
        kpi_keys: kpi.len(),
        matched,
        only_geo_samples: geo.difference(&kpi).take(MAX_SAMPLES).cloned().collect(),
        only_kpi_samples: kpi.difference(&geo).take(MAX_SAMPLES).cloned().collect(),
        hint: (matched == 0).then(|| NO_MATCH_HINT.to_string()),
    }
}
