//! Data-quality checks for the geo and KPI input tables.
//!
//! Unlike the pipeline, which silently drops bad rows, these checks report
//! every problem with its line number and produce a cleaned copy of the
//! accepted rows.

use std::collections::HashSet;

use log::debug;

use crate::api::{ValidationIssue, ValidationReport};
use crate::parsing::fields::{
    FieldSpec, ENTITY, LATITUDE, LONGITUDE, STATS_CV, STATS_STABILITY, YEAR, YIELD,
};
use crate::parsing::numeric::{round1, round6, to_num};
use crate::parsing::{Row, Table};

/// Rounding that moves a value by more than this is reported as a warning.
const ROUNDING_TOLERANCE: f64 = 0.049;

/// Line number of the first data row (the header is line 1).
const FIRST_DATA_LINE: usize = 2;

fn missing_fields(table: &Table, required: &[FieldSpec]) -> Vec<&'static str> {
    required
        .iter()
        .filter(|f| !f.is_present_in(&table.columns))
        .map(|f| f.name)
        .collect()
}

fn missing_columns_report(table: &Table, missing: &[&str]) -> ValidationReport {
    ValidationReport {
        rows_in: table.rows.len(),
        rows_out: 0,
        errors: vec![ValidationIssue::table(format!(
            "Missing columns: {}",
            missing.join(", ")
        ))],
        warnings: vec![],
        cleaned: Table {
            columns: table.columns.clone(),
            rows: vec![],
        },
    }
}

/// Name of the header that `field` resolves to in `row`, for rewriting.
fn resolved_column(row: &Row, field: &FieldSpec) -> Option<String> {
    let value = field.pick(row);
    if value.is_empty() {
        return None;
    }
    field
        .candidates
        .iter()
        .find_map(|c| row.get(c).filter(|v| *v == value).map(|_| c.to_string()))
        .or_else(|| {
            let lowered: Vec<String> = field.candidates.iter().map(|c| c.to_lowercase()).collect();
            row.iter()
                .find(|(k, v)| *v == value && lowered.contains(&k.to_lowercase()))
                .map(|(k, _)| k.to_string())
        })
}

fn duplicate_key(seen: &mut HashSet<(String, String)>, row: &Row) -> Option<(String, String)> {
    let key = (
        ENTITY.pick(row).trim().to_string(),
        YEAR.pick(row).trim().to_string(),
    );
    if seen.contains(&key) {
        Some(key)
    } else {
        seen.insert(key);
        None
    }
}

/// Validate the geo table.
///
/// Requires entity, year, latitude and longitude columns. Rows with a
/// duplicate `(entity, year)` key, missing coordinates or coordinates out of
/// range are rejected. Accepted coordinates are rounded to six decimals.
pub fn validate_geo(table: &Table) -> ValidationReport {
    let missing = missing_fields(table, &[ENTITY, YEAR, LATITUDE, LONGITUDE]);
    if !missing.is_empty() {
        return missing_columns_report(table, &missing);
    }

    let mut errors = Vec::new();
    let mut cleaned = Vec::new();
    let mut seen = HashSet::new();

    for (i, row) in table.rows.iter().enumerate() {
        let line = i + FIRST_DATA_LINE;

        if let Some((entity, year)) = duplicate_key(&mut seen, row) {
            errors.push(ValidationIssue::at_row(
                line,
                format!("Duplicate entity+year key: ({}, {})", entity, year),
            ));
            continue;
        }

        let (Some(lat), Some(lon)) = (to_num(LATITUDE.pick(row)), to_num(LONGITUDE.pick(row)))
        else {
            errors.push(ValidationIssue::at_row(line, "Empty or non-numeric coordinates"));
            continue;
        };

        if !(-90.0..=90.0).contains(&lat) {
            errors.push(
                ValidationIssue::at_row(line, format!("Latitude out of range [-90, 90]: {}", lat))
                    .with_column(LATITUDE.name),
            );
            continue;
        }
        if !(-180.0..=180.0).contains(&lon) {
            errors.push(
                ValidationIssue::at_row(
                    line,
                    format!("Longitude out of range [-180, 180]: {}", lon),
                )
                .with_column(LONGITUDE.name),
            );
            continue;
        }

        let mut out = row.clone();
        if let Some(col) = resolved_column(row, &LATITUDE) {
            out.insert(col, format!("{:.6}", round6(lat)));
        }
        if let Some(col) = resolved_column(row, &LONGITUDE) {
            out.insert(col, format!("{:.6}", round6(lon)));
        }
        cleaned.push(out);
    }

    debug!(
        "Geo validation: {} rows in, {} accepted, {} errors",
        table.rows.len(),
        cleaned.len(),
        errors.len()
    );

    ValidationReport {
        rows_in: table.rows.len(),
        rows_out: cleaned.len(),
        errors,
        warnings: vec![],
        cleaned: Table {
            columns: table.columns.clone(),
            rows: cleaned,
        },
    }
}

/// Round `value` to one decimal, warning when that moves it noticeably.
fn round_with_warning(
    value: f64,
    line: usize,
    column: &str,
    warnings: &mut Vec<ValidationIssue>,
) -> f64 {
    let rounded = round1(value);
    if (value - rounded).abs() > ROUNDING_TOLERANCE {
        warnings.push(
            ValidationIssue::at_row(line, format!("Rounded to 0.1: {} -> {:.1}", value, rounded))
                .with_column(column),
        );
    }
    rounded
}

/// Validate the KPI (yield) table.
///
/// Requires entity, year and yield columns. Duplicate keys, missing yields
/// and zero yields are errors; yields are rounded to 0.1. Optional percent
/// columns (CV, stability) must lie in `[0, 100]` when present.
pub fn validate_kpi(table: &Table) -> ValidationReport {
    let missing = missing_fields(table, &[ENTITY, YEAR, YIELD]);
    if !missing.is_empty() {
        return missing_columns_report(table, &missing);
    }

    let mut errors = Vec::new();
    let mut warnings = Vec::new();
    let mut cleaned = Vec::new();
    let mut seen = HashSet::new();

    for (i, row) in table.rows.iter().enumerate() {
        let line = i + FIRST_DATA_LINE;

        if let Some((entity, year)) = duplicate_key(&mut seen, row) {
            errors.push(ValidationIssue::at_row(
                line,
                format!("Duplicate entity+year key: ({}, {})", entity, year),
            ));
            continue;
        }

        let Some(y) = to_num(YIELD.pick(row)) else {
            errors.push(ValidationIssue::at_row(line, "Empty yield").with_column(YIELD.name));
            continue;
        };
        if y == 0.0 {
            errors.push(
                ValidationIssue::at_row(line, "Zero yield (excluded from the dataset)")
                    .with_column(YIELD.name),
            );
            continue;
        }

        let mut out = row.clone();
        let y_rounded = round_with_warning(y, line, YIELD.name, &mut warnings);
        if let Some(col) = resolved_column(row, &YIELD) {
            out.insert(col, format!("{:.1}", y_rounded));
        }

        for field in [&STATS_CV, &STATS_STABILITY] {
            let raw = field.pick(row);
            if raw.is_empty() {
                continue;
            }
            let Some(pct) = to_num(raw) else {
                errors.push(
                    ValidationIssue::at_row(line, format!("Invalid number in {}: '{}'", field.name, raw))
                        .with_column(field.name),
                );
                continue;
            };
            if !(0.0..=100.0).contains(&pct) {
                errors.push(
                    ValidationIssue::at_row(line, format!("{} outside 0..100: {}", field.name, pct))
                        .with_column(field.name),
                );
            }
            let rounded = round_with_warning(pct, line, field.name, &mut warnings);
            if let Some(col) = resolved_column(row, field) {
                out.insert(col, format!("{:.1}", rounded));
            }
        }

        cleaned.push(out);
    }

    debug!(
        "KPI validation: {} rows in, {} accepted, {} errors, {} warnings",
        table.rows.len(),
        cleaned.len(),
        errors.len(),
        warnings.len()
    );

    ValidationReport {
        rows_in: table.rows.len(),
        rows_out: cleaned.len(),
        errors,
        warnings,
        cleaned: Table {
            columns: table.columns.clone(),
            rows: cleaned,
        },
    }
}
