//! Logical field lookup across inconsistent upstream headers.
//!
//! Exports from different sources spell the same column differently
//! ("Широта", "lat", "Latitude"). A [`FieldSpec`] lists the accepted
//! spellings in priority order and [`pick`] resolves one against a row.

use super::csv_parser::Row;

/// Priority-ordered header spellings for one logical quantity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub candidates: &'static [&'static str],
}

impl FieldSpec {
    pub const fn new(name: &'static str, candidates: &'static [&'static str]) -> Self {
        Self { name, candidates }
    }

    /// Resolve this field against a row. See [`pick`].
    pub fn pick<'a>(&self, row: &'a Row) -> &'a str {
        pick(row, self.candidates)
    }

    /// Whether any header in `columns` matches this field, exactly or
    /// case-insensitively.
    pub fn is_present_in(&self, columns: &[String]) -> bool {
        self.candidates.iter().any(|cand| {
            let lowered = cand.to_lowercase();
            columns
                .iter()
                .any(|c| c == cand || c.to_lowercase() == lowered)
        })
    }
}

pub const LATITUDE: FieldSpec = FieldSpec::new("latitude", &["Широта", "lat", "latitude"]);

pub const LONGITUDE: FieldSpec = FieldSpec::new(
    "longitude",
    &["Долгота", "lon", "long", "lng", "longitude"],
);

pub const ENTITY: FieldSpec = FieldSpec::new(
    "entity",
    &["Контрагент", "contragent", "client", "Компания"],
);

pub const YEAR: FieldSpec = FieldSpec::new("year", &["Год", "year"]);

pub const YIELD: FieldSpec = FieldSpec::new(
    "yield",
    &[
        "Урожайность_ц_га",
        "Урожайность, ц/га",
        "Yield_c_ha",
        "Yield",
        "yield",
        "y",
    ],
);

// Columns of the precomputed kpi_stats table.
pub const STATS_MEAN: FieldSpec = FieldSpec::new("mean", &["Mean", "mean", "Среднее"]);
pub const STATS_SD: FieldSpec = FieldSpec::new("sd", &["SD", "sd", "Std"]);
pub const STATS_CV: FieldSpec = FieldSpec::new("cv", &["CV_%", "cv", "cvp", "CV"]);
pub const STATS_STABILITY: FieldSpec =
    FieldSpec::new("stability", &["WAASB_proxy_%", "waasb_proxy", "WAASB"]);

/// Return the first non-empty value among `candidates`.
///
/// Two passes: every candidate as an exact key first, then the whole list
/// again comparing lower-cased header names. An exactly-cased header
/// therefore always beats a differently-cased one, whatever their position
/// in the list. Returns `""` when nothing matches.
pub fn pick<'a>(row: &'a Row, candidates: &[&str]) -> &'a str {
    for cand in candidates {
        if let Some(v) = row.get(cand) {
            if !v.is_empty() {
                return v;
            }
        }
    }

    for cand in candidates {
        let lowered = cand.to_lowercase();
        let hit = row
            .iter()
            .find(|(k, v)| !v.is_empty() && k.to_lowercase() == lowered);
        if let Some((_, v)) = hit {
            return v;
        }
    }

    ""
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(pairs: &[(&str, &str)]) -> Row {
        pairs.iter().copied().collect()
    }

    #[test]
    fn test_pick_exact_match() {
        let r = row(&[("lat", "55.1"), ("lon", "37.2")]);
        assert_eq!(pick(&r, LATITUDE.candidates), "55.1");
        assert_eq!(pick(&r, LONGITUDE.candidates), "37.2");
    }

    #[test]
    fn test_pick_case_insensitive() {
        let r = row(&[("LATITUDE", "55.1"), ("Lng", "37.2"), ("ГОД", "2023")]);
        assert_eq!(LATITUDE.pick(&r), "55.1");
        assert_eq!(LONGITUDE.pick(&r), "37.2");
        assert_eq!(YEAR.pick(&r), "2023");
    }

    #[test]
    fn test_pick_exact_beats_case_insensitive() {
        // The lower-cased Cyrillic header ranks higher in the list, but only
        // matches on the case-insensitive pass.
        let r = row(&[("урожайность_ц_га", "10"), ("Yield", "20")]);
        assert_eq!(YIELD.pick(&r), "20");
    }

    #[test]
    fn test_pick_skips_empty_values() {
        let r = row(&[("Широта", ""), ("lat", "51.0")]);
        assert_eq!(LATITUDE.pick(&r), "51.0");
    }

    #[test]
    fn test_pick_no_match_returns_empty() {
        let r = row(&[("foo", "1")]);
        assert_eq!(ENTITY.pick(&r), "");
    }

    #[test]
    fn test_is_present_in() {
        let columns = vec!["контрагент".to_string(), "Year".to_string()];
        assert!(ENTITY.is_present_in(&columns));
        assert!(YEAR.is_present_in(&columns));
        assert!(!YIELD.is_present_in(&columns));
    }
}
