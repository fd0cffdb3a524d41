pub mod dashboard;
pub mod diagnostics;
pub mod grid;
pub mod points;
pub mod stats;
pub mod validation;

#[cfg(test)]
mod tests {
    #[test]
    fn test_route_paths_are_distinct() {
        let paths = [
            super::dashboard::GET_DASHBOARD,
            super::points::GET_POINTS,
            super::points::GET_MARKERS,
            super::grid::GET_GRID,
            super::stats::GET_STATS,
            super::diagnostics::GET_JOIN_DIAGNOSTICS,
            super::validation::GET_GEO_VALIDATION,
            super::validation::GET_KPI_VALIDATION,
        ];
        let unique: std::collections::HashSet<_> = paths.iter().collect();
        assert_eq!(unique.len(), paths.len());
        assert!(paths.iter().all(|p| p.starts_with('/')));
    }
}
