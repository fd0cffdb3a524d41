//! End-to-end pipeline tests: source -> inputs -> dashboard.

mod support;

use yieldmap::api::StatsOrigin;
use yieldmap::data::{load_inputs, DatasetKind, InMemorySource};
use yieldmap::services::{build_dashboard, DashboardOptions, StatsMode};

fn fixture_source() -> InMemorySource {
    let source = InMemorySource::with_texts(support::GEO_CSV, support::KPI_CSV);
    source.set(DatasetKind::KpiStats, support::KPI_STATS_CSV);
    source
}

#[tokio::test]
async fn test_load_inputs_from_memory() {
    let inputs = load_inputs(&fixture_source()).await.unwrap();
    assert!(inputs.geo.contains("Агро"));
    assert!(inputs.kpi_stats.is_some());

    let empty = load_inputs(&InMemorySource::new()).await.unwrap();
    assert_eq!(empty.geo, "");
    assert_eq!(empty.kpi, "");
    assert!(empty.kpi_stats.is_none());
}

#[tokio::test]
async fn test_full_dashboard() {
    let inputs = load_inputs(&fixture_source()).await.unwrap();
    let data = build_dashboard(&inputs, &DashboardOptions::default());

    // Колос has a zero yield and Рассвет no latitude
    assert_eq!(data.points.len(), 3);
    assert_eq!(data.markers.len(), 4);
    assert_eq!(data.points[0].entity_key, "Агро");
    assert_eq!(data.points[0].year, "2022");

    assert_eq!(data.summary.point_count, 3);
    assert_eq!(data.summary.entity_count, 2);
    assert_eq!(data.summary.year_count, 2);
    assert_eq!(data.summary.avg_yield, Some(36.2));
    assert_eq!(data.summary.min_yield, Some(29.0));
    assert_eq!(data.summary.max_yield, Some(41.5));

    let diag = &data.diagnostics;
    assert_eq!((diag.geo_keys, diag.kpi_keys, diag.matched), (5, 5, 4));
    assert_eq!(diag.only_geo_samples[0].entity, "Рассвет");
    assert_eq!(diag.only_kpi_samples[0].entity, "Заря");
    assert!(diag.hint.is_none());

    let grid = data.grid.as_ref().unwrap();
    assert_eq!(grid.filled_cells(), 2);
    // Агро is the north-west corner, Нива the south-east one
    assert_eq!(grid.cells[0][0].count, 2);
    assert_eq!(grid.cells[9][19].mean, Some(29.0));

    let legend = data.legend.as_ref().unwrap();
    assert_eq!(legend.edges.len(), 6);
    assert_eq!(legend.edges[0], 29.0);
    assert_eq!(grid.cells[0][0].color.as_deref(), Some(legend.swatches[4].color.as_str()));
    assert_eq!(grid.cells[9][19].color.as_deref(), Some(legend.swatches[0].color.as_str()));

    let stats = data.stats.unwrap();
    assert_eq!(stats.origin, StatsOrigin::Computed);
    let entities: Vec<&str> = stats.rows.iter().map(|r| r.entity.as_str()).collect();
    assert_eq!(entities, vec!["Агро", "Нива", "Заря"]);
    assert_eq!(stats.rows[0].observations, Some(2));
}

#[tokio::test]
async fn test_year_filter_and_precomputed_stats() {
    let inputs = load_inputs(&fixture_source()).await.unwrap();
    let options = DashboardOptions {
        year: Some("2023".to_string()),
        stats: StatsMode::Precomputed,
        ..DashboardOptions::default()
    };
    let data = build_dashboard(&inputs, &options);

    assert_eq!(data.points.len(), 2);
    assert_eq!(data.markers.len(), 3);
    assert_eq!(data.summary.year_count, 1);

    let stats = data.stats.unwrap();
    assert_eq!(stats.origin, StatsOrigin::Precomputed);
    assert_eq!(stats.rows.len(), 2);
    assert_eq!(stats.rows[0].mean, Some(39.9));
}

#[tokio::test]
async fn test_precomputed_without_table_falls_back() {
    let source = fixture_source();
    source.remove(DatasetKind::KpiStats);
    let inputs = load_inputs(&source).await.unwrap();

    let options = DashboardOptions {
        stats: StatsMode::Precomputed,
        ..DashboardOptions::default()
    };
    let data = build_dashboard(&inputs, &options);
    assert_eq!(data.stats.unwrap().origin, StatsOrigin::Computed);
}

#[tokio::test]
async fn test_markers_only_mode() {
    let inputs = load_inputs(&fixture_source()).await.unwrap();
    let options = DashboardOptions {
        join_yield: false,
        ..DashboardOptions::default()
    };
    let data = build_dashboard(&inputs, &options);
    assert!(data.points.is_empty());
    assert!(data.grid.is_none());
    assert!(data.legend.is_none());
    assert_eq!(data.markers.len(), 4);
}
