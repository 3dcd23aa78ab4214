use crate::models::Granularity;
use crate::services::ranking::*;
use crate::services::reference::References;
use crate::test_support::{dataset, pollutants, row, sensor_row};

fn three_locations() -> crate::models::Dataset {
    dataset(vec![
        row("L1", "A", 10.0, "2023-01-01"),
        row("L1", "B", 20.0, "2023-01-01"),
        row("L2", "A", 5.0, "2023-01-01"),
        row("L2", "B", 5.0, "2023-01-01"),
        row("L3", "A", 8.0, "2023-01-01"),
        row("L3", "B", 8.0, "2023-01-01"),
    ])
}

#[test]
fn test_concentration_top_n_by_total() {
    let table = rank_by_concentration(
        &three_locations(),
        Granularity::Site,
        &pollutants(&["A", "B"]),
        2,
        &References::none(),
    );

    assert_eq!(table.display_order, vec!["L1", "L3"]);
    assert_eq!(table.rows.len(), 4);
    assert_eq!(table.rows[0].location_total, 30.0);
    assert_eq!(table.rows[2].location_total, 16.0);
    assert!(table.rows.iter().all(|r| r.location_key != "L2"));
}

#[test]
fn test_concentration_with_reference() {
    let table = rank_by_concentration(
        &three_locations(),
        Granularity::Site,
        &pollutants(&["A", "B"]),
        2,
        &References::new(["L2"]),
    );

    assert_eq!(table.display_order, vec!["L1", "L3", "SELECTED: L2"]);
    let reference: Vec<_> = table.rows_for("SELECTED: L2").collect();
    assert_eq!(reference.len(), 2);
    assert!(reference.iter().all(|r| r.is_reference && r.metric_value == 5.0));
}

#[test]
fn test_coverage_excludes_partial_location_unless_referenced() {
    let mut rows = three_locations().rows().to_vec();
    rows.push(row("Z", "A", 100.0, "2023-01-01"));
    let data = dataset(rows);
    let requested = pollutants(&["A", "B"]);

    let table = rank_by_concentration(&data, Granularity::Site, &requested, 10, &References::none());
    assert!(!table.display_order.iter().any(|k| k == "Z"));

    let table = rank_by_concentration(&data, Granularity::Site, &requested, 10, &References::new(["Z"]));
    assert_eq!(table.display_order.last().map(String::as_str), Some("SELECTED: Z"));
    assert_eq!(table.rows_for("SELECTED: Z").count(), 1);
}

#[test]
fn test_ties_keep_first_appearance() {
    let data = dataset(vec![
        row("b", "A", 5.0, "2023-01-01"),
        row("a", "A", 5.0, "2023-01-01"),
        row("c", "A", 5.0, "2023-01-01"),
    ]);
    let table = rank_by_concentration(&data, Granularity::Site, &pollutants(&["A"]), 2, &References::none());
    assert_eq!(table.display_order, vec!["b", "a"]);
}

#[test]
fn test_no_qualifying_location_is_empty() {
    let table = rank_by_concentration(
        &three_locations(),
        Granularity::Site,
        &pollutants(&["C"]),
        5,
        &References::none(),
    );
    assert!(table.is_empty());
    assert!(table.display_order.is_empty());
}

#[test]
fn test_duplicate_requested_pollutants_ignored() {
    let table = rank_by_concentration(
        &three_locations(),
        Granularity::Site,
        &pollutants(&["A", "A"]),
        1,
        &References::none(),
    );
    assert_eq!(table.display_order, vec!["L1"]);
    assert_eq!(table.rows.len(), 1);
}

#[test]
fn test_region_granularity_merges_sites() {
    let table = rank_by_concentration(
        &three_locations(),
        Granularity::Region,
        &pollutants(&["A"]),
        5,
        &References::none(),
    );
    assert_eq!(table.display_order, vec!["north"]);
    // mean of 10, 5 and 8
    assert!((table.rows[0].metric_value - 23.0 / 3.0).abs() < 1e-12);
}

#[test]
fn test_sensor_ranking_counts_distinct_sensors() {
    let data = dataset(vec![
        sensor_row("a", "A", "s1"),
        sensor_row("a", "A", "s2"),
        sensor_row("a", "B", "s3"),
        sensor_row("b", "A", "s4"),
        sensor_row("b", "B", "s5"),
        sensor_row("b", "B", "s5"),
    ]);
    let table = rank_by_sensor_coverage(&data, Granularity::Site, &pollutants(&["A", "B"]));
    assert_eq!(table.display_order, vec!["a", "b"]);
    assert_eq!(table.rows[0].metric_value, 2.0);
    assert_eq!(table.rows[0].location_total, 3.0);
    assert_eq!(table.rows[2].location_total, 2.0);
}

#[test]
fn test_sensor_ranking_cap() {
    let rows = (0..20)
        .map(|i| sensor_row(&format!("site{:02}", i), "A", &format!("s{}", i)))
        .collect();
    let data = dataset(rows);

    let table = rank_by_sensor_coverage(&data, Granularity::Site, &pollutants(&["A"]));
    assert_eq!(table.display_order.len(), SENSOR_DISPLAY_CAP);

    let table = rank_by_sensor_coverage_with_cap(&data, Granularity::Site, &pollutants(&["A"]), 3);
    assert_eq!(table.display_order, vec!["site00", "site01", "site02"]);
}

#[test]
fn test_sensor_ranking_is_highest_count_first() {
    let data = dataset(vec![
        sensor_row("few", "A", "s1"),
        sensor_row("many", "A", "s2"),
        sensor_row("many", "A", "s3"),
        sensor_row("many", "A", "s4"),
        sensor_row("some", "A", "s5"),
        sensor_row("some", "A", "s6"),
    ]);
    let table = rank_by_sensor_coverage_with_cap(&data, Granularity::Site, &pollutants(&["A"]), 2);
    assert_eq!(table.display_order, vec!["many", "some"]);

    let ascending: Vec<_> = table.display_order.iter().rev().map(String::as_str).collect();
    assert_eq!(ascending, vec!["some", "many"]);
}

#[test]
fn test_rows_grouped_in_requested_pollutant_order() {
    let table = rank_by_concentration(
        &three_locations(),
        Granularity::Site,
        &pollutants(&["B", "A"]),
        1,
        &References::none(),
    );
    let ids: Vec<_> = table.rows.iter().map(|r| r.pollutant_id.as_str()).collect();
    assert_eq!(ids, vec!["B", "A"]);
    assert_eq!(table.rows[0].x_key, "L1_B");
}
