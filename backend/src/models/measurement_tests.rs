use super::*;
use crate::test_support::{dataset, day, row};

#[test]
fn test_granularity_from_str() {
    assert_eq!("site".parse::<Granularity>().unwrap(), Granularity::Site);
    assert_eq!("Town".parse::<Granularity>().unwrap(), Granularity::Site);
    assert_eq!("department".parse::<Granularity>().unwrap(), Granularity::District);
    assert_eq!(" region ".parse::<Granularity>().unwrap(), Granularity::Region);
}

#[test]
fn test_granularity_rejects_unknown_selector() {
    let err = "country".parse::<Granularity>().unwrap_err();
    assert_eq!(err, EngineError::InvalidGranularity("country".into()));
}

#[test]
fn test_granularity_key_selects_field() {
    let r = row("lille", "no2", 10.0, "2023-01-01");
    assert_eq!(Granularity::Site.key(&r), "lille");
    assert_eq!(Granularity::District.key(&r), "lille-district");
    assert_eq!(Granularity::Region.key(&r), "north");
}

#[test]
fn test_dataset_accepts_valid_rows() {
    let ds = Dataset::new(vec![
        row("a", "no2", 1.0, "2023-01-01"),
        row("b", "o3", 2.0, "2023-01-02"),
    ])
    .unwrap();
    assert_eq!(ds.len(), 2);
    assert!(!ds.is_empty());
}

#[test]
fn test_dataset_rejects_whole_batch_on_empty_field() {
    let mut bad = row("b", "o3", 2.0, "2023-01-02");
    bad.sensor_id = "  ".into();
    let err = Dataset::new(vec![row("a", "no2", 1.0, "2023-01-01"), bad]).unwrap_err();
    assert_eq!(
        err,
        EngineError::MalformedRow {
            index: 1,
            field: "sensor_id".into(),
            reason: "is empty".into(),
        }
    );
}

#[test]
fn test_dataset_rejects_non_finite_value() {
    let err = Dataset::new(vec![row("a", "no2", f64::NAN, "2023-01-01")]).unwrap_err();
    assert!(matches!(err, EngineError::MalformedRow { field, .. } if field == "value"));
}

#[test]
fn test_dataset_rejects_inverted_period() {
    let mut bad = row("a", "no2", 1.0, "2023-01-05");
    bad.time_to = day("2023-01-01");
    let err = Dataset::new(vec![bad]).unwrap_err();
    assert!(matches!(err, EngineError::MalformedRow { index: 0, .. }));
}

#[test]
fn test_within_keeps_rows_ending_inside_window() {
    let ds = Dataset::new(vec![
        row("a", "no2", 1.0, "2023-01-01"),
        row("a", "no2", 2.0, "2023-02-01"),
        row("a", "no2", 3.0, "2023-03-01"),
    ])
    .unwrap();
    let window = TimeWindow::new(day("2023-01-15"), day("2023-02-02")).unwrap();
    let inside = ds.within(&window);
    assert_eq!(inside.len(), 1);
    assert_eq!(inside.rows()[0].value, 2.0);
    // the source dataset is untouched
    assert_eq!(ds.len(), 3);
}

#[test]
fn test_without_sentinels_drops_excluded_locations() {
    let mut sentinel = row("x", "no2", 1.0, "2023-01-01");
    sentinel.location_district = "Not_found".into();
    let mut capital = row("y", "no2", 1.0, "2023-01-01");
    capital.location_region = "Île-de-france".into();
    let ds = Dataset::new(vec![sentinel, capital, row("z", "no2", 1.0, "2023-01-01")]).unwrap();

    let filter = DatasetFilter {
        excluded_districts: vec!["Not_found".into()],
        excluded_regions: vec!["Île-de-france".into()],
    };
    let kept = ds.without_sentinels(&filter);
    assert_eq!(kept.len(), 1);
    assert_eq!(kept.rows()[0].location_site, "z");
}

#[test]
fn test_sensor_count_is_distinct() {
    let ds = Dataset::new(vec![
        row("a", "no2", 1.0, "2023-01-01"),
        row("a", "no2", 2.0, "2023-01-02"),
        row("a", "o3", 2.0, "2023-01-02"),
    ])
    .unwrap();
    assert_eq!(ds.sensor_count(), 2);
}

#[test]
fn test_distinct_pollutants_keeps_first_order() {
    let input = vec!["o3".to_string(), "no2".into(), "o3".into()];
    assert_eq!(distinct_pollutants(&input), vec!["o3".to_string(), "no2".into()]);
}

#[test]
fn test_extent_spans_all_rows() {
    let data = dataset(vec![
        row("a", "no2", 1.0, "2023-02-01"),
        row("b", "no2", 1.0, "2023-01-01"),
    ]);
    let extent = data.extent().unwrap();
    assert_eq!(extent.start, day("2023-01-01"));
    assert_eq!(extent.end, day("2023-02-02"));
    assert!(Dataset::empty().extent().is_none());
}
