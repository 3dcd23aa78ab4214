//! LocalRepository and dataset services under concurrent use.

mod support;

use std::io::Write;
use std::sync::Arc;

use aqd_rust::api::DatasetId;
use aqd_rust::db::repositories::LocalRepository;
use aqd_rust::db::repository::{DatasetRepository, RepositoryError};
use aqd_rust::db::services;
use aqd_rust::models::DatasetFilter;
use aqd_rust::parsing::parse_measurements_csv_file;
use support::{dataset, row};

#[tokio::test]
async fn concurrent_stores_get_distinct_ids() {
    let repo = Arc::new(LocalRepository::new());
    let mut handles = Vec::new();
    for i in 0..16 {
        let repo = Arc::clone(&repo);
        handles.push(tokio::spawn(async move {
            let data = dataset(vec![row(&format!("site-{}", i), "no2", i as f64, "2023-01-01")]);
            repo.store_dataset(&format!("set-{}", i), data).await.unwrap()
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        ids.push(handle.await.unwrap().dataset_id);
    }
    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 16);
    assert_eq!(repo.list_datasets().await.unwrap().len(), 16);
}

#[tokio::test]
async fn identical_content_is_stored_once() {
    let repo = LocalRepository::new();
    let data = dataset(vec![row("a", "no2", 1.0, "2023-01-01")]);

    let first = repo.store_dataset("first", data.clone()).await.unwrap();
    let second = repo.store_dataset("second", data).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(repo.dataset_count(), 1);

    let changed = dataset(vec![row("a", "no2", 2.0, "2023-01-01")]);
    let third = repo.store_dataset("third", changed).await.unwrap();
    assert_ne!(third.dataset_id, first.dataset_id);
    assert_ne!(third.checksum, first.checksum);
}

#[tokio::test]
async fn unhealthy_store_is_retryable() {
    let repo = LocalRepository::new();
    repo.set_healthy(false);

    assert!(!services::health_check(&repo).await.unwrap());
    let err = services::list_datasets(&repo).await.unwrap_err();
    assert!(err.is_retryable());
    assert!(matches!(err, RepositoryError::InternalError { .. }));

    repo.set_healthy(true);
    assert!(services::list_datasets(&repo).await.unwrap().is_empty());
}

#[tokio::test]
async fn missing_dataset_is_not_found() {
    let repo = LocalRepository::new();
    let err = services::get_dataset(&repo, DatasetId::new(9)).await.unwrap_err();
    assert!(matches!(err, RepositoryError::NotFound { .. }));
    assert_eq!(err.context().operation.as_deref(), Some("get_dataset"));
}

#[tokio::test]
async fn csv_file_round_trip_through_store() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        "town,department,region,sensor_id,pollutant_name,pollutant_units,value,datetime_from,datetime_to"
    )
    .unwrap();
    writeln!(file, "Albi,Tarn,Occitanie,s1,no2,µg/m³,12.5,2023-01-01T00:00:00Z,2023-01-01T01:00:00Z").unwrap();
    writeln!(file, "Nowhere,Not_found,Occitanie,s2,no2,µg/m³,3.0,2023-01-01T00:00:00Z,2023-01-01T01:00:00Z").unwrap();
    file.flush().unwrap();

    let data = parse_measurements_csv_file(file.path()).unwrap();
    assert_eq!(data.len(), 2);

    let repo = LocalRepository::new();
    let filter = DatasetFilter {
        excluded_districts: vec!["Not_found".to_string()],
        excluded_regions: vec![],
    };
    let info = services::store_dataset(&repo, "albi", data, &filter).await.unwrap();
    assert_eq!(info.row_count, 1);

    let stored = services::get_dataset(&repo, info.dataset_id).await.unwrap();
    assert_eq!(stored.rows()[0].location_site, "Albi");
    assert_eq!(stored.rows()[0].value, 12.5);
}
