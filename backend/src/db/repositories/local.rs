//! In-memory local repository implementation.
//!
//! Datasets are kept in a `BTreeMap` keyed by id behind a `parking_lot`
//! read-write lock. Cloning the repository shares the same store.

use async_trait::async_trait;
use parking_lot::RwLock;
use std::collections::BTreeMap;
use std::sync::Arc;

use crate::api::{DatasetId, DatasetInfo};
use crate::db::checksum::dataset_checksum;
use crate::db::repository::{DatasetRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::models::Dataset;

/// In-memory local repository.
///
/// # Example
/// ```
/// use aqd_rust::db::repositories::LocalRepository;
/// use aqd_rust::db::repository::DatasetRepository;
/// use aqd_rust::models::Dataset;
///
/// let rt = tokio::runtime::Runtime::new().unwrap();
/// rt.block_on(async {
///     let repo = LocalRepository::new();
///     let info = repo.store_dataset("empty", Dataset::empty()).await.unwrap();
///     assert_eq!(repo.list_datasets().await.unwrap(), vec![info]);
/// });
/// ```
#[derive(Clone, Default)]
pub struct LocalRepository {
    data: Arc<RwLock<LocalData>>,
}

struct StoredDataset {
    info: DatasetInfo,
    dataset: Dataset,
}

struct LocalData {
    datasets: BTreeMap<DatasetId, StoredDataset>,
    next_dataset_id: DatasetId,
    is_healthy: bool,
}

impl Default for LocalData {
    fn default() -> Self {
        Self {
            datasets: BTreeMap::new(),
            next_dataset_id: DatasetId(1),
            is_healthy: true,
        }
    }
}

impl LocalRepository {
    /// Create a new empty local repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the health status for testing store failures.
    pub fn set_healthy(&self, healthy: bool) {
        self.data.write().is_healthy = healthy;
    }

    /// Clear all data from the repository.
    pub fn clear(&self) {
        let mut data = self.data.write();
        let is_healthy = data.is_healthy;
        *data = LocalData {
            is_healthy,
            ..Default::default()
        };
    }

    pub fn dataset_count(&self) -> usize {
        self.data.read().datasets.len()
    }

    fn ensure_healthy(&self, operation: &str) -> RepositoryResult<()> {
        if self.data.read().is_healthy {
            Ok(())
        } else {
            Err(RepositoryError::internal(
                "local repository is marked unhealthy",
                ErrorContext::new(operation).retryable(),
            ))
        }
    }

    fn not_found(operation: &str, id: DatasetId) -> RepositoryError {
        RepositoryError::not_found(
            format!("dataset {} does not exist", id),
            ErrorContext::new(operation)
                .with_entity("dataset")
                .with_entity_id(id),
        )
    }
}

#[async_trait]
impl DatasetRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(self.data.read().is_healthy)
    }

    async fn store_dataset(&self, name: &str, dataset: Dataset) -> RepositoryResult<DatasetInfo> {
        self.ensure_healthy("store_dataset")?;
        let checksum = dataset_checksum(&dataset);

        let mut data = self.data.write();
        if let Some(existing) = data.datasets.values().find(|s| s.info.checksum == checksum) {
            tracing::info!(
                dataset_id = %existing.info.dataset_id,
                "dataset with identical content already stored"
            );
            return Ok(existing.info.clone());
        }

        let dataset_id = data.next_dataset_id;
        data.next_dataset_id = DatasetId(dataset_id.0 + 1);
        let info = DatasetInfo {
            dataset_id,
            dataset_name: name.to_string(),
            row_count: dataset.len(),
            checksum,
        };
        data.datasets.insert(
            dataset_id,
            StoredDataset {
                info: info.clone(),
                dataset,
            },
        );
        Ok(info)
    }

    async fn get_dataset(&self, id: DatasetId) -> RepositoryResult<Dataset> {
        self.ensure_healthy("get_dataset")?;
        self.data
            .read()
            .datasets
            .get(&id)
            .map(|s| s.dataset.clone())
            .ok_or_else(|| Self::not_found("get_dataset", id))
    }

    async fn get_dataset_info(&self, id: DatasetId) -> RepositoryResult<DatasetInfo> {
        self.ensure_healthy("get_dataset_info")?;
        self.data
            .read()
            .datasets
            .get(&id)
            .map(|s| s.info.clone())
            .ok_or_else(|| Self::not_found("get_dataset_info", id))
    }

    async fn list_datasets(&self) -> RepositoryResult<Vec<DatasetInfo>> {
        self.ensure_healthy("list_datasets")?;
        Ok(self
            .data
            .read()
            .datasets
            .values()
            .map(|s| s.info.clone())
            .collect())
    }
}
