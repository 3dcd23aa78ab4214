//! Repository trait for dataset storage.

pub mod error;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use async_trait::async_trait;

use crate::api::{DatasetId, DatasetInfo};
use crate::models::Dataset;

/// Storage of validated measurement datasets.
///
/// Implementations must be `Send + Sync` to be shared across request
/// handlers.
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// `Ok(false)` when the store is reachable but not serving.
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Store `dataset` under `name`.
    ///
    /// Content identical to an already stored dataset returns the existing
    /// entry instead of a new one.
    async fn store_dataset(&self, name: &str, dataset: Dataset) -> RepositoryResult<DatasetInfo>;

    /// Fetch a stored dataset.
    ///
    /// Returns `RepositoryError::NotFound` for an unknown id.
    async fn get_dataset(&self, id: DatasetId) -> RepositoryResult<Dataset>;

    async fn get_dataset_info(&self, id: DatasetId) -> RepositoryResult<DatasetInfo>;

    /// All stored datasets, by ascending id.
    async fn list_datasets(&self) -> RepositoryResult<Vec<DatasetInfo>>;
}
