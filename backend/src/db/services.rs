//! High-level dataset service layer.
//!
//! Repository-agnostic operations carrying the rules that must hold whatever
//! the storage backend: name validation and sentinel-location filtering
//! before storage.
//!
//! ```no_run
//! use aqd_rust::db::{services, repositories::LocalRepository};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let repo = LocalRepository::new();
//!     let datasets = services::list_datasets(&repo).await?;
//!     println!("Found {} datasets", datasets.len());
//!     Ok(())
//! }
//! ```

use tracing::info;

use super::repository::{DatasetRepository, ErrorContext, RepositoryError, RepositoryResult};
use crate::api::{DatasetId, DatasetInfo};
use crate::models::{Dataset, DatasetFilter};

/// Check if the store is healthy.
pub async fn health_check<R: DatasetRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Drop sentinel locations from `dataset` and store the remainder.
pub async fn store_dataset<R: DatasetRepository + ?Sized>(
    repo: &R,
    name: &str,
    dataset: Dataset,
    filter: &DatasetFilter,
) -> RepositoryResult<DatasetInfo> {
    let name = name.trim();
    if name.is_empty() {
        return Err(RepositoryError::validation(
            "dataset name must not be empty",
            ErrorContext::new("store_dataset").with_entity("dataset"),
        ));
    }

    let received = dataset.len();
    let dataset = dataset.without_sentinels(filter);
    info!(
        name,
        received,
        kept = dataset.len(),
        "storing dataset"
    );
    repo.store_dataset(name, dataset)
        .await
        .map_err(|e| e.with_operation("store_dataset"))
}

pub async fn get_dataset<R: DatasetRepository + ?Sized>(
    repo: &R,
    id: DatasetId,
) -> RepositoryResult<Dataset> {
    repo.get_dataset(id).await
}

pub async fn get_dataset_info<R: DatasetRepository + ?Sized>(
    repo: &R,
    id: DatasetId,
) -> RepositoryResult<DatasetInfo> {
    repo.get_dataset_info(id).await
}

pub async fn list_datasets<R: DatasetRepository + ?Sized>(repo: &R) -> RepositoryResult<Vec<DatasetInfo>> {
    repo.list_datasets().await
}

#[cfg(test)]
#[path = "services_tests.rs"]
mod services_tests;
