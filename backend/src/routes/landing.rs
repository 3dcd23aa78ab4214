use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::DatasetId;
use crate::models::Granularity;

/// Stored dataset listing entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetInfo {
    pub dataset_id: DatasetId,
    pub dataset_name: String,
    pub row_count: usize,
    pub checksum: String,
}

/// Headline counts of a dataset at one granularity.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DatasetSummary {
    pub granularity: Granularity,
    pub record_count: usize,
    pub sensor_count: usize,
    pub location_count: usize,
    pub pollutant_count: usize,
    pub earliest: Option<DateTime<Utc>>,
    pub latest: Option<DateTime<Utc>>,
}

pub const LIST_DATASETS: &str = "list_datasets";
pub const POST_DATASET: &str = "store_dataset";
pub const GET_DATASET_SUMMARY: &str = "get_dataset_summary";
pub const GET_LOCATIONS: &str = "get_locations";
pub const GET_LOCATION_POLLUTANTS: &str = "get_location_pollutants";
