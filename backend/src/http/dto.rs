//! Data Transfer Objects for the HTTP API.
//!
//! Result bodies are the serialisable types of [`crate::api`]; this module
//! adds request bodies, query strings and a few envelopes.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api::DatasetInfo;
use crate::error::{EngineError, EngineResult};
use crate::models::{Dataset, Granularity, TimeWindow};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    /// Dataset store status
    pub store: String,
}

/// Request body for storing a dataset.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDatasetRequest {
    pub name: String,
    /// Array of measurement records
    pub measurements: serde_json::Value,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetListResponse {
    pub datasets: Vec<DatasetInfo>,
    pub total: usize,
}

/// Sorted selector options for one granularity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationListResponse {
    pub granularity: Granularity,
    pub locations: Vec<String>,
}

/// Pollutants measured at one location.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LocationPollutantsResponse {
    pub granularity: Granularity,
    pub location: String,
    pub pollutants: Vec<String>,
}

/// `?granularity=` only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GranularityQuery {
    #[serde(default)]
    pub granularity: Option<String>,
}

/// Query parameters of the location selector.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocationsQuery {
    #[serde(default)]
    pub granularity: Option<String>,
    /// Comma-separated pollutant ids
    #[serde(default)]
    pub pollutants: Option<String>,
}

/// Query parameters of the concentration and variation rankings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RankingQuery {
    #[serde(default)]
    pub granularity: Option<String>,
    #[serde(default)]
    pub pollutants: Option<String>,
    #[serde(default)]
    pub top_n: Option<usize>,
    /// Comma-separated reference locations
    #[serde(default)]
    pub reference: Option<String>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

/// Query parameters of the reduction table.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReductionQuery {
    #[serde(default)]
    pub granularity: Option<String>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

/// Query parameters of the time series.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TrendQuery {
    #[serde(default)]
    pub granularity: Option<String>,
    #[serde(default)]
    pub pollutants: Option<String>,
    pub location: String,
    /// Comma-separated comparison locations
    #[serde(default)]
    pub compare: Option<String>,
    #[serde(default)]
    pub start: Option<DateTime<Utc>>,
    #[serde(default)]
    pub end: Option<DateTime<Utc>>,
}

/// Query parameters of the seasonal and week-type profiles.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CyclicalQuery {
    #[serde(default)]
    pub granularity: Option<String>,
    #[serde(default)]
    pub pollutants: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SnapshotQuery {
    pub pollutant: String,
    #[serde(default)]
    pub at: Option<DateTime<Utc>>,
}

/// Split a comma-separated list, dropping blank items.
pub fn parse_list(raw: Option<&str>) -> Vec<String> {
    raw.map(|s| {
        s.split(',')
            .map(str::trim)
            .filter(|item| !item.is_empty())
            .map(str::to_string)
            .collect()
    })
    .unwrap_or_default()
}

/// Granularity selector, `site` when absent.
pub fn parse_granularity(raw: Option<&str>) -> EngineResult<Granularity> {
    raw.map_or(Ok(Granularity::Site), str::parse)
}

/// Comma-separated pollutant list that must not be empty.
pub fn required_pollutants(raw: Option<&str>) -> EngineResult<Vec<String>> {
    let pollutants = parse_list(raw);
    if pollutants.is_empty() {
        return Err(EngineError::InvalidParameter(
            "pollutants must list at least one pollutant id".to_string(),
        ));
    }
    Ok(pollutants)
}

/// Query window, with a missing bound taken from the dataset's extent.
///
/// `None` when neither bound is given.
pub fn resolve_window(
    dataset: &Dataset,
    start: Option<DateTime<Utc>>,
    end: Option<DateTime<Utc>>,
) -> EngineResult<Option<TimeWindow>> {
    if start.is_none() && end.is_none() {
        return Ok(None);
    }
    let extent = dataset.extent();
    let start = start.or(extent.map(|w| w.start)).or(end);
    let end = end.or(extent.map(|w| w.end)).or(start);
    match (start, end) {
        (Some(start), Some(end)) => TimeWindow::new(start, end).map(Some),
        _ => Ok(None),
    }
}
