use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest reading of one pollutant at one site, for map display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SnapshotEntry {
    pub site: String,
    pub pollutant_id: String,
    pub pollutant_units: String,
    /// Mean over the site's rows at `time_to`, rounded to 2 decimals.
    pub average: f64,
    pub time_to: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

pub const GET_LATEST_SNAPSHOT: &str = "get_latest_snapshot";
