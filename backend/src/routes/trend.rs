use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::TimeWindow;

// =========================================================
// Reduction and time-series types
// =========================================================

/// Start-to-end change of one pollutant at one location.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionRow {
    pub location_key: String,
    pub pollutant_id: String,
    pub pollutant_units: String,
    pub value_at_start: f64,
    pub value_at_end: f64,
    /// `value_at_start - value_at_end`; positive means the pollutant decreased.
    pub reduction: f64,
    /// `time_from` of the start observation.
    pub time_from: DateTime<Utc>,
    /// `time_to` of the end observation.
    pub time_to: DateTime<Utc>,
}

/// Average of one location/pollutant series at one timestamp.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesPoint {
    pub location_key: String,
    pub pollutant_id: String,
    pub timestamp: DateTime<Utc>,
    pub average_value: f64,
    /// Population quartiles at this timestamp; only set when no comparison
    /// location was requested.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q25: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub q75: Option<f64>,
}

/// Primary series (optionally banded) and comparison overlays.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TimeSeriesData {
    pub primary: Vec<TimeSeriesPoint>,
    pub comparisons: Vec<TimeSeriesPoint>,
}

impl TimeSeriesData {
    pub fn is_empty(&self) -> bool {
        self.primary.is_empty() && self.comparisons.is_empty()
    }
}

/// Reductions computed for one window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReductionData {
    pub window: TimeWindow,
    pub rows: Vec<ReductionRow>,
}

pub const GET_TIME_SERIES: &str = "get_time_series";
pub const GET_REDUCTIONS: &str = "get_reductions";

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::day;

    #[test]
    fn test_band_fields_omitted_when_absent() {
        let point = TimeSeriesPoint {
            location_key: "lille".into(),
            pollutant_id: "no2".into(),
            timestamp: day("2023-01-01"),
            average_value: 3.0,
            q25: None,
            q75: None,
        };
        let json = serde_json::to_value(&point).unwrap();
        assert!(json.get("q25").is_none());
        assert_eq!(json["average_value"], 3.0);
    }

    #[test]
    fn test_time_series_data_empty() {
        assert!(TimeSeriesData::default().is_empty());
    }
}
