//! Measurement rows and the immutable dataset they form.
//!
//! A [`Dataset`] is validated once at construction; every analytical service
//! downstream trusts its rows and never re-checks field presence.

use std::collections::HashSet;
use std::fmt;
use std::str::FromStr;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};
use crate::models::time::TimeWindow;

/// Location field used as the grouping key for one analytical request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Granularity {
    Site,
    District,
    Region,
}

impl Granularity {
    pub const ALL: [Granularity; 3] = [Granularity::Site, Granularity::District, Granularity::Region];

    /// The location value of `row` at this granularity.
    pub fn key<'a>(&self, row: &'a MeasurementRow) -> &'a str {
        match self {
            Granularity::Site => &row.location_site,
            Granularity::District => &row.location_district,
            Granularity::Region => &row.location_region,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Granularity::Site => "site",
            Granularity::District => "district",
            Granularity::Region => "region",
        }
    }
}

impl FromStr for Granularity {
    type Err = EngineError;

    /// Parse a granularity selector.
    ///
    /// Accepts the canonical names and the French administrative aliases used
    /// by the upstream collector (`town`, `department`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "site" | "town" => Ok(Self::Site),
            "district" | "department" => Ok(Self::District),
            "region" => Ok(Self::Region),
            _ => Err(EngineError::InvalidGranularity(s.to_string())),
        }
    }
}

impl fmt::Display for Granularity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One time-stamped pollutant concentration reported by a sensor.
///
/// Column names of the upstream ETL export (`town`, `department`,
/// `pollutant_name`, `datetime_from`, ...) are accepted as aliases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeasurementRow {
    #[serde(alias = "town")]
    pub location_site: String,
    #[serde(alias = "department")]
    pub location_district: String,
    #[serde(alias = "region")]
    pub location_region: String,
    pub sensor_id: String,
    #[serde(alias = "pollutant_name")]
    pub pollutant_id: String,
    pub pollutant_units: String,
    pub value: f64,
    #[serde(alias = "datetime_from")]
    pub time_from: DateTime<Utc>,
    #[serde(alias = "datetime_to")]
    pub time_to: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<f64>,
}

impl MeasurementRow {
    fn validate(&self, index: usize) -> EngineResult<()> {
        let required = [
            ("location_site", &self.location_site),
            ("location_district", &self.location_district),
            ("location_region", &self.location_region),
            ("sensor_id", &self.sensor_id),
            ("pollutant_id", &self.pollutant_id),
        ];
        for (field, value) in required {
            if value.trim().is_empty() {
                return Err(EngineError::malformed(index, field, "is empty"));
            }
        }
        if !self.value.is_finite() {
            return Err(EngineError::malformed(index, "value", "is not a finite number"));
        }
        if self.time_from > self.time_to {
            return Err(EngineError::malformed(
                index,
                "time_to",
                format!("{} precedes time_from {}", self.time_to, self.time_from),
            ));
        }
        Ok(())
    }
}

/// Location values excluded from every dataset because they stand for
/// "no data" in the upstream store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DatasetFilter {
    #[serde(default)]
    pub excluded_districts: Vec<String>,
    #[serde(default)]
    pub excluded_regions: Vec<String>,
}

impl DatasetFilter {
    fn excludes(&self, row: &MeasurementRow) -> bool {
        self.excluded_districts.iter().any(|d| d == &row.location_district)
            || self.excluded_regions.iter().any(|r| r == &row.location_region)
    }
}

/// Immutable, validated collection of measurement rows for one query window.
///
/// Cloning is cheap; every transformation returns a new dataset.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    rows: Arc<[MeasurementRow]>,
}

impl Dataset {
    /// Validate `rows` and freeze them into a dataset.
    ///
    /// The first invalid row rejects the whole batch.
    pub fn new(rows: Vec<MeasurementRow>) -> EngineResult<Self> {
        for (index, row) in rows.iter().enumerate() {
            if let Err(e) = row.validate(index) {
                tracing::warn!(error = %e, "rejecting measurement batch");
                return Err(e);
            }
        }
        Ok(Self { rows: rows.into() })
    }

    pub fn empty() -> Self {
        Self::default()
    }

    pub fn rows(&self) -> &[MeasurementRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows whose `time_to` falls inside `window` (inclusive on both ends).
    pub fn within(&self, window: &TimeWindow) -> Dataset {
        self.retain(|row| window.contains(row.time_to))
    }

    /// Drop rows located in a no-data sentinel district or region.
    pub fn without_sentinels(&self, filter: &DatasetFilter) -> Dataset {
        self.retain(|row| !filter.excludes(row))
    }

    /// Iterate rows measuring one of `pollutants`.
    pub fn for_pollutants<'a>(
        &'a self,
        pollutants: &'a [String],
    ) -> impl Iterator<Item = &'a MeasurementRow> + 'a {
        self.rows
            .iter()
            .filter(move |row| pollutants.iter().any(|p| p == &row.pollutant_id))
    }

    /// Earliest `time_from` to latest `time_to`, `None` when empty.
    pub fn extent(&self) -> Option<TimeWindow> {
        let start = self.rows.iter().map(|r| r.time_from).min()?;
        let end = self.rows.iter().map(|r| r.time_to).max()?;
        Some(TimeWindow { start, end })
    }

    /// Distinct sensor identifiers present in the dataset.
    pub fn sensor_count(&self) -> usize {
        self.rows
            .iter()
            .map(|r| r.sensor_id.as_str())
            .collect::<HashSet<_>>()
            .len()
    }

    fn retain(&self, keep: impl Fn(&MeasurementRow) -> bool) -> Dataset {
        let rows: Vec<MeasurementRow> = self.rows.iter().filter(|r| keep(r)).cloned().collect();
        Dataset { rows: rows.into() }
    }
}

/// Deduplicate a requested pollutant list, keeping first-occurrence order.
pub fn distinct_pollutants(pollutants: &[String]) -> Vec<String> {
    let mut seen = HashSet::new();
    pollutants
        .iter()
        .filter(|p| seen.insert(p.as_str()))
        .cloned()
        .collect()
}

#[cfg(test)]
#[path = "measurement_tests.rs"]
mod measurement_tests;
