//! Headline counts and selector options for a dataset.

use std::collections::{BTreeSet, HashSet};

use crate::models::{Dataset, Granularity};
use crate::routes::landing::DatasetSummary;

pub fn summarize(dataset: &Dataset, granularity: Granularity) -> DatasetSummary {
    let rows = dataset.rows();
    DatasetSummary {
        granularity,
        record_count: rows.len(),
        sensor_count: dataset.sensor_count(),
        location_count: rows.iter().map(|r| granularity.key(r)).collect::<HashSet<_>>().len(),
        pollutant_count: rows
            .iter()
            .map(|r| r.pollutant_id.as_str())
            .collect::<HashSet<_>>()
            .len(),
        earliest: rows.iter().map(|r| r.time_from).min(),
        latest: rows.iter().map(|r| r.time_to).max(),
    }
}

/// Sorted location keys holding at least one row for any of `pollutants`.
pub fn location_options(dataset: &Dataset, granularity: Granularity, pollutants: &[String]) -> Vec<String> {
    dataset
        .for_pollutants(pollutants)
        .map(|r| granularity.key(r))
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted distinct pollutant ids of the whole dataset.
pub fn pollutant_ids(dataset: &Dataset) -> Vec<String> {
    dataset
        .rows()
        .iter()
        .map(|r| r.pollutant_id.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}

/// Sorted pollutant ids measured at `location`.
pub fn pollutants_at(dataset: &Dataset, granularity: Granularity, location: &str) -> Vec<String> {
    dataset
        .rows()
        .iter()
        .filter(|r| granularity.key(r) == location)
        .map(|r| r.pollutant_id.as_str())
        .collect::<BTreeSet<_>>()
        .into_iter()
        .map(str::to_string)
        .collect()
}
