//! Latest per-site reading of one pollutant, for map display.

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{Dataset, MeasurementRow};
use crate::routes::snapshot::SnapshotEntry;
use crate::services::aggregation::{group_by, mean};

fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Per-site mean of `pollutant` at its latest `time_to` not after `at`.
///
/// Entries are sorted by average descending, then by site name. Coordinates
/// are averaged over the rows that carry them.
pub fn latest_snapshot(
    dataset: &Dataset,
    pollutant: &str,
    at: Option<DateTime<Utc>>,
) -> Vec<SnapshotEntry> {
    let candidates = move || {
        dataset
            .rows()
            .iter()
            .filter(move |r| r.pollutant_id == pollutant && at.map_or(true, |t| r.time_to <= t))
    };
    let Some(latest) = candidates().map(|r| r.time_to).max() else {
        debug!(pollutant, "no readings for snapshot");
        return Vec::new();
    };

    let rows = candidates().filter(|r| r.time_to == latest);
    let mut entries: Vec<SnapshotEntry> = group_by(rows, |&r| r.location_site.as_str())
        .into_iter()
        .filter_map(|(site, members)| {
            let first: &MeasurementRow = members.first()?;
            Some(SnapshotEntry {
                site: site.to_string(),
                pollutant_id: pollutant.to_string(),
                pollutant_units: first.pollutant_units.clone(),
                average: round2(mean(members.iter().map(|r| r.value))?),
                time_to: latest,
                latitude: mean(members.iter().filter_map(|r| r.latitude)),
                longitude: mean(members.iter().filter_map(|r| r.longitude)),
            })
        })
        .collect();

    entries.sort_by(|a, b| {
        b.average
            .total_cmp(&a.average)
            .then_with(|| a.site.cmp(&b.site))
    });
    entries
}
