//! Start-to-end change per (location, pollutant) over a query window.
//!
//! The start observation is the row whose `time_from` is nearest the window
//! start; the end observation is the row whose `time_to` is nearest the
//! window end. No interpolation is done, so a sparse series is compared at
//! whatever samples lie closest to the boundaries.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use tracing::debug;

use crate::models::{Dataset, Granularity, MeasurementRow, TimeWindow};
use crate::routes::trend::ReductionRow;
use crate::services::aggregation::group_by;

fn distance(a: DateTime<Utc>, b: DateTime<Utc>) -> Duration {
    if a >= b {
        a - b
    } else {
        b - a
    }
}

/// Row nearest a boundary seen so far. Earlier rows win ties.
struct Nearest<'a> {
    row: &'a MeasurementRow,
    distance: Duration,
}

impl<'a> Nearest<'a> {
    fn offer(slot: &mut Option<Nearest<'a>>, row: &'a MeasurementRow, distance: Duration) {
        if slot.as_ref().map_or(true, |n| distance < n.distance) {
            *slot = Some(Nearest { row, distance });
        }
    }
}

/// One reduction row per (location, pollutant) group of `dataset`.
///
/// `dataset` is expected to be already restricted to `window`. A group with a
/// single row uses it as both endpoints and yields a reduction of 0.
pub fn compute_reductions(
    dataset: &Dataset,
    granularity: Granularity,
    window: &TimeWindow,
) -> Vec<ReductionRow> {
    let _span = tracing::debug_span!("compute_reductions", %granularity).entered();

    let groups = group_by(dataset.rows(), |&r| (granularity.key(r), r.pollutant_id.as_str()));
    let reductions: Vec<ReductionRow> = groups
        .into_iter()
        .filter_map(|((location, pollutant), members)| {
            let mut start = None;
            let mut end = None;
            for row in members {
                Nearest::offer(&mut start, row, distance(row.time_from, window.start));
                Nearest::offer(&mut end, row, distance(row.time_to, window.end));
            }
            let (start, end) = (start?.row, end?.row);
            Some(ReductionRow {
                location_key: location.to_string(),
                pollutant_id: pollutant.to_string(),
                pollutant_units: start.pollutant_units.clone(),
                value_at_start: start.value,
                value_at_end: end.value,
                reduction: start.value - end.value,
                time_from: start.time_from,
                time_to: end.time_to,
            })
        })
        .collect();

    debug!(rows = dataset.len(), groups = reductions.len(), "reductions computed");
    reductions
}

/// Per-site reductions labelled with each site's location at `granularity`.
///
/// Every row is still one site's start-to-end change, so a district or
/// region with several sites yields several rows under the same key. A site
/// listed under more than one parent keeps the first one seen.
pub fn site_reductions(
    dataset: &Dataset,
    granularity: Granularity,
    window: &TimeWindow,
) -> Vec<ReductionRow> {
    let mut rows = compute_reductions(dataset, Granularity::Site, window);
    if granularity == Granularity::Site {
        return rows;
    }

    let mut parents: HashMap<&str, &str> = HashMap::new();
    for row in dataset.rows() {
        parents
            .entry(row.location_site.as_str())
            .or_insert_with(|| granularity.key(row));
    }
    for row in &mut rows {
        if let Some(parent) = parents.get(row.location_key.as_str()) {
            row.location_key = parent.to_string();
        }
    }
    rows
}
