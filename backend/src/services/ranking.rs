//! Top-N selection over per-location aggregates.
//!
//! Every ranking follows the same pipeline: reduce rows per
//! (location, pollutant), drop locations missing any requested pollutant,
//! total each location over its pollutants, select, then expand back to one
//! row per (location, pollutant). Ties on the total are broken by the order in
//! which locations first appear in the input.

use std::cmp::Ordering;

use tracing::debug;

use crate::models::{distinct_pollutants, Dataset, Granularity};
use crate::routes::ranking::{AggregateRow, RankedRow, RankedTable};
use crate::services::aggregation::{group_by, location_pollutant_aggregates, KeyField, Reducer};
use crate::services::reference::{inject_references, References};

/// Location cap of the sensor-coverage ranking.
pub const SENSOR_DISPLAY_CAP: usize = 15;

/// Aggregates of one location, with their total over pollutants.
#[derive(Debug, Clone)]
pub(crate) struct LocationGroup<'a> {
    pub key: &'a str,
    /// Position of the location's first row in the aggregate list.
    pub first_index: usize,
    pub rows: Vec<&'a AggregateRow>,
    pub total: f64,
}

impl LocationGroup<'_> {
    /// True when the location has a row for every pollutant in `pollutants`.
    pub fn covers(&self, pollutants: &[String]) -> bool {
        pollutants
            .iter()
            .all(|p| self.rows.iter().any(|r| &r.pollutant_id == p))
    }
}

pub(crate) fn location_groups(pairs: &[AggregateRow]) -> Vec<LocationGroup<'_>> {
    group_by(pairs, |&r| r.location_key.as_str())
        .into_iter()
        .enumerate()
        .map(|(first_index, (key, rows))| LocationGroup {
            key,
            first_index,
            total: rows.iter().map(|r| r.metric_value).sum(),
            rows,
        })
        .collect()
}

/// Total descending, then first appearance.
pub(crate) fn highest_first(a: &LocationGroup, b: &LocationGroup) -> Ordering {
    b.total
        .total_cmp(&a.total)
        .then_with(|| a.first_index.cmp(&b.first_index))
}

/// Total ascending, then first appearance.
pub(crate) fn lowest_first(a: &LocationGroup, b: &LocationGroup) -> Ordering {
    a.total
        .total_cmp(&b.total)
        .then_with(|| a.first_index.cmp(&b.first_index))
}

/// The first `n` groups under `order`.
pub(crate) fn select<'g, 'a>(
    groups: &'g [LocationGroup<'a>],
    n: usize,
    order: fn(&LocationGroup, &LocationGroup) -> Ordering,
) -> Vec<&'g LocationGroup<'a>> {
    let mut sorted: Vec<&LocationGroup> = groups.iter().collect();
    sorted.sort_by(|a, b| order(a, b));
    sorted.truncate(n);
    sorted
}

/// Index of `pollutant` in the requested list; unknown ids sort last.
pub(crate) fn pollutant_position(pollutants: &[String], pollutant: &str) -> usize {
    pollutants
        .iter()
        .position(|p| p == pollutant)
        .unwrap_or(pollutants.len())
}

/// Expand selected groups to one row per (location, pollutant), keeping the
/// group order as display order.
pub(crate) fn expand(selected: &[&LocationGroup], pollutants: &[String]) -> RankedTable {
    let mut table = RankedTable::empty();
    for group in selected {
        let mut rows = group.rows.clone();
        rows.sort_by_key(|r| pollutant_position(pollutants, &r.pollutant_id));
        table.rows.extend(rows.into_iter().map(|r| {
            RankedRow::new(group.key, r.pollutant_id.clone(), r.metric_value, group.total, false)
        }));
        table.display_order.push(group.key.to_string());
    }
    table
}

/// Top `top_n` covering locations of `pool` by total, highest first.
pub fn select_top(pool: &[AggregateRow], pollutants: &[String], top_n: usize) -> RankedTable {
    let groups: Vec<LocationGroup> = location_groups(pool)
        .into_iter()
        .filter(|g| g.covers(pollutants))
        .collect();
    expand(&select(&groups, top_n, highest_first), pollutants)
}

/// Locations ranked by the sum of their per-pollutant mean concentration.
///
/// Locations must hold data for every requested pollutant to be ranked;
/// references are appended afterwards regardless of coverage or rank.
pub fn rank_by_concentration(
    dataset: &Dataset,
    granularity: Granularity,
    pollutants: &[String],
    top_n: usize,
    references: &References,
) -> RankedTable {
    let _span = tracing::debug_span!("rank_by_concentration", %granularity, top_n).entered();
    let pollutants = distinct_pollutants(pollutants);

    let pool = location_pollutant_aggregates(dataset.for_pollutants(&pollutants), granularity, Reducer::Mean);
    let table = inject_references(select_top(&pool, &pollutants, top_n), &pool, &pollutants, references);

    debug!(
        rows = dataset.len(),
        locations = table.display_order.len(),
        "concentration ranking computed"
    );
    table
}

/// Locations ranked by distinct sensor count, capped at [`SENSOR_DISPLAY_CAP`].
pub fn rank_by_sensor_coverage(
    dataset: &Dataset,
    granularity: Granularity,
    pollutants: &[String],
) -> RankedTable {
    rank_by_sensor_coverage_with_cap(dataset, granularity, pollutants, SENSOR_DISPLAY_CAP)
}

pub fn rank_by_sensor_coverage_with_cap(
    dataset: &Dataset,
    granularity: Granularity,
    pollutants: &[String],
    cap: usize,
) -> RankedTable {
    let _span = tracing::debug_span!("rank_by_sensor_coverage", %granularity, cap).entered();
    let pollutants = distinct_pollutants(pollutants);

    let pool = location_pollutant_aggregates(
        dataset.for_pollutants(&pollutants),
        granularity,
        Reducer::CountDistinct(KeyField::Sensor),
    );
    // Highest count first like the other rankings; a chart drawing ascending
    // bars reverses `display_order`.
    let table = select_top(&pool, &pollutants, cap);

    debug!(
        rows = dataset.len(),
        locations = table.display_order.len(),
        "sensor ranking computed"
    );
    table
}

#[cfg(test)]
#[path = "ranking_tests.rs"]
mod ranking_tests;
