//! Ranking of locations by how much their pollutant levels fell.

use tracing::debug;

use crate::models::distinct_pollutants;
use crate::routes::ranking::{AggregateRow, RankedTable};
use crate::routes::trend::ReductionRow;
use crate::services::aggregation::{group_by, mean};
use crate::services::ranking::{expand, highest_first, location_groups, lowest_first, select, LocationGroup};
use crate::services::reference::{inject_references, References};

/// Mean reduction per (location, pollutant) for the requested pollutants.
fn mean_reductions(reductions: &[ReductionRow], pollutants: &[String]) -> Vec<AggregateRow> {
    let relevant = reductions
        .iter()
        .filter(|r| pollutants.iter().any(|p| p == &r.pollutant_id));
    group_by(relevant, |&r| (r.location_key.as_str(), r.pollutant_id.as_str()))
        .into_iter()
        .filter_map(|((location, pollutant), members)| {
            mean(members.iter().map(|r| r.reduction)).map(|metric_value| AggregateRow {
                location_key: location.to_string(),
                pollutant_id: pollutant.to_string(),
                metric_value,
            })
        })
        .collect()
}

/// The `top_n` locations with the smallest total reduction together with the
/// `top_n` with the largest, shown by total reduction descending.
///
/// Every row's `metric_value` is the mean reduction of its pollutant and its
/// `location_total` the sum of those means over the location's pollutants.
pub fn rank_by_variation(
    reductions: &[ReductionRow],
    pollutants: &[String],
    top_n: usize,
    references: &References,
) -> RankedTable {
    let _span = tracing::debug_span!("rank_by_variation", top_n).entered();
    let pollutants = distinct_pollutants(pollutants);

    let pool = mean_reductions(reductions, &pollutants);
    let groups: Vec<LocationGroup> = location_groups(&pool)
        .into_iter()
        .filter(|g| g.covers(&pollutants))
        .collect();

    let mut chosen: Vec<&LocationGroup> = select(&groups, top_n, lowest_first);
    for group in select(&groups, top_n, highest_first) {
        if !chosen.iter().any(|c| c.first_index == group.first_index) {
            chosen.push(group);
        }
    }
    chosen.sort_by(|a, b| highest_first(a, b));

    let table = inject_references(expand(&chosen, &pollutants), &pool, &pollutants, references);
    debug!(
        reductions = reductions.len(),
        locations = table.display_order.len(),
        "variation ranking computed"
    );
    table
}
