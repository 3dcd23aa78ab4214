//! Seasonal and weekday/weekend profiles.

use std::collections::BTreeMap;

use tracing::debug;

use crate::models::{Dataset, Granularity};
use crate::routes::cyclical::{CyclicalBucket, CyclicalCategory, Season, WeekType};

/// Restricts a profile to one location at one granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LocationFilter<'a> {
    pub granularity: Granularity,
    pub location: &'a str,
}

impl<'a> LocationFilter<'a> {
    pub fn new(granularity: Granularity, location: &'a str) -> Self {
        Self { granularity, location }
    }
}

/// Mean value per category of `time_from`, over rows measuring one of
/// `pollutants` (and at `location` when given).
///
/// Only categories present in the data are returned, in the category's
/// display order.
pub fn cyclical_profile<C: CyclicalCategory>(
    dataset: &Dataset,
    pollutants: &[String],
    location: Option<LocationFilter<'_>>,
) -> Vec<CyclicalBucket<C>> {
    let mut sums: BTreeMap<C, (f64, usize)> = BTreeMap::new();
    let rows = dataset
        .for_pollutants(pollutants)
        .filter(|r| location.map_or(true, |f| f.granularity.key(r) == f.location));
    for row in rows {
        let entry = sums.entry(C::of(row.time_from)).or_insert((0.0, 0));
        entry.0 += row.value;
        entry.1 += 1;
    }

    C::DOMAIN
        .iter()
        .filter_map(|category| {
            let &(sum, count) = sums.get(category)?;
            Some(CyclicalBucket {
                category: *category,
                average_value: sum / count as f64,
                count,
            })
        })
        .collect()
}

pub fn seasonal_profile(
    dataset: &Dataset,
    pollutants: &[String],
    location: Option<LocationFilter<'_>>,
) -> Vec<CyclicalBucket<Season>> {
    let buckets = cyclical_profile(dataset, pollutants, location);
    debug!(rows = dataset.len(), buckets = buckets.len(), "seasonal profile computed");
    buckets
}

pub fn week_type_profile(
    dataset: &Dataset,
    pollutants: &[String],
    location: Option<LocationFilter<'_>>,
) -> Vec<CyclicalBucket<WeekType>> {
    let buckets = cyclical_profile(dataset, pollutants, location);
    debug!(rows = dataset.len(), buckets = buckets.len(), "week-type profile computed");
    buckets
}
