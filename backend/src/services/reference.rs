//! Injection of caller-pinned reference locations into a ranked table.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::routes::ranking::{AggregateRow, RankedRow, RankedTable};
use crate::services::ranking::pollutant_position;

/// Reference locations to pin into a ranking, and the tag marking them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct References {
    pub locations: Vec<String>,
    #[serde(default = "default_prefix")]
    pub prefix: String,
}

fn default_prefix() -> String {
    References::DEFAULT_PREFIX.to_string()
}

impl Default for References {
    fn default() -> Self {
        Self {
            locations: Vec::new(),
            prefix: default_prefix(),
        }
    }
}

impl References {
    pub const DEFAULT_PREFIX: &'static str = "SELECTED: ";

    pub fn new<S: Into<String>>(locations: impl IntoIterator<Item = S>) -> Self {
        Self {
            locations: locations.into_iter().map(Into::into).collect(),
            ..Self::default()
        }
    }

    pub fn none() -> Self {
        Self::default()
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = prefix.into();
        self
    }

    /// Display key of a reference location.
    pub fn tag(&self, location: &str) -> String {
        format!("{}{}", self.prefix, location)
    }
}

/// Append reference locations to `table`.
///
/// `pool` holds the per-(location, pollutant) aggregates computed before the
/// coverage filter, so references keep whatever partial coverage they have.
/// A reference already ranked keeps its ranked position and is not repeated.
/// A reference absent from `pool` yields no rows. Reference rows are appended
/// after the ranked rows, in the order the references were given.
pub fn inject_references(
    mut table: RankedTable,
    pool: &[AggregateRow],
    pollutants: &[String],
    references: &References,
) -> RankedTable {
    let mut seen = HashSet::new();
    for location in &references.locations {
        if !seen.insert(location.as_str()) {
            continue;
        }
        if table.display_order.iter().any(|k| k == location) {
            debug!(location = %location, "reference already ranked");
            continue;
        }

        let mut rows: Vec<&AggregateRow> = pool
            .iter()
            .filter(|r| &r.location_key == location)
            .collect();
        if rows.is_empty() {
            debug!(location = %location, "reference location has no data");
            continue;
        }
        rows.sort_by_key(|r| pollutant_position(pollutants, &r.pollutant_id));

        let tagged = references.tag(location);
        if table.display_order.contains(&tagged) {
            debug!(location = %location, tag = %tagged, "reference tag collides with a ranked location");
            continue;
        }
        let total: f64 = rows.iter().map(|r| r.metric_value).sum();
        table.rows.extend(
            rows.iter()
                .map(|r| RankedRow::new(tagged.clone(), r.pollutant_id.clone(), r.metric_value, total, true)),
        );
        table.display_order.push(tagged);
    }
    table
}
