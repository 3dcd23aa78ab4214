use serde::{Deserialize, Serialize};

// =========================================================
// Ranking types
// =========================================================

/// One reduced group: a location and pollutant with its aggregate metric.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateRow {
    pub location_key: String,
    pub pollutant_id: String,
    pub metric_value: f64,
}

/// Row of a ranked table, ready for stacked or faceted display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRow {
    /// Location key; reference rows carry the reference prefix.
    pub location_key: String,
    pub pollutant_id: String,
    pub metric_value: f64,
    /// Sum of `metric_value` over every pollutant row of this location.
    pub location_total: f64,
    pub is_reference: bool,
    /// `{location_key}_{pollutant_id}`, unique per row.
    pub x_key: String,
}

impl RankedRow {
    pub fn new(
        location_key: impl Into<String>,
        pollutant_id: impl Into<String>,
        metric_value: f64,
        location_total: f64,
        is_reference: bool,
    ) -> Self {
        let location_key = location_key.into();
        let pollutant_id = pollutant_id.into();
        let x_key = format!("{}_{}", location_key, pollutant_id);
        Self {
            location_key,
            pollutant_id,
            metric_value,
            location_total,
            is_reference,
            x_key,
        }
    }
}

/// Ordered ranking output.
///
/// `display_order` lists every distinct `location_key` exactly once, and
/// `rows` are stored grouped by location in that order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedTable {
    pub rows: Vec<RankedRow>,
    pub display_order: Vec<String>,
}

impl RankedTable {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Ranked (non-reference) location keys, in display order.
    pub fn ranked_locations(&self) -> Vec<&str> {
        self.locations(false)
    }

    /// Tagged reference location keys, in display order.
    pub fn reference_locations(&self) -> Vec<&str> {
        self.locations(true)
    }

    pub fn rows_for<'a>(&'a self, location_key: &'a str) -> impl Iterator<Item = &'a RankedRow> + 'a {
        self.rows.iter().filter(move |r| r.location_key == location_key)
    }

    fn locations(&self, reference: bool) -> Vec<&str> {
        self.display_order
            .iter()
            .filter(|key| {
                self.rows
                    .iter()
                    .any(|r| &r.location_key == *key && r.is_reference == reference)
            })
            .map(String::as_str)
            .collect()
    }
}

pub const GET_CONCENTRATION_RANKING: &str = "get_concentration_ranking";
pub const GET_VARIATION_RANKING: &str = "get_variation_ranking";
pub const GET_SENSOR_RANKING: &str = "get_sensor_ranking";
