//! Generic grouping primitive shared by every analytical service.
//!
//! Groups are always returned in first-appearance order of their key in the
//! input, which keeps every downstream tie-break deterministic.

use std::collections::{HashMap, HashSet};
use std::hash::Hash;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{Granularity, MeasurementRow};
use crate::routes::ranking::AggregateRow;

/// Field selector usable in a grouping key or as a distinct-count target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    Location(Granularity),
    Pollutant,
    Sensor,
    Timestamp,
}

/// One component of a group key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(untagged)]
pub enum KeyPart {
    Text(String),
    Time(DateTime<Utc>),
}

impl KeyPart {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            KeyPart::Text(s) => Some(s),
            KeyPart::Time(_) => None,
        }
    }
}

impl KeyField {
    fn part(&self, row: &MeasurementRow) -> KeyPart {
        match self {
            KeyField::Location(g) => KeyPart::Text(g.key(row).to_string()),
            KeyField::Pollutant => KeyPart::Text(row.pollutant_id.clone()),
            KeyField::Sensor => KeyPart::Text(row.sensor_id.clone()),
            // series timestamps are the end of the measurement interval
            KeyField::Timestamp => KeyPart::Time(row.time_to),
        }
    }
}

/// Ordered tuple of field selectors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GroupBy(Vec<KeyField>);

impl GroupBy {
    pub fn new(fields: impl Into<Vec<KeyField>>) -> Self {
        Self(fields.into())
    }

    pub fn location_pollutant(granularity: Granularity) -> Self {
        Self(vec![KeyField::Location(granularity), KeyField::Pollutant])
    }

    pub fn key_of(&self, row: &MeasurementRow) -> Vec<KeyPart> {
        self.0.iter().map(|f| f.part(row)).collect()
    }
}

/// Reduction applied to the rows of one group.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Reducer {
    Mean,
    Sum,
    CountDistinct(KeyField),
    Quantile(f64),
}

impl Reducer {
    /// Quantile reducer; `p` must lie in `[0, 1]`.
    pub fn quantile(p: f64) -> EngineResult<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(EngineError::InvalidParameter(format!(
                "quantile {} outside [0, 1]",
                p
            )));
        }
        Ok(Reducer::Quantile(p))
    }

    /// Reduce one group. `None` only for an empty group.
    pub fn apply(&self, rows: &[&MeasurementRow]) -> Option<f64> {
        if rows.is_empty() {
            return None;
        }
        match self {
            Reducer::Mean => mean(rows.iter().map(|r| r.value)),
            Reducer::Sum => Some(rows.iter().map(|r| r.value).sum()),
            Reducer::CountDistinct(field) => {
                let distinct: HashSet<KeyPart> = rows.iter().map(|r| field.part(r)).collect();
                Some(distinct.len() as f64)
            }
            Reducer::Quantile(p) => {
                let mut values: Vec<f64> = rows.iter().map(|r| r.value).collect();
                values.sort_by(f64::total_cmp);
                quantile_sorted(&values, *p)
            }
        }
    }
}

/// One output row of [`aggregate`].
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Aggregate {
    pub key: Vec<KeyPart>,
    pub value: f64,
    pub count: usize,
}

/// Group items by `key`, preserving first-appearance order of keys and the
/// input order of items inside each group.
pub fn group_by<T, K, F>(items: impl IntoIterator<Item = T>, mut key: F) -> Vec<(K, Vec<T>)>
where
    K: Eq + Hash + Clone,
    F: FnMut(&T) -> K,
{
    let mut index: HashMap<K, usize> = HashMap::new();
    let mut groups: Vec<(K, Vec<T>)> = Vec::new();
    for item in items {
        let k = key(&item);
        match index.get(&k) {
            Some(&i) => groups[i].1.push(item),
            None => {
                index.insert(k.clone(), groups.len());
                groups.push((k, vec![item]));
            }
        }
    }
    groups
}

/// One aggregate per distinct key present in `rows`. Empty input yields an
/// empty result.
pub fn aggregate<'a>(
    rows: impl IntoIterator<Item = &'a MeasurementRow>,
    group: &GroupBy,
    reducer: Reducer,
) -> Vec<Aggregate> {
    group_by(rows, |r| group.key_of(r))
        .into_iter()
        .filter_map(|(key, members)| {
            reducer.apply(&members).map(|value| Aggregate {
                key,
                value,
                count: members.len(),
            })
        })
        .collect()
}

/// Reduce rows per (location, pollutant) at one granularity.
pub fn location_pollutant_aggregates<'a>(
    rows: impl IntoIterator<Item = &'a MeasurementRow>,
    granularity: Granularity,
    reducer: Reducer,
) -> Vec<AggregateRow> {
    group_by(rows, |&r| (granularity.key(r), r.pollutant_id.as_str()))
        .into_iter()
        .filter_map(|((location, pollutant), members)| {
            reducer.apply(&members).map(|metric_value| AggregateRow {
                location_key: location.to_string(),
                pollutant_id: pollutant.to_string(),
                metric_value,
            })
        })
        .collect()
}

/// Arithmetic mean, `None` when empty.
pub fn mean(values: impl IntoIterator<Item = f64>) -> Option<f64> {
    let (sum, n) = values
        .into_iter()
        .fold((0.0, 0usize), |(s, n), v| (s + v, n + 1));
    (n > 0).then(|| sum / n as f64)
}

/// Linearly interpolated quantile of an ascending slice.
pub fn quantile_sorted(sorted: &[f64], p: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let h = (sorted.len() - 1) as f64 * p.clamp(0.0, 1.0);
    let lo = h.floor() as usize;
    let hi = h.ceil() as usize;
    let frac = h - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

/// Several quantiles of `values`, sorting once.
pub fn quantiles(values: &mut [f64], ps: &[f64]) -> Option<Vec<f64>> {
    if values.is_empty() {
        return None;
    }
    values.sort_by(f64::total_cmp);
    ps.iter().map(|&p| quantile_sorted(values, p)).collect()
}

#[cfg(test)]
#[path = "aggregation_tests.rs"]
mod aggregation_tests;
