//! Per-timestamp average series with an optional population quartile band.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use tracing::debug;

use crate::models::{distinct_pollutants, Dataset, Granularity, MeasurementRow};
use crate::routes::trend::{TimeSeriesData, TimeSeriesPoint};
use crate::services::aggregation::{group_by, mean, quantiles};
use crate::services::ranking::pollutant_position;

/// Mean value per (pollutant, timestamp) at one location, ascending by
/// timestamp within each pollutant.
fn location_series(
    rows: &[&MeasurementRow],
    granularity: Granularity,
    location: &str,
    pollutants: &[String],
) -> Vec<TimeSeriesPoint> {
    let at_location = rows.iter().copied().filter(|r| granularity.key(r) == location);
    let mut points: Vec<TimeSeriesPoint> =
        group_by(at_location, |&r| (r.pollutant_id.as_str(), r.time_to))
            .into_iter()
            .filter_map(|((pollutant, timestamp), members)| {
                mean(members.iter().map(|r| r.value)).map(|average_value| TimeSeriesPoint {
                    location_key: location.to_string(),
                    pollutant_id: pollutant.to_string(),
                    timestamp,
                    average_value,
                    q25: None,
                    q75: None,
                })
            })
            .collect();
    points.sort_by(|a, b| {
        pollutant_position(pollutants, &a.pollutant_id)
            .cmp(&pollutant_position(pollutants, &b.pollutant_id))
            .then(a.timestamp.cmp(&b.timestamp))
    });
    points
}

/// 25th and 75th percentile of every row value per (timestamp, pollutant).
fn quartile_band<'a>(rows: &[&'a MeasurementRow]) -> HashMap<(DateTime<Utc>, &'a str), (f64, f64)> {
    group_by(rows.iter().copied(), |&r| (r.time_to, r.pollutant_id.as_str()))
        .into_iter()
        .filter_map(|(key, members)| {
            let mut values: Vec<f64> = members.iter().map(|r| r.value).collect();
            match quantiles(&mut values, &[0.25, 0.75])?.as_slice() {
                [q25, q75] => Some((key, (*q25, *q75))),
                _ => None,
            }
        })
        .collect()
}

/// Series of `location` for each requested pollutant.
///
/// Without comparison locations the primary points carry the q25/q75 band of
/// the whole dataset at their timestamp and pollutant. With comparisons the
/// band is omitted and each comparison location gets its own series. Unknown
/// locations yield no points.
pub fn build_time_series(
    dataset: &Dataset,
    granularity: Granularity,
    pollutants: &[String],
    location: &str,
    comparisons: &[String],
) -> TimeSeriesData {
    let _span = tracing::debug_span!("build_time_series", %granularity, location).entered();
    let pollutants = distinct_pollutants(pollutants);

    let rows: Vec<&MeasurementRow> = dataset.for_pollutants(&pollutants).collect();
    let mut primary = location_series(&rows, granularity, location, &pollutants);

    if comparisons.is_empty() {
        let band = quartile_band(&rows);
        for point in &mut primary {
            if let Some(&(q25, q75)) = band.get(&(point.timestamp, point.pollutant_id.as_str())) {
                point.q25 = Some(q25);
                point.q75 = Some(q75);
            }
        }
    }

    let mut seen = HashSet::new();
    let comparisons: Vec<TimeSeriesPoint> = comparisons
        .iter()
        .filter(|c| seen.insert(c.as_str()))
        .flat_map(|c| {
            let series = location_series(&rows, granularity, c, &pollutants);
            if series.is_empty() {
                debug!(location = %c, "comparison location has no data");
            }
            series
        })
        .collect();

    debug!(
        rows = rows.len(),
        primary = primary.len(),
        comparisons = comparisons.len(),
        "time series built"
    );
    TimeSeriesData { primary, comparisons }
}

#[cfg(test)]
#[path = "time_series_tests.rs"]
mod time_series_tests;
