//! Row builders shared by the unit tests.

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::{Dataset, MeasurementRow};

/// Midnight UTC of a `YYYY-MM-DD` date.
pub(crate) fn day(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("test date")
        .and_hms_opt(0, 0, 0)
        .expect("midnight")
        .and_utc()
}

/// A row for `site` measuring `pollutant`, spanning one day from `date`.
pub(crate) fn row(site: &str, pollutant: &str, value: f64, date: &str) -> MeasurementRow {
    let from = day(date);
    MeasurementRow {
        location_site: site.to_string(),
        location_district: format!("{}-district", site),
        location_region: "north".to_string(),
        sensor_id: format!("{}-{}", site, pollutant),
        pollutant_id: pollutant.to_string(),
        pollutant_units: "µg/m³".to_string(),
        value,
        time_from: from,
        time_to: from + chrono::Duration::days(1),
        latitude: None,
        longitude: None,
    }
}

pub(crate) fn sensor_row(site: &str, pollutant: &str, sensor: &str) -> MeasurementRow {
    MeasurementRow {
        sensor_id: sensor.to_string(),
        ..row(site, pollutant, 1.0, "2023-01-01")
    }
}

pub(crate) fn dataset(rows: Vec<MeasurementRow>) -> Dataset {
    Dataset::new(rows).expect("valid test dataset")
}

pub(crate) fn pollutants(ids: &[&str]) -> Vec<String> {
    ids.iter().map(|s| s.to_string()).collect()
}
