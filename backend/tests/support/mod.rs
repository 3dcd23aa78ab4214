#![allow(dead_code)]

use std::collections::HashSet;
use std::sync::Mutex;

use chrono::{DateTime, Duration, NaiveDate, Utc};

use aqd_rust::models::{Dataset, MeasurementRow};

static ENV_LOCK: Mutex<()> = Mutex::new(());

/// Runs `f` with environment variables temporarily modified.
///
/// Restores the variables on unwind and serializes access to the process
/// environment across parallel tests.
///
/// `changes` is a list of `(key, value)` pairs:
/// - `Some(v)` sets the variable to `v`
/// - `None` removes the variable
pub fn with_scoped_env<F, R>(changes: &[(&str, Option<&str>)], f: F) -> R
where
    F: FnOnce() -> R,
{
    let _lock = ENV_LOCK.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    let _guard = ScopedEnv::new(changes);
    f()
}

struct ScopedEnv {
    snapshot: Vec<(String, Option<String>)>,
}

impl ScopedEnv {
    fn new(changes: &[(&str, Option<&str>)]) -> Self {
        let keys: HashSet<&str> = changes.iter().map(|(k, _)| *k).collect();
        let snapshot = keys
            .into_iter()
            .map(|k| (k.to_string(), std::env::var(k).ok()))
            .collect::<Vec<_>>();

        for (k, v) in changes {
            match v {
                Some(val) => std::env::set_var(k, val),
                None => std::env::remove_var(k),
            }
        }

        Self { snapshot }
    }
}

impl Drop for ScopedEnv {
    fn drop(&mut self) {
        for (k, v) in self.snapshot.drain(..) {
            match v {
                Some(val) => std::env::set_var(&k, val),
                None => std::env::remove_var(&k),
            }
        }
    }
}

/// Midnight UTC of a `YYYY-MM-DD` date.
pub fn day(date: &str) -> DateTime<Utc> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d")
        .expect("test date")
        .and_hms_opt(0, 0, 0)
        .expect("midnight")
        .and_utc()
}

/// One-day measurement at `site`, in district `{site}-d` of region `r1`.
pub fn row(site: &str, pollutant: &str, value: f64, date: &str) -> MeasurementRow {
    let from = day(date);
    MeasurementRow {
        location_site: site.to_string(),
        location_district: format!("{}-d", site),
        location_region: "r1".to_string(),
        sensor_id: format!("{}-{}", site, pollutant),
        pollutant_id: pollutant.to_string(),
        pollutant_units: "µg/m³".to_string(),
        value,
        time_from: from,
        time_to: from + Duration::days(1),
        latitude: None,
        longitude: None,
    }
}

pub fn dataset(rows: Vec<MeasurementRow>) -> Dataset {
    Dataset::new(rows).expect("valid dataset")
}

pub fn ids(values: &[&str]) -> Vec<String> {
    values.iter().map(|s| s.to_string()).collect()
}

/// Three covering locations (L1: A=10 B=20, L2: A=5 B=5, L3: A=8 B=8) plus
/// Z, which only measures A.
pub fn concentration_rows() -> Vec<MeasurementRow> {
    vec![
        row("L1", "A", 10.0, "2023-01-02"),
        row("L1", "B", 20.0, "2023-01-02"),
        row("L2", "A", 5.0, "2023-01-02"),
        row("L2", "B", 5.0, "2023-01-02"),
        row("L3", "A", 8.0, "2023-01-02"),
        row("L3", "B", 8.0, "2023-01-02"),
        row("Z", "A", 100.0, "2023-01-02"),
    ]
}
