use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::{Context, Result};

use crate::error::{EngineError, EngineResult};
use crate::models::{Dataset, MeasurementRow};

fn row_error(index: usize, headers: &csv::StringRecord, err: csv::Error) -> EngineError {
    let field = match err.kind() {
        csv::ErrorKind::Deserialize { err: de, .. } => de
            .field()
            .and_then(|i| headers.get(i as usize))
            .unwrap_or("record")
            .to_string(),
        _ => "record".to_string(),
    };
    EngineError::malformed(index, field, err.to_string())
}

/// Parse measurement records from CSV with a header row naming the fields.
///
/// Empty `latitude`/`longitude` cells read as absent.
pub fn parse_measurements_csv<R: Read>(reader: R) -> EngineResult<Dataset> {
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = rdr
        .headers()
        .map_err(|e| EngineError::InvalidParameter(format!("unreadable CSV header: {}", e)))?
        .clone();

    let mut rows = Vec::new();
    for (index, record) in rdr.deserialize::<MeasurementRow>().enumerate() {
        let row = record.map_err(|e| {
            let err = row_error(index, &headers, e);
            tracing::warn!(error = %err, "rejecting measurement batch");
            err
        })?;
        rows.push(row);
    }
    Dataset::new(rows)
}

/// Parse measurement records from a CSV file.
pub fn parse_measurements_csv_file(csv_path: &Path) -> Result<Dataset> {
    let file = File::open(csv_path)
        .with_context(|| format!("Failed to open CSV file: {}", csv_path.display()))?;
    parse_measurements_csv(file)
        .with_context(|| format!("Failed to parse measurements from {}", csv_path.display()))
}
