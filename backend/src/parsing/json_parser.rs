use std::path::Path;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::error::{EngineError, EngineResult};
use crate::models::{Dataset, MeasurementRow};

/// Accepts a bare array or an object wrapping it under `measurements`.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawDocument {
    Rows(Vec<serde_json::Value>),
    Wrapped { measurements: Vec<serde_json::Value> },
}

impl RawDocument {
    fn into_rows(self) -> Vec<serde_json::Value> {
        match self {
            RawDocument::Rows(rows) | RawDocument::Wrapped { measurements: rows } => rows,
        }
    }
}

fn decode_row(index: usize, value: serde_json::Value) -> EngineResult<MeasurementRow> {
    serde_path_to_error::deserialize(value).map_err(|e| {
        let path = e.path().to_string();
        let field = if path == "." { "record".to_string() } else { path };
        EngineError::malformed(index, field, e.into_inner().to_string())
    })
}

/// Parse measurement records from an already decoded JSON value.
pub fn parse_measurements_value(value: serde_json::Value) -> EngineResult<Dataset> {
    let document: RawDocument = serde_json::from_value(value).map_err(|_| {
        EngineError::InvalidParameter(
            "expected a JSON array of measurements or {\"measurements\": [...]}".to_string(),
        )
    })?;

    let rows = document
        .into_rows()
        .into_iter()
        .enumerate()
        .map(|(index, value)| decode_row(index, value))
        .collect::<EngineResult<Vec<_>>>()
        .map_err(|e| {
            tracing::warn!(error = %e, "rejecting measurement batch");
            e
        })?;
    Dataset::new(rows)
}

/// Parse measurement records from a JSON string.
pub fn parse_measurements_json_str(json_str: &str) -> EngineResult<Dataset> {
    let value: serde_json::Value = serde_json::from_str(json_str)
        .map_err(|e| EngineError::InvalidParameter(format!("invalid JSON: {}", e)))?;
    parse_measurements_value(value)
}

/// Parse measurement records from a JSON file.
pub fn parse_measurements_json(json_path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(json_path)
        .with_context(|| format!("Failed to read JSON file: {}", json_path.display()))?;
    parse_measurements_json_str(&content)
        .with_context(|| format!("Failed to parse measurements from {}", json_path.display()))
}
