//! Validation errors raised by the engine's entry points.
//!
//! An empty grouping or ranking result is never an error: callers check the
//! returned collection for emptiness. Reference or comparison locations that
//! are absent from a dataset are not errors either; they simply yield no rows.

use chrono::{DateTime, Utc};

/// Result type for engine operations that validate their inputs.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for engine entry points.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum EngineError {
    /// The location granularity selector is outside `site | district | region`.
    #[error("Invalid granularity '{0}': expected one of site, district, region")]
    InvalidGranularity(String),

    /// A measurement row is missing a field or carries an unusable value.
    /// The whole batch is rejected.
    #[error("Malformed row {index}: field '{field}' {reason}")]
    MalformedRow {
        index: usize,
        field: String,
        reason: String,
    },

    /// The query window ends before it starts.
    #[error("Invalid window: start {start} is after end {end}")]
    InvalidWindow {
        start: DateTime<Utc>,
        end: DateTime<Utc>,
    },

    /// A request parameter could not be interpreted.
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),
}

impl EngineError {
    /// Create a malformed row error.
    pub fn malformed(index: usize, field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::MalformedRow {
            index,
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// Error code for programmatic handling by API consumers.
    pub fn code(&self) -> &'static str {
        match self {
            Self::InvalidGranularity(_) => "INVALID_GRANULARITY",
            Self::MalformedRow { .. } => "MALFORMED_ROW",
            Self::InvalidWindow { .. } => "INVALID_WINDOW",
            Self::InvalidParameter(_) => "INVALID_PARAMETER",
        }
    }
}
