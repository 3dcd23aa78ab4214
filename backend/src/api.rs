//! Public API surface for the engine.
//!
//! This file consolidates the DTO types returned by the services and the HTTP
//! API. All types derive Serialize/Deserialize for JSON serialization.

pub use crate::models::pollutant::PollutantInfo;
pub use crate::routes::cyclical::CyclicalBucket;
pub use crate::routes::cyclical::CyclicalCategory;
pub use crate::routes::cyclical::Season;
pub use crate::routes::cyclical::WeekType;
pub use crate::routes::landing::DatasetInfo;
pub use crate::routes::landing::DatasetSummary;
pub use crate::routes::ranking::AggregateRow;
pub use crate::routes::ranking::RankedRow;
pub use crate::routes::ranking::RankedTable;
pub use crate::routes::snapshot::SnapshotEntry;
pub use crate::routes::trend::ReductionData;
pub use crate::routes::trend::ReductionRow;
pub use crate::routes::trend::TimeSeriesData;
pub use crate::routes::trend::TimeSeriesPoint;

use serde::{Deserialize, Serialize};

/// Stored dataset identifier.
#[derive(
    Debug, Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct DatasetId(pub i64);

impl DatasetId {
    pub fn new(value: i64) -> Self {
        DatasetId(value)
    }

    pub fn value(&self) -> i64 {
        self.0
    }
}

impl std::fmt::Display for DatasetId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<DatasetId> for i64 {
    fn from(id: DatasetId) -> Self {
        id.0
    }
}

impl From<i64> for DatasetId {
    fn from(value: i64) -> Self {
        DatasetId(value)
    }
}

#[cfg(test)]
#[path = "api_tests.rs"]
mod api_tests;
