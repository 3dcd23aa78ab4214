//! Analytical services.
//!
//! Every service is a pure function of an immutable [`Dataset`](crate::models::Dataset)
//! and explicit per-request parameters; nothing here holds state between calls.

pub mod aggregation;
pub mod cyclical;
pub mod ranking;
pub mod reduction;
pub mod reference;
pub mod snapshot;
pub mod summary;
pub mod time_series;
pub mod variation;

pub use aggregation::{aggregate, GroupBy, KeyField, Reducer};
pub use cyclical::{seasonal_profile, week_type_profile, LocationFilter};
pub use ranking::{rank_by_concentration, rank_by_sensor_coverage, rank_by_sensor_coverage_with_cap};
pub use reduction::{compute_reductions, site_reductions};
pub use reference::{inject_references, References};
pub use snapshot::latest_snapshot;
pub use summary::{location_options, pollutant_ids, pollutants_at, summarize};
pub use time_series::build_time_series;
pub use variation::rank_by_variation;
