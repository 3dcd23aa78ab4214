pub mod measurement;
pub mod pollutant;
pub mod time;

pub use measurement::*;
pub use pollutant::*;
pub use time::*;
