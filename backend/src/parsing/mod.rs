//! Loaders turning exported measurement files into a validated [`Dataset`].
//!
//! - [`json_parser`]: a JSON array of measurement records
//! - [`csv_parser`]: a CSV file with one header row
//!
//! Both reject the whole batch on the first bad record.
//!
//! [`Dataset`]: crate::models::Dataset

pub mod csv_parser;
pub mod json_parser;


pub use csv_parser::{parse_measurements_csv, parse_measurements_csv_file};
pub use json_parser::{parse_measurements_json, parse_measurements_json_str, parse_measurements_value};
