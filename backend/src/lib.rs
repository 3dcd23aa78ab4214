//! # Air-Quality Aggregation Engine
//!
//! Turns hourly pollutant measurements from a sensor network into rankings,
//! time series and cyclical profiles for dashboard views.
//!
//! ## Features
//!
//! - **Loading**: Parse measurement exports from JSON or CSV
//! - **Rankings**: Top locations by concentration, reduction over a window,
//!   or number of reporting sensors, with pinned reference locations
//! - **Trends**: Per-location time series with an interquartile band
//! - **Profiles**: Seasonal and weekday/weekend averages
//! - **HTTP API**: RESTful endpoints over stored datasets
//!
//! ## Architecture
//!
//! - [`models`]: Measurement rows, datasets, granularities and time windows
//! - [`parsing`]: JSON and CSV loaders
//! - [`services`]: The aggregation and ranking engine
//! - [`routes`]: Result types for each view
//! - [`api`]: Public re-exports and identifiers
//! - [`db`]: Dataset repository and its in-memory implementation
//! - [`config`]: TOML configuration of request defaults
//! - [`http`]: Axum-based HTTP server and request handlers

// RepositoryError carries rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;
pub mod db;
pub mod error;
pub mod models;
pub mod parsing;
pub mod routes;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;

#[cfg(test)]
mod test_support;
