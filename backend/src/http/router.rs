//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, compression, tracing),
//! and creates the axum router ready for serving.

use axum::{extract::DefaultBodyLimit, routing::get, Router};
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers;
use super::state::AppState;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api_v1 = Router::new()
        .route("/pollutants", get(handlers::list_pollutants))
        // Dataset store
        .route(
            "/datasets",
            get(handlers::list_datasets).post(handlers::create_dataset),
        )
        .route("/datasets/{id}", get(handlers::get_dataset_info))
        .route("/datasets/{id}/summary", get(handlers::get_summary))
        .route("/datasets/{id}/locations", get(handlers::get_locations))
        .route(
            "/datasets/{id}/locations/{location}/pollutants",
            get(handlers::get_location_pollutants),
        )
        // Rankings
        .route("/datasets/{id}/concentration", get(handlers::get_concentration_ranking))
        .route("/datasets/{id}/variation", get(handlers::get_variation_ranking))
        .route("/datasets/{id}/sensors", get(handlers::get_sensor_ranking))
        .route("/datasets/{id}/reductions", get(handlers::get_reductions))
        // Series and profiles
        .route("/datasets/{id}/trend", get(handlers::get_time_series))
        .route("/datasets/{id}/seasons", get(handlers::get_seasonal_profile))
        .route("/datasets/{id}/week-types", get(handlers::get_week_type_profile))
        .route("/datasets/{id}/snapshot", get(handlers::get_latest_snapshot));

    Router::new()
        .route("/health", get(handlers::health_check))
        .nest("/v1", api_v1)
        // Hourly exports for a whole year run to tens of megabytes.
        .layer(DefaultBodyLimit::max(50 * 1024 * 1024))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
