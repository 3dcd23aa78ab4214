//! HTTP handlers for the REST API.
//!
//! Each handler fetches the stored dataset, then runs the engine in
//! `spawn_blocking` since every analytical service is synchronous CPU work.

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use tracing::debug;

use super::dto::{
    parse_granularity, parse_list, required_pollutants, resolve_window, CreateDatasetRequest,
    CyclicalQuery, DatasetListResponse, GranularityQuery, HealthResponse, LocationListResponse,
    LocationPollutantsResponse, LocationsQuery, RankingQuery, ReductionQuery, SnapshotQuery, TrendQuery,
};
use super::error::AppError;
use super::state::AppState;
use crate::api::{
    CyclicalBucket, DatasetId, DatasetInfo, DatasetSummary, PollutantInfo, RankedTable,
    ReductionData, Season, SnapshotEntry, TimeSeriesData, WeekType,
};
use crate::db::services as db_services;
use crate::error::EngineResult;
use crate::models::{Dataset, POLLUTANT_CATALOG};
use crate::parsing::parse_measurements_value;
use crate::routes;
use crate::services;

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

/// Load dataset `id` and run `compute` on it off the async runtime.
async fn compute_on<T, F>(
    state: &AppState,
    route: &'static str,
    id: i64,
    compute: F,
) -> HandlerResult<T>
where
    T: Send + 'static,
    F: FnOnce(Dataset) -> EngineResult<T> + Send + 'static,
{
    let dataset = db_services::get_dataset(state.repository.as_ref(), DatasetId::new(id)).await?;
    debug!(route, dataset_id = id, rows = dataset.len(), "computing view");
    let result = tokio::task::spawn_blocking(move || compute(dataset)).await??;
    Ok(Json(result))
}

// =============================================================================
// Health Check
// =============================================================================

/// GET /health
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let store = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "available".to_string(),
        Ok(false) => "unavailable".to_string(),
        Err(e) => format!("error: {}", e),
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: "v1".to_string(),
        store,
    }))
}

/// GET /v1/pollutants
pub async fn list_pollutants() -> Json<Vec<PollutantInfo>> {
    Json(POLLUTANT_CATALOG.to_vec())
}

// =============================================================================
// Dataset storage
// =============================================================================

/// GET /v1/datasets
pub async fn list_datasets(State(state): State<AppState>) -> HandlerResult<DatasetListResponse> {
    debug!(route = routes::landing::LIST_DATASETS, "listing datasets");
    let datasets = db_services::list_datasets(state.repository.as_ref()).await?;
    let total = datasets.len();
    Ok(Json(DatasetListResponse { datasets, total }))
}

/// POST /v1/datasets
///
/// Validates every row; the first bad row rejects the whole batch.
pub async fn create_dataset(
    State(state): State<AppState>,
    Json(request): Json<CreateDatasetRequest>,
) -> Result<(StatusCode, Json<DatasetInfo>), AppError> {
    let CreateDatasetRequest { name, measurements } = request;
    debug!(route = routes::landing::POST_DATASET, name = %name, "dataset upload");
    let dataset = tokio::task::spawn_blocking(move || parse_measurements_value(measurements)).await??;
    let filter = state.config.dataset.filter();
    let info = db_services::store_dataset(state.repository.as_ref(), &name, dataset, &filter).await?;
    Ok((StatusCode::CREATED, Json(info)))
}

/// GET /v1/datasets/{id}
pub async fn get_dataset_info(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> HandlerResult<DatasetInfo> {
    let info = db_services::get_dataset_info(state.repository.as_ref(), DatasetId::new(id)).await?;
    Ok(Json(info))
}

/// GET /v1/datasets/{id}/summary
pub async fn get_summary(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<GranularityQuery>,
) -> HandlerResult<DatasetSummary> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    compute_on(&state, routes::landing::GET_DATASET_SUMMARY, id, move |dataset| {
        Ok(services::summarize(&dataset, granularity))
    })
    .await
}

/// GET /v1/datasets/{id}/locations
pub async fn get_locations(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LocationsQuery>,
) -> HandlerResult<LocationListResponse> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    let pollutants = parse_list(query.pollutants.as_deref());
    compute_on(&state, routes::landing::GET_LOCATIONS, id, move |dataset| {
        let pollutants = if pollutants.is_empty() {
            services::pollutant_ids(&dataset)
        } else {
            pollutants
        };
        let locations = services::location_options(&dataset, granularity, &pollutants);
        Ok(LocationListResponse { granularity, locations })
    })
    .await
}

/// GET /v1/datasets/{id}/locations/{location}/pollutants
pub async fn get_location_pollutants(
    State(state): State<AppState>,
    Path((id, location)): Path<(i64, String)>,
    Query(query): Query<GranularityQuery>,
) -> HandlerResult<LocationPollutantsResponse> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    compute_on(&state, routes::landing::GET_LOCATION_POLLUTANTS, id, move |dataset| {
        let pollutants = services::pollutants_at(&dataset, granularity, &location);
        Ok(LocationPollutantsResponse {
            granularity,
            location,
            pollutants,
        })
    })
    .await
}

// =============================================================================
// Rankings
// =============================================================================

/// GET /v1/datasets/{id}/concentration
pub async fn get_concentration_ranking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<RankingQuery>,
) -> HandlerResult<RankedTable> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    let pollutants = required_pollutants(query.pollutants.as_deref())?;
    let top_n = query.top_n.unwrap_or(state.config.ranking.top_n);
    let references = state
        .config
        .ranking
        .references(parse_list(query.reference.as_deref()));

    compute_on(&state, routes::ranking::GET_CONCENTRATION_RANKING, id, move |dataset| {
        let dataset = match resolve_window(&dataset, query.start, query.end)? {
            Some(window) => dataset.within(&window),
            None => dataset,
        };
        Ok(services::rank_by_concentration(
            &dataset,
            granularity,
            &pollutants,
            top_n,
            &references,
        ))
    })
    .await
}

/// GET /v1/datasets/{id}/reductions
pub async fn get_reductions(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<ReductionQuery>,
) -> HandlerResult<Option<ReductionData>> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    compute_on(&state, routes::trend::GET_REDUCTIONS, id, move |dataset| {
        let window = match resolve_window(&dataset, query.start, query.end)? {
            Some(window) => window,
            None => match dataset.extent() {
                Some(extent) => extent,
                None => return Ok(None),
            },
        };
        let rows = services::site_reductions(&dataset.within(&window), granularity, &window);
        Ok(Some(ReductionData { window, rows }))
    })
    .await
}

/// GET /v1/datasets/{id}/variation
///
/// Reductions are computed per site over the query window, or the whole
/// dataset extent when no bound is given, then averaged per location.
pub async fn get_variation_ranking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<RankingQuery>,
) -> HandlerResult<RankedTable> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    let pollutants = required_pollutants(query.pollutants.as_deref())?;
    let top_n = query.top_n.unwrap_or(state.config.ranking.variation_top_n);
    let references = state
        .config
        .ranking
        .references(parse_list(query.reference.as_deref()));

    compute_on(&state, routes::ranking::GET_VARIATION_RANKING, id, move |dataset| {
        let window = match resolve_window(&dataset, query.start, query.end)?.or(dataset.extent()) {
            Some(window) => window,
            None => return Ok(RankedTable::empty()),
        };
        let reductions = services::site_reductions(&dataset.within(&window), granularity, &window);
        Ok(services::rank_by_variation(&reductions, &pollutants, top_n, &references))
    })
    .await
}

/// GET /v1/datasets/{id}/sensors
pub async fn get_sensor_ranking(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<LocationsQuery>,
) -> HandlerResult<RankedTable> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    let pollutants = required_pollutants(query.pollutants.as_deref())?;
    let cap = state.config.ranking.sensor_cap;
    compute_on(&state, routes::ranking::GET_SENSOR_RANKING, id, move |dataset| {
        Ok(services::rank_by_sensor_coverage_with_cap(
            &dataset,
            granularity,
            &pollutants,
            cap,
        ))
    })
    .await
}

// =============================================================================
// Series and profiles
// =============================================================================

/// GET /v1/datasets/{id}/trend
pub async fn get_time_series(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<TrendQuery>,
) -> HandlerResult<TimeSeriesData> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    let pollutants = required_pollutants(query.pollutants.as_deref())?;
    let comparisons = parse_list(query.compare.as_deref());
    compute_on(&state, routes::trend::GET_TIME_SERIES, id, move |dataset| {
        let dataset = match resolve_window(&dataset, query.start, query.end)? {
            Some(window) => dataset.within(&window),
            None => dataset,
        };
        Ok(services::build_time_series(
            &dataset,
            granularity,
            &pollutants,
            &query.location,
            &comparisons,
        ))
    })
    .await
}

/// GET /v1/datasets/{id}/seasons
pub async fn get_seasonal_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<CyclicalQuery>,
) -> HandlerResult<Vec<CyclicalBucket<Season>>> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    let pollutants = required_pollutants(query.pollutants.as_deref())?;
    compute_on(&state, routes::cyclical::GET_SEASONAL_PROFILE, id, move |dataset| {
        let filter = query
            .location
            .as_deref()
            .map(|location| services::LocationFilter::new(granularity, location));
        Ok(services::seasonal_profile(&dataset, &pollutants, filter))
    })
    .await
}

/// GET /v1/datasets/{id}/week-types
pub async fn get_week_type_profile(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<CyclicalQuery>,
) -> HandlerResult<Vec<CyclicalBucket<WeekType>>> {
    let granularity = parse_granularity(query.granularity.as_deref())?;
    let pollutants = required_pollutants(query.pollutants.as_deref())?;
    compute_on(&state, routes::cyclical::GET_WEEKLY_PROFILE, id, move |dataset| {
        let filter = query
            .location
            .as_deref()
            .map(|location| services::LocationFilter::new(granularity, location));
        Ok(services::week_type_profile(&dataset, &pollutants, filter))
    })
    .await
}

/// GET /v1/datasets/{id}/snapshot
pub async fn get_latest_snapshot(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<SnapshotQuery>,
) -> HandlerResult<Vec<SnapshotEntry>> {
    compute_on(&state, routes::snapshot::GET_LATEST_SNAPSHOT, id, move |dataset| {
        Ok(services::latest_snapshot(&dataset, &query.pollutant, query.at))
    })
    .await
}
