//! Locations query handlers.
//!
//! The locations endpoint provides two functions:
//! 1. List stations (GET /collections/{id}/locations), filtered by bbox,
//!    polygon and parameter names
//! 2. Query the time series of one station (GET /collections/{id}/locations/{locationId})
//!
//! Location ids are station ids.

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use edr_protocol::media_types;
use observations::{get_station_coverage, list_stations, QueryError, StationQuery, TimeInterval};
use serde::Deserialize;
use std::sync::Arc;

use super::{collection_not_found, json_response, query_error_response, record_request};
use crate::content_negotiation::{check_coverage_accept, check_feature_accept};
use crate::state::AppState;

/// Query parameters for the locations list endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct LocationsListParams {
    /// Bounding box `west,south,east,north`.
    pub bbox: Option<String>,

    /// WKT polygon.
    pub coords: Option<String>,

    /// Parameter name(s) the stations must report.
    #[serde(rename = "parameter-name")]
    pub parameter_name: Option<String>,

    /// Accepted for compatibility; syntax and order are validated but not used for filtering.
    pub datetime: Option<String>,
}

/// Query parameters for the station data endpoint.
#[derive(Debug, Deserialize, Default)]
pub struct LocationQueryParams {
    /// Datetime instant or interval.
    pub datetime: Option<String>,

    /// Parameter name(s) to retrieve.
    #[serde(rename = "parameter-name")]
    pub parameter_name: Option<String>,
}

/// GET /edr/collections/:collection_id/locations
///
/// Returns a GeoJSON FeatureCollection of matching stations.
pub async fn locations_list_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    Query(params): Query<LocationsListParams>,
    headers: HeaderMap,
) -> Response {
    record_request("locations");

    if let Err(response) = check_feature_accept(&headers) {
        return response;
    }

    if !state.is_collection(&collection_id) {
        return collection_not_found(&collection_id);
    }

    match locations_list(&state, params) {
        Ok(response) => response,
        Err(err) => query_error_response(&err),
    }
}

fn locations_list(state: &AppState, params: LocationsListParams) -> Result<Response, QueryError> {
    TimeInterval::parse(params.datetime.as_deref())?.ensure_ordered()?;

    let query = StationQuery {
        bbox: params.bbox,
        coords: params.coords,
        parameter_name: params.parameter_name,
    };
    let listing = list_stations(&state.dataset, &query)?;

    tracing::debug!(count = listing.len(), "Station listing");

    Ok(json_response(
        StatusCode::OK,
        media_types::GEO_JSON,
        &listing.to_feature_collection(&state.dataset),
    ))
}

/// GET /edr/collections/:collection_id/locations/:location_id
///
/// Returns the CoverageJSON point series of one station.
pub async fn location_query_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path((collection_id, location_id)): Path<(String, String)>,
    Query(params): Query<LocationQueryParams>,
    headers: HeaderMap,
) -> Response {
    record_request("location");

    if let Err(response) = check_coverage_accept(&headers) {
        return response;
    }

    if !state.is_collection(&collection_id) {
        return collection_not_found(&collection_id);
    }

    tracing::debug!(
        station_id = %location_id,
        parameters = ?params.parameter_name,
        datetime = ?params.datetime,
        "Station coverage query"
    );

    match get_station_coverage(
        &state.dataset,
        &location_id,
        params.parameter_name.as_deref(),
        params.datetime.as_deref(),
    ) {
        Ok(coverage) => json_response(StatusCode::OK, media_types::COVERAGE_JSON, &coverage),
        Err(err) => query_error_response(&err),
    }
}
