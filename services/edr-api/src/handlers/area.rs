//! Area query handler.

use axum::{
    extract::{Extension, Path, Query},
    http::{HeaderMap, StatusCode},
    response::Response,
};
use edr_protocol::media_types;
use observations::{get_area_coverage, QueryError};
use serde::Deserialize;
use std::sync::Arc;

use super::{collection_not_found, json_response, query_error_response, record_request};
use crate::content_negotiation::check_coverage_accept;
use crate::state::AppState;

/// Query parameters for area requests.
#[derive(Debug, Deserialize, Default)]
pub struct AreaQueryParams {
    /// WKT polygon (required).
    pub coords: Option<String>,

    /// Datetime instant or interval.
    pub datetime: Option<String>,

    /// Parameter name(s) to retrieve.
    #[serde(rename = "parameter-name")]
    pub parameter_name: Option<String>,
}

/// GET /edr/collections/:collection_id/area
///
/// Returns a CoverageCollection with one point series per station inside the polygon.
pub async fn area_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    Query(params): Query<AreaQueryParams>,
    headers: HeaderMap,
) -> Response {
    record_request("area");

    if let Err(response) = check_coverage_accept(&headers) {
        return response;
    }

    if !state.is_collection(&collection_id) {
        return collection_not_found(&collection_id);
    }

    let coords = match params.coords.as_deref().map(str::trim) {
        Some(coords) if !coords.is_empty() => coords,
        _ => {
            return query_error_response(&QueryError::InvalidArgument(
                "Missing required parameter: coords".to_string(),
            ))
        }
    };

    match get_area_coverage(
        &state.dataset,
        coords,
        params.parameter_name.as_deref(),
        params.datetime.as_deref(),
    ) {
        Ok(collection) => {
            tracing::debug!(count = collection.len(), "Area coverage query");
            json_response(StatusCode::OK, media_types::COVERAGE_JSON, &collection)
        }
        Err(err) => query_error_response(&err),
    }
}
