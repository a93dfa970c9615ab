//! HTTP request handlers for the EDR API.

pub mod area;
pub mod collections;
pub mod conformance;
pub mod health;
pub mod landing;
pub mod locations;

use axum::{
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use edr_protocol::{media_types, ExceptionResponse};
use observations::QueryError;
use serde::Serialize;

/// Serialize `body` as the response with the given media type.
pub(crate) fn json_response<T: Serialize>(
    status: StatusCode,
    content_type: &'static str,
    body: &T,
) -> Response {
    match serde_json::to_string(body) {
        Ok(json) => (status, [(header::CONTENT_TYPE, content_type)], json).into_response(),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize response");
            exception_response(ExceptionResponse::internal_error(
                "Failed to serialize response",
            ))
        }
    }
}

/// Like [`json_response`] with a `Cache-Control: max-age` header.
pub(crate) fn cached_json_response<T: Serialize>(
    content_type: &'static str,
    max_age: u32,
    body: &T,
) -> Response {
    let mut response = json_response(StatusCode::OK, content_type, body);
    if response.status().is_success() {
        if let Ok(value) = HeaderValue::from_str(&format!("max-age={}", max_age)) {
            response.headers_mut().insert(header::CACHE_CONTROL, value);
        }
    }
    response
}

/// OGC exception body with the status it carries.
pub(crate) fn exception_response(exc: ExceptionResponse) -> Response {
    let status = exc
        .status
        .and_then(|s| StatusCode::from_u16(s).ok())
        .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    match serde_json::to_string(&exc) {
        Ok(json) => (status, [(header::CONTENT_TYPE, media_types::JSON)], json).into_response(),
        Err(_) => status.into_response(),
    }
}

/// Map a query failure to its HTTP response and count it.
pub(crate) fn query_error_response(err: &QueryError) -> Response {
    metrics::counter!("edr_query_errors_total", "kind" => err.kind()).increment(1);

    if err.status_code() >= 500 {
        tracing::warn!(kind = err.kind(), error = %err, "Query failed");
    } else {
        tracing::debug!(kind = err.kind(), error = %err, "Query rejected");
    }

    exception_response(err.to_exception())
}

/// 404 for a collection id other than the one served.
pub(crate) fn collection_not_found(collection_id: &str) -> Response {
    query_error_response(&QueryError::NotFound(format!(
        "Collection not found: {}",
        collection_id
    )))
}

pub(crate) fn record_request(endpoint: &'static str) {
    metrics::counter!("edr_requests_total", "endpoint" => endpoint).increment(1);
}
