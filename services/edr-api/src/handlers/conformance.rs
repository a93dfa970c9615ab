//! Conformance endpoint handler.

use axum::{http::HeaderMap, response::Response};
use edr_protocol::{media_types, ConformanceClasses};

use super::{cached_json_response, record_request};
use crate::content_negotiation::check_metadata_accept;

/// GET /edr/conformance - Conformance classes
pub async fn conformance_handler(headers: HeaderMap) -> Response {
    record_request("conformance");

    if let Err(response) = check_metadata_accept(&headers) {
        return response;
    }

    cached_json_response(media_types::JSON, 3600, &ConformanceClasses::current())
}
