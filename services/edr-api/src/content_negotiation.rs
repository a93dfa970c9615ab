//! Content negotiation utilities for Accept header handling.
//!
//! Per RFC 7231 the server respects the Accept header and returns
//! 406 Not Acceptable when none of the requested formats can be produced.

use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use edr_protocol::{media_types, ExceptionResponse};

/// Supported media types for coverage queries (station and area).
pub const COVERAGE_MEDIA_TYPES: &[&str] = &[
    media_types::COVERAGE_JSON,
    media_types::PRS_COVERAGE_JSON,
    media_types::JSON,
];

/// Supported media types for the station listing.
pub const FEATURE_MEDIA_TYPES: &[&str] = &[media_types::GEO_JSON, media_types::JSON];

/// Supported media types for metadata queries (collections, landing, etc.)
pub const METADATA_MEDIA_TYPES: &[&str] = &[media_types::JSON];

/// Check if the Accept header is compatible with the supported media types.
/// Returns Ok(()) if compatible, or an error Response if not.
pub fn check_accept_header(headers: &HeaderMap, supported_types: &[&str]) -> Result<(), Response> {
    // Get Accept header, default to */* if not present
    let accept = headers
        .get(header::ACCEPT)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("*/*");

    // Each entry may carry parameters like "application/json;q=0.9"
    let accepted_types: Vec<&str> = accept
        .split(',')
        .map(|s| s.split(';').next().unwrap_or("").trim())
        .filter(|s| !s.is_empty())
        .collect();

    if accepted_types.is_empty() {
        return Ok(());
    }

    for accepted in &accepted_types {
        if *accepted == "*/*" {
            return Ok(());
        }

        // type/* wildcards (e.g. "application/*")
        if let Some(prefix) = accepted.strip_suffix('*') {
            if supported_types.iter().any(|s| s.starts_with(prefix)) {
                return Ok(());
            }
            continue;
        }

        if supported_types.contains(accepted) {
            return Ok(());
        }
    }

    Err(not_acceptable_response(&accepted_types, supported_types))
}

/// Create a 406 Not Acceptable response
fn not_acceptable_response(requested: &[&str], supported: &[&str]) -> Response {
    let exc = ExceptionResponse::not_acceptable(format!(
        "Content negotiation failed. Requested format(s) '{}' not supported. Supported formats: {}",
        requested.join(", "),
        supported.join(", ")
    ));

    (
        StatusCode::NOT_ACCEPTABLE,
        [(header::CONTENT_TYPE, media_types::JSON)],
        serde_json::to_string(&exc).unwrap_or_default(),
    )
        .into_response()
}

/// Helper to check Accept header for coverage queries
pub fn check_coverage_accept(headers: &HeaderMap) -> Result<(), Response> {
    check_accept_header(headers, COVERAGE_MEDIA_TYPES)
}

/// Helper to check Accept header for the station listing
pub fn check_feature_accept(headers: &HeaderMap) -> Result<(), Response> {
    check_accept_header(headers, FEATURE_MEDIA_TYPES)
}

/// Helper to check Accept header for metadata queries
pub fn check_metadata_accept(headers: &HeaderMap) -> Result<(), Response> {
    check_accept_header(headers, METADATA_MEDIA_TYPES)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    fn make_headers(accept: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::ACCEPT, HeaderValue::from_str(accept).unwrap());
        headers
    }

    #[test]
    fn test_accept_covjson() {
        let headers = make_headers("application/vnd.cov+json");
        assert!(check_coverage_accept(&headers).is_ok());
        assert!(check_feature_accept(&headers).is_err());
    }

    #[test]
    fn test_accept_prs_coverage_json() {
        let headers = make_headers("application/prs.coverage+json");
        assert!(check_coverage_accept(&headers).is_ok());
    }

    #[test]
    fn test_accept_geojson() {
        let headers = make_headers("application/geo+json");
        assert!(check_feature_accept(&headers).is_ok());
        assert!(check_coverage_accept(&headers).is_err());
    }

    #[test]
    fn test_accept_json() {
        let headers = make_headers("application/json");
        assert!(check_coverage_accept(&headers).is_ok());
        assert!(check_feature_accept(&headers).is_ok());
        assert!(check_metadata_accept(&headers).is_ok());
    }

    #[test]
    fn test_accept_wildcards() {
        for accept in ["*/*", "application/*"] {
            let headers = make_headers(accept);
            assert!(check_coverage_accept(&headers).is_ok());
            assert!(check_metadata_accept(&headers).is_ok());
        }
    }

    #[test]
    fn test_accept_no_header() {
        let headers = HeaderMap::new();
        assert!(check_coverage_accept(&headers).is_ok());
        assert!(check_metadata_accept(&headers).is_ok());
    }

    #[test]
    fn test_accept_with_quality() {
        let headers = make_headers("text/html, application/vnd.cov+json;q=0.9");
        assert!(check_coverage_accept(&headers).is_ok());
    }

    #[test]
    fn test_browser_default_accept() {
        let headers =
            make_headers("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8");
        assert!(check_coverage_accept(&headers).is_ok());
    }

    #[test]
    fn test_reject_unsupported() {
        for accept in ["text/html", "application/xml", "text/*", "text/html, application/xml"] {
            let headers = make_headers(accept);
            assert!(check_coverage_accept(&headers).is_err(), "{}", accept);
            assert!(check_metadata_accept(&headers).is_err(), "{}", accept);
        }
    }

    #[test]
    fn test_not_acceptable_status() {
        let response = check_metadata_accept(&make_headers("text/csv")).unwrap_err();
        assert_eq!(response.status(), StatusCode::NOT_ACCEPTABLE);
    }
}
