//! Collections endpoint handlers.

use axum::{
    extract::{Extension, Path},
    http::HeaderMap,
    response::Response,
};
use edr_protocol::{media_types, Collection, CollectionList};
use observations::collection_metadata;
use std::sync::Arc;

use super::{cached_json_response, collection_not_found, record_request};
use crate::content_negotiation::check_metadata_accept;
use crate::state::AppState;

fn build_collection(state: &AppState) -> Collection {
    collection_metadata(&state.dataset, &state.collection_info(), &state.base_url)
}

/// GET /edr/collections - List all collections
pub async fn list_collections_handler(
    Extension(state): Extension<Arc<AppState>>,
    headers: HeaderMap,
) -> Response {
    record_request("collections");

    if let Err(response) = check_metadata_accept(&headers) {
        return response;
    }

    let list = CollectionList::new(vec![build_collection(&state)], &state.base_url);
    cached_json_response(media_types::JSON, 300, &list)
}

/// GET /edr/collections/:collection_id - Collection metadata
pub async fn get_collection_handler(
    Extension(state): Extension<Arc<AppState>>,
    Path(collection_id): Path<String>,
    headers: HeaderMap,
) -> Response {
    record_request("collection");

    if let Err(response) = check_metadata_accept(&headers) {
        return response;
    }

    if !state.is_collection(&collection_id) {
        return collection_not_found(&collection_id);
    }

    cached_json_response(media_types::JSON, 300, &build_collection(&state))
}
