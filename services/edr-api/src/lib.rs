//! EDR API Service Library
//!
//! This crate provides the HTTP server for the OGC API - Environmental Data
//! Retrieval endpoints over a station observation dataset.

pub mod config;
pub mod content_negotiation;
pub mod handlers;
pub mod loader;
pub mod state;

use std::sync::Arc;

use axum::{routing::get, Extension, Router};
use tower_http::{compression::CompressionLayer, cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

/// Build the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        // Landing page
        .route("/edr", get(handlers::landing::landing_handler))
        .route("/edr/", get(handlers::landing::landing_handler))
        // Conformance
        .route(
            "/edr/conformance",
            get(handlers::conformance::conformance_handler),
        )
        // Collections
        .route(
            "/edr/collections",
            get(handlers::collections::list_collections_handler),
        )
        .route(
            "/edr/collections/:collection_id",
            get(handlers::collections::get_collection_handler),
        )
        // Locations
        .route(
            "/edr/collections/:collection_id/locations",
            get(handlers::locations::locations_list_handler),
        )
        .route(
            "/edr/collections/:collection_id/locations/:location_id",
            get(handlers::locations::location_query_handler),
        )
        // Area query
        .route(
            "/edr/collections/:collection_id/area",
            get(handlers::area::area_handler),
        )
        // Health and metrics
        .route("/health", get(handlers::health::health_handler))
        .route("/ready", get(handlers::health::ready_handler))
        .route("/metrics", get(handlers::health::metrics_handler))
        // Middleware
        .layer(Extension(state))
        .layer(TraceLayer::new_for_http())
        .layer(CompressionLayer::new())
        .layer(CorsLayer::permissive())
}
