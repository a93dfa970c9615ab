//! OGC API - Environmental Data Retrieval (EDR) Protocol
//!
//! This crate provides the wire types for an OGC EDR API serving
//! observations from fixed stations. It follows the OGC API -
//! Environmental Data Retrieval specification v1.1.
//!
//! # Conformance Classes
//!
//! This implementation targets the following conformance classes:
//! - Core
//! - Collections
//! - Locations Query
//! - Area Query
//! - CoverageJSON
//! - GeoJSON
//!
//! # Example
//!
//! ```rust
//! use edr_protocol::LandingPage;
//!
//! // Build a landing page response
//! let landing = LandingPage::new(
//!     "Station EDR API",
//!     "Environmental data retrieval for station observations",
//!     "http://localhost:8083/edr",
//! );
//! assert_eq!(landing.links.len(), 3);
//! ```

pub mod types;
pub mod collections;
pub mod parameters;
pub mod coverage_json;
pub mod geojson;
pub mod responses;

// Re-export commonly used types
pub use types::{Link, Extent, SpatialExtent, TemporalExtent};
pub use collections::{Collection, CollectionList, DataQueries, QueryDescription};
pub use parameters::{Parameter, Unit, ObservedProperty, I18nString};
pub use coverage_json::{
    CoverageCollection, CoverageJson, Domain, DomainType, Axis, AxisValue, NdArray, ReferenceSystem,
};
pub use geojson::{EdrFeature, EdrFeatureCollection, EdrGeometry, EdrProperties};
pub use responses::{LandingPage, ConformanceClasses, ExceptionResponse, Provider, Contact};

/// EDR API conformance class URIs
pub mod conformance {
    /// Core conformance class
    pub const CORE: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/core";
    /// Collections conformance class
    pub const COLLECTIONS: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/collections";
    /// Locations query conformance class
    pub const LOCATIONS: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/locations";
    /// Area query conformance class
    pub const AREA: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/area";
    /// CoverageJSON conformance class
    pub const COVJSON: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/covjson";
    /// GeoJSON conformance class
    pub const GEOJSON: &str = "http://www.opengis.net/spec/ogcapi-edr-1/1.1/conf/geojson";
}

/// Media types used in EDR responses
pub mod media_types {
    /// CoverageJSON media type
    pub const COVERAGE_JSON: &str = "application/vnd.cov+json";
    /// Legacy CoverageJSON media type
    pub const PRS_COVERAGE_JSON: &str = "application/prs.coverage+json";
    /// GeoJSON media type
    pub const GEO_JSON: &str = "application/geo+json";
    /// JSON media type
    pub const JSON: &str = "application/json";
}
