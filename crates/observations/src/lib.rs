//! Station observation store and EDR query engine.
//!
//! This crate holds a read-only [`Dataset`] of fixed weather stations and
//! their observation time series, and answers the EDR queries served over it:
//!
//! - station listings filtered by bbox, polygon and parameter names
//!   ([`list_stations`])
//! - point-series coverages for one station ([`get_station_coverage`])
//! - coverage collections for all stations in a polygon ([`get_area_coverage`])
//! - collection metadata derived from the dataset extents ([`collection_metadata`])
//!
//! Output documents are the wire types from `edr-protocol`.
//!
//! # Example
//!
//! ```rust
//! use chrono::{TimeZone, Utc};
//! use observations::{get_station_coverage, Dataset, Observation, Station, TimeSeries, Variable};
//!
//! let t0 = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
//! let dataset = Dataset::builder()
//!     .add_station(Station {
//!         id: "06260".into(),
//!         name: "De Bilt".into(),
//!         latitude: 52.1,
//!         longitude: 5.18,
//!         height: 1.9,
//!     })
//!     .add_variable(Variable {
//!         id: "ff".into(),
//!         long_name: "Wind Speed".into(),
//!         standard_name: Some("wind_speed".into()),
//!         units: "m s-1".into(),
//!         comment: None,
//!     })
//!     .add_series("06260", "ff", TimeSeries::new(vec![Observation::new(t0, Some(3.4))]).unwrap())
//!     .build()
//!     .unwrap();
//!
//! let coverage = get_station_coverage(&dataset, "06260", Some("ff"), None).unwrap();
//! assert_eq!(coverage.time_len(), 1);
//! ```

pub mod coverage;
pub mod dataset;
pub mod error;
pub mod interval;
pub mod parameters;
pub mod spatial;
pub mod stations;

pub use coverage::{assemble, get_area_coverage, get_station_coverage};
pub use dataset::{
    AvailabilityIndex, Dataset, DatasetBuilder, Observation, SpatialExtent, Station, TemporalExtent,
    TimeSeries, Variable,
};
pub use error::{DatasetError, QueryError};
pub use interval::{format_instant, IntervalError, TimeInterval};
pub use parameters::{parameter_dictionary, parse_parameter_names, resolve_parameters};
pub use spatial::{BoundingBox, Polygon, SpatialError, SpatialFilter};
pub use stations::{
    collection_metadata, list_stations, CollectionInfo, StationListing, StationQuery,
    StationSummary,
};
