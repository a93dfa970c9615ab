//! Station listing and collection metadata.

use std::collections::BTreeSet;

use edr_protocol::collections::{Collection, DataQueries, COVERAGE_JSON_FORMAT};
use edr_protocol::geojson::{EdrFeature, EdrFeatureCollection, EdrProperties};
use edr_protocol::types::{Extent, TemporalExtent};
use tracing::debug;

use crate::dataset::{Dataset, Station};
use crate::error::QueryError;
use crate::interval::format_instant;
use crate::parameters::{parameter_dictionary, parse_parameter_names, resolve_parameters};
use crate::spatial::{BoundingBox, Polygon, SpatialFilter};

/// Raw station listing request, as received from the query string.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StationQuery {
    /// `west,south,east,north`
    pub bbox: Option<String>,
    /// WKT polygon.
    pub coords: Option<String>,
    /// Comma-separated parameter ids.
    pub parameter_name: Option<String>,
}

impl StationQuery {
    /// Parse the spatial part of the request. Blank values count as absent.
    pub fn spatial_filter(&self) -> Result<Option<SpatialFilter>, QueryError> {
        let bbox = self.bbox.as_deref().map(str::trim).filter(|s| !s.is_empty());
        let coords = self.coords.as_deref().map(str::trim).filter(|s| !s.is_empty());

        match (bbox, coords) {
            (Some(_), Some(_)) => Err(QueryError::InvalidArgument(
                "bbox and coords are mutually exclusive".to_string(),
            )),
            (Some(bbox), None) => Ok(Some(SpatialFilter::BoundingBox(BoundingBox::parse(bbox)?))),
            (None, Some(wkt)) => Ok(Some(SpatialFilter::Polygon(Polygon::parse_wkt(wkt)?))),
            (None, None) => Ok(None),
        }
    }
}

/// One listed station with its sorted available parameter ids.
#[derive(Debug, Clone, PartialEq)]
pub struct StationSummary<'a> {
    pub station: &'a Station,
    pub parameter_ids: Vec<String>,
}

/// Result of [`list_stations`].
#[derive(Debug, Clone, PartialEq)]
pub struct StationListing<'a> {
    /// Surviving stations in dataset order.
    pub stations: Vec<StationSummary<'a>>,
    /// Sorted union of the surviving stations' parameter ids.
    pub parameter_ids: Vec<String>,
}

impl StationListing<'_> {
    pub fn len(&self) -> usize {
        self.stations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stations.is_empty()
    }

    /// Render as an EDR GeoJSON FeatureCollection.
    pub fn to_feature_collection(&self, dataset: &Dataset) -> EdrFeatureCollection {
        let features = self
            .stations
            .iter()
            .map(|summary| {
                EdrFeature::point(summary.station.longitude, summary.station.latitude)
                    .with_id(&summary.station.id)
                    .with_properties(
                        EdrProperties::new()
                            .with_name(&summary.station.name)
                            .with_parameter_names(summary.parameter_ids.clone()),
                    )
            })
            .collect();

        EdrFeatureCollection::new()
            .with_features(features)
            .with_parameters(parameter_dictionary(
                dataset,
                self.parameter_ids.iter().map(String::as_str),
            ))
    }
}

/// List stations matching the spatial and parameter filters.
///
/// An empty result is a success.
pub fn list_stations<'a>(
    dataset: &'a Dataset,
    query: &StationQuery,
) -> Result<StationListing<'a>, QueryError> {
    let filter = query.spatial_filter()?;

    let requested: Option<BTreeSet<String>> = match query.parameter_name.as_deref() {
        Some(names) if !parse_parameter_names(names).is_empty() => Some(
            resolve_parameters(Some(names), dataset.variable_ids())?
                .into_iter()
                .collect(),
        ),
        _ => None,
    };

    let mut union = BTreeSet::new();
    let mut stations = Vec::new();

    for station in dataset.stations() {
        if let Some(filter) = &filter {
            if !filter.matches(station) {
                continue;
            }
        }

        let available = match dataset.available_parameter_ids(&station.id) {
            Some(available) => available,
            None => continue,
        };

        if let Some(requested) = &requested {
            if available.is_disjoint(requested) {
                continue;
            }
        }

        union.extend(available.iter().cloned());
        stations.push(StationSummary {
            station,
            parameter_ids: available.iter().cloned().collect(),
        });
    }

    debug!(count = stations.len(), parameters = union.len(), "Listed stations");

    Ok(StationListing {
        stations,
        parameter_ids: union.into_iter().collect(),
    })
}

/// Descriptive fields of the single collection served.
#[derive(Debug, Clone, PartialEq)]
pub struct CollectionInfo {
    pub id: String,
    pub title: String,
    pub description: String,
    pub keywords: Vec<String>,
}

impl Default for CollectionInfo {
    fn default() -> Self {
        Self {
            id: "observations".to_string(),
            title: "Station observations".to_string(),
            description: "Time series of in-situ observations from fixed weather stations"
                .to_string(),
            keywords: Vec::new(),
        }
    }
}

/// Build the collection metadata document from the dataset extents and catalog.
pub fn collection_metadata(dataset: &Dataset, info: &CollectionInfo, base_url: &str) -> Collection {
    let mut extent = Extent::empty();
    if let Some(spatial) = dataset.spatial_extent() {
        extent = Extent::with_spatial(spatial.to_bbox(), None);
    }
    if let Some(temporal) = dataset.temporal_extent() {
        extent = extent.with_temporal(TemporalExtent::closed(
            format_instant(temporal.start),
            format_instant(temporal.end),
        ));
    }

    let mut collection = Collection::new(&info.id)
        .with_title(&info.title)
        .with_description(&info.description)
        .with_extent(extent)
        .with_data_queries(
            DataQueries::with_locations(base_url, &info.id).with_area(base_url, &info.id),
        )
        .with_crs(vec!["CRS:84".to_string()])
        .with_output_formats(vec![COVERAGE_JSON_FORMAT.to_string()])
        .with_parameters(parameter_dictionary(dataset, dataset.variable_ids()));
    if !info.keywords.is_empty() {
        collection = collection.with_keywords(info.keywords.clone());
    }
    collection.build_links(base_url);

    collection
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{Observation, TimeSeries, Variable};
    use chrono::{TimeZone, Utc};

    fn station(id: &str, lon: f64, lat: f64) -> Station {
        Station {
            id: id.to_string(),
            name: format!("Station {}", id),
            latitude: lat,
            longitude: lon,
            height: 0.0,
        }
    }

    fn variable(id: &str, standard_name: Option<&str>) -> Variable {
        Variable {
            id: id.to_string(),
            long_name: id.to_uppercase(),
            standard_name: standard_name.map(str::to_string),
            units: "1".to_string(),
            comment: None,
        }
    }

    fn series(value: Option<f64>) -> TimeSeries {
        let t = Utc.with_ymd_and_hms(2023, 1, 1, 0, 0, 0).unwrap();
        let t2 = Utc.with_ymd_and_hms(2023, 1, 1, 0, 10, 0).unwrap();
        TimeSeries::new(vec![Observation::new(t, value), Observation::new(t2, value)]).unwrap()
    }

    fn dataset() -> Dataset {
        Dataset::builder()
            .add_station(station("B", 5.18, 52.1))
            .add_station(station("A", 6.0, 53.0))
            .add_station(station("C", 4.0, 51.0))
            .add_variable(variable("ff", Some("wind_speed")))
            .add_variable(variable("dd", Some("wind_from_direction")))
            .add_variable(variable("ta", None))
            .add_series("B", "ff", series(Some(3.4)))
            .add_series("B", "ta", series(Some(1.0)))
            .add_series("A", "dd", series(Some(270.0)))
            .add_series("C", "ff", series(None))
            .build()
            .unwrap()
    }

    fn ids<'a>(listing: &'a StationListing<'_>) -> Vec<&'a str> {
        listing.stations.iter().map(|s| s.station.id.as_str()).collect()
    }

    #[test]
    fn test_list_all_in_dataset_order() {
        let ds = dataset();
        let listing = list_stations(&ds, &StationQuery::default()).unwrap();

        assert_eq!(ids(&listing), vec!["B", "A", "C"]);
        assert_eq!(listing.stations[0].parameter_ids, vec!["ff", "ta"]);
        assert!(listing.stations[2].parameter_ids.is_empty());
        assert_eq!(listing.parameter_ids, vec!["dd", "ff", "ta"]);
    }

    #[test]
    fn test_bbox_filter() {
        let ds = dataset();
        let query = StationQuery {
            bbox: Some("5.0,52.0,6.0,52.1".to_string()),
            ..Default::default()
        };
        let listing = list_stations(&ds, &query).unwrap();
        assert_eq!(ids(&listing), vec!["B"]);
        assert_eq!(listing.parameter_ids, vec!["ff", "ta"]);
    }

    #[test]
    fn test_polygon_filter() {
        let ds = dataset();
        let query = StationQuery {
            coords: Some("POLYGON((5 52, 7 52, 7 54, 5 54, 5 52))".to_string()),
            ..Default::default()
        };
        let listing = list_stations(&ds, &query).unwrap();
        assert_eq!(ids(&listing), vec!["B", "A"]);
    }

    #[test]
    fn test_bbox_and_coords_conflict() {
        let ds = dataset();
        let query = StationQuery {
            bbox: Some("0,0,1,1".to_string()),
            coords: Some("POLYGON((0 0, 1 0, 1 1, 0 0))".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            list_stations(&ds, &query),
            Err(QueryError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_parameter_filter_intersects_availability() {
        let ds = dataset();
        let query = StationQuery {
            parameter_name: Some("dd, ta".to_string()),
            ..Default::default()
        };
        let listing = list_stations(&ds, &query).unwrap();
        assert_eq!(ids(&listing), vec!["B", "A"]);
        // per-station ids are the full available set, not the request
        assert_eq!(listing.stations[0].parameter_ids, vec!["ff", "ta"]);
        assert_eq!(listing.parameter_ids, vec!["dd", "ff", "ta"]);
    }

    #[test]
    fn test_unknown_parameter_rejected_globally() {
        let ds = dataset();
        let query = StationQuery {
            parameter_name: Some("ff, zz".to_string()),
            ..Default::default()
        };
        assert_eq!(
            list_stations(&ds, &query).unwrap_err(),
            QueryError::UnknownParameter(vec!["zz".to_string()])
        );
    }

    #[test]
    fn test_empty_listing_is_success() {
        let ds = dataset();
        let query = StationQuery {
            bbox: Some("0.0,0.0,1.0,1.0".to_string()),
            ..Default::default()
        };
        let listing = list_stations(&ds, &query).unwrap();
        assert!(listing.is_empty());
        assert!(listing.parameter_ids.is_empty());

        let fc = listing.to_feature_collection(&ds);
        assert!(fc.features.is_empty());
        assert_eq!(fc.parameters.map(|p| p.len()), Some(0));
    }

    #[test]
    fn test_feature_collection() {
        let ds = dataset();
        let query = StationQuery {
            bbox: Some("5.0,52.0,6.0,52.1".to_string()),
            ..Default::default()
        };
        let fc = list_stations(&ds, &query).unwrap().to_feature_collection(&ds);

        let json = serde_json::to_value(&fc).unwrap();
        assert_eq!(json["features"][0]["id"], "B");
        assert_eq!(json["features"][0]["geometry"]["coordinates"], serde_json::json!([5.18, 52.1]));
        assert_eq!(
            json["features"][0]["properties"]["parameter-name"],
            serde_json::json!(["ff", "ta"])
        );
        let params: Vec<_> = json["parameters"].as_object().unwrap().keys().cloned().collect();
        assert_eq!(params, vec!["ff", "ta"]);
    }

    #[test]
    fn test_collection_metadata() {
        let ds = dataset();
        let info = CollectionInfo::default();
        let collection = collection_metadata(&ds, &info, "http://localhost:8083/edr");

        let json = serde_json::to_value(&collection).unwrap();
        assert_eq!(json["id"], "observations");
        assert_eq!(json["extent"]["spatial"]["bbox"][0], serde_json::json!([4.0, 51.0, 6.0, 53.0]));
        assert_eq!(json["extent"]["spatial"]["crs"], "CRS:84");
        assert_eq!(json["extent"]["temporal"]["interval"][0][0], "2023-01-01T00:00:00Z");
        assert_eq!(json["extent"]["temporal"]["interval"][0][1], "2023-01-01T00:10:00Z");
        assert_eq!(
            json["parameter_names"]["ff"]["observedProperty"]["id"],
            "https://vocab.nerc.ac.uk/standard_name/wind_speed"
        );
        assert!(json["parameter_names"]["ta"]["observedProperty"].get("id").is_none());
        assert_eq!(
            json["data_queries"]["locations"]["link"]["variables"]["output_formats"],
            serde_json::json!(["CoverageJSON"])
        );
        assert!(json["data_queries"]["area"].is_object());
        assert_eq!(json["output_formats"], serde_json::json!(["CoverageJSON"]));
    }

    #[test]
    fn test_collection_metadata_empty_dataset() {
        let ds = Dataset::builder().build().unwrap();
        let collection = collection_metadata(&ds, &CollectionInfo::default(), "http://x/edr");
        let extent = collection.extent.unwrap();
        assert!(extent.spatial.is_none());
        assert!(extent.temporal.is_none());
    }
}
