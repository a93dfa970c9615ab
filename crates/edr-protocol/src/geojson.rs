//! EDR GeoJSON types for location listings.
//!
//! The `locations` query without a location id answers with an
//! `EDR GeoJSON FeatureCollection Object`: one `Point` feature per station,
//! each naming the parameters it carries, plus a collection-level
//! parameter dictionary restricted to the parameters actually listed.
//!
//! See: <https://www.opengis.net/spec/ogcapi-edr-1/1.1/req/edr-geojson>

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parameters::Parameter;

/// A GeoJSON FeatureCollection for EDR responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdrFeatureCollection {
    /// Type identifier (always "FeatureCollection").
    #[serde(rename = "type")]
    pub type_: String,

    /// Array of features.
    pub features: Vec<EdrFeature>,

    /// Parameters referenced by the features.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, Parameter>>,
}

impl EdrFeatureCollection {
    /// Create a new empty FeatureCollection.
    pub fn new() -> Self {
        Self {
            type_: "FeatureCollection".to_string(),
            features: Vec::new(),
            parameters: None,
        }
    }

    /// Add multiple features to the collection.
    pub fn with_features(mut self, features: Vec<EdrFeature>) -> Self {
        self.features.extend(features);
        self
    }

    /// Set the parameter dictionary.
    pub fn with_parameters(mut self, parameters: BTreeMap<String, Parameter>) -> Self {
        self.parameters = Some(parameters);
        self
    }
}

impl Default for EdrFeatureCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// A GeoJSON Feature for EDR responses.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EdrFeature {
    /// Type identifier (always "Feature").
    #[serde(rename = "type")]
    pub type_: String,

    /// Optional feature identifier.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    /// The geometry of this feature.
    pub geometry: EdrGeometry,

    /// Location name and available parameters.
    pub properties: EdrProperties,
}

impl EdrFeature {
    /// Create a new feature with a point geometry.
    pub fn point(lon: f64, lat: f64) -> Self {
        Self {
            type_: "Feature".to_string(),
            id: None,
            geometry: EdrGeometry::point(lon, lat),
            properties: EdrProperties::new(),
        }
    }

    /// Set the feature ID.
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the properties.
    pub fn with_properties(mut self, properties: EdrProperties) -> Self {
        self.properties = properties;
        self
    }
}

/// GeoJSON geometry types used by location listings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum EdrGeometry {
    /// A point geometry.
    Point {
        /// Coordinates as [longitude, latitude].
        coordinates: [f64; 2],
    },
}

impl EdrGeometry {
    /// Create a point geometry.
    pub fn point(lon: f64, lat: f64) -> Self {
        EdrGeometry::Point {
            coordinates: [lon, lat],
        }
    }
}

/// Properties for a location feature.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct EdrProperties {
    /// Human-readable location name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Parameter ids with data at this location.
    #[serde(rename = "parameter-name", default)]
    pub parameter_names: Vec<String>,
}

impl EdrProperties {
    /// Create new empty properties.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the location name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Set the parameter names.
    pub fn with_parameter_names(mut self, names: Vec<String>) -> Self {
        self.parameter_names = names;
        self
    }
}
