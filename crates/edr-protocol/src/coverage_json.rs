//! CoverageJSON types for EDR query responses.
//!
//! CoverageJSON is the response format for EDR data queries against
//! station time series. A single station yields a `Coverage` with a
//! `PointSeries` domain; an area query yields a `CoverageCollection`.
//!
//! Parameter and range dictionaries are ordered maps so that identical
//! queries produce byte-identical documents.
//!
//! See: <https://covjson.org/>

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::parameters::Parameter;

/// CRS URI for WGS84 lon/lat axes.
pub const WGS84_CRS: &str = "http://www.opengis.net/def/crs/OGC/1.3/CRS84";

/// Axis names used by point-series ranges, outermost first.
pub const POINT_SERIES_AXES: [&str; 3] = ["t", "y", "x"];

/// A CoverageJSON document containing coverage data.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageJson {
    /// Document type (always "Coverage" for single coverage).
    #[serde(rename = "type")]
    pub type_: CoverageType,

    /// The domain defining the coverage's spatial/temporal extent.
    pub domain: Domain,

    /// Parameter definitions. Omitted when hoisted into a collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parameters: Option<BTreeMap<String, Parameter>>,

    /// Data ranges for each parameter.
    pub ranges: BTreeMap<String, NdArray>,
}

impl CoverageJson {
    /// Create a new CoverageJSON document for a point series (time series at a point).
    pub fn point_series(x: f64, y: f64, t_values: Vec<String>) -> Self {
        Self {
            type_: CoverageType::Coverage,
            domain: Domain::point_series(x, y, t_values),
            parameters: Some(BTreeMap::new()),
            ranges: BTreeMap::new(),
        }
    }

    /// Add a parameter for a time series (values along the `t` axis).
    ///
    /// Missing observations are carried as `None` and serialize as `null`.
    pub fn with_time_series(
        mut self,
        name: &str,
        param: Parameter,
        values: Vec<Option<f64>>,
    ) -> Self {
        if let Some(ref mut params) = self.parameters {
            params.insert(name.to_string(), param);
        }

        self.ranges
            .insert(name.to_string(), NdArray::point_series(values));

        self
    }

    /// Number of steps on the time axis (0 if the domain has none).
    pub fn time_len(&self) -> usize {
        self.domain.axes.get("t").map(Axis::len).unwrap_or(0)
    }

    /// Check that every range matches the time axis and its own shape header.
    pub fn is_consistent(&self) -> bool {
        let n = self.time_len();
        self.ranges
            .values()
            .all(|range| range.values.len() == n && range.shape_len() == range.values.len())
    }
}

/// Coverage type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum CoverageType {
    /// Single coverage.
    Coverage,
    /// Collection of coverages.
    CoverageCollection,
}

/// A collection of coverages sharing one parameter dictionary.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CoverageCollection {
    /// Document type (always "CoverageCollection").
    #[serde(rename = "type")]
    pub type_: CoverageType,

    /// Domain type shared by all member coverages.
    #[serde(rename = "domainType", skip_serializing_if = "Option::is_none")]
    pub domain_type: Option<DomainType>,

    /// Union of the parameters used by the member coverages.
    pub parameters: BTreeMap<String, Parameter>,

    /// Referencing shared by all member coverages.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referencing: Option<Vec<ReferenceSystemConnection>>,

    /// The member coverages, in station order.
    pub coverages: Vec<CoverageJson>,
}

impl CoverageCollection {
    /// Create an empty point-series collection.
    pub fn new() -> Self {
        Self {
            type_: CoverageType::CoverageCollection,
            domain_type: Some(DomainType::PointSeries),
            parameters: BTreeMap::new(),
            referencing: Some(point_series_referencing()),
            coverages: Vec::new(),
        }
    }

    /// Append a coverage, moving its parameter dictionary into the collection.
    pub fn push(&mut self, mut coverage: CoverageJson) {
        if let Some(params) = coverage.parameters.take() {
            self.parameters.extend(params);
        }
        self.coverages.push(coverage);
    }

    /// Number of coverages.
    pub fn len(&self) -> usize {
        self.coverages.len()
    }

    /// Check if the collection has no coverages.
    pub fn is_empty(&self) -> bool {
        self.coverages.is_empty()
    }
}

impl Default for CoverageCollection {
    fn default() -> Self {
        Self::new()
    }
}

/// The domain of a coverage.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Domain {
    /// Domain type (always "Domain").
    #[serde(rename = "type")]
    pub type_: String,

    /// The domain type (PointSeries for station data).
    #[serde(rename = "domainType")]
    pub domain_type: DomainType,

    /// Axis definitions.
    pub axes: BTreeMap<String, Axis>,

    /// Reference systems for axes.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub referencing: Option<Vec<ReferenceSystemConnection>>,
}

impl Domain {
    /// Create a point series domain (time series at a single point).
    pub fn point_series(x: f64, y: f64, t_values: Vec<String>) -> Self {
        let mut axes = BTreeMap::new();
        axes.insert("x".to_string(), Axis::Values(vec![AxisValue::Float(x)]));
        axes.insert("y".to_string(), Axis::Values(vec![AxisValue::Float(y)]));
        axes.insert(
            "t".to_string(),
            Axis::Values(t_values.into_iter().map(AxisValue::String).collect()),
        );

        Self {
            type_: "Domain".to_string(),
            domain_type: DomainType::PointSeries,
            axes,
            referencing: Some(point_series_referencing()),
        }
    }
}

/// Geographic (x, y) plus temporal (t) referencing for point series.
fn point_series_referencing() -> Vec<ReferenceSystemConnection> {
    vec![
        ReferenceSystemConnection {
            coordinates: vec!["x".to_string(), "y".to_string()],
            system: ReferenceSystem::Geographic {
                id: WGS84_CRS.to_string(),
            },
        },
        ReferenceSystemConnection {
            coordinates: vec!["t".to_string()],
            system: ReferenceSystem::Temporal {
                calendar: "Gregorian".to_string(),
            },
        },
    ]
}

/// Domain types supported by CoverageJSON.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum DomainType {
    /// Point series (time series at a point).
    PointSeries,
}

/// An axis in the domain.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Axis {
    /// Explicit list of values.
    #[serde(rename = "values")]
    Values(Vec<AxisValue>),
}

impl Axis {
    /// Get the number of values in this axis.
    pub fn len(&self) -> usize {
        match self {
            Axis::Values(v) => v.len(),
        }
    }

    /// Check if axis is empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// The axis values.
    pub fn values(&self) -> &[AxisValue] {
        match self {
            Axis::Values(v) => v,
        }
    }
}

/// A value on an axis.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum AxisValue {
    /// Floating-point value (coordinates).
    Float(f64),
    /// String value (timestamps).
    String(String),
}

/// Connection between axes and their reference system.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ReferenceSystemConnection {
    /// Axes that use this reference system.
    pub coordinates: Vec<String>,

    /// The reference system.
    pub system: ReferenceSystem,
}

/// Reference system definitions.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum ReferenceSystem {
    /// Geographic coordinate reference system.
    #[serde(rename = "GeographicCRS")]
    Geographic {
        /// CRS identifier URI.
        id: String,
    },

    /// Temporal reference system.
    #[serde(rename = "TemporalRS")]
    Temporal {
        /// Calendar system (e.g., "Gregorian").
        calendar: String,
    },
}

/// N-dimensional array containing data values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NdArray {
    /// Type (always "NdArray").
    #[serde(rename = "type")]
    pub type_: String,

    /// Data type of values.
    #[serde(rename = "dataType")]
    pub data_type: String,

    /// Names of axes in order.
    #[serde(rename = "axisNames")]
    pub axis_names: Vec<String>,

    /// Shape of the array.
    pub shape: Vec<usize>,

    /// The data values (null for missing observations).
    pub values: Vec<Option<f64>>,
}

impl NdArray {
    /// Create a `t, y, x` array for a single-point time series.
    pub fn point_series(values: Vec<Option<f64>>) -> Self {
        Self {
            type_: "NdArray".to_string(),
            data_type: "float".to_string(),
            axis_names: POINT_SERIES_AXES.iter().map(|a| a.to_string()).collect(),
            shape: vec![values.len(), 1, 1],
            values,
        }
    }

    /// Number of values implied by the shape header.
    pub fn shape_len(&self) -> usize {
        self.shape.iter().product()
    }
}
