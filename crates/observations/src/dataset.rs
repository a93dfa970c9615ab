//! In-memory store of stations, variables and their observation series.
//!
//! A [`Dataset`] is built once through [`DatasetBuilder`] and is read-only
//! afterwards. Station and variable iteration order is insertion order.
//! Parameter availability per station is computed at build time; the
//! spatial and temporal extents are computed on first use and memoized.

use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::OnceLock;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::DatasetError;
use crate::interval::TimeInterval;

/// A fixed observation station.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Station {
    /// Station identifier (e.g. WMO number "06260").
    pub id: String,
    /// Human-readable name.
    pub name: String,
    /// Latitude in degrees north.
    pub latitude: f64,
    /// Longitude in degrees east.
    pub longitude: f64,
    /// Station height in metres.
    pub height: f64,
}

/// An observed quantity.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Variable {
    /// Short identifier used as the EDR parameter name (e.g. "ff").
    pub id: String,
    /// Descriptive name.
    pub long_name: String,
    /// CF standard name, if one applies.
    #[serde(default)]
    pub standard_name: Option<String>,
    /// Units of measure.
    pub units: String,
    /// Free-text remarks.
    #[serde(default)]
    pub comment: Option<String>,
}

/// A single timestamped value. `None` marks a missing observation.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct Observation {
    pub time: DateTime<Utc>,
    pub value: Option<f64>,
}

impl Observation {
    pub fn new(time: DateTime<Utc>, value: Option<f64>) -> Self {
        Self { time, value }
    }
}

/// Observations for one (station, variable) pair, strictly increasing in time.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TimeSeries {
    observations: Vec<Observation>,
}

impl TimeSeries {
    /// Create a series, rejecting non-increasing timestamps.
    pub fn new(observations: Vec<Observation>) -> Result<Self, DatasetError> {
        if let Some(index) = observations
            .windows(2)
            .position(|pair| pair[0].time >= pair[1].time)
        {
            return Err(DatasetError::NonIncreasingTimes { index: index + 1 });
        }
        Ok(Self { observations })
    }

    pub fn observations(&self) -> &[Observation] {
        &self.observations
    }

    pub fn len(&self) -> usize {
        self.observations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.observations.is_empty()
    }

    pub fn first_time(&self) -> Option<DateTime<Utc>> {
        self.observations.first().map(|o| o.time)
    }

    pub fn last_time(&self) -> Option<DateTime<Utc>> {
        self.observations.last().map(|o| o.time)
    }

    /// At least one observation carries a value.
    pub fn has_data(&self) -> bool {
        self.observations.iter().any(|o| o.value.is_some())
    }

    /// Observations whose time lies within the interval (inclusive).
    pub fn within(&self, interval: &TimeInterval) -> &[Observation] {
        if !interval.is_ordered() {
            return &[];
        }
        let lo = self.observations.partition_point(|o| o.time < interval.start);
        let hi = self.observations.partition_point(|o| o.time <= interval.end);
        &self.observations[lo..hi]
    }
}

/// Per-station set of variable ids that have data.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityIndex {
    by_station: HashMap<String, BTreeSet<String>>,
}

impl AvailabilityIndex {
    /// Sorted set of variable ids with data at the station.
    pub fn get(&self, station_id: &str) -> Option<&BTreeSet<String>> {
        self.by_station.get(station_id)
    }
}

/// Geographic bounds of all stations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpatialExtent {
    pub left: f64,
    pub bottom: f64,
    pub right: f64,
    pub top: f64,
}

impl SpatialExtent {
    /// As `[west, south, east, north]`.
    pub fn to_bbox(&self) -> [f64; 4] {
        [self.left, self.bottom, self.right, self.top]
    }
}

/// Earliest and latest observation time in the dataset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TemporalExtent {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

/// Read-only station observation dataset.
#[derive(Debug)]
pub struct Dataset {
    stations: Vec<Station>,
    station_index: HashMap<String, usize>,
    variables: Vec<Variable>,
    variable_index: HashMap<String, usize>,
    series: HashMap<String, HashMap<String, TimeSeries>>,
    availability: AvailabilityIndex,
    spatial_extent: OnceLock<Option<SpatialExtent>>,
    temporal_extent: OnceLock<Option<TemporalExtent>>,
}

impl Dataset {
    pub fn builder() -> DatasetBuilder {
        DatasetBuilder::default()
    }

    /// All stations in insertion order.
    pub fn stations(&self) -> &[Station] {
        &self.stations
    }

    pub fn station(&self, id: &str) -> Option<&Station> {
        self.station_index.get(id).map(|&i| &self.stations[i])
    }

    /// All variables in insertion order.
    pub fn variables(&self) -> &[Variable] {
        &self.variables
    }

    pub fn variable(&self, id: &str) -> Option<&Variable> {
        self.variable_index.get(id).map(|&i| &self.variables[i])
    }

    /// Variable ids in dataset order.
    pub fn variable_ids(&self) -> impl Iterator<Item = &str> {
        self.variables.iter().map(|v| v.id.as_str())
    }

    /// Variables with data at the station, in dataset variable order.
    pub fn variables_for_station(&self, station_id: &str) -> Option<Vec<&Variable>> {
        let available = self.availability.get(station_id)?;
        Some(
            self.variables
                .iter()
                .filter(|v| available.contains(&v.id))
                .collect(),
        )
    }

    /// Sorted ids of the variables with data at the station.
    pub fn available_parameter_ids(&self, station_id: &str) -> Option<&BTreeSet<String>> {
        self.availability.get(station_id)
    }

    pub fn series(&self, station_id: &str, variable_id: &str) -> Option<&TimeSeries> {
        self.series.get(station_id)?.get(variable_id)
    }

    /// Bounds of all station positions, `None` without stations.
    pub fn spatial_extent(&self) -> Option<SpatialExtent> {
        *self.spatial_extent.get_or_init(|| {
            let first = self.stations.first()?;
            let init = SpatialExtent {
                left: first.longitude,
                bottom: first.latitude,
                right: first.longitude,
                top: first.latitude,
            };
            Some(self.stations.iter().fold(init, |acc, s| SpatialExtent {
                left: acc.left.min(s.longitude),
                bottom: acc.bottom.min(s.latitude),
                right: acc.right.max(s.longitude),
                top: acc.top.max(s.latitude),
            }))
        })
    }

    /// Span of all observation timestamps, including missing-valued ones.
    pub fn temporal_extent(&self) -> Option<TemporalExtent> {
        *self.temporal_extent.get_or_init(|| {
            let all_series = self.series.values().flat_map(|by_var| by_var.values());
            let start = all_series.clone().filter_map(TimeSeries::first_time).min()?;
            let end = all_series.filter_map(TimeSeries::last_time).max()?;
            Some(TemporalExtent { start, end })
        })
    }
}

/// Collects stations, variables and series, then validates them into a [`Dataset`].
#[derive(Debug, Default)]
pub struct DatasetBuilder {
    stations: Vec<Station>,
    variables: Vec<Variable>,
    series: Vec<(String, String, TimeSeries)>,
}

impl DatasetBuilder {
    pub fn add_station(mut self, station: Station) -> Self {
        self.stations.push(station);
        self
    }

    pub fn add_variable(mut self, variable: Variable) -> Self {
        self.variables.push(variable);
        self
    }

    pub fn add_series(
        mut self,
        station_id: impl Into<String>,
        variable_id: impl Into<String>,
        series: TimeSeries,
    ) -> Self {
        self.series.push((station_id.into(), variable_id.into(), series));
        self
    }

    /// Validate references and uniqueness, then index the data.
    pub fn build(self) -> Result<Dataset, DatasetError> {
        let mut station_index = HashMap::with_capacity(self.stations.len());
        for (i, station) in self.stations.iter().enumerate() {
            if station_index.insert(station.id.clone(), i).is_some() {
                return Err(DatasetError::DuplicateStation(station.id.clone()));
            }
        }

        let mut variable_index = HashMap::with_capacity(self.variables.len());
        for (i, variable) in self.variables.iter().enumerate() {
            if variable_index.insert(variable.id.clone(), i).is_some() {
                return Err(DatasetError::DuplicateVariable(variable.id.clone()));
            }
        }

        let mut series: HashMap<String, HashMap<String, TimeSeries>> = HashMap::new();
        let mut seen = HashSet::new();
        for (station_id, variable_id, ts) in self.series {
            if !station_index.contains_key(&station_id) {
                return Err(DatasetError::UnknownStation(station_id));
            }
            if !variable_index.contains_key(&variable_id) {
                return Err(DatasetError::UnknownVariable(variable_id));
            }
            if !seen.insert((station_id.clone(), variable_id.clone())) {
                return Err(DatasetError::DuplicateSeries {
                    station_id,
                    variable_id,
                });
            }
            series.entry(station_id).or_default().insert(variable_id, ts);
        }

        let by_station: HashMap<String, BTreeSet<String>> = self
            .stations
            .iter()
            .map(|station| {
                let available: BTreeSet<String> = series
                    .get(&station.id)
                    .map(|by_var| {
                        by_var
                            .iter()
                            .filter(|(_, ts)| ts.has_data())
                            .map(|(id, _)| id.clone())
                            .collect()
                    })
                    .unwrap_or_default();
                (station.id.clone(), available)
            })
            .collect();

        debug!(
            stations = self.stations.len(),
            variables = self.variables.len(),
            series = seen.len(),
            "Built observation dataset"
        );

        Ok(Dataset {
            stations: self.stations,
            station_index,
            variables: self.variables,
            variable_index,
            series,
            availability: AvailabilityIndex { by_station },
            spatial_extent: OnceLock::new(),
            temporal_extent: OnceLock::new(),
        })
    }
}
