//! Assembly of CoverageJSON point series from station observations.
//!
//! All parameters of one station share the time axis taken from the first
//! resolved parameter. A parameter whose filtered series has a different
//! length is reported as [`QueryError::ShapeMismatch`] rather than realigned.

use std::collections::BTreeSet;

use edr_protocol::coverage_json::{CoverageCollection, CoverageJson};
use tracing::{debug, warn};

use crate::dataset::{Dataset, Station};
use crate::error::QueryError;
use crate::interval::{format_instant, TimeInterval};
use crate::parameters::{parameter_for, parse_parameter_names, resolve_parameters};
use crate::spatial::Polygon;

/// Assemble the point-series coverage of one station.
///
/// `requested` is validated against the station's own availability, so a
/// parameter that exists in the dataset but has no data here is rejected.
pub fn assemble(
    dataset: &Dataset,
    station: &Station,
    requested: Option<&str>,
    interval: &TimeInterval,
) -> Result<CoverageJson, QueryError> {
    let available = dataset
        .variables_for_station(&station.id)
        .ok_or_else(|| QueryError::NotFound(format!("Location not found: {}", station.id)))?;
    let parameters = resolve_parameters(requested, available.iter().map(|v| v.id.as_str()))?;

    assemble_parameters(dataset, station, &parameters, interval)
}

/// Assemble a coverage for an already resolved, non-empty parameter list.
fn assemble_parameters(
    dataset: &Dataset,
    station: &Station,
    parameters: &[String],
    interval: &TimeInterval,
) -> Result<CoverageJson, QueryError> {
    let no_data = || {
        QueryError::NoData(format!(
            "No data available for location {} in the requested interval",
            station.id
        ))
    };

    let reference = parameters.first().ok_or_else(no_data)?;
    let axis = dataset
        .series(&station.id, reference)
        .map(|series| series.within(interval))
        .unwrap_or_default();
    if axis.is_empty() {
        return Err(no_data());
    }

    let t_values = axis.iter().map(|o| format_instant(o.time)).collect();
    let mut coverage = CoverageJson::point_series(station.longitude, station.latitude, t_values);

    for parameter in parameters {
        let variable = dataset
            .variable(parameter)
            .ok_or_else(|| QueryError::UnknownParameter(vec![parameter.clone()]))?;

        let values: Vec<Option<f64>> = dataset
            .series(&station.id, parameter)
            .map(|series| series.within(interval))
            .unwrap_or_default()
            .iter()
            .map(|o| o.value)
            .collect();

        if values.len() != axis.len() {
            warn!(
                station_id = %station.id,
                parameter = %parameter,
                expected = axis.len(),
                actual = values.len(),
                "Parameter series does not match the reference time axis"
            );
            return Err(QueryError::ShapeMismatch {
                station_id: station.id.clone(),
                parameter: parameter.clone(),
                expected: axis.len(),
                actual: values.len(),
            });
        }

        coverage = coverage.with_time_series(parameter, parameter_for(variable), values);
    }

    debug!(
        station_id = %station.id,
        parameters = ?parameters,
        steps = axis.len(),
        "Assembled point series"
    );

    Ok(coverage)
}

/// Coverage for a single station.
pub fn get_station_coverage(
    dataset: &Dataset,
    station_id: &str,
    parameter_name: Option<&str>,
    datetime: Option<&str>,
) -> Result<CoverageJson, QueryError> {
    let station = dataset
        .station(station_id)
        .ok_or_else(|| QueryError::NotFound(format!("Location not found: {}", station_id)))?;
    let interval = TimeInterval::parse(datetime)?.ensure_ordered()?;

    assemble(dataset, station, parameter_name, &interval)
}

/// Coverage collection for all stations inside a WKT polygon.
///
/// Stations without any requested parameter, or without observations in
/// the interval, are left out. An empty result is [`QueryError::NoData`].
pub fn get_area_coverage(
    dataset: &Dataset,
    coords: &str,
    parameter_name: Option<&str>,
    datetime: Option<&str>,
) -> Result<CoverageCollection, QueryError> {
    let polygon = Polygon::parse_wkt(coords)?;
    let candidates: Vec<&Station> = dataset
        .stations()
        .iter()
        .filter(|s| polygon.contains(s.longitude, s.latitude))
        .collect();
    if candidates.is_empty() {
        return Err(QueryError::NoData("No locations inside the requested area".to_string()));
    }

    let interval = TimeInterval::parse(datetime)?.ensure_ordered()?;

    let requested: Option<Vec<String>> = match parameter_name {
        Some(names) if !parse_parameter_names(names).is_empty() => {
            Some(resolve_parameters(Some(names), dataset.variable_ids())?)
        }
        _ => None,
    };

    let mut collection = CoverageCollection::new();
    for station in candidates {
        let available: &BTreeSet<String> = match dataset.available_parameter_ids(&station.id) {
            Some(available) => available,
            None => continue,
        };

        let parameters: Vec<String> = match &requested {
            Some(requested) => requested
                .iter()
                .filter(|p| available.contains(*p))
                .cloned()
                .collect(),
            None => dataset
                .variable_ids()
                .filter(|id| available.contains(*id))
                .map(str::to_string)
                .collect(),
        };
        if parameters.is_empty() {
            continue;
        }

        match assemble_parameters(dataset, station, &parameters, &interval) {
            Ok(coverage) => collection.push(coverage),
            Err(QueryError::NoData(_)) => continue,
            Err(err) => return Err(err),
        }
    }

    if collection.is_empty() {
        return Err(QueryError::NoData("No data available for this query".to_string()));
    }

    debug!(coverages = collection.len(), "Assembled area coverage collection");

    Ok(collection)
}
