//! Error kinds for dataset construction and query evaluation.

use thiserror::Error;

use edr_protocol::responses::ExceptionResponse;

use crate::interval::IntervalError;
use crate::spatial::SpatialError;

/// Errors returned by station and coverage queries.
#[derive(Debug, Error, PartialEq)]
pub enum QueryError {
    /// Station (or collection) not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Malformed or contradictory request argument.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Requested parameter ids that the reference set does not contain.
    #[error("Unknown parameter(s): {}", .0.join(", "))]
    UnknownParameter(Vec<String>),

    /// The query was valid but matched no observations.
    #[error("No data: {0}")]
    NoData(String),

    /// A parameter's series does not line up with the coverage time axis.
    #[error(
        "Series for parameter '{parameter}' at station '{station_id}' has {actual} values, time axis has {expected}"
    )]
    ShapeMismatch {
        station_id: String,
        parameter: String,
        expected: usize,
        actual: usize,
    },
}

impl QueryError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> u16 {
        match self {
            QueryError::NotFound(_) => 404,
            QueryError::InvalidArgument(_) => 400,
            QueryError::UnknownParameter(_) => 400,
            QueryError::NoData(_) => 404,
            QueryError::ShapeMismatch { .. } => 500,
        }
    }

    /// Short label used for metrics and logs.
    pub fn kind(&self) -> &'static str {
        match self {
            QueryError::NotFound(_) => "not_found",
            QueryError::InvalidArgument(_) => "invalid_argument",
            QueryError::UnknownParameter(_) => "unknown_parameter",
            QueryError::NoData(_) => "no_data",
            QueryError::ShapeMismatch { .. } => "shape_mismatch",
        }
    }

    /// Convert to an ExceptionResponse.
    pub fn to_exception(&self) -> ExceptionResponse {
        match self {
            QueryError::NotFound(_) | QueryError::NoData(_) => {
                ExceptionResponse::not_found(self.to_string())
            }
            QueryError::InvalidArgument(_) | QueryError::UnknownParameter(_) => {
                ExceptionResponse::bad_request(self.to_string())
            }
            QueryError::ShapeMismatch { .. } => ExceptionResponse::internal_error(self.to_string()),
        }
    }
}

impl From<IntervalError> for QueryError {
    fn from(err: IntervalError) -> Self {
        QueryError::InvalidArgument(err.to_string())
    }
}

impl From<SpatialError> for QueryError {
    fn from(err: SpatialError) -> Self {
        QueryError::InvalidArgument(err.to_string())
    }
}

/// Integrity failures while assembling a dataset.
#[derive(Debug, Error, PartialEq)]
pub enum DatasetError {
    /// Two stations share an id.
    #[error("Duplicate station id: {0}")]
    DuplicateStation(String),

    /// Two variables share an id.
    #[error("Duplicate variable id: {0}")]
    DuplicateVariable(String),

    /// Two series were supplied for the same (station, variable).
    #[error("Duplicate series for station '{station_id}', variable '{variable_id}'")]
    DuplicateSeries {
        station_id: String,
        variable_id: String,
    },

    /// A series references a station that was never added.
    #[error("Series references unknown station: {0}")]
    UnknownStation(String),

    /// A series references a variable that was never added.
    #[error("Series references unknown variable: {0}")]
    UnknownVariable(String),

    /// Observation times are not strictly increasing.
    #[error("Observation times must be strictly increasing (index {index})")]
    NonIncreasingTimes { index: usize },
}
