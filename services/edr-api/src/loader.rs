//! Dataset file loading.
//!
//! The dataset is read once at startup from a JSON or YAML document:
//!
//! ```json
//! {
//!   "stations": [{"id": "06260", "name": "De Bilt", "latitude": 52.1, "longitude": 5.18, "height": 1.9}],
//!   "variables": [{"id": "ff", "long_name": "Wind Speed", "standard_name": "wind_speed", "units": "m s-1"}],
//!   "series": [{"station": "06260", "variable": "ff",
//!               "observations": [{"time": "2023-01-01T00:00:00Z", "value": 3.4}]}]
//! }
//! ```

use anyhow::{Context, Result};
use observations::{Dataset, Observation, Station, TimeSeries, Variable};
use serde::Deserialize;
use std::path::Path;
use tracing::info;

/// On-disk dataset layout.
#[derive(Debug, Deserialize)]
pub struct DatasetDocument {
    #[serde(default)]
    pub stations: Vec<Station>,
    #[serde(default)]
    pub variables: Vec<Variable>,
    #[serde(default)]
    pub series: Vec<SeriesDocument>,
}

/// Observations of one variable at one station.
#[derive(Debug, Deserialize)]
pub struct SeriesDocument {
    pub station: String,
    pub variable: String,
    #[serde(default)]
    pub observations: Vec<Observation>,
}

impl DatasetDocument {
    /// Validate the document and build the in-memory dataset.
    pub fn into_dataset(self) -> Result<Dataset> {
        let mut builder = Dataset::builder();

        for station in self.stations {
            builder = builder.add_station(station);
        }
        for variable in self.variables {
            builder = builder.add_variable(variable);
        }
        for series in self.series {
            let ts = TimeSeries::new(series.observations).with_context(|| {
                format!(
                    "Invalid series for station '{}' variable '{}'",
                    series.station, series.variable
                )
            })?;
            builder = builder.add_series(series.station, series.variable, ts);
        }

        Ok(builder.build()?)
    }
}

/// Load a dataset from a JSON file, or YAML when the extension is `.yaml`/`.yml`.
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Dataset> {
    let path = path.as_ref();

    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read dataset: {:?}", path))?;

    let is_yaml = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("yaml") || e.eq_ignore_ascii_case("yml"))
        .unwrap_or(false);

    let document: DatasetDocument = if is_yaml {
        serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse dataset: {:?}", path))?
    } else {
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse dataset: {:?}", path))?
    };

    let dataset = document
        .into_dataset()
        .with_context(|| format!("Invalid dataset: {:?}", path))?;

    info!(
        path = %path.display(),
        stations = dataset.stations().len(),
        variables = dataset.variables().len(),
        "Loaded observation dataset"
    );

    Ok(dataset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"{
        "stations": [
            {"id": "06260", "name": "De Bilt", "latitude": 52.1, "longitude": 5.18, "height": 1.9}
        ],
        "variables": [
            {"id": "ff", "long_name": "Wind Speed", "standard_name": "wind_speed", "units": "m s-1"}
        ],
        "series": [
            {"station": "06260", "variable": "ff", "observations": [
                {"time": "2023-01-01T00:00:00Z", "value": 3.4},
                {"time": "2023-01-01T00:10:00Z", "value": null}
            ]}
        ]
    }"#;

    fn write_temp(suffix: &str, content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(suffix).tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_json() {
        let file = write_temp(".json", SAMPLE);
        let dataset = load_dataset(file.path()).unwrap();

        assert_eq!(dataset.stations().len(), 1);
        let series = dataset.series("06260", "ff").unwrap();
        assert_eq!(series.len(), 2);
        assert_eq!(series.observations()[1].value, None);
    }

    #[test]
    fn test_load_yaml() {
        let yaml = r#"
stations:
  - {id: "06260", name: De Bilt, latitude: 52.1, longitude: 5.18, height: 1.9}
variables:
  - {id: ta, long_name: Air Temperature, units: degrees Celsius}
series:
  - station: "06260"
    variable: ta
    observations:
      - {time: "2023-01-01T00:00:00Z", value: -1.5}
"#;
        let file = write_temp(".yaml", yaml);
        let dataset = load_dataset(file.path()).unwrap();
        assert_eq!(dataset.variable("ta").unwrap().standard_name, None);
        assert!(dataset.series("06260", "ta").is_some());
    }

    #[test]
    fn test_load_bundled_sample() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/sample.json");
        let dataset = load_dataset(path).unwrap();
        assert_eq!(dataset.stations().len(), 2);
        assert!(dataset.temporal_extent().is_some());
    }

    #[test]
    fn test_missing_file_names_path() {
        let err = load_dataset("/nonexistent/dataset.json").unwrap_err();
        assert!(format!("{:#}", err).contains("/nonexistent/dataset.json"));
    }

    #[test]
    fn test_unknown_station_reference() {
        let doc = SAMPLE.replace(r#""station": "06260""#, r#""station": "99999""#);
        let file = write_temp(".json", &doc);
        let err = load_dataset(file.path()).unwrap_err();
        assert!(format!("{:#}", err).contains("99999"));
    }

    #[test]
    fn test_unordered_observations_rejected() {
        let doc = SAMPLE.replace("00:10:00Z", "00:00:00Z");
        let file = write_temp(".json", &doc);
        assert!(load_dataset(file.path()).is_err());
    }
}
