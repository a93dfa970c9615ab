//! Core EDR types used across the API.

use serde::{Deserialize, Serialize};

/// A hyperlink to a related resource.
///
/// Links are used throughout the EDR API to enable navigation and discovery.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Link {
    /// The URI of the linked resource.
    pub href: String,

    /// The relationship type (e.g., "self", "data", "conformance").
    pub rel: String,

    /// The media type of the linked resource.
    #[serde(rename = "type", skip_serializing_if = "Option::is_none")]
    pub type_: Option<String>,

    /// A human-readable title for the link.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
}

impl Link {
    /// Create a new link with required fields.
    pub fn new(href: impl Into<String>, rel: impl Into<String>) -> Self {
        Self {
            href: href.into(),
            rel: rel.into(),
            type_: None,
            title: None,
        }
    }

    /// Set the media type.
    pub fn with_type(mut self, type_: impl Into<String>) -> Self {
        self.type_ = Some(type_.into());
        self
    }

    /// Set the title.
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }
}

/// The spatial and temporal extent of a collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct Extent {
    /// The spatial extent of the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub spatial: Option<SpatialExtent>,

    /// The temporal extent of the collection.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temporal: Option<TemporalExtent>,
}

impl Extent {
    /// Create an empty extent.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Create an extent with spatial bounds `[west, south, east, north]`.
    pub fn with_spatial(bbox: [f64; 4], crs: Option<String>) -> Self {
        Self {
            spatial: Some(SpatialExtent {
                bbox: vec![bbox.to_vec()],
                crs: crs.unwrap_or_else(default_crs),
            }),
            temporal: None,
        }
    }

    /// Add temporal extent to this extent (builder pattern).
    pub fn with_temporal(mut self, temporal: TemporalExtent) -> Self {
        self.temporal = Some(temporal);
        self
    }
}

/// Spatial extent with bounding box.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpatialExtent {
    /// Bounding boxes as [west, south, east, north] arrays.
    pub bbox: Vec<Vec<f64>>,

    /// Coordinate reference system (default: CRS:84).
    #[serde(default = "default_crs")]
    pub crs: String,
}

fn default_crs() -> String {
    "CRS:84".to_string()
}

/// Temporal extent with time intervals.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TemporalExtent {
    /// Time intervals as [start, end] pairs (ISO 8601).
    /// null values indicate open-ended intervals.
    pub interval: Vec<Vec<Option<String>>>,

    /// Available times, either discrete timestamps or `start/end` ranges.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Vec<String>>,

    /// Temporal reference system (default: Gregorian).
    #[serde(default = "default_trs")]
    pub trs: String,
}

fn default_trs() -> String {
    "TIMECRS[\"DateTime\",TDATUM[\"Gregorian Calendar\"],CS[TemporalDateTime,1],AXIS[\"Time (T)\",future]]".to_string()
}

impl TemporalExtent {
    /// Create a temporal extent from start and end times.
    pub fn new(start: Option<String>, end: Option<String>) -> Self {
        Self {
            interval: vec![vec![start, end]],
            values: None,
            trs: default_trs(),
        }
    }

    /// Create a closed extent that also advertises the range as `start/end`.
    pub fn closed(start: impl Into<String>, end: impl Into<String>) -> Self {
        let (start, end) = (start.into(), end.into());
        Self::new(Some(start.clone()), Some(end.clone())).with_values(vec![format!("{}/{}", start, end)])
    }

    /// Add available time values.
    pub fn with_values(mut self, values: Vec<String>) -> Self {
        self.values = Some(values);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let link = Link::new("http://example.com", "self");
        assert_eq!(link.href, "http://example.com");
        assert_eq!(link.rel, "self");
        assert!(link.type_.is_none());
    }

    #[test]
    fn test_link_builder() {
        let link = Link::new("http://example.com/data", "data")
            .with_type("application/json")
            .with_title("Data endpoint");

        assert_eq!(link.type_, Some("application/json".to_string()));
        assert_eq!(link.title, Some("Data endpoint".to_string()));
    }

    #[test]
    fn test_link_serialization() {
        let link = Link::new("http://example.com", "self").with_type("application/json");

        let json = serde_json::to_string(&link).unwrap();
        assert!(json.contains("\"href\":\"http://example.com\""));
        assert!(json.contains("\"type\":\"application/json\""));
        // None fields are skipped
        assert!(!json.contains("\"title\""));
    }

    #[test]
    fn test_extent_empty() {
        let extent = Extent::empty();
        assert!(extent.spatial.is_none());
        assert!(extent.temporal.is_none());
        assert_eq!(serde_json::to_string(&extent).unwrap(), "{}");
    }

    #[test]
    fn test_extent_with_spatial() {
        let extent = Extent::with_spatial([3.3, 50.7, 7.2, 53.6], None);
        let spatial = extent.spatial.unwrap();
        assert_eq!(spatial.bbox, vec![vec![3.3, 50.7, 7.2, 53.6]]);
        assert_eq!(spatial.crs, "CRS:84");
    }

    #[test]
    fn test_temporal_extent_closed() {
        let extent = TemporalExtent::closed("2023-01-01T00:00:00Z", "2023-01-01T23:50:00Z");
        assert_eq!(
            extent.interval,
            vec![vec![
                Some("2023-01-01T00:00:00Z".to_string()),
                Some("2023-01-01T23:50:00Z".to_string())
            ]]
        );
        assert_eq!(
            extent.values,
            Some(vec!["2023-01-01T00:00:00Z/2023-01-01T23:50:00Z".to_string()])
        );
    }

    #[test]
    fn test_extent_serialization() {
        let extent = Extent::with_spatial([-125.0, 24.0, -66.0, 50.0], None)
            .with_temporal(TemporalExtent::new(Some("2024-01-01T00:00:00Z".to_string()), None));

        let json = serde_json::to_value(&extent).unwrap();
        assert_eq!(json["spatial"]["bbox"][0][0], -125.0);
        assert_eq!(json["temporal"]["interval"][0][1], serde_json::Value::Null);
        assert!(json["temporal"]["trs"].as_str().unwrap().contains("Gregorian"));
    }
}
