//! Spatial predicates for station selection.
//!
//! Two filters are supported: an axis-aligned bounding box (`bbox`
//! parameter, `west,south,east,north`) and a WKT polygon (`coords`
//! parameter). Coordinates are always `lon lat` in degrees.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::dataset::Station;

/// Errors that can occur when parsing spatial parameters.
#[derive(Debug, Error, PartialEq)]
pub enum SpatialError {
    /// Invalid WKT format.
    #[error("Invalid WKT format: {0}")]
    InvalidWkt(String),

    /// Invalid bbox format.
    #[error("Invalid bbox: {0}")]
    InvalidBbox(String),

    /// Invalid coordinate value.
    #[error("Invalid coordinate value: {0}")]
    InvalidCoordinate(String),

    /// Coordinate out of valid range.
    #[error("Coordinate out of range: {0}")]
    OutOfRange(String),
}

/// Check that a coordinate pair is finite and within WGS84 bounds.
fn validate_coordinates(lon: f64, lat: f64) -> Result<(), SpatialError> {
    if !lon.is_finite() || !lat.is_finite() {
        return Err(SpatialError::InvalidCoordinate(format!("{} {}", lon, lat)));
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(SpatialError::OutOfRange(format!(
            "Longitude {} must be between -180 and 180",
            lon
        )));
    }
    if !(-90.0..=90.0).contains(&lat) {
        return Err(SpatialError::OutOfRange(format!(
            "Latitude {} must be between -90 and 90",
            lat
        )));
    }
    Ok(())
}

fn parse_number(s: &str) -> Result<f64, SpatialError> {
    s.trim()
        .parse::<f64>()
        .map_err(|_| SpatialError::InvalidCoordinate(s.trim().to_string()))
}

/// Bounding box query parameters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub struct BoundingBox {
    /// Western longitude.
    pub left: f64,

    /// Southern latitude.
    pub bottom: f64,

    /// Eastern longitude.
    pub right: f64,

    /// Northern latitude.
    pub top: f64,
}

impl BoundingBox {
    /// Parse a bbox parameter.
    ///
    /// Format: `west,south,east,north`
    pub fn parse(bbox: &str) -> Result<Self, SpatialError> {
        let parts: Vec<&str> = bbox.split(',').collect();
        if parts.len() != 4 {
            return Err(SpatialError::InvalidBbox(format!(
                "Expected 4 values for bbox, got {}",
                parts.len()
            )));
        }

        let left = parse_number(parts[0])?;
        let bottom = parse_number(parts[1])?;
        let right = parse_number(parts[2])?;
        let top = parse_number(parts[3])?;

        validate_coordinates(left, bottom)?;
        validate_coordinates(right, top)?;

        if bottom > top {
            return Err(SpatialError::OutOfRange(
                "South must be less than or equal to north".to_string(),
            ));
        }

        Ok(Self {
            left,
            bottom,
            right,
            top,
        })
    }

    /// Inclusive containment test.
    ///
    /// A box with `left > right` contains nothing; antimeridian wrapping is
    /// not applied.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        self.left <= lon && lon <= self.right && self.bottom <= lat && lat <= self.top
    }
}

/// A WKT polygon with an exterior ring and optional holes.
#[derive(Debug, Clone, PartialEq)]
pub struct Polygon {
    /// Exterior ring of `(lon, lat)` positions, closed.
    pub exterior: Vec<(f64, f64)>,

    /// Interior rings (holes), each closed.
    pub holes: Vec<Vec<(f64, f64)>>,
}

impl Polygon {
    /// Parse a WKT POLYGON string.
    ///
    /// Accepts `POLYGON((lon1 lat1, lon2 lat2, lon3 lat3, lon1 lat1))` with
    /// optional interior rings: `POLYGON((outer),(hole),...)`.
    pub fn parse_wkt(coords: &str) -> Result<Self, SpatialError> {
        let coords = coords.trim();

        let keyword_len = "POLYGON".len();
        let is_polygon = coords
            .get(..keyword_len)
            .map(|kw| kw.eq_ignore_ascii_case("POLYGON"))
            .unwrap_or(false);
        if !is_polygon {
            return Err(SpatialError::InvalidWkt("Expected POLYGON format".to_string()));
        }

        let body = coords[keyword_len..].trim();
        let inner = body
            .strip_prefix('(')
            .and_then(|b| b.strip_suffix(')'))
            .ok_or_else(|| SpatialError::InvalidWkt("Missing enclosing parentheses".to_string()))?;

        let mut rings = split_rings(inner)?
            .into_iter()
            .map(parse_ring)
            .collect::<Result<Vec<_>, _>>()?;

        if rings.is_empty() {
            return Err(SpatialError::InvalidWkt("Polygon has no rings".to_string()));
        }
        let exterior = rings.remove(0);

        Ok(Self {
            exterior,
            holes: rings,
        })
    }

    /// Check if a point is inside the polygon using ray casting.
    ///
    /// Points on the boundary of any ring count as inside.
    pub fn contains(&self, lon: f64, lat: f64) -> bool {
        if on_ring_boundary(&self.exterior, lon, lat)
            || self.holes.iter().any(|h| on_ring_boundary(h, lon, lat))
        {
            return true;
        }

        ring_contains(&self.exterior, lon, lat)
            && !self.holes.iter().any(|h| ring_contains(h, lon, lat))
    }
}

/// Split `(ring),(ring)` into the text inside each pair of parentheses.
fn split_rings(inner: &str) -> Result<Vec<&str>, SpatialError> {
    let mut rings = Vec::new();
    let mut depth = 0usize;
    let mut start = 0usize;

    for (i, ch) in inner.char_indices() {
        match ch {
            '(' => {
                if depth > 0 {
                    return Err(SpatialError::InvalidWkt("Unexpected nested '('".to_string()));
                }
                depth = 1;
                start = i + 1;
            }
            ')' => {
                if depth == 0 {
                    return Err(SpatialError::InvalidWkt("Unbalanced ')'".to_string()));
                }
                depth = 0;
                rings.push(&inner[start..i]);
            }
            ',' | ' ' | '\t' | '\n' | '\r' => {}
            _ if depth == 0 => {
                return Err(SpatialError::InvalidWkt(format!(
                    "Unexpected character '{}' between rings",
                    ch
                )));
            }
            _ => {}
        }
    }

    if depth != 0 {
        return Err(SpatialError::InvalidWkt("Missing closing parenthesis".to_string()));
    }

    Ok(rings)
}

/// Parse a single ring from its coordinate list.
fn parse_ring(coords_str: &str) -> Result<Vec<(f64, f64)>, SpatialError> {
    let points = coords_str
        .split(',')
        .map(|pair| {
            let parts: Vec<&str> = pair.split_whitespace().collect();
            if parts.len() != 2 {
                return Err(SpatialError::InvalidWkt(format!(
                    "Expected 'lon lat' format, got '{}'",
                    pair.trim()
                )));
            }

            let lon = parse_number(parts[0])?;
            let lat = parse_number(parts[1])?;
            validate_coordinates(lon, lat)?;

            Ok((lon, lat))
        })
        .collect::<Result<Vec<_>, _>>()?;

    if points.len() < 4 {
        return Err(SpatialError::InvalidWkt(
            "Polygon ring must have at least 4 points (including closing point)".to_string(),
        ));
    }

    if points.first() != points.last() {
        return Err(SpatialError::InvalidWkt(
            "Polygon ring must be closed (first point equal to last)".to_string(),
        ));
    }

    Ok(points)
}

/// Even-odd ray casting against one closed ring.
fn ring_contains(ring: &[(f64, f64)], lon: f64, lat: f64) -> bool {
    let n = ring.len();
    if n < 3 {
        return false;
    }

    let mut inside = false;
    let mut j = n - 1;

    for i in 0..n {
        let (xi, yi) = ring[i];
        let (xj, yj) = ring[j];

        if ((yi > lat) != (yj > lat)) && (lon < (xj - xi) * (lat - yi) / (yj - yi) + xi) {
            inside = !inside;
        }
        j = i;
    }

    inside
}

/// Check whether the point lies on any edge (or vertex) of the ring.
fn on_ring_boundary(ring: &[(f64, f64)], lon: f64, lat: f64) -> bool {
    ring.windows(2).any(|edge| {
        let (x1, y1) = edge[0];
        let (x2, y2) = edge[1];

        let cross = (x2 - x1) * (lat - y1) - (y2 - y1) * (lon - x1);
        if cross.abs() > 1e-12 {
            return false;
        }

        lon >= x1.min(x2) && lon <= x1.max(x2) && lat >= y1.min(y2) && lat <= y1.max(y2)
    })
}

/// A spatial selection over stations.
#[derive(Debug, Clone, PartialEq)]
pub enum SpatialFilter {
    /// Keep stations inside a bounding box.
    BoundingBox(BoundingBox),
    /// Keep stations inside a polygon.
    Polygon(Polygon),
}

impl SpatialFilter {
    /// Check whether the station position satisfies the filter.
    pub fn matches(&self, station: &Station) -> bool {
        match self {
            SpatialFilter::BoundingBox(bbox) => bbox.contains(station.longitude, station.latitude),
            SpatialFilter::Polygon(polygon) => polygon.contains(station.longitude, station.latitude),
        }
    }
}
