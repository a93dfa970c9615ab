//! Parsing of the EDR `datetime` query parameter.
//!
//! Accepted forms:
//! - absent or blank: unbounded on both sides
//! - instant: `2023-01-01T00:00:00Z`
//! - interval: `2023-01-01T00:00Z/2023-01-02T00:00Z`
//! - open start or end: `../2023-01-02T00:00Z`, `2023-01-01T00:00Z/..`
//! - fully open: `..` or `../..`
//!
//! Every timestamp must carry a zone (`Z` or an offset); the seconds field
//! is optional. Offsets are normalised to UTC.

use chrono::{DateTime, NaiveDateTime, SecondsFormat, Utc};
use thiserror::Error;

/// Marker for an open interval bound.
const OPEN_BOUND: &str = "..";

/// Errors that can occur when parsing a datetime parameter.
#[derive(Debug, Error, PartialEq)]
pub enum IntervalError {
    /// The value is not a recognised timestamp.
    #[error("Invalid datetime '{0}'. Expected RFC 3339 (e.g. 2023-01-01T00:00:00Z)")]
    InvalidTimestamp(String),

    /// The value is a timestamp without a time zone.
    #[error("Datetime '{0}' has no time zone. Append 'Z' or an explicit offset")]
    NaiveTimestamp(String),

    /// More than one `/` separator.
    #[error("Invalid datetime interval '{0}'. Expected 'start/end'")]
    MalformedInterval(String),

    /// The interval ends before it starts.
    #[error("Datetime interval ends ({end}) before it starts ({start})")]
    Reversed { start: String, end: String },
}

/// A closed UTC time interval. Open bounds are represented by the
/// smallest and largest representable instants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeInterval {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeInterval {
    /// The interval covering all representable time.
    pub fn unbounded() -> Self {
        Self {
            start: DateTime::<Utc>::MIN_UTC,
            end: DateTime::<Utc>::MAX_UTC,
        }
    }

    /// Parse a `datetime` parameter.
    ///
    /// Ordering is not checked here; see [`TimeInterval::ensure_ordered`].
    pub fn parse(datetime: Option<&str>) -> Result<Self, IntervalError> {
        let raw = match datetime.map(str::trim) {
            None | Some("") => return Ok(Self::unbounded()),
            Some(raw) => raw,
        };

        if raw == OPEN_BOUND {
            return Ok(Self::unbounded());
        }

        let parts: Vec<&str> = raw.split('/').collect();
        match parts.as_slice() {
            [instant] => {
                let t = parse_instant(instant)?;
                Ok(Self { start: t, end: t })
            }
            [start, end] => Ok(Self {
                start: parse_bound(start, DateTime::<Utc>::MIN_UTC)?,
                end: parse_bound(end, DateTime::<Utc>::MAX_UTC)?,
            }),
            _ => Err(IntervalError::MalformedInterval(raw.to_string())),
        }
    }

    /// Inclusive membership test.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }

    /// Check that the interval does not end before it starts.
    pub fn is_ordered(&self) -> bool {
        self.start <= self.end
    }

    /// Reject intervals that end before they start.
    pub fn ensure_ordered(self) -> Result<Self, IntervalError> {
        if self.is_ordered() {
            Ok(self)
        } else {
            Err(IntervalError::Reversed {
                start: format_instant(self.start),
                end: format_instant(self.end),
            })
        }
    }

    /// Check if neither side is bounded.
    pub fn is_unbounded(&self) -> bool {
        self.start == DateTime::<Utc>::MIN_UTC && self.end == DateTime::<Utc>::MAX_UTC
    }
}

impl Default for TimeInterval {
    fn default() -> Self {
        Self::unbounded()
    }
}

/// Render an instant the way it appears on the wire (`...Z`).
///
/// Whole seconds render without a fraction. Sub-second instants keep
/// millisecond, microsecond or nanosecond precision as needed.
pub fn format_instant(t: DateTime<Utc>) -> String {
    t.to_rfc3339_opts(SecondsFormat::AutoSi, true)
}

fn parse_bound(s: &str, open: DateTime<Utc>) -> Result<DateTime<Utc>, IntervalError> {
    let s = s.trim();
    if s == OPEN_BOUND {
        Ok(open)
    } else {
        parse_instant(s)
    }
}

/// Parse a single zoned timestamp into UTC.
pub fn parse_instant(s: &str) -> Result<DateTime<Utc>, IntervalError> {
    let s = s.trim();

    if let Ok(t) = DateTime::parse_from_rfc3339(s) {
        return Ok(t.with_timezone(&Utc));
    }

    // RFC 3339 without seconds, e.g. 2022-12-31T00:00Z
    let with_offset = match s.strip_suffix('Z').or_else(|| s.strip_suffix('z')) {
        Some(prefix) => format!("{}+00:00", prefix),
        None => s.to_string(),
    };
    if let Ok(t) = DateTime::parse_from_str(&with_offset, "%Y-%m-%dT%H:%M%:z") {
        return Ok(t.with_timezone(&Utc));
    }

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f").is_ok()
        || NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M").is_ok();
    if naive {
        return Err(IntervalError::NaiveTimestamp(s.to_string()));
    }

    Err(IntervalError::InvalidTimestamp(s.to_string()))
}
