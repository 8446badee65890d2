//! Core data types for the flight event pipeline.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// One upstream state vector: a positional array of heterogeneous fields.
/// Any slot may be JSON null, and the upstream contract is unversioned,
/// so nothing beyond "it is an array" is assumed at parse time.
pub type RawStateVector = Vec<Value>;

/// Shape of the OpenSky `/states/all` response body.
///
/// A body without a `states` key deserializes with `states = None`; that
/// is treated as "no data", not as an error.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct StatesResponse {
    /// Upstream-reported epoch time of the snapshot.
    pub time: Option<u64>,
    pub states: Option<Vec<Option<RawStateVector>>>,
}

impl StatesResponse {
    /// Number of non-null state vectors in the response.
    pub fn state_count(&self) -> usize {
        self.states
            .as_deref()
            .map(|s| s.iter().filter(|v| v.is_some()).count())
            .unwrap_or(0)
    }
}

/// Normalized flight position record.
///
/// Immutable value object produced by [`crate::normalize::normalize`] and
/// consumed exactly once by the print path or the publisher. Every field
/// except `timestamp` and `icao24` is independently nullable; absent
/// fields serialize as explicit JSON nulls so the wire record is
/// self-describing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlightEvent {
    /// Capture time (RFC 3339). All events of one fetch batch share the
    /// same value.
    pub timestamp: String,
    /// ICAO 24-bit address as lowercase hex. Never empty; doubles as the
    /// broker routing key.
    pub icao24: String,
    /// Trimmed callsign. Blank or absent upstream becomes `None`, never
    /// an empty string.
    pub callsign: Option<String>,
    pub origin_country: Option<String>,
    pub longitude: Option<f64>,
    pub latitude: Option<f64>,
    /// Barometric altitude in meters.
    pub altitude: Option<f64>,
    pub on_ground: Option<bool>,
    /// Ground speed in m/s.
    pub velocity: Option<f64>,
    /// Track angle in decimal degrees clockwise from north.
    pub true_track: Option<f64>,
    /// Vertical rate in m/s, negative when descending.
    pub vertical_rate: Option<f64>,
    /// Geometric altitude in meters.
    pub geo_altitude: Option<f64>,
    /// Transponder code.
    pub squawk: Option<String>,
}
