//! Positional state-vector to named flight-event mapping.
//!
//! The upstream API returns each aircraft as a fixed-position array:
//!
//! ```text
//! idx  field             idx  field            idx  field
//!  0   icao24             6   latitude         12   sensors
//!  1   callsign           7   baro_altitude    13   geo_altitude
//!  2   origin_country     8   on_ground        14   squawk
//!  3   time_position      9   velocity         15   spi
//!  4   last_contact      10   true_track       16   position_source
//!  5   longitude         11   vertical_rate
//! ```
//!
//! The contract is external and unversioned, so slot access is
//! defensive: out-of-range or wrongly-typed slots read as absent.

use crate::types::{FlightEvent, RawStateVector, StatesResponse};
use serde_json::Value;

const IDX_ICAO24: usize = 0;
const IDX_CALLSIGN: usize = 1;
const IDX_ORIGIN_COUNTRY: usize = 2;
const IDX_LONGITUDE: usize = 5;
const IDX_LATITUDE: usize = 6;
const IDX_BARO_ALTITUDE: usize = 7;
const IDX_ON_GROUND: usize = 8;
const IDX_VELOCITY: usize = 9;
const IDX_TRUE_TRACK: usize = 10;
const IDX_VERTICAL_RATE: usize = 11;
const IDX_GEO_ALTITUDE: usize = 13;
const IDX_SQUAWK: usize = 14;

fn slot_str(state: &RawStateVector, idx: usize) -> Option<&str> {
    state.get(idx).and_then(Value::as_str)
}

fn slot_string(state: &RawStateVector, idx: usize) -> Option<String> {
    slot_str(state, idx).map(str::to_string)
}

fn slot_f64(state: &RawStateVector, idx: usize) -> Option<f64> {
    state.get(idx).and_then(Value::as_f64)
}

fn slot_bool(state: &RawStateVector, idx: usize) -> Option<bool> {
    state.get(idx).and_then(Value::as_bool)
}

/// Map one raw state vector to a [`FlightEvent`].
///
/// Returns `None` when slot 0 is not a non-empty string: every emitted
/// event must carry an icao24, and a vector without one is malformed.
pub fn flight_event_from_state(state: &RawStateVector, timestamp: &str) -> Option<FlightEvent> {
    let icao24 = match slot_str(state, IDX_ICAO24) {
        Some(s) if !s.is_empty() => s.to_string(),
        _ => {
            tracing::warn!("Skipping state vector without icao24: {:?}", state);
            return None;
        }
    };

    // Whitespace-padded callsigns are trimmed; blank becomes absent
    let callsign = slot_str(state, IDX_CALLSIGN)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string);

    Some(FlightEvent {
        timestamp: timestamp.to_string(),
        icao24,
        callsign,
        origin_country: slot_string(state, IDX_ORIGIN_COUNTRY),
        longitude: slot_f64(state, IDX_LONGITUDE),
        latitude: slot_f64(state, IDX_LATITUDE),
        altitude: slot_f64(state, IDX_BARO_ALTITUDE),
        on_ground: slot_bool(state, IDX_ON_GROUND),
        velocity: slot_f64(state, IDX_VELOCITY),
        true_track: slot_f64(state, IDX_TRUE_TRACK),
        vertical_rate: slot_f64(state, IDX_VERTICAL_RATE),
        geo_altitude: slot_f64(state, IDX_GEO_ALTITUDE),
        squawk: slot_string(state, IDX_SQUAWK),
    })
}

/// Normalize a whole response into flight events.
///
/// Pure transform: no output side effects. A missing `states` key or an
/// empty list yields an empty batch; null entries are skipped silently.
/// Every event in the batch carries the caller-supplied capture
/// timestamp verbatim.
pub fn normalize(response: &StatesResponse, timestamp: &str) -> Vec<FlightEvent> {
    let Some(states) = response.states.as_deref() else {
        return Vec::new();
    };

    states
        .iter()
        .flatten()
        .filter_map(|state| flight_event_from_state(state, timestamp))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const TS: &str = "2024-06-01T12:00:00Z";

    fn response(body: serde_json::Value) -> StatesResponse {
        serde_json::from_value(body).unwrap()
    }

    #[test]
    fn test_full_vector_maps_to_event() {
        let response = response(json!({
            "time": 1717243200,
            "states": [
                ["abc123", "TEST123", "Brazil", null, null, -45.0, -23.0,
                 10000.0, false, 200.0, 180.0, 0.0, null, 10000.0, "1234",
                 false, 0]
            ]
        }));

        let events = normalize(&response, TS);
        assert_eq!(events.len(), 1);

        let event = &events[0];
        assert_eq!(event.timestamp, TS);
        assert_eq!(event.icao24, "abc123");
        assert_eq!(event.callsign.as_deref(), Some("TEST123"));
        assert_eq!(event.origin_country.as_deref(), Some("Brazil"));
        assert_eq!(event.longitude, Some(-45.0));
        assert_eq!(event.latitude, Some(-23.0));
        assert_eq!(event.altitude, Some(10000.0));
        assert_eq!(event.on_ground, Some(false));
        assert_eq!(event.velocity, Some(200.0));
        assert_eq!(event.true_track, Some(180.0));
        assert_eq!(event.vertical_rate, Some(0.0));
        assert_eq!(event.geo_altitude, Some(10000.0));
        assert_eq!(event.squawk.as_deref(), Some("1234"));
    }

    #[test]
    fn test_missing_states_key_yields_empty() {
        let response = response(json!({ "time": 1717243200 }));
        assert!(normalize(&response, TS).is_empty());
    }

    #[test]
    fn test_empty_states_yields_empty() {
        let response = response(json!({ "time": 1717243200, "states": [] }));
        assert!(normalize(&response, TS).is_empty());
    }

    #[test]
    fn test_null_entries_are_skipped() {
        let response = response(json!({
            "states": [null, ["abc123", null, null], null]
        }));

        let events = normalize(&response, TS);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].icao24, "abc123");
    }

    #[test]
    fn test_callsign_is_trimmed() {
        let state: RawStateVector = vec![json!("abc123"), json!("TEST123  ")];
        let event = flight_event_from_state(&state, TS).unwrap();
        assert_eq!(event.callsign.as_deref(), Some("TEST123"));
    }

    #[test]
    fn test_blank_or_absent_callsign_becomes_none() {
        let blank: RawStateVector = vec![json!("abc123"), json!("        ")];
        assert_eq!(flight_event_from_state(&blank, TS).unwrap().callsign, None);

        let absent: RawStateVector = vec![json!("abc123"), json!(null)];
        assert_eq!(flight_event_from_state(&absent, TS).unwrap().callsign, None);
    }

    #[test]
    fn test_short_vector_reads_trailing_slots_as_absent() {
        let state: RawStateVector = vec![json!("abc123"), json!("GOL1234"), json!("Brazil")];
        let event = flight_event_from_state(&state, TS).unwrap();
        assert_eq!(event.icao24, "abc123");
        assert_eq!(event.longitude, None);
        assert_eq!(event.squawk, None);
    }

    #[test]
    fn test_vector_without_icao24_is_dropped() {
        let null_icao: RawStateVector = vec![json!(null), json!("TEST123")];
        assert!(flight_event_from_state(&null_icao, TS).is_none());

        let empty_icao: RawStateVector = vec![json!(""), json!("TEST123")];
        assert!(flight_event_from_state(&empty_icao, TS).is_none());
    }

    #[test]
    fn test_batch_shares_one_timestamp() {
        let response = response(json!({
            "states": [["aaa111"], ["bbb222"], ["ccc333"]]
        }));

        let events = normalize(&response, TS);
        assert_eq!(events.len(), 3);
        assert!(events.iter().all(|e| e.timestamp == TS));
    }
}
