//! Stdout rendering for print mode.

use crate::types::FlightEvent;

/// Render one event as pretty, human-readable JSON.
pub fn format_event(event: &FlightEvent) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(event)
}

/// Write each event to stdout, one at a time, in input order.
pub fn print_events(events: &[FlightEvent]) -> Result<(), serde_json::Error> {
    for event in events {
        println!("{}", format_event(event)?);
    }
    Ok(())
}
