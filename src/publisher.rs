//! NATS publisher for normalized flight events.
//!
//! One message per event, published to `<subject prefix>.<icao24>` so the
//! aircraft identifier drives routing. Each call is stateless: connect,
//! produce in input order, flush, drop the connection. The connection is
//! released on every exit path, including mid-batch failure.

use crate::types::FlightEvent;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PublishError {
    #[error("Broker connection failed: {0}")]
    Connect(#[from] async_nats::ConnectError),
    #[error("Publish failed: {0}")]
    Publish(#[from] async_nats::PublishError),
    #[error("Flush failed: {0}")]
    Flush(#[from] async_nats::client::FlushError),
    #[error("Event serialization failed: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Configuration for the event publisher.
#[derive(Debug, Clone)]
pub struct PublisherConfig {
    /// Broker address, e.g. `nats://localhost:4222`.
    pub broker_url: String,
    /// Subject prefix; the per-event icao24 is appended as the final
    /// token.
    pub topic: String,
}

/// Subject for one event: prefix plus the aircraft identifier.
pub fn subject_for(topic: &str, icao24: &str) -> String {
    format!("{}.{}", topic, icao24)
}

/// Publisher that sends flight events to a NATS broker.
///
/// Holds configuration only; no connection outlives a [`publish`]
/// call, so there is no "connected" state between invocations.
///
/// [`publish`]: EventPublisher::publish
pub struct EventPublisher {
    config: PublisherConfig,
}

impl EventPublisher {
    /// Create a new publisher.
    pub fn new(config: PublisherConfig) -> Self {
        Self { config }
    }

    /// Publish each event as an individual message, in input order.
    ///
    /// An empty batch is a no-op: no connection is opened and `Ok(0)` is
    /// returned. Otherwise exactly one message is produced per event;
    /// the first failure aborts the remaining records and propagates.
    /// Returns the number of events published.
    pub async fn publish(&self, events: &[FlightEvent]) -> Result<usize, PublishError> {
        if events.is_empty() {
            return Ok(0);
        }

        tracing::info!(
            "Connecting to broker at {} ({} events)",
            self.config.broker_url,
            events.len()
        );
        let client = async_nats::ConnectOptions::new()
            .name("skyfeed")
            .connect(&self.config.broker_url)
            .await?;

        for event in events {
            let subject = subject_for(&self.config.topic, &event.icao24);
            let payload = serde_json::to_vec(event)?;
            client.publish(subject, payload.into()).await?;
            tracing::debug!("Published event for {}", event.icao24);
        }

        // Bound the call: everything handed to the client is on the wire
        // before the connection drops
        client.flush().await?;

        Ok(events.len())
    }
}
