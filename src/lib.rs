//! Flight event pipeline: fetch, normalize, print or publish.
//!
//! This library provides functionality to:
//! - Fetch aircraft state vectors from the OpenSky Network for a
//!   geographic bounding box
//! - Normalize positional state vectors into flat, named flight events
//! - Print events to stdout or publish them to a NATS subject keyed by
//!   aircraft identifier
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌──────────────┐
//! │   Client    │───▶│  Normalize  │───▶│    Output    │
//! │   (HTTP)    │    │ (pos→named) │    │ stdout/NATS  │
//! └─────────────┘    └─────────────┘    └──────────────┘
//! ```
//!
//! One fetch→normalize→output cycle per invocation; the stages share no
//! state and compose linearly.
//!
//! # Example
//!
//! ```no_run
//! use skyfeed::{
//!     client::{BoundingBox, ClientConfig, OpenSkyClient},
//!     normalize::normalize,
//!     publisher::{EventPublisher, PublisherConfig},
//! };
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = OpenSkyClient::new(ClientConfig::new(
//!         "https://opensky-network.org/api/states/all".to_string(),
//!     ))?;
//!
//!     let bbox = BoundingBox::new(-33.75, 5.27, -73.99, -34.79);
//!     let response = client.fetch_states(bbox).await?;
//!
//!     let timestamp = chrono::Utc::now().to_rfc3339();
//!     let events = normalize(&response, &timestamp);
//!
//!     let publisher = EventPublisher::new(PublisherConfig {
//!         broker_url: "nats://localhost:4222".to_string(),
//!         topic: "flight.positions".to_string(),
//!     });
//!     publisher.publish(&events).await?;
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod normalize;
pub mod output;
pub mod publisher;
pub mod types;

pub use client::{BoundingBox, ClientConfig, ClientError, OpenSkyClient, ParsePolicy};
pub use normalize::normalize;
pub use publisher::{EventPublisher, PublishError, PublisherConfig};
pub use types::{FlightEvent, RawStateVector, StatesResponse};
