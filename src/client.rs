//! HTTP client for fetching aircraft state vectors from the OpenSky Network.

use crate::types::StatesResponse;
use reqwest::{Client, StatusCode};
use std::time::Duration;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Server returned error status: {status}")]
    ServerError { status: StatusCode },
    #[error("Response body is not valid JSON: {0}")]
    Body(#[from] serde_json::Error),
}

/// Geographic bounding box for state queries.
#[derive(Debug, Clone, Copy)]
pub struct BoundingBox {
    pub lat_min: f64,
    pub lat_max: f64,
    pub lon_min: f64,
    pub lon_max: f64,
}

impl BoundingBox {
    /// Create a bounding box from coordinates.
    pub fn new(lat_min: f64, lat_max: f64, lon_min: f64, lon_max: f64) -> Self {
        Self {
            lat_min,
            lat_max,
            lon_min,
            lon_max,
        }
    }

    /// Query parameters in the form the states endpoint expects.
    pub fn query_params(&self) -> [(&'static str, f64); 4] {
        [
            ("lamin", self.lat_min),
            ("lamax", self.lat_max),
            ("lomin", self.lon_min),
            ("lomax", self.lon_max),
        ]
    }
}

/// What to do when the response body fails to parse as JSON at all.
///
/// Distinct from a body that parses but lacks a `states` key, which is
/// always treated as "no data". Transport and HTTP-status failures are
/// always absorbed; this policy only governs the parse stage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum ParsePolicy {
    /// Log the failure and treat the cycle as empty, matching the
    /// transport-failure behavior.
    #[default]
    Absorb,
    /// Propagate the failure to the caller.
    Fatal,
}

/// Configuration for the OpenSky client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// States endpoint URL.
    pub url: String,
    /// Request timeout.
    pub timeout: Duration,
    /// Body-parse failure handling.
    pub parse_policy: ParsePolicy,
}

impl ClientConfig {
    pub fn new(url: String) -> Self {
        Self {
            url,
            timeout: Duration::from_secs(30),
            parse_policy: ParsePolicy::default(),
        }
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_parse_policy(mut self, policy: ParsePolicy) -> Self {
        self.parse_policy = policy;
        self
    }
}

/// Client for fetching state vectors.
pub struct OpenSkyClient {
    client: Client,
    config: ClientConfig,
}

impl OpenSkyClient {
    /// Create a new OpenSky client.
    pub fn new(config: ClientConfig) -> Result<Self, ClientError> {
        let client = Client::builder()
            .user_agent(concat!("skyfeed/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()?;

        Ok(Self { client, config })
    }

    /// Fetch state vectors for a bounding box, with typed errors.
    ///
    /// The body is fetched as text and parsed separately so that a
    /// transport failure and a malformed body stay distinguishable.
    pub async fn fetch(&self, bbox: BoundingBox) -> Result<StatesResponse, ClientError> {
        tracing::debug!("Fetching: {} {:?}", self.config.url, bbox);

        let response = self
            .client
            .get(&self.config.url)
            .query(&bbox.query_params())
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Err(ClientError::ServerError { status });
        }

        let body = response.text().await?;
        Ok(serde_json::from_str(&body)?)
    }

    /// Fetch state vectors, absorbing transient failures into "no data".
    ///
    /// Transport and HTTP-status failures are logged and yield an empty
    /// response; the pipeline degrades to an empty cycle rather than
    /// aborting. A body that fails to parse as JSON follows the
    /// configured [`ParsePolicy`].
    pub async fn fetch_states(&self, bbox: BoundingBox) -> Result<StatesResponse, ClientError> {
        match self.fetch(bbox).await {
            Ok(response) => Ok(response),
            Err(err @ ClientError::Body(_)) => match self.config.parse_policy {
                ParsePolicy::Fatal => Err(err),
                ParsePolicy::Absorb => {
                    tracing::warn!("Discarding unparseable response body: {}", err);
                    Ok(StatesResponse::default())
                }
            },
            Err(err) => {
                tracing::warn!("Error fetching flight positions: {}", err);
                Ok(StatesResponse::default())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_params_pass_coordinates_through() {
        let bbox = BoundingBox::new(-33.75, 5.27, -73.99, -34.79);
        assert_eq!(
            bbox.query_params(),
            [
                ("lamin", -33.75),
                ("lamax", 5.27),
                ("lomin", -73.99),
                ("lomax", -34.79),
            ]
        );
    }

    #[tokio::test]
    async fn test_transport_failure_absorbed_to_empty() {
        // Nothing listens on this port; the connect fails at the
        // transport layer and the client reports an empty cycle.
        let config = ClientConfig::new("http://127.0.0.1:9/states/all".to_string())
            .with_timeout(Duration::from_millis(250));
        let client = OpenSkyClient::new(config).unwrap();

        let response = client
            .fetch_states(BoundingBox::new(-33.75, 5.27, -73.99, -34.79))
            .await
            .unwrap();
        assert!(response.states.is_none());
    }
}
