//! Flight tracker event producer CLI
//!
//! Fetches aircraft state vectors for a bounding box and either prints
//! them to stdout (default) or publishes them to a NATS broker.

use clap::Parser;
use skyfeed::{
    client::{BoundingBox, ClientConfig, OpenSkyClient, ParsePolicy},
    normalize::normalize,
    output,
    publisher::{EventPublisher, PublisherConfig},
};
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "skyfeed")]
#[command(about = "Flight tracker event producer", long_about = None)]
struct Cli {
    /// States endpoint URL
    #[arg(long, env = "OPENSKY_URL", default_value = "https://opensky-network.org/api/states/all")]
    url: String,

    /// Broker address
    #[arg(long, env = "NATS_URL", default_value = "nats://localhost:4222")]
    broker_url: String,

    /// Subject prefix for published events
    #[arg(long, env = "FLIGHT_TOPIC", default_value = "flight.positions")]
    topic: String,

    /// South bound of bounding box (degrees latitude)
    #[arg(long, env = "LAT_MIN", default_value = "-33.75")]
    lat_min: f64,

    /// North bound of bounding box (degrees latitude)
    #[arg(long, env = "LAT_MAX", default_value = "5.27")]
    lat_max: f64,

    /// West bound of bounding box (degrees longitude)
    #[arg(long, env = "LON_MIN", default_value = "-73.99")]
    lon_min: f64,

    /// East bound of bounding box (degrees longitude)
    #[arg(long, env = "LON_MAX", default_value = "-34.79")]
    lon_max: f64,

    /// HTTP request timeout in seconds
    #[arg(long, env = "HTTP_TIMEOUT_SECS", default_value = "30")]
    timeout: u64,

    /// How to treat a response body that is not valid JSON
    #[arg(long, env = "PARSE_POLICY", value_enum, default_value = "absorb")]
    parse_policy: ParsePolicy,

    /// Publish events to the broker instead of printing to stdout
    #[arg(long)]
    publish: bool,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "LOGLEVEL", default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&cli.log_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::debug!("Flight tracker event producer started");

    run_once(&cli).await?;

    tracing::debug!("Flight tracker event producer finished");

    Ok(())
}

/// One fetch→normalize→output cycle.
async fn run_once(cli: &Cli) -> Result<(), Box<dyn std::error::Error>> {
    let bbox = BoundingBox::new(cli.lat_min, cli.lat_max, cli.lon_min, cli.lon_max);
    tracing::info!(
        "Bounding box: lat {}..{}, lon {}..{}",
        bbox.lat_min,
        bbox.lat_max,
        bbox.lon_min,
        bbox.lon_max
    );

    let client_config = ClientConfig::new(cli.url.clone())
        .with_timeout(Duration::from_secs(cli.timeout))
        .with_parse_policy(cli.parse_policy);
    let client = OpenSkyClient::new(client_config)?;

    let response = client.fetch_states(bbox).await?;
    tracing::debug!("Received {} state vectors", response.state_count());

    // One capture timestamp per batch; every event shares it
    let timestamp = chrono::Utc::now().to_rfc3339();
    let events = normalize(&response, &timestamp);
    tracing::info!("Normalized {} flight events", events.len());

    if cli.publish {
        let publisher = EventPublisher::new(PublisherConfig {
            broker_url: cli.broker_url.clone(),
            topic: cli.topic.clone(),
        });
        let published = publisher.publish(&events).await?;
        tracing::info!("Published {} events to {}", published, cli.topic);
    } else {
        output::print_events(&events)?;
    }

    Ok(())
}
