mod config;

use anyhow::Result;
use frostmon_source::influx::InfluxSampleSource;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("frostmon=info".parse()?))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/feed.toml".to_string());

    let config = config::FeedConfig::load(&config_path)?;
    tracing::info!(url = %config.fetch.url, "frostmon-feed starting");

    let client = reqwest::Client::builder()
        .timeout(Duration::from_secs(config.fetch.timeout_secs))
        .build()?;
    let response = client.get(&config.fetch.url).send().await?;
    anyhow::ensure!(
        response.status().is_success(),
        "price API returned {}",
        response.status()
    );

    let document: serde_json::Value = response.json().await?;
    let value = document
        .pointer(&config.fetch.value_pointer)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| {
            anyhow::anyhow!(
                "no numeric value at '{}' in API response",
                config.fetch.value_pointer
            )
        })?;
    tracing::info!(value, "Fetched current value");

    let sink = InfluxSampleSource::new(config.sink.clone())?;
    sink.write_point(&config.sink.measurement, &config.sink.field, value)
        .await?;
    tracing::info!(
        measurement = %config.sink.measurement,
        field = %config.sink.field,
        "Write complete"
    );

    Ok(())
}
