use crate::error::{Result, SourceError};
use crate::SampleSource;
use async_trait::async_trait;
use chrono::DateTime;
use frostmon_common::types::Sample;
use serde::Deserialize;
use std::time::Duration;

/// Connection settings for an InfluxDB 1.x server.
#[derive(Debug, Clone, Deserialize)]
pub struct InfluxSettings {
    /// Base URL, e.g. `http://localhost:8086`.
    pub url: String,
    pub database: String,
    /// Measurement holding the monitored series, e.g. `ruuvi_measurements`.
    pub measurement: String,
    /// Field to read, e.g. `temperature`.
    pub field: String,
    /// Tag that carries the source key, e.g. `mac`.
    #[serde(default = "default_tag")]
    pub tag: String,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub password: Option<String>,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_tag() -> String {
    "mac".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

/// [`SampleSource`] backed by the InfluxDB 1.x HTTP API.
///
/// Reads go through `/query` with `epoch=ms` so timestamps come back as
/// integer milliseconds. Writes (used by the price feed) go through
/// `/write` in line protocol. Every request carries the configured
/// client-level timeout.
pub struct InfluxSampleSource {
    client: reqwest::Client,
    settings: InfluxSettings,
}

#[derive(Debug, Deserialize)]
struct QueryResponse {
    #[serde(default)]
    results: Vec<QueryResult>,
}

#[derive(Debug, Deserialize)]
struct QueryResult {
    #[serde(default)]
    series: Vec<Series>,
    #[serde(default)]
    error: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Series {
    pub(crate) columns: Vec<String>,
    pub(crate) values: Vec<Vec<serde_json::Value>>,
}

impl InfluxSampleSource {
    pub fn new(settings: InfluxSettings) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.timeout_secs))
            .build()?;
        Ok(Self { client, settings })
    }

    fn base_url(&self) -> &str {
        self.settings.url.trim_end_matches('/')
    }

    /// InfluxQL for the most recent point of the keyed series.
    pub(crate) fn latest_query(&self, source_key: &str) -> String {
        let escaped = source_key.replace('\'', "\\'");
        format!(
            "SELECT time, \"{}\" FROM \"{}\" WHERE \"{}\" = '{}' ORDER BY time DESC LIMIT 1",
            self.settings.field, self.settings.measurement, self.settings.tag, escaped
        )
    }

    async fn run_query(&self, q: &str) -> Result<QueryResponse> {
        let mut request = self
            .client
            .get(format!("{}/query", self.base_url()))
            .query(&[
                ("db", self.settings.database.as_str()),
                ("q", q),
                ("epoch", "ms"),
            ]);
        if let Some(username) = &self.settings.username {
            request = request.basic_auth(username, self.settings.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(response.json().await?)
    }

    /// Writes a single point in line protocol. Used by the price feed.
    pub async fn write_point(&self, measurement: &str, field: &str, value: f64) -> Result<()> {
        let body = format!("{measurement} {field}={value}");
        let mut request = self
            .client
            .post(format!("{}/write", self.base_url()))
            .query(&[("db", self.settings.database.as_str())])
            .body(body);
        if let Some(username) = &self.settings.username {
            request = request.basic_auth(username, self.settings.password.as_deref());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(SourceError::Api {
                status: status.as_u16(),
                body: response.text().await.unwrap_or_default(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl SampleSource for InfluxSampleSource {
    async fn latest(&self, source_key: &str) -> Result<Sample> {
        let q = self.latest_query(source_key);
        tracing::debug!(query = %q, "Querying latest sample");

        let response = self.run_query(&q).await?;
        let result = response
            .results
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::Malformed("empty results array".to_string()))?;

        // InfluxDB reports statement-level errors in-band with HTTP 200.
        if let Some(error) = result.error {
            return Err(SourceError::Api {
                status: 200,
                body: error,
            });
        }

        let series = result
            .series
            .into_iter()
            .next()
            .ok_or_else(|| SourceError::MissingData {
                key: source_key.to_string(),
            })?;

        parse_latest(&series, &self.settings.field, source_key)
    }
}

pub(crate) fn parse_latest(series: &Series, field: &str, key: &str) -> Result<Sample> {
    let time_idx = series
        .columns
        .iter()
        .position(|c| c == "time")
        .ok_or_else(|| SourceError::Malformed("no 'time' column in series".to_string()))?;
    let field_idx = series
        .columns
        .iter()
        .position(|c| c == field)
        .ok_or_else(|| SourceError::Malformed(format!("no '{field}' column in series")))?;

    let row = series.values.first().ok_or_else(|| SourceError::MissingData {
        key: key.to_string(),
    })?;

    let ts_ms = row
        .get(time_idx)
        .and_then(|v| v.as_i64())
        .ok_or_else(|| SourceError::Malformed("time column is not an integer".to_string()))?;
    let value = row
        .get(field_idx)
        .and_then(|v| v.as_f64())
        .ok_or_else(|| SourceError::Malformed(format!("'{field}' column is not numeric")))?;

    let observed_at = DateTime::from_timestamp_millis(ts_ms)
        .ok_or_else(|| SourceError::Malformed(format!("timestamp {ts_ms}ms out of range")))?;

    Ok(Sample { value, observed_at })
}
