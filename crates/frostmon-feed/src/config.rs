use frostmon_source::influx::InfluxSettings;
use serde::Deserialize;

/// Configuration for one feed run: where to fetch the value from and
/// which InfluxDB measurement to write it into.
#[derive(Debug, Deserialize)]
pub struct FeedConfig {
    pub fetch: FetchSettings,
    pub sink: InfluxSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct FetchSettings {
    /// JSON HTTP endpoint, e.g. a price API.
    pub url: String,
    /// JSON pointer to the numeric value inside the response document.
    #[serde(default = "default_value_pointer")]
    pub value_pointer: String,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_value_pointer() -> String {
    "/bpi/EUR/rate_float".to_string()
}

fn default_timeout_secs() -> u64 {
    10
}

impl FeedConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_config_parses() {
        let config: FeedConfig = toml::from_str(
            r#"
            [fetch]
            url = "https://api.coindesk.com/v1/bpi/currentprice.json"

            [sink]
            url = "http://localhost:8086"
            database = "sensors"
            measurement = "bitcoin_rate"
            field = "rate_float"
            "#,
        )
        .unwrap();

        assert_eq!(config.fetch.value_pointer, "/bpi/EUR/rate_float");
        assert_eq!(config.fetch.timeout_secs, 10);
        assert_eq!(config.sink.measurement, "bitcoin_rate");
    }
}
