use frostmon_common::types::MonitoredEntity;
use frostmon_source::influx::InfluxSettings;
use serde::Deserialize;
use std::collections::HashSet;

/// Configuration for one monitoring run, loaded from a TOML file.
#[derive(Debug, Deserialize)]
pub struct MonitorConfig {
    /// Minimum seconds between consecutive alerts for the same entity.
    #[serde(default = "default_cooldown_secs")]
    pub cooldown_secs: u64,
    /// Log would-be notifications instead of delivering them.
    #[serde(default)]
    pub dry_run: bool,
    pub source: InfluxSettings,
    pub notify: TelegramSettings,
    #[serde(default)]
    pub store: StoreSettings,
    #[serde(default)]
    pub entities: Vec<MonitoredEntity>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramSettings {
    pub bot_token: String,
    /// Bot id the `getMe` response must report before anything is sent.
    pub bot_id: i64,
    pub chat_id: i64,
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreSettings {
    #[serde(default = "default_store_path")]
    pub path: String,
}

impl Default for StoreSettings {
    fn default() -> Self {
        Self {
            path: default_store_path(),
        }
    }
}

fn default_cooldown_secs() -> u64 {
    64800 // 18 hours
}

fn default_timeout_secs() -> u64 {
    10
}

fn default_store_path() -> String {
    "data/alert_state.db".to_string()
}

impl MonitorConfig {
    pub fn load(path: &str) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    fn validate(&self) -> anyhow::Result<()> {
        let mut seen = HashSet::new();
        for entity in &self.entities {
            if entity.name.is_empty() {
                anyhow::bail!("entity with empty name in configuration");
            }
            if !seen.insert(entity.name.as_str()) {
                anyhow::bail!("duplicate entity name '{}' in configuration", entity.name);
            }
        }
        Ok(())
    }
}
