mod config;

use anyhow::Result;
use chrono::Utc;
use frostmon_alert::engine::MonitorEngine;
use frostmon_alert::gate::SuppressionGate;
use frostmon_notify::channels::log::LogNotifier;
use frostmon_notify::channels::telegram::TelegramNotifier;
use frostmon_notify::Notifier;
use frostmon_source::influx::InfluxSampleSource;
use frostmon_store::sqlite::SqliteStateStore;
use std::path::Path;
use std::time::Duration;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("frostmon=info".parse()?))
        .init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "config/monitor.toml".to_string());

    let config = config::MonitorConfig::load(&config_path)?;
    tracing::info!(
        entities = config.entities.len(),
        cooldown_secs = config.cooldown_secs,
        dry_run = config.dry_run,
        "frostmon-monitor starting"
    );

    // Startup failures (config above, store here) are the only non-zero exits.
    let store = SqliteStateStore::open(Path::new(&config.store.path))?;
    let source = InfluxSampleSource::new(config.source.clone())?;
    let notifier: Box<dyn Notifier> = if config.dry_run {
        Box::new(LogNotifier)
    } else {
        Box::new(TelegramNotifier::new(
            &config.notify.bot_token,
            config.notify.bot_id,
            config.notify.chat_id,
            Duration::from_secs(config.notify.timeout_secs),
        )?)
    };

    let engine = MonitorEngine::new(
        Box::new(source),
        notifier,
        SuppressionGate::new(Box::new(store)),
        chrono::Duration::seconds(config.cooldown_secs as i64),
    );

    let outcomes = engine.run_cycle(&config.entities, Utc::now()).await;
    for outcome in &outcomes {
        tracing::info!(
            entity = %outcome.entity,
            verdict = %outcome.verdict,
            notified = outcome.notified,
            "Cycle outcome"
        );
    }
    tracing::info!(checked = outcomes.len(), "Cycle complete");

    Ok(())
}
