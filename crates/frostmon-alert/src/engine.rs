use crate::gate::SuppressionGate;
use crate::policy;
use chrono::{DateTime, Duration, Utc};
use frostmon_common::types::{AlertOutcome, MonitoredEntity, Verdict};
use frostmon_notify::Notifier;
use frostmon_source::SampleSource;

/// Orchestrates one monitoring cycle: sample, evaluate, gate, notify.
///
/// Collaborators are injected at construction. Per-entity failures are
/// converted into outcomes at this boundary; nothing escapes
/// [`run_cycle`](Self::run_cycle).
pub struct MonitorEngine {
    source: Box<dyn SampleSource>,
    notifier: Box<dyn Notifier>,
    gate: SuppressionGate,
    cooldown: Duration,
}

impl MonitorEngine {
    pub fn new(
        source: Box<dyn SampleSource>,
        notifier: Box<dyn Notifier>,
        gate: SuppressionGate,
        cooldown: Duration,
    ) -> Self {
        Self {
            source,
            notifier,
            gate,
            cooldown,
        }
    }

    /// Runs one cycle over `entities` in configuration order and returns
    /// one outcome per entity with at least one configured bound.
    ///
    /// Entities with neither bound set are skipped without being queried.
    /// A total sample-source outage yields `Unknown` for every queried
    /// entity; the cycle still completes.
    pub async fn run_cycle(
        &self,
        entities: &[MonitoredEntity],
        now: DateTime<Utc>,
    ) -> Vec<AlertOutcome> {
        let mut outcomes = Vec::with_capacity(entities.len());
        for entity in entities {
            if !entity.is_monitored() {
                tracing::debug!(entity = %entity.name, "No bounds configured, skipping");
                continue;
            }
            outcomes.push(self.check_entity(entity, now).await);
        }
        outcomes
    }

    async fn check_entity(&self, entity: &MonitoredEntity, now: DateTime<Utc>) -> AlertOutcome {
        let sample = match self.source.latest(&entity.source_key).await {
            Ok(sample) => sample,
            Err(e) => {
                tracing::warn!(entity = %entity.name, error = %e, "Sample query failed, skipping this cycle");
                return outcome(entity, Verdict::Unknown, false);
            }
        };

        let verdict = match policy::evaluate(entity, sample.value) {
            Ok(verdict) => verdict,
            Err(e) => {
                tracing::warn!(entity = %entity.name, error = %e, "Sample rejected");
                return outcome(entity, Verdict::Unknown, false);
            }
        };

        tracing::info!(
            entity = %entity.name,
            value = sample.value,
            verdict = %verdict,
            "Evaluated sample"
        );

        if !verdict.is_violation() {
            return outcome(entity, verdict, false);
        }

        // One suppression scope per entity: an alert for one entity never
        // silences another's.
        let scope_key = entity.name.as_str();

        if !self.gate.is_allowed(scope_key, now, self.cooldown) {
            tracing::debug!(entity = %entity.name, "Alert suppressed, cooldown active");
            return outcome(entity, verdict, false);
        }

        // Record before dispatch; see SuppressionGate::fire.
        if let Err(e) = self.gate.fire(scope_key, now) {
            tracing::error!(
                entity = %entity.name,
                error = %e,
                "Failed to record alert state, notification withheld"
            );
            return outcome(entity, verdict, false);
        }

        let Some(message) = alert_message(entity, sample.value, verdict) else {
            return outcome(entity, verdict, false);
        };

        let notified = match self.notifier.send(&message).await {
            Ok(()) => {
                tracing::info!(
                    entity = %entity.name,
                    notifier = self.notifier.name(),
                    "Alert sent"
                );
                true
            }
            Err(e) => {
                tracing::error!(
                    entity = %entity.name,
                    error = %e,
                    "Alert delivery failed, cooldown already recorded"
                );
                false
            }
        };

        outcome(entity, verdict, notified)
    }
}

fn outcome(entity: &MonitoredEntity, verdict: Verdict, notified: bool) -> AlertOutcome {
    AlertOutcome {
        entity: entity.name.clone(),
        verdict,
        notified,
    }
}

/// Formats the alert text for a violating verdict. A violating verdict
/// always carries its configured bound, so this only returns `None` for
/// non-violations.
fn alert_message(entity: &MonitoredEntity, value: f64, verdict: Verdict) -> Option<String> {
    let unit = entity.unit_suffix();
    match verdict {
        Verdict::BelowMin => entity.min.map(|min| {
            format!(
                "MONITOR ALERT: {} is {value:.1}{unit} which is less than {min:.1}{unit} (configured minimum)",
                entity.name
            )
        }),
        Verdict::AboveMax => entity.max.map(|max| {
            format!(
                "MONITOR ALERT: {} is {value:.1}{unit} which is greater than {max:.1}{unit} (configured maximum)",
                entity.name
            )
        }),
        Verdict::Normal | Verdict::Unknown => None,
    }
}
