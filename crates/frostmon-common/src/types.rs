use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A monitored entity: a named series in the time-series store with
/// optional lower and upper bounds.
///
/// A bound left as `None` is never checked. Entities with neither bound
/// set are skipped entirely by the monitor (not even queried). Definitions
/// are loaded once at startup from the `[[entities]]` configuration table
/// and are immutable for the run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonitoredEntity {
    /// Unique display name (e.g., `"Freezer"`), also the suppression scope key.
    pub name: String,
    /// Tag value identifying the series in the sample source (e.g., a sensor MAC).
    pub source_key: String,
    #[serde(default)]
    pub min: Option<f64>,
    #[serde(default)]
    pub max: Option<f64>,
    /// Display-only suffix for alert text (e.g., `"°C"`).
    #[serde(default)]
    pub unit: Option<String>,
}

impl MonitoredEntity {
    /// True when at least one bound is configured.
    pub fn is_monitored(&self) -> bool {
        self.min.is_some() || self.max.is_some()
    }

    pub fn unit_suffix(&self) -> &str {
        self.unit.as_deref().unwrap_or("")
    }
}

/// The most recent reading for an entity, produced fresh each cycle and
/// not retained beyond it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sample {
    pub value: f64,
    pub observed_at: DateTime<Utc>,
}

/// Classification of a sample against its entity's configured bounds.
///
/// `Unknown` is never produced by threshold evaluation; it marks an entity
/// whose sample could not be obtained or validated this cycle.
///
/// # Examples
///
/// ```
/// use frostmon_common::types::Verdict;
///
/// assert_eq!(Verdict::AboveMax.to_string(), "above_max");
/// assert!(Verdict::BelowMin.is_violation());
/// assert!(!Verdict::Unknown.is_violation());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Normal,
    BelowMin,
    AboveMax,
    Unknown,
}

impl Verdict {
    /// True for the alert-worthy verdicts (`BelowMin`, `AboveMax`).
    pub fn is_violation(&self) -> bool {
        matches!(self, Verdict::BelowMin | Verdict::AboveMax)
    }
}

impl std::fmt::Display for Verdict {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Verdict::Normal => write!(f, "normal"),
            Verdict::BelowMin => write!(f, "below_min"),
            Verdict::AboveMax => write!(f, "above_max"),
            Verdict::Unknown => write!(f, "unknown"),
        }
    }
}

/// Per-entity result of one monitoring cycle.
///
/// `notified` is true only when the notifier accepted the alert message; a
/// suppression record committed ahead of a failed delivery leaves it false.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AlertOutcome {
    pub entity: String,
    pub verdict: Verdict,
    pub notified: bool,
}
