use chrono::{DateTime, Duration, Utc};
use frostmon_store::error::StoreError;
use frostmon_store::StateStore;

/// Rate limiter over the durable last-fired store.
///
/// [`is_allowed`](Self::is_allowed) and [`fire`](Self::fire) are two
/// separate steps, not one atomic check-and-set: a caller performing both
/// leaves a window in which an overlapping invocation could pass the same
/// check. The store's forward-only upsert keeps the record itself
/// consistent; the expected deployment is non-overlapping scheduled runs.
pub struct SuppressionGate {
    store: Box<dyn StateStore>,
}

impl SuppressionGate {
    pub fn new(store: Box<dyn StateStore>) -> Self {
        Self { store }
    }

    /// True when no alert has fired for `scope_key` within `cooldown`.
    ///
    /// A missing record means the scope never fired, so alerting is
    /// allowed. A read error is treated the same way and logged at warn.
    /// Calling this repeatedly without an intervening [`fire`](Self::fire)
    /// returns the same answer.
    pub fn is_allowed(&self, scope_key: &str, now: DateTime<Utc>, cooldown: Duration) -> bool {
        let last = match self.store.last_fired(scope_key) {
            Ok(last) => last,
            Err(e) => {
                tracing::warn!(
                    scope_key,
                    error = %e,
                    "Failed to read last-fired record, treating as absent"
                );
                None
            }
        };
        match last {
            Some(last) => now - last >= cooldown,
            None => true,
        }
    }

    /// Records `now` as the last-fired time for `scope_key`.
    ///
    /// Must be called before notification dispatch: a crash between this
    /// write and the delivery suppresses the retry instead of repeating
    /// the alert on every subsequent run.
    ///
    /// # Errors
    ///
    /// Propagates [`StoreError`] from the write. The caller must withhold
    /// the notification in that case.
    pub fn fire(&self, scope_key: &str, now: DateTime<Utc>) -> Result<(), StoreError> {
        self.store.record_fired(scope_key, now)
    }
}
