//! Durable alert-state storage.
//!
//! A [`StateStore`] maps a suppression scope key to the timestamp of the
//! last alert fired for that scope. The default implementation
//! ([`sqlite::SqliteStateStore`]) keeps one row per scope in a SQLite
//! database, so overlapping scheduled invocations cannot corrupt the
//! record.

pub mod error;
pub mod sqlite;

#[cfg(test)]
mod tests;

use chrono::{DateTime, Utc};
use error::StoreError;

/// Persistence for per-scope last-fired timestamps.
///
/// Implementations must round-trip timestamps with sub-second precision
/// and must never move a recorded timestamp backwards.
pub trait StateStore: Send + Sync {
    /// Returns when the scope last fired, or `None` if it never has.
    fn last_fired(&self, scope_key: &str) -> Result<Option<DateTime<Utc>>, StoreError>;

    /// Records `at` as the scope's last-fired time. A write that would move
    /// the timestamp backwards is ignored.
    fn record_fired(&self, scope_key: &str, at: DateTime<Utc>) -> Result<(), StoreError>;
}
