use crate::error::{Result, StoreError};
use crate::StateStore;
use chrono::{DateTime, SecondsFormat, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::sync::{Mutex, PoisonError};

/// SQLite-backed [`StateStore`], one row per suppression scope.
///
/// Timestamps are stored as RFC 3339 text with microsecond precision.
/// All rows share the same format and width, so the strings sort
/// lexicographically in time order and the upsert can compare them as
/// text to enforce the forward-only invariant.
pub struct SqliteStateStore {
    conn: Mutex<Connection>,
}

impl SqliteStateStore {
    /// Opens the state database at `path`, creating it (and its parent
    /// directory) if necessary.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)?;
            }
        }
        let conn = Connection::open(path)?;
        Self::init(conn)
    }

    /// In-memory store, used by tests.
    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.execute(
            "CREATE TABLE IF NOT EXISTS alert_state (
                scope_key     TEXT PRIMARY KEY,
                last_fired_at TEXT NOT NULL
            )",
            [],
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    fn conn(&self) -> std::sync::MutexGuard<'_, Connection> {
        self.conn.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl StateStore for SqliteStateStore {
    fn last_fired(&self, scope_key: &str) -> Result<Option<DateTime<Utc>>> {
        let raw: Option<String> = self
            .conn()
            .query_row(
                "SELECT last_fired_at FROM alert_state WHERE scope_key = ?1",
                params![scope_key],
                |row| row.get(0),
            )
            .optional()?;

        match raw {
            Some(raw) => {
                let parsed =
                    DateTime::parse_from_rfc3339(&raw).map_err(|_| StoreError::Timestamp {
                        scope_key: scope_key.to_string(),
                        raw,
                    })?;
                Ok(Some(parsed.with_timezone(&Utc)))
            }
            None => Ok(None),
        }
    }

    fn record_fired(&self, scope_key: &str, at: DateTime<Utc>) -> Result<()> {
        let stamp = at.to_rfc3339_opts(SecondsFormat::Micros, true);
        self.conn().execute(
            "INSERT INTO alert_state (scope_key, last_fired_at) VALUES (?1, ?2)
             ON CONFLICT(scope_key) DO UPDATE SET last_fired_at = excluded.last_fired_at
             WHERE excluded.last_fired_at > alert_state.last_fired_at",
            params![scope_key, stamp],
        )?;
        Ok(())
    }
}
