use crate::sqlite::SqliteStateStore;
use crate::StateStore;
use chrono::{DateTime, Duration, TimeZone, Utc};
use tempfile::TempDir;

fn stamp() -> DateTime<Utc> {
    // Fixed instant with non-zero microseconds to exercise sub-second round-tripping.
    Utc.with_ymd_and_hms(2021, 1, 17, 9, 30, 15).unwrap() + Duration::microseconds(123_456)
}

#[test]
fn missing_scope_has_no_record() {
    let store = SqliteStateStore::open_in_memory().unwrap();
    assert_eq!(store.last_fired("Freezer").unwrap(), None);
}

#[test]
fn record_round_trips_with_microsecond_precision() {
    let store = SqliteStateStore::open_in_memory().unwrap();
    let at = stamp();

    store.record_fired("Freezer", at).unwrap();
    assert_eq!(store.last_fired("Freezer").unwrap(), Some(at));
}

#[test]
fn scopes_are_independent() {
    let store = SqliteStateStore::open_in_memory().unwrap();
    let at = stamp();

    store.record_fired("Freezer", at).unwrap();
    assert_eq!(store.last_fired("Outside").unwrap(), None);
}

#[test]
fn record_never_moves_backwards() {
    let store = SqliteStateStore::open_in_memory().unwrap();
    let newer = stamp();
    let older = newer - Duration::hours(1);

    store.record_fired("Freezer", newer).unwrap();
    store.record_fired("Freezer", older).unwrap();
    assert_eq!(store.last_fired("Freezer").unwrap(), Some(newer));

    let newest = newer + Duration::seconds(1);
    store.record_fired("Freezer", newest).unwrap();
    assert_eq!(store.last_fired("Freezer").unwrap(), Some(newest));
}

#[test]
fn state_survives_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("alert_state.db");
    let at = stamp();

    {
        let store = SqliteStateStore::open(&path).unwrap();
        store.record_fired("Freezer", at).unwrap();
    }

    let store = SqliteStateStore::open(&path).unwrap();
    assert_eq!(store.last_fired("Freezer").unwrap(), Some(at));
}

#[test]
fn open_creates_parent_directory() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested/state/alert_state.db");

    let store = SqliteStateStore::open(&path).unwrap();
    store.record_fired("Freezer", stamp()).unwrap();
    assert!(path.exists());
}
