//! SQLite file layout for the durable key-value store.
//!
//! # Invariants
//! - The schema version lives in `PRAGMA user_version`.
//! - A connection handed out by `open_connection` has every step applied.
//! - A file stamped with a newer version than this binary knows is refused
//!   untouched.

use super::{StoreError, StoreResult};
use log::{error, info};
use rusqlite::Connection;
use std::path::Path;
use std::time::{Duration, Instant};

/// Ordered schema steps as `(version, sql)`. Versions strictly increase.
const SCHEMA_STEPS: &[(u32, &str)] = &[(1, include_str!("sql/0001_kv_store.sql"))];

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Where the SQLite store lives.
#[derive(Debug, Clone, Copy)]
pub enum StoreLocation<'a> {
    File(&'a Path),
    Memory,
}

impl StoreLocation<'_> {
    fn label(&self) -> &'static str {
        match self {
            Self::File(_) => "file",
            Self::Memory => "memory",
        }
    }
}

/// Newest schema version this binary can write.
pub fn latest_schema_version() -> u32 {
    SCHEMA_STEPS.last().map_or(0, |(version, _)| *version)
}

/// Reads the version stamped on an open store.
pub fn schema_version(conn: &Connection) -> StoreResult<u32> {
    Ok(conn.query_row("PRAGMA user_version;", [], |row| row.get::<_, u32>(0))?)
}

/// Opens the store at `location` and brings its schema up to date.
///
/// Missing files are created. Emits `store_open` events with duration.
pub fn open_connection(location: StoreLocation<'_>) -> StoreResult<Connection> {
    let started_at = Instant::now();
    let mode = location.label();

    let opened = match location {
        StoreLocation::File(path) => Connection::open(path),
        StoreLocation::Memory => Connection::open_in_memory(),
    };
    let result = opened
        .map_err(StoreError::from)
        .and_then(|mut conn| {
            conn.busy_timeout(BUSY_TIMEOUT)?;
            migrate(&mut conn)?;
            Ok(conn)
        });

    let elapsed_ms = started_at.elapsed().as_millis();
    match &result {
        Ok(_) => info!("event=store_open module=store status=ok mode={mode} duration_ms={elapsed_ms}"),
        Err(err) => error!(
            "event=store_open module=store status=error mode={mode} duration_ms={elapsed_ms} error={err}"
        ),
    }
    result
}

/// Applies the schema steps newer than the stamped version in one
/// transaction. A failing step rolls back every step of this call.
pub fn migrate(conn: &mut Connection) -> StoreResult<()> {
    let found = schema_version(conn)?;
    let latest = latest_schema_version();
    if found > latest {
        return Err(StoreError::UnsupportedSchemaVersion {
            found,
            latest_supported: latest,
        });
    }
    if found == latest {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for (version, sql) in SCHEMA_STEPS.iter().filter(|(version, _)| *version > found) {
        tx.execute_batch(sql)?;
        tx.pragma_update(None, "user_version", version)?;
    }
    tx.commit()?;

    info!("event=store_migrate module=store status=ok from_version={found} to_version={latest}");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::{latest_schema_version, migrate, schema_version};
    use rusqlite::Connection;

    #[test]
    fn migrate_is_a_no_op_when_current() {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();
        assert_eq!(schema_version(&conn).unwrap(), latest_schema_version());
    }
}
