use marknote_core::store::schema::{
    latest_schema_version, open_connection, schema_version, StoreLocation,
};
use marknote_core::{SqliteBackend, StoreError};
use rusqlite::Connection;

#[test]
fn in_memory_store_gets_latest_schema() {
    let conn = open_connection(StoreLocation::Memory).unwrap();

    assert_eq!(schema_version(&conn).unwrap(), latest_schema_version());
    assert_table_exists(&conn, "kv_store");
}

#[test]
fn reopening_store_file_keeps_entries() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("marknote.sqlite3");

    let conn_first = open_connection(StoreLocation::File(&path)).unwrap();
    conn_first
        .execute(
            "INSERT INTO kv_store (key, value) VALUES ('notes', '[]');",
            [],
        )
        .unwrap();
    drop(conn_first);

    let conn_second = open_connection(StoreLocation::File(&path)).unwrap();
    assert_eq!(schema_version(&conn_second).unwrap(), latest_schema_version());
    let value: String = conn_second
        .query_row("SELECT value FROM kv_store WHERE key = 'notes';", [], |row| {
            row.get(0)
        })
        .unwrap();
    assert_eq!(value, "[]");
}

#[test]
fn store_file_from_newer_binary_is_refused() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("future.sqlite3");

    let conn = Connection::open(&path).unwrap();
    conn.execute_batch("PRAGMA user_version = 999;").unwrap();
    drop(conn);

    match open_connection(StoreLocation::File(&path)).unwrap_err() {
        StoreError::UnsupportedSchemaVersion {
            found,
            latest_supported,
        } => {
            assert_eq!(found, 999);
            assert_eq!(latest_supported, latest_schema_version());
        }
        other => panic!("unexpected error: {other}"),
    }

    let backend_err = SqliteBackend::open(&path).err().expect("backend should fail");
    assert!(matches!(
        backend_err,
        StoreError::UnsupportedSchemaVersion { found: 999, .. }
    ));
    let conn = Connection::open(&path).unwrap();
    assert_eq!(schema_version(&conn).unwrap(), 999);
}

fn assert_table_exists(conn: &Connection, table_name: &str) {
    let exists: i64 = conn
        .query_row(
            "SELECT EXISTS(
                SELECT 1
                FROM sqlite_master
                WHERE type = 'table' AND name = ?1
            );",
            [table_name],
            |row| row.get(0),
        )
        .unwrap();
    assert_eq!(exists, 1, "table {table_name} does not exist");
}
