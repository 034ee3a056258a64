//! Durable key-value backend on top of SQLite.
//!
//! # Invariants
//! - The connection must have migrations applied (`kv_store` table present).
//! - `set_item` is a single `INSERT .. ON CONFLICT` statement, so a failed
//!   write leaves the previous value intact.

use super::schema::{open_connection, StoreLocation};
use super::{KeyValueBackend, StoreError, StoreResult};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

const KV_TABLE: &str = "kv_store";

/// SQLite-backed key-value store owning its connection.
pub struct SqliteBackend {
    conn: Connection,
}

impl SqliteBackend {
    /// Opens (or creates) a store file and applies migrations.
    pub fn open(path: impl AsRef<Path>) -> StoreResult<Self> {
        let conn = open_connection(StoreLocation::File(path.as_ref()))?;
        Self::try_new(conn)
    }

    /// Opens a throwaway in-memory store.
    pub fn open_in_memory() -> StoreResult<Self> {
        let conn = open_connection(StoreLocation::Memory)?;
        Self::try_new(conn)
    }

    /// Wraps a migrated/ready connection.
    ///
    /// # Errors
    /// - Returns `Unavailable` when the `kv_store` table is missing.
    pub fn try_new(conn: Connection) -> StoreResult<Self> {
        if !table_exists(&conn, KV_TABLE)? {
            return Err(StoreError::Unavailable(format!(
                "missing required table `{KV_TABLE}`"
            )));
        }
        Ok(Self { conn })
    }

    /// Borrows the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }
}

impl KeyValueBackend for SqliteBackend {
    fn get_item(&self, key: &str) -> StoreResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM kv_store WHERE key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set_item(&mut self, key: &str, value: &str) -> StoreResult<()> {
        self.conn.execute(
            "INSERT INTO kv_store (key, value)
             VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove_item(&mut self, key: &str) -> StoreResult<()> {
        self.conn
            .execute("DELETE FROM kv_store WHERE key = ?1;", [key])?;
        Ok(())
    }
}

fn table_exists(conn: &Connection, table: &str) -> StoreResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}
