//! SQLite-backed slot storage.
//!
//! # Responsibility
//! - Persist named slots in the `kv_slots` table.
//! - Keep SQL details inside the storage boundary.
//!
//! # Invariants
//! - Only migrated connections are accepted.
//! - `set` is an upsert; a slot never has more than one row.

use super::{KeyValueStorage, StorageError, StorageResult};
use crate::db::migrations::{latest_version, schema_version};
use rusqlite::{params, Connection, OptionalExtension};

/// Slot storage over a migrated SQLite connection.
pub struct SqliteKvStorage<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteKvStorage<'conn> {
    /// Wraps a connection returned by `open_db` / `open_db_in_memory`.
    ///
    /// # Errors
    /// - `UninitializedConnection` when the schema version is behind.
    pub fn try_new(conn: &'conn Connection) -> StorageResult<Self> {
        let actual_version = schema_version(conn)?;
        let expected_version = latest_version();
        if actual_version < expected_version {
            return Err(StorageError::UninitializedConnection {
                expected_version,
                actual_version,
            });
        }
        Ok(Self { conn })
    }

    /// Lists stored slot keys in ascending order.
    pub fn keys(&self) -> StorageResult<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT slot_key FROM kv_slots ORDER BY slot_key ASC;")?;
        let keys = stmt
            .query_map([], |row| row.get::<_, String>(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(keys)
    }
}

impl KeyValueStorage for SqliteKvStorage<'_> {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT slot_value FROM kv_slots WHERE slot_key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.conn.execute(
            "INSERT INTO kv_slots (slot_key, slot_value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT(slot_key) DO UPDATE SET
                slot_value = excluded.slot_value,
                updated_at = excluded.updated_at;",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.conn
            .execute("DELETE FROM kv_slots WHERE slot_key = ?1;", [key])?;
        Ok(())
    }
}
