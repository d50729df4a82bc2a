//! SQLite-backed key-value cache.
//!
//! # Invariants
//! - The connection must come from `db::open_db*` so `kv_entries` exists.
//! - Values survive reopening the same database file.

use super::{KeyValueCache, KvError, KvResult};
use rusqlite::{params, Connection, OptionalExtension};

const KV_TABLE: &str = "kv_entries";

pub struct SqliteCache<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteCache<'conn> {
    /// Wraps a migrated connection, rejecting one without the cache table.
    pub fn try_new(conn: &'conn Connection) -> KvResult<Self> {
        let exists: bool = conn.query_row(
            "SELECT EXISTS(
                SELECT 1 FROM sqlite_master WHERE type = 'table' AND name = ?1
            );",
            [KV_TABLE],
            |row| row.get(0),
        )?;
        if !exists {
            return Err(KvError::MissingTable(KV_TABLE));
        }
        Ok(Self { conn })
    }
}

impl KeyValueCache for SqliteCache<'_> {
    fn get(&self, key: &str) -> KvResult<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT entry_value FROM kv_entries WHERE entry_key = ?1;",
                [key],
                |row| row.get::<_, String>(0),
            )
            .optional()?;
        Ok(value)
    }

    fn set(&mut self, key: &str, value: &str) -> KvResult<()> {
        self.conn.execute(
            "INSERT INTO kv_entries (entry_key, entry_value)
             VALUES (?1, ?2)
             ON CONFLICT(entry_key) DO UPDATE SET
                entry_value = excluded.entry_value,
                updated_at = (strftime('%s', 'now') * 1000);",
            params![key, value],
        )?;
        Ok(())
    }

    fn remove(&mut self, key: &str) -> KvResult<()> {
        self.conn
            .execute("DELETE FROM kv_entries WHERE entry_key = ?1;", [key])?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::SqliteCache;
    use crate::db::open_db_in_memory;
    use crate::kv::{KeyValueCache, KvError};
    use rusqlite::Connection;

    #[test]
    fn set_overwrites_and_remove_is_idempotent() {
        let conn = open_db_in_memory().unwrap();
        let mut cache = SqliteCache::try_new(&conn).unwrap();

        cache.set("user", "{\"a\":1}").unwrap();
        cache.set("user", "{\"a\":2}").unwrap();
        assert_eq!(cache.get("user").unwrap().as_deref(), Some("{\"a\":2}"));

        cache.remove("user").unwrap();
        cache.remove("user").unwrap();
        assert_eq!(cache.get("user").unwrap(), None);
    }

    #[test]
    fn unmigrated_connection_is_rejected() {
        let conn = Connection::open_in_memory().unwrap();
        let err = SqliteCache::try_new(&conn).err().unwrap();
        assert!(matches!(err, KvError::MissingTable("kv_entries")));
    }
}
