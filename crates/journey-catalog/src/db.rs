use anyhow::{Context, Result};
use rusqlite::{Connection, OptionalExtension, params};
use tracing::{debug, info};

/// Key-value persistence for whole serialized documents.
pub trait BlobStore {
    fn get(&self, key: &str) -> Result<Option<String>>;
    fn put(&self, key: &str, value: &str) -> Result<()>;
    fn remove(&self, key: &str) -> Result<()>;
}

/// SQLite-backed [`BlobStore`], one row per key.
pub struct SqliteBlobStore {
    conn: Connection,
}

impl SqliteBlobStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path).context("failed to open blob database")?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        let store = Self { conn };
        store.migrate()?;
        Ok(store)
    }

    fn migrate(&self) -> Result<()> {
        info!("running blob store migrations");
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS blobs (
                key        TEXT PRIMARY KEY,
                value      TEXT NOT NULL,
                updated_at TEXT NOT NULL DEFAULT (datetime('now'))
            );
            ",
        )?;
        Ok(())
    }
}

impl BlobStore for SqliteBlobStore {
    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM blobs WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("failed to read blob: {key}"))?;
        Ok(value)
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO blobs (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = datetime('now')",
                params![key, value],
            )
            .with_context(|| format!("failed to write blob: {key}"))?;
        debug!(key, bytes = value.len(), "blob written");
        Ok(())
    }

    fn remove(&self, key: &str) -> Result<()> {
        self.conn
            .execute("DELETE FROM blobs WHERE key = ?1", params![key])
            .with_context(|| format!("failed to remove blob: {key}"))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_key_is_none() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        assert!(store.get("nothing").unwrap().is_none());
    }

    #[test]
    fn put_then_get() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        store.put("k", "[1,2,3]").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("[1,2,3]"));
    }

    #[test]
    fn put_overwrites() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        store.put("k", "first").unwrap();
        store.put("k", "second").unwrap();
        assert_eq!(store.get("k").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn remove_deletes_key() {
        let store = SqliteBlobStore::open_in_memory().unwrap();
        store.put("k", "v").unwrap();
        store.remove("k").unwrap();
        assert!(store.get("k").unwrap().is_none());
        store.remove("k").unwrap();
    }

    #[test]
    fn persists_across_reopen() {
        let dir = tempfile::tempdir().unwrap();
        let db_path = dir.path().join("journey.db");
        let path_str = db_path.to_str().unwrap();

        let store = SqliteBlobStore::open(path_str).unwrap();
        store.put("photos_me", "[]").unwrap();
        drop(store);

        let reopened = SqliteBlobStore::open(path_str).unwrap();
        assert_eq!(reopened.get("photos_me").unwrap().as_deref(), Some("[]"));
    }
}
