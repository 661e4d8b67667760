//! SQLite implementation of the ChainStore trait.
//!
//! An alternative to the file store for chains that should live in a single
//! database file. Each index is one row; `INSERT OR REPLACE` makes every
//! write all-or-nothing.

use std::collections::BTreeSet;
use std::path::Path;
use std::sync::Mutex;

use rusqlite::{params, Connection, OptionalExtension};

use crate::error::{Result, StoreError};
use crate::migration;
use crate::traits::{ChainStore, InitOutcome};

/// SQLite-based store implementation.
///
/// Thread-safe via internal Mutex. Every call blocks until SQLite returns.
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    /// Open (or create) a SQLite database at the given path.
    ///
    /// Runs migrations on open.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let mut conn = Connection::open(path)?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Open a database that must already exist.
    ///
    /// Returns `StoreError::NotInitialized` instead of creating the file, so
    /// read-only commands never materialize an empty chain.
    pub fn open_existing(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(StoreError::NotInitialized(path.display().to_string()));
        }
        Self::open(path)
    }

    /// Open an in-memory SQLite database.
    ///
    /// Useful for testing.
    pub fn open_memory() -> Result<Self> {
        let mut conn = Connection::open_in_memory()?;
        migration::migrate(&mut conn)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Execute a blocking operation on the connection.
    fn with_conn<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self
            .conn
            .lock()
            .map_err(|e| StoreError::Poisoned(e.to_string()))?;
        f(&conn)
    }
}

fn to_key(index: u64) -> Result<i64> {
    i64::try_from(index).map_err(|_| StoreError::IndexOutOfRange(index))
}

impl ChainStore for SqliteStore {
    fn is_initialized(&self) -> Result<bool> {
        // Opening the connection already created and migrated the schema.
        Ok(true)
    }

    fn initialize(&self) -> Result<InitOutcome> {
        Ok(InitOutcome::AlreadyPresent)
    }

    fn exists(&self, index: u64) -> Result<bool> {
        let key = to_key(index)?;
        self.with_conn(|conn| {
            let found: Option<i64> = conn
                .query_row("SELECT idx FROM blocks WHERE idx = ?1", params![key], |row| {
                    row.get(0)
                })
                .optional()?;
            Ok(found.is_some())
        })
    }

    fn read(&self, index: u64) -> Result<Vec<u8>> {
        let key = to_key(index)?;
        self.with_conn(|conn| {
            conn.query_row("SELECT body FROM blocks WHERE idx = ?1", params![key], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or(StoreError::NotFound(index))
        })
    }

    fn write(&self, index: u64, bytes: &[u8]) -> Result<()> {
        let key = to_key(index)?;
        self.with_conn(|conn| {
            conn.execute(
                "INSERT OR REPLACE INTO blocks (idx, body, written_at) VALUES (?1, ?2, ?3)",
                params![key, bytes, migration::now_millis()],
            )?;
            Ok(())
        })
    }

    fn list_indices(&self) -> Result<BTreeSet<u64>> {
        self.with_conn(|conn| {
            let mut stmt = conn.prepare("SELECT idx FROM blocks ORDER BY idx")?;
            let rows = stmt.query_map([], |row| row.get::<_, i64>(0))?;
            let mut indices = BTreeSet::new();
            for row in rows {
                let key = row?;
                if let Ok(index) = u64::try_from(key) {
                    indices.insert(index);
                }
            }
            Ok(indices)
        })
    }

    fn highest_index(&self) -> Result<u64> {
        self.with_conn(|conn| {
            let max: Option<i64> =
                conn.query_row("SELECT MAX(idx) FROM blocks", [], |row| row.get(0))?;
            Ok(max.and_then(|m| u64::try_from(m).ok()).unwrap_or(0))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::StoreExt;
    use hashchain_core::GenesisRecord;

    #[test]
    fn test_write_and_read() {
        let store = SqliteStore::open_memory().unwrap();
        store.write(0, b"genesis").unwrap();
        store.write(1, b"one").unwrap();

        assert_eq!(store.read(1).unwrap(), b"one");
        assert!(store.exists(0).unwrap());
        assert!(!store.exists(2).unwrap());
        assert!(matches!(store.read(2), Err(StoreError::NotFound(2))));
    }

    #[test]
    fn test_overwrite_replaces() {
        let store = SqliteStore::open_memory().unwrap();
        store.write(1, b"first").unwrap();
        store.write(1, b"second").unwrap();
        assert_eq!(store.read(1).unwrap(), b"second");
        assert_eq!(store.list_indices().unwrap().len(), 1);
    }

    #[test]
    fn test_highest_index() {
        let store = SqliteStore::open_memory().unwrap();
        assert_eq!(store.highest_index().unwrap(), 0);
        for i in [0, 1, 2, 7] {
            store.write(i, b"r").unwrap();
        }
        assert_eq!(store.highest_index().unwrap(), 7);
        assert_eq!(
            store.list_indices().unwrap().into_iter().collect::<Vec<_>>(),
            vec![0, 1, 2, 7]
        );
    }

    #[test]
    fn test_index_out_of_range() {
        let store = SqliteStore::open_memory().unwrap();
        assert!(matches!(
            store.write(u64::MAX, b"x"),
            Err(StoreError::IndexOutOfRange(_))
        ));
    }

    #[test]
    fn test_open_existing_requires_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("chain.db");
        assert!(matches!(
            SqliteStore::open_existing(&path),
            Err(StoreError::NotInitialized(_))
        ));

        {
            let store = SqliteStore::open(&path).unwrap();
            store
                .write_genesis(&GenesisRecord::new("Blockchain", "now", "PixHead"))
                .unwrap();
        }

        let reopened = SqliteStore::open_existing(&path).unwrap();
        assert_eq!(reopened.read_genesis().unwrap().title, "Blockchain");
    }
}
