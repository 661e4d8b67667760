//! Versioned schema for the SQLite block table.
//!
//! Each step moves the schema from version N-1 to N. Applied steps are
//! recorded in `schema_migrations`; opening a database that was written by a
//! newer build fails instead of guessing at its layout.

use rusqlite::{params, Connection, Transaction};

use crate::error::{Result, StoreError};

/// Schema steps in order. The position in this list is the version.
const STEPS: &[(&str, &str)] = &[(
    "block table",
    r#"
    -- Index 0 holds the genesis record, 1.. hold blocks.
    CREATE TABLE blocks (
        idx INTEGER PRIMARY KEY CHECK (idx >= 0),
        body BLOB NOT NULL,            -- the JSON record, byte-for-byte
        written_at INTEGER NOT NULL    -- Unix ms of the last write
    );
    "#,
)];

/// Current schema version.
pub const CURRENT_VERSION: u32 = STEPS.len() as u32;

/// Bring the schema up to [`CURRENT_VERSION`]. Safe to call on every open.
pub fn migrate(conn: &mut Connection) -> Result<()> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS schema_migrations (
            version INTEGER PRIMARY KEY,
            applied_at INTEGER NOT NULL
        )",
        [],
    )?;

    let current = schema_version(conn)?;
    if current > CURRENT_VERSION {
        return Err(StoreError::Migration(format!(
            "database schema v{current} is newer than supported v{CURRENT_VERSION}"
        )));
    }
    if current == CURRENT_VERSION {
        return Ok(());
    }

    let tx = conn.transaction()?;
    for version in (current + 1)..=CURRENT_VERSION {
        apply(&tx, version)?;
    }
    tx.commit()?;
    Ok(())
}

/// Highest applied version, 0 for a fresh database.
pub fn schema_version(conn: &Connection) -> Result<u32> {
    Ok(conn.query_row(
        "SELECT COALESCE(MAX(version), 0) FROM schema_migrations",
        [],
        |row| row.get(0),
    )?)
}

fn apply(tx: &Transaction<'_>, version: u32) -> Result<()> {
    let (name, sql) = version
        .checked_sub(1)
        .and_then(|i| STEPS.get(i as usize))
        .ok_or_else(|| StoreError::Migration(format!("no schema step v{version}")))?;

    tracing::debug!(version, name, "applying schema step");
    tx.execute_batch(sql)?;
    tx.execute(
        "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, ?2)",
        params![version, now_millis()],
    )?;
    Ok(())
}

/// Wall clock in Unix milliseconds, 0 if the clock is before the epoch.
pub(crate) fn now_millis() -> i64 {
    use std::time::{SystemTime, UNIX_EPOCH};
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as i64)
        .unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fresh() -> Connection {
        let mut conn = Connection::open_in_memory().unwrap();
        migrate(&mut conn).unwrap();
        conn
    }

    #[test]
    fn test_fresh_database_reaches_current_version() {
        let conn = fresh();
        assert_eq!(schema_version(&conn).unwrap(), CURRENT_VERSION);

        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM sqlite_master WHERE type='table' AND name='blocks'",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_migrate_is_repeatable() {
        let mut conn = fresh();
        migrate(&mut conn).unwrap();
        migrate(&mut conn).unwrap();

        let rows: i64 = conn
            .query_row("SELECT COUNT(*) FROM schema_migrations", [], |row| row.get(0))
            .unwrap();
        assert_eq!(rows, i64::from(CURRENT_VERSION));
    }

    #[test]
    fn test_negative_index_rejected() {
        let conn = fresh();
        let result = conn.execute(
            "INSERT INTO blocks (idx, body, written_at) VALUES (-1, x'00', 0)",
            [],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_newer_schema_refused() {
        let mut conn = fresh();
        conn.execute(
            "INSERT INTO schema_migrations (version, applied_at) VALUES (?1, 0)",
            params![CURRENT_VERSION + 1],
        )
        .unwrap();

        assert!(matches!(migrate(&mut conn), Err(StoreError::Migration(_))));
    }
}
