use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use rusqlite::{Connection, OptionalExtension};
use tracing::{debug, info};

use crate::store::error::StoreError;
use crate::store::parameter::ParameterStore;

/// Parameter store kept in a local SQLite file
pub struct SqliteParameterStore {
    conn: Mutex<Connection>,
}

impl SqliteParameterStore {
    pub fn new(db_path: &Path) -> Result<Self, StoreError> {
        info!("Opening parameter database at {:?}", db_path);

        let conn = Connection::open(db_path)?;

        // Enable WAL mode for better concurrency
        conn.pragma_update(None, "journal_mode", "WAL")?;
        conn.pragma_update(None, "synchronous", "NORMAL")?;

        Self::from_connection(conn)
    }

    /// Open a store that lives only as long as the process
    pub fn in_memory() -> Result<Self, StoreError> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self, StoreError> {
        let store = Self {
            conn: Mutex::new(conn),
        };
        store.create_schema()?;
        Ok(store)
    }

    /// Acquire database connection lock with proper error handling
    fn lock_conn(&self) -> Result<MutexGuard<'_, Connection>, StoreError> {
        self.conn.lock().map_err(|_| StoreError::LockPoisoned)
    }

    /// Get current timestamp in milliseconds since UNIX epoch
    fn current_timestamp_ms() -> i64 {
        chrono::Utc::now().timestamp_millis()
    }

    fn create_schema(&self) -> Result<(), StoreError> {
        debug!("Creating parameter schema");

        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            CREATE TABLE IF NOT EXISTS parameters (
                name TEXT PRIMARY KEY,
                value TEXT NOT NULL,
                description TEXT NOT NULL DEFAULT '',
                updated_at INTEGER NOT NULL
            )
            "#,
            [],
        )?;

        Ok(())
    }

    /// Get the description recorded with the last write of a parameter
    pub fn description(&self, name: &str) -> Result<Option<String>, StoreError> {
        let conn = self.lock_conn()?;
        let description = conn
            .query_row(
                "SELECT description FROM parameters WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(description)
    }
}

impl ParameterStore for SqliteParameterStore {
    fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        let conn = self.lock_conn()?;
        let value = conn
            .query_row(
                "SELECT value FROM parameters WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .optional()?;

        Ok(value)
    }

    fn put(&self, name: &str, value: &str, description: &str) -> Result<(), StoreError> {
        let conn = self.lock_conn()?;
        conn.execute(
            r#"
            INSERT INTO parameters (name, value, description, updated_at)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(name) DO UPDATE SET
                value = excluded.value,
                description = excluded.description,
                updated_at = excluded.updated_at
            "#,
            (name, value, description, Self::current_timestamp_ms()),
        )?;

        debug!("Stored parameter {} = {}", name, value);
        Ok(())
    }
}
