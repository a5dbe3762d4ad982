//! SQLite persistence handle

use std::path::Path;
use std::sync::{Arc, Mutex};
use rusqlite::Connection;
use crate::{Error, Result};
use super::schema;

/// Shared handle to the SQLite connection.
///
/// Built once by the caller and cloned into every repository and into the
/// HTTP state. Each statement takes the connection lock for its own duration
/// only, so sequences of statements are not atomic with respect to each other.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open a database file (creates if doesn't exist)
    pub fn open(path: &Path) -> Result<Self> {
        let conn = Connection::open(path)?;
        tracing::debug!("Opened database at {}", path.display());
        Self::from_connection(conn)
    }

    /// Open an in-memory database (for testing)
    pub fn open_in_memory() -> Result<Self> {
        Self::from_connection(Connection::open_in_memory()?)
    }

    fn from_connection(conn: Connection) -> Result<Self> {
        initialize_schema(&conn)?;
        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Run `f` against the connection while holding the lock
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> rusqlite::Result<T>) -> Result<T> {
        let conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        f(&conn).map_err(Into::into)
    }

    /// Like [`Database::with_conn`] but with mutable access, for transactions
    pub fn with_conn_mut<T>(
        &self,
        f: impl FnOnce(&mut Connection) -> rusqlite::Result<T>,
    ) -> Result<T> {
        let mut conn = self.conn.lock().map_err(|_| Error::LockPoisoned)?;
        f(&mut conn).map_err(Into::into)
    }

    /// Row count of every table
    pub fn stats(&self) -> Result<DbStats> {
        self.with_conn(|conn| {
            let mut tables = Vec::with_capacity(schema::TABLES.len());
            for table in schema::TABLES {
                let count: i64 =
                    conn.query_row(&format!("SELECT COUNT(*) FROM {}", table), [], |row| row.get(0))?;
                tables.push((*table, count));
            }
            Ok(DbStats { tables })
        })
    }
}

/// Create every table if missing and seed the default note type.
/// Safe to run against an already initialized file.
fn initialize_schema(conn: &Connection) -> Result<()> {
    for stmt in schema::all_schema_statements() {
        conn.execute(stmt, [])?;
    }
    conn.execute(schema::SEED_DEFAULT_NOTE_TYPE, [])?;
    Ok(())
}

/// Database statistics
#[derive(Debug, Clone)]
pub struct DbStats {
    pub tables: Vec<(&'static str, i64)>,
}

impl DbStats {
    pub fn count(&self, table: &str) -> Option<i64> {
        self.tables.iter().find(|(name, _)| *name == table).map(|(_, count)| *count)
    }
}

impl std::fmt::Display for DbStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Database Statistics:")?;
        for (table, count) in &self.tables {
            writeln!(f, "  {}: {}", table, count)?;
        }
        Ok(())
    }
}
