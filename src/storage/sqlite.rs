//! Read-only SQLite connection

use std::path::{Path, PathBuf};

use rusqlite::{Connection, OpenFlags};
use tracing::debug;

use super::schema::REQUIRED_TABLES;
use crate::config::GatewayConfig;
use crate::{Error, Result};

/// A read-only binding to the bookmarks archive.
///
/// Owned by a single call and closed when dropped.
pub struct ReadOnlyStore {
    conn: Connection,
    path: PathBuf,
}

impl ReadOnlyStore {
    /// Open the store named by a validated configuration
    pub fn open_config(config: &GatewayConfig) -> Result<Self> {
        Self::open(config.database())
    }

    /// Open an existing database file read-only.
    ///
    /// `path` is a plain file path; `file:` URIs are not interpreted.
    /// SQLite rejects any write through this handle, whatever the SQL says.
    pub fn open(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Err(Error::DatabaseNotFound(path.to_owned()));
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|e| Error::Connection {
            path: path.to_owned(),
            source: e,
        })?;

        debug!("Opened {} read-only", path.display());
        Ok(Self {
            conn,
            path: path.to_owned(),
        })
    }

    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Names of all table-type catalog entries, in catalog order
    pub fn table_names(&self) -> Result<Vec<String>> {
        let mut stmt = self
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table'")?;

        let names = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<String>>>()?;

        Ok(names)
    }

    /// Precondition tables absent from this store
    pub fn missing_tables(&self) -> Result<Vec<&'static str>> {
        let present = self.table_names()?;
        Ok(REQUIRED_TABLES
            .iter()
            .copied()
            .filter(|t| !present.iter().any(|p| p == t))
            .collect())
    }

    /// Row counts for the precondition tables
    pub fn stats(&self) -> Result<StoreStats> {
        let present = self.table_names()?;
        let mut tables = Vec::with_capacity(REQUIRED_TABLES.len());

        for &table in REQUIRED_TABLES {
            let rows = if present.iter().any(|p| p == table) {
                let count: i64 = self
                    .conn
                    .query_row(&format!("SELECT COUNT(*) FROM \"{table}\""), [], |row| row.get(0))?;
                Some(count as u64)
            } else {
                None
            };
            tables.push((table, rows));
        }

        Ok(StoreStats { tables })
    }
}

/// Row counts per precondition table; `None` marks a missing table
#[derive(Debug, Clone)]
pub struct StoreStats {
    pub tables: Vec<(&'static str, Option<u64>)>,
}

impl StoreStats {
    pub fn is_complete(&self) -> bool {
        self.tables.iter().all(|(_, rows)| rows.is_some())
    }
}

impl std::fmt::Display for StoreStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Store Statistics:")?;
        for (table, rows) in &self.tables {
            match rows {
                Some(n) => writeln!(f, "  {}: {}", table, n)?,
                None => writeln!(f, "  {}: missing", table)?,
            }
        }
        Ok(())
    }
}
