//! Ad-hoc SQL execution
//!
//! There is deliberately no statement allow-list here: the read-only
//! connection is the only guard. A write reaches SQLite and is refused there.

use std::str::FromStr;

use rusqlite::Batch;
use serde::Serialize;
use tracing::debug;

use crate::storage::ReadOnlyStore;
use crate::value::{render_row, CellValue};
use crate::{Error, Result};

/// Output shape for `run_query`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum QueryFormat {
    /// One `(a, b, ...)` line per row
    #[default]
    Text,
    /// `{"columns": [...], "rows": [[...]]}`
    Json,
}

impl FromStr for QueryFormat {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "text" | "" => Ok(QueryFormat::Text),
            "json" => Ok(QueryFormat::Json),
            _ => Err(Error::InvalidArgument(format!("unknown query format: {}", s))),
        }
    }
}

/// Fully materialized rows of one statement
#[derive(Debug, Clone, Default, Serialize)]
pub struct QueryResult {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<CellValue>>,
}

impl QueryResult {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Rows newline-joined; column names are not included
    pub fn to_text(&self) -> String {
        self.rows
            .iter()
            .map(|row| render_row(row))
            .collect::<Vec<_>>()
            .join("\n")
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn render(&self, format: QueryFormat) -> Result<String> {
        match format {
            QueryFormat::Text => Ok(self.to_text()),
            QueryFormat::Json => self.to_json(),
        }
    }
}

/// Runs caller-supplied SQL verbatim
pub struct QueryExecutor<'a> {
    store: &'a ReadOnlyStore,
}

impl<'a> QueryExecutor<'a> {
    pub fn new(store: &'a ReadOnlyStore) -> Self {
        Self { store }
    }

    /// Execute a single statement and fetch every row.
    ///
    /// Input without any SQL (blank, or only comments) gives an empty result.
    /// A second statement after the first is refused before anything runs.
    /// Any SQLite failure comes back as [`Error::Execution`].
    pub fn execute(&self, sql: &str) -> Result<QueryResult> {
        let mut batch = Batch::new(self.store.connection(), sql);
        let Some(mut stmt) = batch.next()? else {
            debug!("Query contained no statement");
            return Ok(QueryResult::default());
        };
        if batch.next()?.is_some() {
            return Err(Error::Execution(rusqlite::Error::MultipleStatement));
        }

        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();
        let width = columns.len();

        let mut rows = Vec::new();
        let mut cursor = stmt.query([])?;
        while let Some(row) = cursor.next()? {
            let mut cells = Vec::with_capacity(width);
            for idx in 0..width {
                cells.push(CellValue::from(row.get_ref(idx)?));
            }
            rows.push(cells);
        }

        debug!("Query returned {} rows x {} columns", rows.len(), width);
        Ok(QueryResult { columns, rows })
    }
}
