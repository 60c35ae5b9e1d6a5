//! Operation boundary
//!
//! The three tools an agent can call. Each call opens its own read-only
//! connection and drops it before returning, on success and failure alike.
//!
//! Per-call failures (bad SQL, rejected writes, malformed search syntax) are
//! turned into `Error: <message>` text by [`tool_text`], the only place that
//! formats errors as output. Store-level failures (file missing, cannot
//! open) stay errors so the host can report them as such.

use std::time::Instant;

use tracing::debug;

use crate::config::GatewayConfig;
use crate::query::search::render_hits;
use crate::query::{QueryExecutor, QueryFormat, SchemaReporter, SearchEngine};
use crate::storage::ReadOnlyStore;
use crate::{ERROR_MARKER, Result};

/// Read-only gateway over the bookmarks archive
#[derive(Debug, Clone)]
pub struct Gateway {
    config: GatewayConfig,
}

impl Gateway {
    pub fn new(config: GatewayConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }

    /// Open a fresh connection for one call
    pub fn open(&self) -> Result<ReadOnlyStore> {
        ReadOnlyStore::open_config(&self.config)
    }

    /// Every table definition, newline-joined
    pub fn get_schema(&self) -> Result<String> {
        let started = Instant::now();
        let store = self.open()?;
        let outcome = SchemaReporter::new(&store).report();
        debug!("get_schema finished in {:?}", started.elapsed());
        tool_text(outcome)
    }

    /// Run arbitrary SQL, one rendered row per line
    pub fn run_query(&self, sql: &str) -> Result<String> {
        self.run_query_as(sql, QueryFormat::Text)
    }

    pub fn run_query_as(&self, sql: &str, format: QueryFormat) -> Result<String> {
        let started = Instant::now();
        let store = self.open()?;
        let outcome = QueryExecutor::new(&store)
            .execute(sql)
            .and_then(|result| result.render(format));
        debug!("run_query finished in {:?}", started.elapsed());
        tool_text(outcome)
    }

    /// FTS5 search, one `bookmark: {...}` line per hit
    pub fn search_text(&self, query: &str) -> Result<String> {
        let started = Instant::now();
        let store = self.open()?;
        let outcome = SearchEngine::new(&store)
            .search(query)
            .and_then(|hits| render_hits(&hits));
        debug!("search_text finished in {:?}", started.elapsed());
        tool_text(outcome)
    }
}

/// Convert a per-call failure into marked text; pass fatal errors through.
pub fn tool_text(outcome: Result<String>) -> Result<String> {
    match outcome {
        Ok(text) => Ok(text),
        Err(e) if e.is_recoverable() => {
            debug!("Reporting recoverable error as text: {}", e);
            Ok(format!("{ERROR_MARKER}{e}"))
        }
        Err(e) => Err(e),
    }
}

/// Whether tool output carries the error marker
pub fn is_error_text(text: &str) -> bool {
    text.starts_with(ERROR_MARKER)
}
