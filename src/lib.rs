//! # bookmarks-mcp - Read-only gateway over a bookmarks archive
//!
//! Exposes a SQLite bookmarks archive to an agent through three tools
//! instead of direct database access:
//! - `get_schema`: every table definition in the store
//! - `run_query`: arbitrary SQL against a read-only connection
//! - `search_text`: FTS5 search joined back to bookmarks, users and links
//!
//! The read-only open mode is the only access control. Each operation opens
//! its own connection and drops it before returning.

pub mod config;
pub mod gateway;
pub mod query;
pub mod server;
pub mod storage;
pub mod ui;
pub mod value;

use std::path::PathBuf;

// Re-exports for convenient access
pub use config::GatewayConfig;
pub use gateway::Gateway;
pub use query::{QueryResult, SearchHit};
pub use storage::ReadOnlyStore;
pub use value::CellValue;

/// Marker prefixed to every error rendered as a tool result
pub const ERROR_MARKER: &str = "Error: ";

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, Error>;

/// Error types for gateway operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Store location missing or unusable; fatal at startup
    #[error("configuration error: {0}")]
    Configuration(String),

    #[error("Database not found at: {0}")]
    DatabaseNotFound(PathBuf),

    #[error("Failed to open database at '{path}' read-only: {source}")]
    Connection {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },

    /// A statement failed inside an otherwise healthy connection
    #[error("{0}")]
    Execution(#[from] rusqlite::Error),

    /// The FTS engine rejected the search expression
    #[error("{0}")]
    SearchPredicate(String),

    /// A tool argument outside the accepted set
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl Error {
    /// Whether the error belongs to a single call and can be reported as
    /// tool output instead of failing the call.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Error::Execution(_) | Error::SearchPredicate(_))
    }
}
