//! Storage Layer - read-only SQLite access
//!
//! The archive is owned by another tool. This layer only opens it with
//! `SQLITE_OPEN_READ_ONLY`, so SQLite itself rejects every write.

pub mod schema;
pub mod sqlite;

pub use sqlite::{ReadOnlyStore, StoreStats};
