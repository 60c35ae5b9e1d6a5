//! Query layer
//!
//! Three read paths over a [`ReadOnlyStore`](crate::storage::ReadOnlyStore):
//! - schema reporting from `sqlite_master`
//! - ad-hoc SQL execution
//! - FTS5 search with bookmark/user/link enrichment

pub mod executor;
pub mod schema;
pub mod search;

pub use executor::{QueryExecutor, QueryFormat, QueryResult};
pub use schema::SchemaReporter;
pub use search::{SearchEngine, SearchHit, UserRef};
