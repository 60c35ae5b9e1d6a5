//! Store schema precondition
//!
//! The gateway never creates or migrates tables. The search join in
//! `query::search` depends on exactly this shape, so it is written down here
//! rather than discovered at runtime:
//! - bookmarks(id, user_id, date, url, text)
//! - users(id, name, handle)
//! - links(bookmark_id, expandedUrl), zero or more per bookmark
//! - bookmarks_fts: FTS5 index whose rowid is bookmarks.id

/// Tables the search join reads from
pub const REQUIRED_TABLES: &[&str] = &["bookmarks", "users", "links", "bookmarks_fts"];

/// Minimal DDL satisfying the precondition. Used to build fixture stores; the
/// real archive may carry extra columns and tables.
///
/// No `REFERENCES` clauses: archives do contain bookmarks whose author was
/// never exported, and the bundled SQLite enforces foreign keys.
pub const BOOKMARKS_SCHEMA_SQL: &str = r#"
CREATE TABLE users (
    id INTEGER PRIMARY KEY,
    name TEXT,
    handle TEXT
);

CREATE TABLE bookmarks (
    id INTEGER PRIMARY KEY,
    user_id INTEGER,
    date TEXT,
    url TEXT,
    text TEXT
);

CREATE TABLE links (
    id INTEGER PRIMARY KEY,
    bookmark_id INTEGER NOT NULL,
    expandedUrl TEXT
);

CREATE VIRTUAL TABLE bookmarks_fts USING fts5(text);
"#;
