#![allow(dead_code)]

use std::path::PathBuf;

use bookmarks_mcp::storage::schema::BOOKMARKS_SCHEMA_SQL;
use rusqlite::{params, Connection};
use tempfile::TempDir;

/// On-disk archive seeded through a writable connection
pub struct Archive {
    pub conn: Connection,
    pub path: PathBuf,
    pub dir: TempDir,
}

impl Archive {
    pub fn new() -> Self {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bookmarks.db");
        let conn = Connection::open(&path).unwrap();
        conn.execute_batch(BOOKMARKS_SCHEMA_SQL).unwrap();
        Self { conn, path, dir }
    }

    /// Three users, four bookmarks, a few links. Bookmark 4 belongs to a
    /// user that does not exist.
    pub fn seeded() -> Self {
        let archive = Self::new();
        archive.user(1, "Ann", "@ann");
        archive.user(2, "Bob", "@bob");
        archive.user(3, "Cy", "@cy");

        archive.bookmark(1, 1, "https://x.test/ann/1", "Rust async runtimes compared");
        archive.bookmark(2, 2, "https://x.test/bob/2", "SQLite full text search tips");
        archive.bookmark(3, 3, "https://x.test/cy/3", "rust rust rust: the sqlite edition");
        archive.bookmark(4, 99, "https://x.test/ghost/4", "rust from nowhere");

        archive.link(1, "https://tokio.rs");
        archive.link(1, "https://async.rs");
        archive.link(2, "https://sqlite.org/fts5.html");
        archive
    }

    pub fn user(&self, id: i64, name: &str, handle: &str) {
        self.conn
            .execute("INSERT INTO users (id, name, handle) VALUES (?1, ?2, ?3)", params![id, name, handle])
            .unwrap();
    }

    pub fn bookmark(&self, id: i64, user_id: i64, url: &str, text: &str) {
        self.conn
            .execute(
                "INSERT INTO bookmarks (id, user_id, date, url, text) VALUES (?1, ?2, '2024-05-01T12:00:00Z', ?3, ?4)",
                params![id, user_id, url, text],
            )
            .unwrap();
        self.conn
            .execute("INSERT INTO bookmarks_fts (rowid, text) VALUES (?1, ?2)", params![id, text])
            .unwrap();
    }

    pub fn link(&self, bookmark_id: i64, url: &str) {
        self.conn
            .execute("INSERT INTO links (bookmark_id, expandedUrl) VALUES (?1, ?2)", params![bookmark_id, url])
            .unwrap();
    }
}
