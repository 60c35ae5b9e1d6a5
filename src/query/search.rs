//! Full-text search over bookmarks
//!
//! The join graph is fixed (see `storage::schema`):
//!
//! ```text
//! bookmarks_fts MATCH ?  ->  bookmarks  ->  users (inner)
//!                                      \->  links (left, aggregated)
//! ```
//!
//! Bookmarks without a resolvable user drop out of the result. Bookmarks
//! without links keep an empty `embedded_links` string.

use rusqlite::{ErrorCode, Row};
use serde::Serialize;
use tracing::debug;

use crate::storage::ReadOnlyStore;
use crate::value::CellValue;
use crate::{Error, Result};

/// Tag written before every rendered hit
pub const SEARCH_TAG: &str = "bookmark";

const SEARCH_SQL: &str = r#"
WITH fts_matches AS (
    SELECT rowid, rank
    FROM bookmarks_fts
    WHERE bookmarks_fts MATCH ?1
)
SELECT b.id,
       b.date,
       b.url,
       b.text,
       COALESCE(l.all_links, '') AS embedded_links,
       u.name,
       u.handle,
       fm.rank
FROM fts_matches fm
JOIN bookmarks b ON b.id = fm.rowid
JOIN users u ON b.user_id = u.id
LEFT JOIN (
    SELECT bookmark_id, GROUP_CONCAT(expandedUrl, ' ') AS all_links
    FROM links
    GROUP BY bookmark_id
) l ON b.id = l.bookmark_id
ORDER BY fm.rank
"#;

/// Author of a bookmarked post
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct UserRef {
    pub name: Option<String>,
    pub handle: Option<String>,
}

/// One ranked match, enriched with its user and links
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchHit {
    /// Integer in most archives; some store tweet ids as text
    pub id: CellValue,
    /// Stored as-is; archives differ on text vs. epoch timestamps
    pub date: CellValue,
    pub url: Option<String>,
    pub text: Option<String>,
    /// Expanded link URLs, space-separated; empty when there are none
    pub embedded_links: String,
    pub user: UserRef,
    /// FTS5 rank; lower is more relevant
    pub rank: f64,
}

impl SearchHit {
    /// `bookmark: {"id":1,...}`
    pub fn to_line(&self) -> Result<String> {
        Ok(format!("{}: {}", SEARCH_TAG, serde_json::to_string(self)?))
    }

    /// Individual link URLs
    pub fn links(&self) -> Vec<&str> {
        self.embedded_links.split_whitespace().collect()
    }

    fn from_row(row: &Row) -> rusqlite::Result<Self> {
        Ok(Self {
            id: CellValue::from(row.get_ref(0)?),
            date: CellValue::from(row.get_ref(1)?),
            url: row.get(2)?,
            text: row.get(3)?,
            embedded_links: row.get(4)?,
            user: UserRef {
                name: row.get(5)?,
                handle: row.get(6)?,
            },
            rank: row.get(7)?,
        })
    }
}

/// Render hits one per line
pub fn render_hits(hits: &[SearchHit]) -> Result<String> {
    let lines = hits.iter().map(SearchHit::to_line).collect::<Result<Vec<_>>>()?;
    Ok(lines.join("\n"))
}

/// Runs FTS5 queries against the bookmarks index
pub struct SearchEngine<'a> {
    store: &'a ReadOnlyStore,
}

impl<'a> SearchEngine<'a> {
    pub fn new(store: &'a ReadOnlyStore) -> Self {
        Self { store }
    }

    /// Search with an FTS5 expression (`term`, `"a phrase"`, `a OR b`, `pre*`).
    ///
    /// Results are ordered best match first. A malformed expression yields
    /// [`Error::SearchPredicate`]; a store missing the index yields
    /// [`Error::Execution`].
    pub fn search(&self, query: &str) -> Result<Vec<SearchHit>> {
        // The statement itself is fixed, so a prepare failure is a store
        // problem and anything SQLite raises while stepping comes from the
        // expression.
        let mut stmt = self.store.connection().prepare(SEARCH_SQL)?;

        let hits = stmt
            .query_map([query], SearchHit::from_row)
            .and_then(|rows| rows.collect::<rusqlite::Result<Vec<_>>>())
            .map_err(predicate_error)?;

        debug!("Search {:?} matched {} bookmarks", query, hits.len());
        Ok(hits)
    }
}

fn predicate_error(err: rusqlite::Error) -> Error {
    if let rusqlite::Error::SqliteFailure(e, msg) = &err {
        if e.code == ErrorCode::Unknown {
            return Error::SearchPredicate(msg.clone().unwrap_or_else(|| err.to_string()));
        }
    }
    Error::Execution(err)
}
