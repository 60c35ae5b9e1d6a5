//! End-to-end behaviour of the three operations against an on-disk archive

mod common;

use bookmarks_mcp::gateway::is_error_text;
use bookmarks_mcp::query::QueryFormat;
use bookmarks_mcp::{Error, Gateway, GatewayConfig};
use common::Archive;
use rstest::rstest;
use serde_json::Value;

fn gateway(archive: &Archive) -> Gateway {
    Gateway::new(GatewayConfig::new(&archive.path).unwrap()).unwrap()
}

fn parse_hits(output: &str) -> Vec<Value> {
    output
        .lines()
        .map(|line| {
            let json = line.strip_prefix("bookmark: ").expect("tagged line");
            serde_json::from_str(json).unwrap()
        })
        .collect()
}

#[test]
fn schema_lists_every_table() {
    let archive = Archive::new();
    let schema = gateway(&archive).get_schema().unwrap();

    assert!(schema.contains("CREATE TABLE users"));
    assert!(schema.contains("CREATE TABLE bookmarks"));
    assert!(schema.contains("CREATE TABLE links"));
    assert!(schema.contains("CREATE VIRTUAL TABLE bookmarks_fts USING fts5(text)"));
    assert!(schema.lines().all(|l| !l.trim().is_empty()));
}

#[test]
fn query_rows_render_as_tuples() {
    let archive = Archive::seeded();
    let out = gateway(&archive).run_query("SELECT id, name FROM users ORDER BY id").unwrap();
    assert_eq!(out, "(1, 'Ann')\n(2, 'Bob')\n(3, 'Cy')");
}

#[test]
fn query_json_keeps_column_names() {
    let archive = Archive::seeded();
    let out = gateway(&archive)
        .run_query_as("SELECT handle FROM users WHERE id = 2", QueryFormat::Json)
        .unwrap();

    let json: Value = serde_json::from_str(&out).unwrap();
    assert_eq!(json["columns"][0], "handle");
    assert_eq!(json["rows"][0][0], "@bob");
}

#[test]
fn empty_result_is_empty_text() {
    let archive = Archive::seeded();
    let out = gateway(&archive).run_query("SELECT * FROM users WHERE id = 42").unwrap();
    assert_eq!(out, "");
}

#[rstest]
#[case("")]
#[case("-- just a comment")]
#[case("  ;  ")]
fn query_without_statement_is_empty(#[case] sql: &str) {
    let archive = Archive::seeded();
    assert_eq!(gateway(&archive).run_query(sql).unwrap(), "");
}

#[test]
fn query_with_two_statements_is_refused() {
    let archive = Archive::seeded();
    let gateway = gateway(&archive);

    let out = gateway.run_query("SELECT 1; SELECT 2").unwrap();
    assert!(is_error_text(&out), "got {out}");

    let out = gateway.run_query("SELECT 1; garbage here").unwrap();
    assert!(is_error_text(&out), "got {out}");

    assert_eq!(gateway.run_query("SELECT 1;").unwrap(), "(1)");
}

#[test]
fn orphan_bookmarks_stay_queryable() {
    // Bookmark 4 has no author: visible to SQL, excluded from search
    let archive = Archive::seeded();
    let gateway = gateway(&archive);

    assert_eq!(gateway.run_query("SELECT user_id FROM bookmarks WHERE id = 4").unwrap(), "(99)");
    let hits = parse_hits(&gateway.search_text("nowhere").unwrap());
    assert!(hits.is_empty());
}

#[rstest]
#[case("INSERT INTO users (id, name, handle) VALUES (9, 'Eve', '@eve')")]
#[case("UPDATE bookmarks SET text = 'defaced'")]
#[case("DELETE FROM links")]
#[case("DROP TABLE users")]
#[case("CREATE TABLE notes (body TEXT)")]
fn writes_never_reach_the_archive(#[case] sql: &str) {
    let archive = Archive::seeded();
    let gateway = gateway(&archive);
    let before = gateway.run_query("SELECT COUNT(*) FROM users").unwrap();

    let out = gateway.run_query(sql).unwrap();
    assert!(is_error_text(&out), "write was not rejected: {out}");

    assert_eq!(gateway.run_query("SELECT COUNT(*) FROM users").unwrap(), before);
    assert_eq!(gateway.run_query("SELECT COUNT(*) FROM links").unwrap(), "(3)");
    assert!(!gateway.get_schema().unwrap().contains("notes"));
}

#[test]
fn search_ranks_and_drops_orphans() {
    let archive = Archive::seeded();
    let hits = parse_hits(&gateway(&archive).search_text("rust").unwrap());

    let ids: Vec<i64> = hits.iter().map(|h| h["id"].as_i64().unwrap()).collect();
    assert_eq!(ids, vec![3, 1]);

    let ranks: Vec<f64> = hits.iter().map(|h| h["rank"].as_f64().unwrap()).collect();
    assert!(ranks[0] <= ranks[1]);
}

#[test]
fn search_hit_carries_user_and_links() {
    let archive = Archive::seeded();
    let hits = parse_hits(&gateway(&archive).search_text("async").unwrap());

    assert_eq!(hits.len(), 1);
    let hit = &hits[0];
    assert_eq!(hit["url"], "https://x.test/ann/1");
    assert_eq!(hit["date"], "2024-05-01T12:00:00Z");
    assert_eq!(hit["user"]["name"], "Ann");
    assert_eq!(hit["user"]["handle"], "@ann");

    let mut links: Vec<&str> = hit["embedded_links"].as_str().unwrap().split(' ').collect();
    links.sort();
    assert_eq!(links, vec!["https://async.rs", "https://tokio.rs"]);
}

#[test]
fn search_phrase_and_prefix_syntax() {
    let archive = Archive::seeded();
    let gateway = gateway(&archive);

    let hits = parse_hits(&gateway.search_text("\"full text\"").unwrap());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], 2);

    let hits = parse_hits(&gateway.search_text("runt*").unwrap());
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["id"], 1);
}

#[test]
fn search_without_matches_is_empty() {
    let archive = Archive::seeded();
    assert_eq!(gateway(&archive).search_text("haskell").unwrap(), "");
}

#[test]
fn malformed_search_is_error_text() {
    let archive = Archive::seeded();
    let out = gateway(&archive).search_text("AND OR").unwrap();
    assert!(out.starts_with("Error: "));
}

#[test]
fn missing_archive_is_fatal() {
    let archive = Archive::new();
    let gateway = Gateway::new(GatewayConfig::new(archive.dir.path().join("gone.db")).unwrap()).unwrap();

    assert!(matches!(gateway.get_schema(), Err(Error::DatabaseNotFound(_))));
    assert!(matches!(gateway.run_query("SELECT 1"), Err(Error::DatabaseNotFound(_))));
    assert!(matches!(gateway.search_text("rust"), Err(Error::DatabaseNotFound(_))));
}

#[test]
fn writes_made_elsewhere_are_visible_to_the_next_call() {
    let archive = Archive::seeded();
    let gateway = gateway(&archive);
    assert_eq!(gateway.run_query("SELECT COUNT(*) FROM bookmarks").unwrap(), "(4)");

    archive.bookmark(5, 1, "https://x.test/ann/5", "fresh rust news");
    assert_eq!(gateway.run_query("SELECT COUNT(*) FROM bookmarks").unwrap(), "(5)");
}
