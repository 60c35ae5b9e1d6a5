use tabled::{builder::Builder, settings::Style, Table, Tabled};

use crate::query::QueryResult;
use crate::storage::StoreStats;

#[derive(Tabled)]
struct StatsRow {
    #[tabled(rename = "Table")]
    table: &'static str,
    #[tabled(rename = "Rows")]
    rows: String,
}

/// Boxed table with the statement's column names as header
pub fn query_table(result: &QueryResult) -> String {
    let mut builder = Builder::default();
    builder.push_record(result.columns.iter().cloned());
    for row in &result.rows {
        builder.push_record(row.iter().map(|cell| cell.to_plain()));
    }
    builder.build().with(Style::rounded()).to_string()
}

pub fn stats_table(stats: &StoreStats) -> String {
    let rows: Vec<StatsRow> = stats
        .tables
        .iter()
        .map(|&(table, rows)| StatsRow {
            table,
            rows: rows.map_or_else(|| "missing".to_string(), |n| n.to_string()),
        })
        .collect();

    Table::new(rows).with(Style::rounded()).to_string()
}
