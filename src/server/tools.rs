//! Tool catalogue and argument handling

use mcp_sdk_rs::types::Tool;
use serde::Deserialize;
use serde_json::{json, Value};

use crate::gateway::{is_error_text, Gateway};
use crate::query::QueryFormat;
use crate::{Error, Result};

pub const GET_SCHEMA: &str = "get_schema";
pub const RUN_QUERY: &str = "run_query";
pub const SEARCH_TEXT: &str = "search_text";

#[derive(Deserialize)]
struct RunQueryArgs {
    sql: String,
    #[serde(default)]
    format: Option<String>,
}

#[derive(Deserialize)]
struct SearchArgs {
    query: String,
}

/// Outcome of a tool call: text plus whether it carries the error marker
#[derive(Debug, Clone, PartialEq)]
pub struct ToolOutput {
    pub text: String,
    pub is_error: bool,
}

impl ToolOutput {
    fn new(text: String) -> Self {
        let is_error = is_error_text(&text);
        Self { text, is_error }
    }

    /// MCP `tools/call` result body
    pub fn to_value(&self) -> Value {
        json!({
            "content": [{ "type": "text", "text": self.text }],
            "isError": self.is_error,
        })
    }
}

/// Definitions returned by `tools/list`.
///
/// The descriptions double as usage guidance for the agent: schema first,
/// full links when citing a bookmark.
pub fn tool_definitions() -> Result<Vec<Tool>> {
    Ok(vec![
        tool(
            GET_SCHEMA,
            "Get the database schema: the CREATE statement of every table. \
             Call this first in every new conversation, before writing any query.",
            json!({
                "type": "object",
                "properties": {}
            }),
        )?,
        tool(
            RUN_QUERY,
            "Execute one SQL statement against a read-only connection of the Twitter bookmarks \
             database. Writes are rejected by the database. Whenever a bookmark or tweet comes up, \
             include its full, expanded link.",
            json!({
                "type": "object",
                "properties": {
                    "sql": { "type": "string", "description": "SQL statement to execute" },
                    "format": {
                        "type": "string",
                        "enum": ["text", "json"],
                        "description": "Row rendering; defaults to text"
                    }
                },
                "required": ["sql"]
            }),
        )?,
        tool(
            SEARCH_TEXT,
            "Full-text search over bookmarks using SQLite FTS5 syntax. \
             When presenting results, print the full text of each tweet without truncating it, \
             and include the tweet URL so the user can open it in a browser.",
            json!({
                "type": "object",
                "properties": {
                    "query": { "type": "string", "description": "FTS5 query, e.g. `rust AND async` or `\"exact phrase\"`" }
                },
                "required": ["query"]
            }),
        )?,
    ])
}

fn tool(name: &str, description: &str, input_schema: Value) -> Result<Tool> {
    Ok(Tool {
        name: name.to_string(),
        description: description.to_string(),
        input_schema: serde_json::from_value(input_schema)?,
        annotations: None,
    })
}

/// Route a `tools/call` by name.
///
/// `Err(Error::InvalidArgument)` means the request itself was malformed;
/// other errors are store failures.
pub fn call_tool(gateway: &Gateway, name: &str, arguments: Value) -> Result<ToolOutput> {
    let text = match name {
        GET_SCHEMA => gateway.get_schema()?,
        RUN_QUERY => {
            let args: RunQueryArgs = parse_args(arguments)?;
            let format = match args.format.as_deref() {
                Some(f) => f.parse()?,
                None => QueryFormat::Text,
            };
            gateway.run_query_as(&args.sql, format)?
        }
        SEARCH_TEXT => {
            let args: SearchArgs = parse_args(arguments)?;
            gateway.search_text(&args.query)?
        }
        other => return Err(Error::InvalidArgument(format!("unknown tool: {}", other))),
    };
    Ok(ToolOutput::new(text))
}

fn parse_args<T: serde::de::DeserializeOwned>(arguments: Value) -> Result<T> {
    let arguments = if arguments.is_null() { json!({}) } else { arguments };
    serde_json::from_value(arguments).map_err(|e| Error::InvalidArgument(e.to_string()))
}
