//! MCP over stdio
//!
//! Framing and the JSON-RPC handshake belong to `mcp_sdk_rs`; this module
//! only answers methods. Tool calls hit SQLite synchronously, so each one
//! runs on the blocking pool. Logging must never touch stdout.
//!
//! The server stops as soon as stdin closes; a client hanging up abandons
//! any call still running.

use std::sync::Arc;

use async_trait::async_trait;
use mcp_sdk_rs::error::{Error as McpError, ErrorCode};
use mcp_sdk_rs::server::{Server, ServerHandler};
use mcp_sdk_rs::transport::stdio::StdioTransport;
use mcp_sdk_rs::types::{ClientCapabilities, Implementation, ListToolsResult, ServerCapabilities};
use serde::Deserialize;
use serde_json::{json, Value};
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, error, info, warn};

use super::tools::{call_tool, tool_definitions};
use crate::Error;
use crate::gateway::Gateway;

#[derive(Deserialize)]
struct CallToolRequest {
    name: String,
    #[serde(default)]
    arguments: Option<Value>,
}

#[derive(Clone)]
pub struct McpService {
    gateway: Arc<Gateway>,
}

impl McpService {
    pub fn new(gateway: Gateway) -> Self {
        Self {
            gateway: Arc::new(gateway),
        }
    }

    /// Serve until the client closes stdin.
    pub async fn run_stdio(&self) -> anyhow::Result<()> {
        let (read_tx, read_rx) = mpsc::channel::<String>(32);
        let (write_tx, mut write_rx) = mpsc::channel::<String>(32);
        let (eof_tx, eof_rx) = oneshot::channel::<()>();

        // Stdin reader
        tokio::spawn(async move {
            let stdin = tokio::io::stdin();
            let mut reader = BufReader::new(stdin).lines();
            loop {
                match reader.next_line().await {
                    Ok(Some(line)) => {
                        if read_tx.send(line).await.is_err() {
                            break;
                        }
                    }
                    Ok(None) => {
                        info!("EOF on stdin");
                        break;
                    }
                    Err(e) => {
                        error!("Failed to read stdin: {}", e);
                        break;
                    }
                }
            }
            let _ = eof_tx.send(());
        });

        // Stdout writer
        tokio::spawn(async move {
            let mut stdout = tokio::io::stdout();
            while let Some(msg) = write_rx.recv().await {
                if let Err(e) = write_line(&mut stdout, &msg).await {
                    error!("Failed to write response: {}", e);
                    break;
                }
            }
        });

        info!("Serving MCP on stdio");
        let transport = StdioTransport::new(read_rx, write_tx);
        let server = Server::new(Arc::new(transport), Arc::new(self.clone()));
        tokio::select! {
            res = server.start() => {
                res?;
            }
            _ = eof_rx => {
                debug!("Client hung up");
            }
        }
        info!("MCP server shut down");
        Ok(())
    }

    fn list_tools(&self) -> Result<Value, McpError> {
        let tools = tool_definitions().map_err(|e| McpError::protocol(ErrorCode::InternalError, e.to_string()))?;
        let result = ListToolsResult { tools, next_cursor: None };
        serde_json::to_value(result).map_err(|e| McpError::protocol(ErrorCode::InternalError, e.to_string()))
    }

    async fn call(&self, params: Option<Value>) -> Result<Value, McpError> {
        let req: CallToolRequest = params
            .and_then(|v| serde_json::from_value(v).ok())
            .ok_or_else(|| McpError::protocol(ErrorCode::InvalidParams, "Missing tool name"))?;

        info!("Calling tool: {}", req.name);
        let gateway = Arc::clone(&self.gateway);
        let outcome = tokio::task::spawn_blocking(move || {
            call_tool(&gateway, &req.name, req.arguments.unwrap_or(Value::Null))
        })
        .await
        .map_err(|e| McpError::protocol(ErrorCode::InternalError, e.to_string()))?;

        match outcome {
            Ok(output) => Ok(output.to_value()),
            Err(Error::InvalidArgument(msg)) => Err(McpError::protocol(ErrorCode::InvalidParams, msg)),
            Err(e) => {
                error!("Tool call failed: {}", e);
                Err(McpError::protocol(ErrorCode::InternalError, e.to_string()))
            }
        }
    }
}

#[async_trait]
impl ServerHandler for McpService {
    async fn initialize(
        &self,
        _implementation: Implementation,
        _capabilities: ClientCapabilities,
    ) -> Result<ServerCapabilities, McpError> {
        info!("MCP client connected");
        Ok(ServerCapabilities::default())
    }

    async fn shutdown(&self) -> Result<(), McpError> {
        info!("MCP client requested shutdown");
        Ok(())
    }

    async fn handle_method(&self, method: &str, params: Option<Value>) -> Result<Value, McpError> {
        debug!("Handling method: {}", method);
        match method {
            "tools/list" => self.list_tools(),
            "tools/call" => self.call(params).await,
            "ping" => Ok(json!({})),
            m if m.starts_with("notifications/") => Ok(Value::Null),
            other => {
                warn!("Unknown method: {}", other);
                Err(McpError::protocol(ErrorCode::MethodNotFound, other.to_string()))
            }
        }
    }
}

async fn write_line(stdout: &mut tokio::io::Stdout, msg: &str) -> std::io::Result<()> {
    stdout.write_all(msg.as_bytes()).await?;
    stdout.write_all(b"\n").await?;
    stdout.flush().await
}
