//! MCP server over stdio

pub mod mcp;
pub mod tools;

pub use mcp::McpService;

use tracing::{info, warn};

use crate::gateway::Gateway;

/// Serve MCP on stdin/stdout until the client hangs up.
///
/// An unreachable or incomplete store is only logged here; each tool call
/// reopens it and reports what it finds.
pub fn serve(gateway: Gateway) -> anyhow::Result<()> {
    let database = gateway.config().database().display().to_string();
    info!("Starting MCP server for {}", database);

    match gateway.open().and_then(|store| store.missing_tables()) {
        Ok(missing) if missing.is_empty() => {}
        Ok(missing) => warn!("Store {} lacks tables: {}", database, missing.join(", ")),
        Err(e) => warn!("Store {} is not usable yet: {}", database, e),
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let service = McpService::new(gateway);
    runtime.block_on(service.run_stdio())
}
