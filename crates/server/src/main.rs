//! mcp-docs-search server entry point.
//!
//! This is the main binary that boots the MCP server on stdio transport.
//! Logging goes to stderr to avoid interfering with the JSON-RPC protocol on stdout.

use anyhow::Result;
use rmcp::service::serve_server;
use rmcp::transport::io::stdio;
use tracing_subscriber::EnvFilter;

use gsdocs_core::AppConfig;

mod handler;
mod tools;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .json()
        .init();

    tracing::info!("Starting mcp-docs-search server on stdio transport");

    let config = AppConfig::load()?;
    if config.credential().is_authenticated() {
        tracing::info!("session cookie configured; intranet access enabled");
    } else {
        tracing::info!("no session cookie configured; public-only mode");
    }

    let handler = handler::DocsSearchServer::new(config)?;
    let transport = stdio();
    let server = serve_server(handler, transport).await?;

    server.waiting().await?;

    Ok(())
}
