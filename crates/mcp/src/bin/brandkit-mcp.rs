// Standalone MCP server binary (stdio transport)

use anyhow::Result;
use brandkit_core::{HttpFetcher, PageFetcher, StandardsDocument};
use brandkit_mcp::server::McpServer;
use brandkit_mcp::tools::build_registry;
use std::path::PathBuf;
use std::sync::Arc;

#[tokio::main]
async fn main() -> Result<()> {
    // Logs go to stderr; stdout is reserved for the protocol.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    tracing::info!("Brandkit MCP server starting...");

    let standards_file = std::env::var("BRANDKIT_STANDARDS_FILE")
        .unwrap_or_else(|_| "data/design-standards.json".to_string());

    // Fatal if the document is missing or malformed: every standards tool
    // depends on it.
    let document = Arc::new(StandardsDocument::load(&PathBuf::from(standards_file))?);
    let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new()?);

    let registry = build_registry(document, fetcher);
    tracing::info!("Registered {} tools", registry.len());

    let server = McpServer::new(registry);
    server.start().await?;

    Ok(())
}
