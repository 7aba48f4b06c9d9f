// stdio transport: line-delimited JSON-RPC on stdin/stdout

use crate::handler::McpHandler;
use crate::protocol::JsonRpcRequest;
use crate::tools::ToolRegistry;
use anyhow::Result;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};

pub struct McpServer {
    handler: McpHandler,
}

impl McpServer {
    pub fn new(registry: ToolRegistry) -> Self {
        Self {
            handler: McpHandler::new(registry),
        }
    }

    /// Serve requests until stdin closes. Unparseable lines are logged and
    /// skipped; stdout carries nothing but protocol frames.
    pub async fn start(&self) -> Result<()> {
        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        let mut stdout = tokio::io::stdout();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }

            let request: JsonRpcRequest = match serde_json::from_str(&line) {
                Ok(r) => r,
                Err(e) => {
                    tracing::warn!("Failed to parse request: {}", e);
                    continue;
                }
            };

            if let Some(response) = self.handler.handle(&request).await {
                let mut frame = serde_json::to_string(&response)?;
                frame.push('\n');
                stdout.write_all(frame.as_bytes()).await?;
                stdout.flush().await?;
            }
        }

        tracing::info!("stdin closed, shutting down");
        Ok(())
    }
}
