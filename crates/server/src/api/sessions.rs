// Session-keyed handler map for the /mcp endpoint

use brandkit_core::{PageFetcher, StandardsDocument};
use brandkit_mcp::tools::build_registry;
use brandkit_mcp::McpHandler;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Maps transport-supplied session ids to per-session handler instances.
/// Insert on first contact, remove on close; no other mutation path.
pub struct SessionMap {
    sessions: RwLock<HashMap<String, Arc<McpHandler>>>,
    document: Arc<StandardsDocument>,
    fetcher: Arc<dyn PageFetcher>,
}

impl SessionMap {
    pub fn new(document: Arc<StandardsDocument>, fetcher: Arc<dyn PageFetcher>) -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
            document,
            fetcher,
        }
    }

    /// Look up the session, creating one (with a fresh id when none was
    /// supplied) on first contact.
    pub async fn resolve(&self, id: Option<&str>) -> (String, Arc<McpHandler>) {
        if let Some(id) = id {
            if let Some(handler) = self.sessions.read().await.get(id) {
                return (id.to_string(), handler.clone());
            }
        }

        let id = id
            .map(str::to_string)
            .unwrap_or_else(|| Uuid::new_v4().to_string());
        let handler = Arc::new(McpHandler::new(build_registry(
            self.document.clone(),
            self.fetcher.clone(),
        )));

        tracing::info!("Created MCP session {}", id);
        self.sessions
            .write()
            .await
            .insert(id.clone(), handler.clone());
        (id, handler)
    }

    /// Remove a session on close. Returns whether it existed.
    pub async fn remove(&self, id: &str) -> bool {
        let removed = self.sessions.write().await.remove(id).is_some();
        if removed {
            tracing::info!("Closed MCP session {}", id);
        }
        removed
    }

    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}
