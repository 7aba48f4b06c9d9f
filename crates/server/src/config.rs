use anyhow::Result;
use brandkit_core::{HttpFetcher, PageFetcher, StandardsDocument};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::sync::Arc;

use crate::api::sessions::SessionMap;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_standards_file")]
    pub standards_file: PathBuf,
}

fn default_standards_file() -> PathBuf {
    PathBuf::from("data/design-standards.json")
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            standards_file: default_standards_file(),
        }
    }
}

impl ServerConfig {
    pub fn load(config_path: &PathBuf, standards_override: Option<PathBuf>) -> Result<Self> {
        let mut config: Self = if config_path.exists() {
            let content = std::fs::read_to_string(config_path)?;
            toml::from_str(&content)?
        } else {
            tracing::info!("Configuration file not found, using defaults");
            Self::default()
        };

        if let Some(standards_file) = standards_override {
            config.standards_file = standards_file;
        }

        Ok(config)
    }
}

/// Application state shared across handlers. The document and fetcher are
/// read-only after construction; the session map is the only mutable piece.
#[derive(Clone)]
pub struct AppState {
    pub document: Arc<StandardsDocument>,
    pub sessions: Arc<SessionMap>,
}

impl AppState {
    pub fn new(config: &ServerConfig) -> Result<Self> {
        let document = Arc::new(StandardsDocument::load(&config.standards_file)?);
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new()?);
        let sessions = Arc::new(SessionMap::new(document.clone(), fetcher));

        Ok(Self { document, sessions })
    }
}
