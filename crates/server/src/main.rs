use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

mod api;
mod config;

use config::ServerConfig;

#[derive(Parser, Debug)]
#[command(name = "brandkit")]
#[command(about = "Brandkit - MCP server for event site queries and design standards", long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(short, long, default_value = "brandkit.toml")]
    config: PathBuf,

    /// Path to the design-standards JSON document (overrides config)
    #[arg(short, long, env = "BRANDKIT_STANDARDS_FILE")]
    standards: Option<PathBuf>,

    /// Port to listen on
    #[arg(short, long, default_value = "8080")]
    port: u16,

    /// Host to bind to
    #[arg(long, default_value = "127.0.0.1")]
    host: String,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "brandkit=info,tower_http=debug".into()),
        )
        .with_target(false)
        .init();

    let args = Args::parse();

    tracing::info!("Starting Brandkit HTTP server");

    // A missing or unparseable standards document aborts startup.
    let config = ServerConfig::load(&args.config, args.standards)?;

    let addr = format!("{}:{}", args.host, args.port);
    api::serve(&addr, config).await?;

    Ok(())
}
