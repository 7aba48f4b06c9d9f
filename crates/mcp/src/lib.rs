// MCP server for Brandkit (JSON-RPC 2.0 over stdio or HTTP)

pub mod handler;
pub mod protocol;
pub mod server;
pub mod tools;

pub use handler::McpHandler;
pub use server::McpServer;
