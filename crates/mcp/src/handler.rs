// Request dispatcher shared by the stdio and HTTP transports

use crate::protocol::{
    CallToolParams, CallToolResult, InitializeResult, JsonRpcError, JsonRpcRequest,
    JsonRpcResponse, ListToolsResult, ServerCapabilities, ServerInfo, ToolsCapability,
    PROTOCOL_VERSION,
};
use crate::tools::ToolRegistry;

pub const SERVER_NAME: &str = "brandkit";

/// Dispatches JSON-RPC requests against the tool registry. One instance per
/// stdio process, one per HTTP session.
pub struct McpHandler {
    registry: ToolRegistry,
}

impl McpHandler {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one request. Notifications yield no response.
    pub async fn handle(&self, request: &JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            tracing::debug!("Notification: {}", request.method);
            return None;
        }
        let id = request.id.clone().unwrap_or(serde_json::Value::Null);

        let response = match request.method.as_str() {
            "initialize" => JsonRpcResponse::success(
                id,
                InitializeResult {
                    protocol_version: PROTOCOL_VERSION.to_string(),
                    capabilities: ServerCapabilities {
                        tools: Some(ToolsCapability {
                            list_changed: false,
                        }),
                    },
                    server_info: ServerInfo {
                        name: SERVER_NAME.to_string(),
                        version: env!("CARGO_PKG_VERSION").to_string(),
                    },
                },
            ),
            "tools/list" => JsonRpcResponse::success(
                id,
                ListToolsResult {
                    tools: self.registry.list_schemas(),
                },
            ),
            "tools/call" => {
                let params: CallToolParams = match request
                    .params
                    .clone()
                    .map(serde_json::from_value)
                    .transpose()
                {
                    Ok(Some(p)) => p,
                    Ok(None) => {
                        return Some(JsonRpcResponse::error(
                            id,
                            JsonRpcError::invalid_params("Missing params for tools/call"),
                        ))
                    }
                    Err(e) => {
                        return Some(JsonRpcResponse::error(
                            id,
                            JsonRpcError::invalid_params(e.to_string()),
                        ))
                    }
                };
                JsonRpcResponse::success(id, self.call_tool(params).await)
            }
            "ping" => JsonRpcResponse::success(id, serde_json::json!({})),
            other => JsonRpcResponse::error(id, JsonRpcError::method_not_found(other)),
        };

        Some(response)
    }

    /// Run a tool, normalizing every failure into the error envelope. Nothing
    /// escapes this boundary as a fault.
    async fn call_tool(&self, params: CallToolParams) -> CallToolResult {
        let Some(tool) = self.registry.get(&params.name) else {
            return CallToolResult::error(format!("Unknown tool: {}", params.name));
        };

        tracing::debug!("Calling tool {}", params.name);
        match tool.execute(params.arguments).await {
            Ok(result) => result,
            Err(e) => {
                tracing::warn!("Tool {} failed: {:#}", params.name, e);
                CallToolResult::error(format!("{:#}", e))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::build_registry;
    use brandkit_core::{HttpFetcher, PageFetcher, StandardsDocument};
    use std::sync::Arc;

    fn handler() -> McpHandler {
        let document = Arc::new(
            StandardsDocument::from_value(serde_json::json!({
                "brands": { "pmc": { "name": "PMC", "shortName": "pmc" } },
                "cssRules": { "buttons": {} },
                "usage": {}
            }))
            .unwrap(),
        );
        let fetcher: Arc<dyn PageFetcher> = Arc::new(HttpFetcher::new().unwrap());
        McpHandler::new(build_registry(document, fetcher))
    }

    fn request(method: &str, params: serde_json::Value) -> JsonRpcRequest {
        JsonRpcRequest::new(1, method, params)
    }

    #[tokio::test]
    async fn initialize_reports_server_info() {
        let response = handler()
            .handle(&request("initialize", serde_json::json!({})))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["serverInfo"]["name"], "brandkit");
        assert_eq!(result["protocolVersion"], PROTOCOL_VERSION);
    }

    #[tokio::test]
    async fn tools_list_contains_all_eleven_tools() {
        let response = handler()
            .handle(&request("tools/list", serde_json::json!({})))
            .await
            .unwrap();
        let tools = response.result.unwrap()["tools"].as_array().unwrap().len();
        assert_eq!(tools, 11);
    }

    #[tokio::test]
    async fn unknown_method_is_rpc_error() {
        let response = handler()
            .handle(&request("resources/list", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[tokio::test]
    async fn unknown_tool_is_error_envelope_not_rpc_error() {
        let response = handler()
            .handle(&request(
                "tools/call",
                serde_json::json!({"name": "does_not_exist", "arguments": {}}),
            ))
            .await
            .unwrap();
        assert!(response.error.is_none());
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
    }

    #[tokio::test]
    async fn malformed_arguments_become_error_envelope() {
        // search_design_standards requires a string query
        let response = handler()
            .handle(&request(
                "tools/call",
                serde_json::json!({"name": "search_design_standards", "arguments": {"query": 42}}),
            ))
            .await
            .unwrap();
        let result = response.result.unwrap();
        assert_eq!(result["isError"], true);
    }

    #[tokio::test]
    async fn notifications_get_no_response() {
        let notification = JsonRpcRequest {
            jsonrpc: "2.0".to_string(),
            id: None,
            method: "notifications/initialized".to_string(),
            params: None,
        };
        assert!(handler().handle(&notification).await.is_none());
    }

    #[tokio::test]
    async fn ping_answers_with_empty_object() {
        let response = handler()
            .handle(&request("ping", serde_json::json!({})))
            .await
            .unwrap();
        assert_eq!(response.result.unwrap(), serde_json::json!({}));
    }
}
