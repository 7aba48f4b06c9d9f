use crate::config::{AppState, ServerConfig};
use anyhow::Result;
use axum::{
    extract::State,
    http::{HeaderMap, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use brandkit_mcp::protocol::JsonRpcRequest;
use std::sync::Arc;
use tower_http::{
    cors::CorsLayer,
    trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer},
};

pub mod sessions;

const SESSION_HEADER: &str = "mcp-session-id";

/// Start the API server
pub async fn serve(addr: &str, config: ServerConfig) -> Result<()> {
    let state = AppState::new(&config)?;

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("API server listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the API router
fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/", get(describe))
        .route("/mcp", post(mcp_request).delete(mcp_close))
        // Middleware
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().include_headers(true))
                .on_response(DefaultOnResponse::new().include_headers(true)),
        )
        .layer(CorsLayer::permissive())
        .with_state(Arc::new(state))
}

/// Health check endpoint
async fn healthz() -> &'static str {
    "ok"
}

/// Server descriptor
async fn describe(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "name": brandkit_mcp::handler::SERVER_NAME,
        "version": env!("CARGO_PKG_VERSION"),
        "protocolVersion": brandkit_mcp::protocol::PROTOCOL_VERSION,
        "brands": state.document.brands.len(),
        "components": state.document.css_rules.len(),
    }))
}

fn session_id(headers: &HeaderMap) -> Option<&str> {
    headers.get(SESSION_HEADER).and_then(|v| v.to_str().ok())
}

/// Session-multiplexed MCP endpoint. A request without a session header
/// creates a new session; the assigned id comes back in the response header.
async fn mcp_request(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    let (id, handler) = state.sessions.resolve(session_id(&headers)).await;

    let mut response = match handler.handle(&request).await {
        Some(rpc_response) => Json(rpc_response).into_response(),
        // Notifications are accepted without a body.
        None => StatusCode::ACCEPTED.into_response(),
    };

    if let Ok(value) = HeaderValue::from_str(&id) {
        response.headers_mut().insert(SESSION_HEADER, value);
    }
    response
}

/// Close a session.
async fn mcp_close(State(state): State<Arc<AppState>>, headers: HeaderMap) -> Response {
    match session_id(&headers) {
        Some(id) if state.sessions.remove(id).await => StatusCode::NO_CONTENT.into_response(),
        Some(_) => StatusCode::NOT_FOUND.into_response(),
        None => (
            StatusCode::BAD_REQUEST,
            format!("Missing {} header", SESSION_HEADER),
        )
            .into_response(),
    }
}
