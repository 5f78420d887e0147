//! HTTP transport implementation.
//!
//! Clients open a long-lived SSE stream on `GET /sse`, learn their message
//! endpoint from the first `endpoint` event, then POST JSON-RPC messages to
//! it. Responses travel back on the stream. A stateless `POST /mcp` endpoint
//! answers inline for curl-style clients, and generated artifacts are served
//! under their own route.

use std::convert::Infallible;

use axum::{
    Json, Router,
    body::Body,
    extract::{Path, Query, State},
    response::{
        IntoResponse, Response,
        sse::{Event, KeepAlive, Sse},
    },
    routing::{get, post},
};
use futures::stream::{self, Stream, StreamExt};
use http::{Method, StatusCode, header};
use serde::Deserialize;
use serde_json::json;
use tokio_util::sync::CancellationToken;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::{error, info, instrument, warn};

use super::rpc::{self, JsonRpcRequest};
use super::session::{self, SessionManager};
use super::{SessionError, TransportError, TransportResult, config::HttpConfig};
use crate::core::McpServer;
use crate::domains::artifacts::ArtifactError;

/// HTTP transport handler.
pub struct HttpTransport {
    config: HttpConfig,
}

/// Application state shared across HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// The MCP server instance.
    server: McpServer,
    /// Live SSE sessions.
    sessions: SessionManager,
    /// Paths advertised to clients.
    config: HttpConfig,
}

/// Build the application router.
pub fn router(server: McpServer, config: &HttpConfig) -> Router {
    router_with_sessions(server, config, SessionManager::new())
}

/// Build the router around an existing session manager.
pub fn router_with_sessions(
    server: McpServer,
    config: &HttpConfig,
    sessions: SessionManager,
) -> Router {
    let artifact_path = format!("/{}/{{file}}", server.config().artifacts.route);
    let state = AppState {
        server,
        sessions,
        config: config.clone(),
    };

    let mut app = Router::new()
        .route("/", get(root_handler))
        .route("/health", get(health_check))
        .route(&config.sse_path, get(handle_sse))
        .route(&config.messages_path, post(handle_message))
        .route(&config.rpc_path, post(handle_rpc))
        .route(&artifact_path, get(handle_artifact))
        .with_state(state)
        .layer(TraceLayer::new_for_http());

    // Add CORS if enabled
    if config.enable_cors {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
            .allow_headers(Any);
        app = app.layer(cors);
    }

    app
}

impl HttpTransport {
    /// Create a new HTTP transport with the given config.
    pub fn new(config: HttpConfig) -> Self {
        Self { config }
    }

    /// Get the bind address.
    pub fn address(&self) -> String {
        format!("{}:{}", self.config.bind, self.config.port)
    }

    /// Run the HTTP transport.
    pub async fn run(self, server: McpServer) -> TransportResult<()> {
        let addr = self.address();

        let app = router(server, &self.config);

        let listener = tokio::net::TcpListener::bind(&addr)
            .await
            .map_err(|e| TransportError::bind(&addr, e))?;

        let cors_status = if self.config.enable_cors {
            "enabled"
        } else {
            "disabled"
        };
        info!("Ready - listening on {} (SSE, CORS {})", addr, cors_status);
        info!("  → Stream:   GET {}", self.config.sse_path);
        info!("  → Messages: POST {}?sessionId=<id>", self.config.messages_path);
        info!("  → JSON-RPC: POST {}", self.config.rpc_path);
        info!("  → Health:   GET /health");

        axum::serve(listener, app)
            .await
            .map_err(|e| TransportError::http(e.to_string()))?;

        Ok(())
    }
}

/// Root handler - provides API info.
async fn root_handler(State(state): State<AppState>) -> impl IntoResponse {
    let artifacts = format!("/{}/<id>.mp3", state.server.config().artifacts.route);
    Json(json!({
        "name": state.server.name(),
        "version": state.server.version(),
        "status": "running",
        "endpoints": {
            "sse": state.config.sse_path,
            "messages": state.config.messages_path,
            "rpc": state.config.rpc_path,
            "health": "/health",
            "artifacts": artifacts
        },
        "tools": state.server.tool_summaries()
    }))
}

/// Health check endpoint.
async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "healthy",
        "timestamp": chrono::Utc::now().to_rfc3339()
    }))
}

/// Open an SSE session.
async fn handle_sse(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let (session, receiver) = state.sessions.open();
    let endpoint = format!("{}?sessionId={}", state.config.messages_path, session.id());

    let handshake = stream::once(async move {
        session.connect();
        Ok::<_, Infallible>(Event::default().event("endpoint").data(endpoint))
    });

    // The receiver owns the session guard: when the client goes away axum
    // drops this stream and the session closes.
    let messages = stream::unfold(receiver, |mut receiver| async move {
        let message = receiver.recv().await?;
        Some((Ok(Event::default().event("message").data(message)), receiver))
    });

    Sse::new(handshake.chain(messages)).keep_alive(KeepAlive::default())
}

#[derive(Debug, Deserialize)]
struct MessageQuery {
    #[serde(rename = "sessionId")]
    session_id: Option<String>,
}

fn json_error(status: StatusCode, message: impl Into<String>) -> Response {
    (status, Json(json!({ "error": message.into() }))).into_response()
}

/// Accept a JSON-RPC message for an SSE session.
#[instrument(skip_all, fields(method = %request.method))]
async fn handle_message(
    State(state): State<AppState>,
    Query(query): Query<MessageQuery>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    let Some(session_id) = query.session_id else {
        return json_error(StatusCode::BAD_REQUEST, "Missing sessionId");
    };

    let session = match state.sessions.get(&session_id) {
        Ok(session) => session,
        Err(e @ SessionError::NotReady(_)) => {
            return json_error(StatusCode::CONFLICT, e.to_string());
        }
        Err(e) => {
            warn!("Rejected message: {}", e);
            return json_error(StatusCode::NOT_FOUND, e.to_string());
        }
    };

    let server = state.server.clone();
    let cancel = session.cancel_token();
    tokio::spawn(async move {
        let Some(response) = rpc::process_request(&server, request, cancel).await else {
            return;
        };
        match serde_json::to_string(&response) {
            Ok(message) => session::deliver(&session, message).await,
            Err(e) => error!("Failed to encode response: {}", e),
        }
    });

    StatusCode::ACCEPTED.into_response()
}

/// Handle stateless JSON-RPC requests.
#[instrument(skip_all, fields(method = %request.method))]
async fn handle_rpc(
    State(state): State<AppState>,
    Json(request): Json<JsonRpcRequest>,
) -> Response {
    info!("Received JSON-RPC request: {}", request.method);

    match rpc::process_request(&state.server, request, CancellationToken::new()).await {
        Some(response) => (StatusCode::OK, Json(response)).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

fn media_type(ext: &str) -> Option<&'static str> {
    match ext {
        "mp3" => Some("audio/mpeg"),
        _ => None,
    }
}

/// Serve a stored artifact.
async fn handle_artifact(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    let Some((id, ext)) = file.split_once('.') else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let Some(content_type) = media_type(ext) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match state.server.artifacts().fetch(id, ext).await {
        Ok(bytes) => ([(header::CONTENT_TYPE, content_type)], Body::from(bytes)).into_response(),
        Err(ArtifactError::NotFound(_)) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!("Failed to read artifact {}: {}", file, e);
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
