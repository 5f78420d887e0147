#![cfg(feature = "http")]

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode, header},
};
use http_body_util::BodyExt; // for .frame and .collect
use serde_json::{Value, json};
use tokio::time::timeout;
use tower::ServiceExt; // for .oneshot

use multimodal_mcp_server::core::transport::HttpConfig;
use multimodal_mcp_server::core::transport::http::{router, router_with_sessions};
use multimodal_mcp_server::core::transport::session::SessionManager;
use multimodal_mcp_server::core::{Config, McpServer};
use multimodal_mcp_server::domains::artifacts::ArtifactStore;
use multimodal_mcp_server::domains::tools::{
    ContentItem, HandlerFailure, SchemaSpec, Tool, ToolContext, ToolRegistry, ValidatedArguments,
};

/// Replies `<name>: <prompt>` after an optional delay.
struct EchoTool {
    name: &'static str,
    delay: Duration,
    schema: SchemaSpec,
}

impl EchoTool {
    fn new(name: &'static str, delay_ms: u64) -> Arc<dyn Tool> {
        Arc::new(Self {
            name,
            delay: Duration::from_millis(delay_ms),
            schema: SchemaSpec::prompt("Text to echo"),
        })
    }
}

#[async_trait]
impl Tool for EchoTool {
    fn name(&self) -> &'static str {
        self.name
    }

    fn describe(&self) -> &'static str {
        "Echoes the prompt"
    }

    fn schema(&self) -> &SchemaSpec {
        &self.schema
    }

    fn activity(&self) -> &'static str {
        "echoing"
    }

    async fn invoke(
        &self,
        args: ValidatedArguments,
        _ctx: ToolContext,
    ) -> Result<Vec<ContentItem>, HandlerFailure> {
        tokio::time::sleep(self.delay).await;
        Ok(vec![ContentItem::text(format!("{}: {}", self.name, args.prompt()))])
    }
}

struct Harness {
    app: Router,
    sessions: SessionManager,
    server: McpServer,
    _dir: tempfile::TempDir,
}

fn harness() -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.artifacts.dir = dir.path().to_path_buf();

    let registry = ToolRegistry::new()
        .with_tool(EchoTool::new("Slow Echo", 150))
        .unwrap()
        .with_tool(EchoTool::new("Fast Echo", 0))
        .unwrap();
    let artifacts = Arc::new(ArtifactStore::new(dir.path()));
    let server = McpServer::with_registry(config, registry, artifacts);

    let sessions = SessionManager::new();
    let app = router_with_sessions(server.clone(), &HttpConfig::default(), sessions.clone());
    Harness {
        app,
        sessions,
        server,
        _dir: dir,
    }
}

/// Minimal reader for `text/event-stream` bodies.
struct SseReader {
    body: Body,
    buf: String,
}

impl SseReader {
    fn new(body: Body) -> Self {
        Self {
            body,
            buf: String::new(),
        }
    }

    /// Next `(event, data)` pair, skipping comments.
    async fn next_event(&mut self) -> (String, String) {
        loop {
            if let Some(end) = self.buf.find("\n\n") {
                let raw: String = self.buf.drain(..end + 2).collect();
                let mut event = String::from("message");
                let mut data = Vec::new();
                for line in raw.lines() {
                    if let Some(v) = line.strip_prefix("event:") {
                        event = v.trim_start().to_string();
                    } else if let Some(v) = line.strip_prefix("data:") {
                        data.push(v.trim_start().to_string());
                    }
                }
                if !data.is_empty() {
                    return (event, data.join("\n"));
                }
                continue;
            }

            let frame = timeout(Duration::from_secs(5), self.body.frame())
                .await
                .expect("timed out waiting for SSE frame")
                .expect("stream ended")
                .unwrap();
            if let Ok(bytes) = frame.into_data() {
                self.buf.push_str(std::str::from_utf8(&bytes).unwrap());
            }
        }
    }
}

async fn open_session(app: &Router) -> (SseReader, String) {
    let res = app
        .clone()
        .oneshot(Request::get("/sse").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert!(
        res.headers()[header::CONTENT_TYPE]
            .to_str()
            .unwrap()
            .starts_with("text/event-stream")
    );

    let mut reader = SseReader::new(res.into_body());
    let (event, endpoint) = reader.next_event().await;
    assert_eq!(event, "endpoint");
    assert!(endpoint.starts_with("/messages?sessionId="));
    (reader, endpoint)
}

async fn post_json(app: &Router, uri: &str, body: Value) -> axum::response::Response {
    let req = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.clone().oneshot(req).await.unwrap()
}

async fn body_json(res: axum::response::Response) -> Value {
    let bytes = res.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn sse_session_lists_and_calls_tools() {
    let h = harness();
    let (mut stream, endpoint) = open_session(&h.app).await;

    let res = post_json(
        &h.app,
        &endpoint,
        json!({"jsonrpc": "2.0", "id": 1, "method": "tools/list"}),
    )
    .await;
    assert_eq!(res.status(), StatusCode::ACCEPTED);

    let (event, data) = stream.next_event().await;
    assert_eq!(event, "message");
    let list: Value = serde_json::from_str(&data).unwrap();
    assert_eq!(list["id"], 1);
    let names: Vec<&str> = list["result"]["tools"]
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Slow Echo", "Fast Echo"]);
    assert_eq!(
        list["result"]["tools"][0]["inputSchema"]["required"],
        json!(["prompt"])
    );

    post_json(
        &h.app,
        &endpoint,
        json!({
            "jsonrpc": "2.0", "id": 2, "method": "tools/call",
            "params": {"name": "Fast Echo", "arguments": {"prompt": "hello"}}
        }),
    )
    .await;
    let (_, data) = stream.next_event().await;
    let call: Value = serde_json::from_str(&data).unwrap();
    assert_eq!(call["id"], 2);
    assert_eq!(
        call["result"],
        json!({"content": [{"type": "text", "text": "Fast Echo: hello"}]})
    );
}

#[tokio::test]
async fn concurrent_calls_are_attributed_by_id() {
    let h = harness();
    let (mut stream, endpoint) = open_session(&h.app).await;

    for (id, tool) in [(10, "Slow Echo"), (11, "Fast Echo")] {
        let res = post_json(
            &h.app,
            &endpoint,
            json!({
                "jsonrpc": "2.0", "id": id, "method": "tools/call",
                "params": {"name": tool, "arguments": {"prompt": format!("p{}", id)}}
            }),
        )
        .await;
        assert_eq!(res.status(), StatusCode::ACCEPTED);
    }

    let mut by_id = std::collections::HashMap::new();
    for _ in 0..2 {
        let (_, data) = stream.next_event().await;
        let msg: Value = serde_json::from_str(&data).unwrap();
        by_id.insert(
            msg["id"].as_i64().unwrap(),
            msg["result"]["content"][0]["text"].as_str().unwrap().to_string(),
        );
    }
    assert_eq!(by_id[&10], "Slow Echo: p10");
    assert_eq!(by_id[&11], "Fast Echo: p11");
}

#[tokio::test]
async fn two_sessions_do_not_replace_each_other() {
    let h = harness();
    let (mut first, first_endpoint) = open_session(&h.app).await;
    let (mut second, second_endpoint) = open_session(&h.app).await;
    assert_ne!(first_endpoint, second_endpoint);
    assert_eq!(h.sessions.len(), 2);

    post_json(&h.app, &first_endpoint, json!({"jsonrpc": "2.0", "id": "a", "method": "ping"})).await;
    post_json(&h.app, &second_endpoint, json!({"jsonrpc": "2.0", "id": "b", "method": "ping"})).await;

    let (_, a) = first.next_event().await;
    let (_, b) = second.next_event().await;
    assert_eq!(serde_json::from_str::<Value>(&a).unwrap()["id"], "a");
    assert_eq!(serde_json::from_str::<Value>(&b).unwrap()["id"], "b");
}

#[tokio::test]
async fn messages_after_disconnect_are_rejected() {
    let h = harness();
    let (stream, endpoint) = open_session(&h.app).await;
    drop(stream);
    assert!(h.sessions.is_empty());

    let res = post_json(&h.app, &endpoint, json!({"jsonrpc": "2.0", "id": 1, "method": "ping"})).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    let body = body_json(res).await;
    assert!(body["error"].as_str().unwrap().starts_with("Session closed: "));
}

#[tokio::test]
async fn unknown_or_missing_session_id() {
    let h = harness();
    let ping = json!({"jsonrpc": "2.0", "id": 1, "method": "ping"});

    let res = post_json(&h.app, "/messages?sessionId=nope", ping.clone()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(res).await["error"], "Session closed: nope");

    let res = post_json(&h.app, "/messages", ping).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn stateless_rpc_endpoint_answers_inline() {
    let h = harness();
    let res = post_json(
        &h.app,
        "/mcp",
        json!({
            "jsonrpc": "2.0", "id": 7, "method": "tools/call",
            "params": {"name": "Fast Echo", "arguments": {"prompt": "   "}}
        }),
    )
    .await;
    assert_eq!(res.status(), StatusCode::OK);
    let body = body_json(res).await;
    assert_eq!(
        body["result"]["content"][0]["text"],
        "Invalid prompt: prompt cannot be empty"
    );
    assert!(body.get("error").is_none());

    let res = post_json(
        &h.app,
        "/mcp",
        json!({"jsonrpc": "2.0", "method": "notifications/initialized"}),
    )
    .await;
    assert_eq!(res.status(), StatusCode::ACCEPTED);
}

#[tokio::test]
async fn artifacts_round_trip_and_not_found() {
    let h = harness();
    let bytes = b"ID3\x04\x00fake-mp3-payload".to_vec();
    let id = h.server.artifacts().store(&bytes, "mp3").await.unwrap();

    let res = h
        .app
        .clone()
        .oneshot(
            Request::get(format!("/mp3/{}.mp3", id))
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    assert_eq!(res.headers()[header::CONTENT_TYPE], "audio/mpeg");
    let body = res.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(body.as_ref(), bytes.as_slice());

    let wrong_ext = format!("/mp3/{}.wav", id);
    let no_ext = format!("/mp3/{}", id);
    for uri in [
        "/mp3/0123456789abcdef0123456789abcdef.mp3",
        "/mp3/not-an-id.mp3",
        wrong_ext.as_str(),
        no_ext.as_str(),
    ] {
        let res = h
            .app
            .clone()
            .oneshot(Request::get(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "{}", uri);
    }
}

#[tokio::test]
async fn root_and_health_describe_the_server() {
    let h = harness();
    let res = h
        .app
        .clone()
        .oneshot(Request::get("/").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let info = body_json(res).await;
    assert_eq!(info["name"], "mcp-sse-server");
    assert_eq!(info["status"], "running");
    assert_eq!(info["endpoints"]["sse"], "/sse");
    assert_eq!(info["tools"][1]["name"], "Fast Echo");

    let res = h
        .app
        .clone()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(res).await["status"], "healthy");
}

#[tokio::test]
async fn audio_tool_with_empty_prompt_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.artifacts.dir = dir.path().join("mp3");
    let artifact_dir = config.artifacts.dir.clone();
    let server = McpServer::new(config).unwrap();
    let app = router(server, &HttpConfig::default());

    let res = post_json(
        &app,
        "/mcp",
        json!({
            "jsonrpc": "2.0", "id": 1, "method": "tools/call",
            "params": {"name": "Audio Tool", "arguments": {"prompt": ""}}
        }),
    )
    .await;
    let body = body_json(res).await;
    let content = body["result"]["content"].as_array().unwrap();
    assert_eq!(content.len(), 1);
    assert!(content[0]["text"].as_str().unwrap().starts_with("Invalid prompt"));
    assert!(!artifact_dir.exists());
}
