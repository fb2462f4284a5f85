//! Test utilities for finwell-core
//!
//! Provides a mock OpenAI-compatible server for development and integration
//! tests of the recommendation client.

use axum::{
    extract::Json,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;
use std::net::SocketAddr;
use tokio::sync::oneshot;

/// Mock chat-completions server
///
/// `/v1/chat/completions` requires a `Bearer` token and answers every request
/// with three recommendations wrapped in prose.
pub struct MockCompletionServer {
    addr: SocketAddr,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl MockCompletionServer {
    /// Start the mock server on an available port
    pub async fn start() -> Self {
        let app = Router::new()
            .route("/v1/models", get(handle_models))
            .route("/v1/chat/completions", post(handle_chat));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let (shutdown_tx, shutdown_rx) = oneshot::channel();

        tokio::spawn(async move {
            axum::serve(listener, app)
                .with_graceful_shutdown(async {
                    shutdown_rx.await.ok();
                })
                .await
                .unwrap();
        });

        Self {
            addr,
            shutdown_tx: Some(shutdown_tx),
        }
    }

    /// Get the base URL for this mock server
    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Stop the mock server
    pub fn stop(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            let _ = tx.send(());
        }
    }
}

impl Drop for MockCompletionServer {
    fn drop(&mut self) {
        self.stop();
    }
}

#[derive(Debug, Deserialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    role: String,
    #[allow(dead_code)]
    content: String,
}

async fn handle_models() -> Json<serde_json::Value> {
    Json(json!({
        "object": "list",
        "data": [{"id": "gpt-4o-mini", "object": "model"}]
    }))
}

async fn handle_chat(headers: HeaderMap, Json(request): Json<ChatRequest>) -> Response {
    let authorized = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("Bearer "));
    if !authorized {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({"error": {"message": "Missing API key"}})),
        )
            .into_response();
    }

    if request.messages.first().map(|m| m.role.as_str()) != Some("system") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": {"message": "Expected a system message first"}})),
        )
            .into_response();
    }

    let content = r#"Sure! Here is my advice:
{"recommendations": [
  {"title": "Diversify with index funds", "description": "Automate monthly contributions.", "type": "investment", "priority": 3},
  {"title": "Start an emergency fund", "description": "Save three months of expenses.", "type": "savings", "priority": 1},
  {"title": "Trim dining out", "description": "Cap restaurant spending at $200.", "type": "budgeting", "priority": 2}
]}"#;

    Json(json!({
        "id": "chatcmpl-mock",
        "object": "chat.completion",
        "model": request.model,
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    }))
    .into_response()
}
