#![cfg(feature = "gemini")]

// GeminiClient against an in-process fake of the generateContent endpoint.

use axum::{
    Json, Router,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::post,
};
use reelscript_core::{GenerateRequest, Message, ModelConfig};
use reelscript_error::{GeminiErrorKind, ReelscriptErrorKind};
use reelscript_interface::ReelscriptDriver;
use reelscript_models::GeminiClient;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

#[derive(Clone, Default)]
struct Captured {
    inner: Arc<Mutex<Vec<(String, Option<String>, Value)>>>,
}

#[derive(Clone)]
struct FakeState {
    captured: Captured,
    status: StatusCode,
    reply: Value,
}

async fn generate_content(
    State(state): State<FakeState>,
    axum::extract::Path(rest): axum::extract::Path<String>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> impl IntoResponse {
    let key = headers
        .get("x-goog-api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    state.captured.inner.lock().unwrap().push((rest, key, body));
    (state.status, Json(state.reply.clone()))
}

async fn spawn_fake(status: StatusCode, reply: Value) -> anyhow::Result<(String, Captured)> {
    let captured = Captured::default();
    let state = FakeState {
        captured: captured.clone(),
        status,
        reply,
    };
    let router = Router::new()
        .route("/v1beta/models/*rest", post(generate_content))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    tokio::spawn(async move { axum::serve(listener, router).await });

    Ok((format!("http://{}/v1beta", addr), captured))
}

fn request() -> GenerateRequest {
    GenerateRequest::builder()
        .messages(vec![
            Message::system("You write short-form video scripts."),
            Message::user("Write five scripts."),
        ])
        .response_schema(Some(json!({"type": "OBJECT"})))
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_generate_posts_json_mode_request() -> anyhow::Result<()> {
    let reply = json!({
        "candidates": [{
            "content": {"role": "model", "parts": [{"text": "{\"scripts\": [\"a\",\"b\",\"c\",\"d\",\"e\"]}"}]},
            "finishReason": "STOP"
        }],
        "usageMetadata": {"promptTokenCount": 12, "candidatesTokenCount": 30, "totalTokenCount": 42}
    });
    let (base_url, captured) = spawn_fake(StatusCode::OK, reply).await?;
    let config = ModelConfig::default().with_base_url(base_url);
    let client = GeminiClient::with_api_key("test-key", &config)?;

    let response = client.generate(&request()).await?;

    assert!(response.text().contains("\"scripts\""));
    let calls = captured.inner.lock().unwrap().clone();
    assert_eq!(calls.len(), 1);
    let (path, key, body) = &calls[0];
    assert_eq!(path, "gemini-2.0-flash:generateContent");
    assert_eq!(key.as_deref(), Some("test-key"));
    assert_eq!(
        body["generationConfig"]["responseMimeType"],
        "application/json"
    );
    assert_eq!(
        body["systemInstruction"]["parts"][0]["text"],
        "You write short-form video scripts."
    );
    Ok(())
}

#[tokio::test]
async fn test_request_model_overrides_default() -> anyhow::Result<()> {
    let reply = json!({"candidates": [{"content": {"parts": [{"text": "ok"}]}}]});
    let (base_url, captured) = spawn_fake(StatusCode::OK, reply).await?;
    let client = GeminiClient::with_api_key("k", &ModelConfig::default().with_base_url(base_url))?;

    let mut req = request();
    req.model = Some("gemini-1.5-flash".to_string());
    client.generate(&req).await?;

    let calls = captured.inner.lock().unwrap().clone();
    assert_eq!(calls[0].0, "gemini-1.5-flash:generateContent");
    Ok(())
}

#[tokio::test]
async fn test_http_error_carries_status_and_message() -> anyhow::Result<()> {
    let reply = json!({"error": {"code": 429, "message": "Resource has been exhausted", "status": "RESOURCE_EXHAUSTED"}});
    let (base_url, _) = spawn_fake(StatusCode::TOO_MANY_REQUESTS, reply).await?;
    let client = GeminiClient::with_api_key("k", &ModelConfig::default().with_base_url(base_url))?;

    let err = client.generate(&request()).await.unwrap_err();

    match err.kind() {
        ReelscriptErrorKind::Gemini(gemini) => assert_eq!(
            gemini.kind,
            GeminiErrorKind::HttpError {
                status_code: 429,
                message: "Resource has been exhausted".to_string()
            }
        ),
        other => panic!("unexpected error: {other}"),
    }
    Ok(())
}

#[tokio::test]
async fn test_unreachable_endpoint_is_api_request_error() -> anyhow::Result<()> {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;
    drop(listener);

    let config = ModelConfig::default().with_base_url(format!("http://{}/v1beta", addr));
    let client = GeminiClient::with_api_key("k", &config)?;
    let err = client.generate(&request()).await.unwrap_err();

    assert!(matches!(
        err.kind(),
        ReelscriptErrorKind::Gemini(g) if matches!(g.kind, GeminiErrorKind::ApiRequest(_))
    ));
    Ok(())
}
