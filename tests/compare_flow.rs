//! End-to-end comparison tests.
//!
//! Runs a doccompare server backed by the real completion client, pointed at
//! a fake OpenAI-compatible service, and drives it with `ComparisonClient`.

use std::sync::{Arc, Mutex};

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    routing::post,
    Json, Router,
};
use serde_json::{json, Value};

use doccompare::client::{ClientError, ComparisonClient};
use doccompare::config::Settings;
use doccompare::highlight::{highlight, plain_text};
use doccompare::llm::LlmConfig;
use doccompare::models::{DifferenceKind, Side};
use doccompare::server::{create_router, AppState};

const CAT_DOG_REPLY: &str = r#"{
  "differences": [
    {"type": "deletion", "content": "cat", "location": "línea 1", "significance": "se elimina el gato"},
    {"type": "addition", "content": "dog", "location": "línea 1", "significance": "se añade el perro"},
    {"type": "addition", "content": "happily", "location": "línea 1", "significance": "añade un matiz"}
  ],
  "summary": "Cambia el animal",
  "impactAnalysis": "Bajo"
}"#;

#[derive(Clone)]
struct FakeCompletions {
    reply: &'static str,
    seen: Arc<Mutex<Vec<(Option<String>, Value)>>>,
}

async fn chat_completions(
    State(fake): State<FakeCompletions>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .map(str::to_string);
    fake.seen.lock().unwrap().push((auth, body));

    (
        StatusCode::OK,
        Json(json!({
            "choices": [{ "message": { "role": "assistant", "content": fake.reply } }]
        })),
    )
}

async fn listen(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

/// Start the fake completion service and a doccompare server in front of it.
async fn start_stack(
    api_key: Option<&str>,
    reply: &'static str,
) -> (String, Arc<Mutex<Vec<(Option<String>, Value)>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let fake = FakeCompletions {
        reply,
        seen: seen.clone(),
    };
    let completions = listen(
        Router::new()
            .route("/v1/chat/completions", post(chat_completions))
            .with_state(fake),
    )
    .await;

    let settings = Settings {
        llm: LlmConfig {
            endpoint: completions,
            api_key: api_key.map(str::to_string),
            ..LlmConfig::default()
        },
        ..Settings::default()
    };

    let state = AppState::from_settings(&settings).unwrap();
    let server = listen(create_router(state)).await;
    (server, seen)
}

#[tokio::test]
async fn test_compare_round_trip() {
    let (server, seen) = start_stack(Some("sk-test"), CAT_DOG_REPLY).await;
    let client = ComparisonClient::new(&server);

    let original = "The cat sat.";
    let modified = "The dog sat happily.";
    let result = client.compare(original, modified).await.unwrap();

    assert_eq!(result.differences.len(), 3);
    assert_eq!(result.differences[0].kind, DifferenceKind::Deletion);
    assert_eq!(result.summary, "Cambia el animal");
    assert_eq!(result.impact_analysis, "Bajo");

    let left = highlight(original, &result.differences, Side::Original);
    assert_eq!(plain_text(&left), original);
    assert_eq!(left.iter().filter(|s| s.is_highlight()).count(), 1);

    let right = highlight(modified, &result.differences, Side::Modified);
    assert_eq!(plain_text(&right), modified);
    let marked: Vec<&str> = right
        .iter()
        .filter(|s| s.is_highlight())
        .map(|s| s.text())
        .collect();
    assert_eq!(marked, vec!["dog", "happily"]);

    let seen = seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    let (auth, body) = &seen[0];
    assert_eq!(auth.as_deref(), Some("Bearer sk-test"));
    assert_eq!(body["model"], "gpt-4o-mini");
    assert_eq!(body["response_format"]["type"], "json_object");
    assert_eq!(body["messages"].as_array().unwrap().len(), 2);
    assert_eq!(body["messages"][0]["role"], "system");
    let user = body["messages"][1]["content"].as_str().unwrap();
    assert!(user.contains(original));
    assert!(user.contains(modified));
}

#[tokio::test]
async fn test_compare_without_key_never_calls_service() {
    let (server, seen) = start_stack(None, CAT_DOG_REPLY).await;
    let client = ComparisonClient::new(&server);

    let err = client.compare("a", "b").await.unwrap_err();
    assert!(matches!(&err, ClientError::Api(m) if m == "Error comparing documents"));
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_compare_empty_document_is_rejected() {
    let (server, seen) = start_stack(Some("sk-test"), CAT_DOG_REPLY).await;
    let client = ComparisonClient::new(&server);

    let err = client.compare("", "b").await.unwrap_err();
    assert_eq!(err.to_string(), "Both documents are required");
    assert!(seen.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_compare_reply_without_differences_is_invalid() {
    let (server, _seen) = start_stack(Some("sk-test"), r#"{"summary": "nada"}"#).await;
    let client = ComparisonClient::new(&server);

    let err = client.compare("a", "b").await.unwrap_err();
    assert!(matches!(err, ClientError::InvalidResponse { .. }));
    assert_eq!(err.to_string(), "Invalid response format from API");
}
