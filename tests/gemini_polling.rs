use axum::{
    extract::{Path, Query, State},
    http::{HeaderMap, StatusCode},
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use synoid_reel::clients::{FileState, GeminiClient, GeminiError, UploadedFile};
use synoid_reel::config::{GeminiConfig, PollPolicy};
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
struct Script {
    states: Arc<Vec<&'static str>>,
    hits: Arc<AtomicUsize>,
}

async fn serve(app: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn file_status(State(script): State<Script>, Path(id): Path<String>) -> Json<Value> {
    let hit = script.hits.fetch_add(1, Ordering::SeqCst);
    let state = script.states[hit.min(script.states.len() - 1)];
    Json(json!({
        "name": format!("files/{}", id),
        "mimeType": "video/mp4",
        "uri": format!("https://gen.example/files/{}", id),
        "state": state
    }))
}

async fn scripted(states: Vec<&'static str>, poll: PollPolicy) -> (GeminiClient, Arc<AtomicUsize>) {
    let script = Script {
        states: Arc::new(states),
        hits: Arc::new(AtomicUsize::new(0)),
    };
    let hits = script.hits.clone();
    let app = Router::new()
        .route("/files/:id", get(file_status))
        .with_state(script);
    let base = serve(app).await;

    let mut config = GeminiConfig::new("test_key");
    config.base_url = base.clone();
    config.upload_url = format!("{}/upload", base);
    config.poll = poll;
    (GeminiClient::new(config), hits)
}

fn fast(max_attempts: u32) -> PollPolicy {
    PollPolicy {
        interval: Duration::from_millis(10),
        max_attempts,
    }
}

fn processing(name: &str) -> UploadedFile {
    UploadedFile {
        name: name.to_string(),
        display_name: None,
        mime_type: "video/mp4".to_string(),
        uri: String::new(),
        state: FileState::Processing,
    }
}

#[tokio::test]
async fn test_wait_returns_when_active() {
    let (client, hits) = scripted(vec!["PROCESSING", "PROCESSING", "ACTIVE"], fast(10)).await;
    let file = client
        .wait_until_ready(processing("files/abc"), &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(file.state, FileState::Active);
    assert_eq!(file.uri, "https://gen.example/files/abc");
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_already_active_file_is_not_polled() {
    let (client, hits) = scripted(vec!["ACTIVE"], fast(10)).await;
    let mut file = processing("files/abc");
    file.state = FileState::Active;
    let file = client
        .wait_until_ready(file, &CancellationToken::new())
        .await
        .unwrap();
    assert_eq!(file.state, FileState::Active);
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_failed_processing_is_terminal() {
    let (client, hits) = scripted(vec!["PROCESSING", "FAILED", "ACTIVE"], fast(10)).await;
    let err = client
        .wait_until_ready(processing("files/abc"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::ProcessingFailed(ref name) if name == "files/abc"));
    assert_eq!(hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_wait_gives_up_after_max_attempts() {
    let (client, hits) = scripted(vec!["PROCESSING"], fast(3)).await;
    let err = client
        .wait_until_ready(processing("files/abc"), &CancellationToken::new())
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::PollExhausted { attempts: 3, .. }));
    assert_eq!(hits.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_cancellation_stops_the_wait() {
    let slow = PollPolicy {
        interval: Duration::from_secs(60),
        max_attempts: 60,
    };
    let (client, hits) = scripted(vec!["PROCESSING"], slow).await;
    let cancel = CancellationToken::new();
    let trigger = cancel.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(50)).await;
        trigger.cancel();
    });

    let result = tokio::time::timeout(
        Duration::from_secs(5),
        client.wait_until_ready(processing("files/abc"), &cancel),
    )
    .await
    .expect("wait did not observe cancellation");
    assert!(matches!(result, Err(GeminiError::Cancelled(_))));
    assert_eq!(hits.load(Ordering::SeqCst), 0);
}

async fn upload(
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    body: axum::body::Bytes,
) -> (StatusCode, Json<Value>) {
    let raw = headers.get("x-goog-upload-protocol").and_then(|v| v.to_str().ok()) == Some("raw");
    let keyed = query.get("key").map(String::as_str) == Some("test_key");
    let typed = headers.get("content-type").and_then(|v| v.to_str().ok()) == Some("video/mp4");
    if !(raw && keyed && typed) || body.is_empty() {
        return (StatusCode::BAD_REQUEST, Json(json!({"error": "bad upload"})));
    }
    (
        StatusCode::OK,
        Json(json!({"file": {
            "name": "files/up1",
            "mimeType": "video/mp4",
            "uri": "https://gen.example/files/up1",
            "state": "ACTIVE"
        }})),
    )
}

async fn generate(Path(target): Path<String>, Json(body): Json<Value>) -> (StatusCode, Json<Value>) {
    if target != "gemini-1.5-pro:generateContent" {
        return (StatusCode::NOT_FOUND, Json(json!({})));
    }
    let parts = body["contents"][0]["parts"].as_array().cloned().unwrap_or_default();
    let with_file = parts.iter().any(|p| p.get("file_data").is_some());
    let answer = if with_file {
        "```json\n{\"description\": \"bees on a flower, slow pan\"}\n```"
    } else {
        "```json\n{\"topic\": \"Bees\"}\n```"
    };
    (
        StatusCode::OK,
        Json(json!({"candidates": [{"content": {"role": "model", "parts": [{"text": answer}]}}]})),
    )
}

async fn gemini_server() -> GeminiClient {
    let app = Router::new()
        .route("/upload", post(upload))
        .route("/models/:target", post(generate));
    let base = serve(app).await;
    let mut config = GeminiConfig::new("test_key");
    config.base_url = base.clone();
    config.upload_url = format!("{}/upload", base);
    config.poll = fast(3);
    GeminiClient::new(config)
}

#[tokio::test]
async fn test_prompt_answer_is_unfenced() {
    let client = gemini_server().await;
    let answer = client.send_prompt("{\"task\": \"pick a topic\"}").await.unwrap();
    assert_eq!(answer, json!({"topic": "Bees"}));
}

#[tokio::test]
async fn test_upload_then_describe() {
    let dir = tempfile::tempdir().unwrap();
    let clip = dir.path().join("clip.mp4");
    std::fs::write(&clip, b"\x00\x00\x00\x18ftypmp42").unwrap();

    let client = gemini_server().await;
    let file = client.send_file(&clip, &CancellationToken::new()).await.unwrap();
    assert_eq!(file.name, "files/up1");

    let answer = client.send_prompt_with_file(&file, "describe").await.unwrap();
    assert_eq!(answer["description"], "bees on a flower, slow pan");
}

#[tokio::test]
async fn test_upload_missing_file_is_io_error() {
    let client = gemini_server().await;
    let err = client
        .upload_file(std::path::Path::new("/no/such/clip.mp4"))
        .await
        .unwrap_err();
    assert!(matches!(err, GeminiError::Io(_)));
}
