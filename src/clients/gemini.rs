// SYNOID Reel Gemini Client
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Prompt completion against the Gemini REST API, media upload and the
// wait for an uploaded file to finish processing.

use crate::config::GeminiConfig;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::Path;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

#[derive(Debug, thiserror::Error)]
pub enum GeminiError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Gemini API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("failed to read upload: {0}")]
    Io(#[from] std::io::Error),

    #[error("model returned no text")]
    EmptyResponse,

    #[error("model response is not valid JSON: {source}")]
    MalformedJson {
        #[source]
        source: serde_json::Error,
        text: String,
    },

    #[error("processing of {0} failed")]
    ProcessingFailed(String),

    #[error("{name} still processing after {attempts} checks")]
    PollExhausted { name: String, attempts: u32 },

    #[error("wait for {0} was cancelled")]
    Cancelled(String),
}

/// Processing state of an uploaded file.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FileState {
    StateUnspecified,
    Processing,
    /// Ready to be referenced from a prompt.
    Active,
    Failed,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFile {
    /// Resource name, `files/<id>`.
    pub name: String,
    #[serde(default)]
    pub display_name: Option<String>,
    #[serde(default)]
    pub mime_type: String,
    #[serde(default)]
    pub uri: String,
    pub state: FileState,
}

#[derive(Deserialize)]
struct UploadResponse {
    file: UploadedFile,
}

/// Strip the markdown fence Gemini tends to wrap JSON answers in.
///
/// Only a single surrounding ```` ``` ```` / ```` ```json ```` fence is removed;
/// text inside the fence is left alone. Other models may decorate their output
/// differently and are not covered.
pub fn unwrap_fenced_json(text: &str) -> &str {
    let trimmed = text.trim();
    let Some(body) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let body = body
        .strip_prefix("json")
        .or_else(|| body.strip_prefix("JSON"))
        .unwrap_or(body);
    body.strip_suffix("```").unwrap_or(body).trim()
}

/// Parse a model answer as JSON after unwrapping its fence.
pub fn parse_model_json<T: DeserializeOwned>(text: &str) -> Result<T, GeminiError> {
    serde_json::from_str(unwrap_fenced_json(text)).map_err(|source| GeminiError::MalformedJson {
        source,
        text: text.to_string(),
    })
}

fn mime_for(path: &Path) -> String {
    mime_guess::from_path(path).first_or_octet_stream().to_string()
}

pub struct GeminiClient {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiClient {
    pub fn new(config: GeminiConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_client(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    pub fn model(&self) -> &str {
        &self.config.model
    }

    /// Send a text prompt and parse the answer as JSON.
    pub async fn send_prompt(&self, prompt: &str) -> Result<Value, GeminiError> {
        let text = self.generate(vec![json!({ "text": prompt })]).await?;
        parse_model_json(&text)
    }

    /// Send a prompt referencing an uploaded file (vision) and parse the
    /// answer as JSON.
    pub async fn send_prompt_with_file(
        &self,
        file: &UploadedFile,
        prompt: &str,
    ) -> Result<Value, GeminiError> {
        let parts = vec![
            json!({ "file_data": { "mime_type": file.mime_type, "file_uri": file.uri } }),
            json!({ "text": prompt }),
        ];
        let text = self.generate(parts).await?;
        parse_model_json(&text)
    }

    /// Raw text of the first candidate.
    pub async fn generate(&self, parts: Vec<Value>) -> Result<String, GeminiError> {
        info!("[GEMINI] Prompting {} ({} parts)", self.config.model, parts.len());

        let endpoint = format!(
            "{}/models/{}:generateContent",
            self.config.base_url.trim_end_matches('/'),
            self.config.model
        );
        let payload = json!({
            "contents": [{ "role": "user", "parts": parts }]
        });

        let response = self
            .client
            .post(&endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .json(&payload)
            .send()
            .await?;
        let body: Value = ensure_success(response).await?.json().await?;

        // candidates[0].content.parts[*].text
        let text: String = body["candidates"][0]["content"]["parts"]
            .as_array()
            .map(|parts| {
                parts
                    .iter()
                    .filter_map(|p| p["text"].as_str())
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            warn!("[GEMINI] Empty completion: {}", body);
            return Err(GeminiError::EmptyResponse);
        }
        Ok(text)
    }

    /// Upload a local media file. The returned file is usually still
    /// processing; see [`GeminiClient::wait_until_ready`].
    pub async fn upload_file(&self, path: &Path) -> Result<UploadedFile, GeminiError> {
        let bytes = tokio::fs::read(path).await?;
        let mime = mime_for(path);
        info!("[GEMINI] Uploading {:?} ({}, {} bytes)", path, mime, bytes.len());

        let response = self
            .client
            .post(&self.config.upload_url)
            .query(&[("key", self.config.api_key.as_str())])
            .header("X-Goog-Upload-Protocol", "raw")
            .header(reqwest::header::CONTENT_TYPE, mime.as_str())
            .body(bytes)
            .send()
            .await?;
        let uploaded: UploadResponse = ensure_success(response).await?.json().await?;
        Ok(uploaded.file)
    }

    pub async fn get_file(&self, name: &str) -> Result<UploadedFile, GeminiError> {
        let endpoint = format!("{}/{}", self.config.base_url.trim_end_matches('/'), name);
        let response = self
            .client
            .get(&endpoint)
            .query(&[("key", self.config.api_key.as_str())])
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }

    /// Re-check `file` every poll interval while it is processing, at most
    /// `max_attempts` times. `Failed` is terminal and not retried.
    pub async fn wait_until_ready(
        &self,
        file: UploadedFile,
        cancel: &CancellationToken,
    ) -> Result<UploadedFile, GeminiError> {
        let policy = self.config.poll;
        let mut current = file;
        let mut attempts = 0;

        while current.state == FileState::Processing {
            if attempts >= policy.max_attempts {
                return Err(GeminiError::PollExhausted {
                    name: current.name,
                    attempts,
                });
            }

            tokio::select! {
                _ = cancel.cancelled() => {
                    info!("[GEMINI] Stopped waiting for {}", current.name);
                    return Err(GeminiError::Cancelled(current.name));
                }
                _ = tokio::time::sleep(policy.interval) => {}
            }

            attempts += 1;
            debug!("[GEMINI] {} still processing (check {}/{})", current.name, attempts, policy.max_attempts);
            current = self.get_file(&current.name).await?;
        }

        if current.state == FileState::Failed {
            return Err(GeminiError::ProcessingFailed(current.name));
        }
        info!("[GEMINI] {} ready ({:?})", current.name, current.state);
        Ok(current)
    }

    /// Upload and wait in one go.
    pub async fn send_file(
        &self,
        path: &Path,
        cancel: &CancellationToken,
    ) -> Result<UploadedFile, GeminiError> {
        let file = self.upload_file(path).await?;
        self.wait_until_ready(file, cancel).await
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, GeminiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(GeminiError::Api {
        status: status.as_u16(),
        body,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unwrap_fenced_json() {
        assert_eq!(unwrap_fenced_json("```json\n{\"a\": 1}\n```"), "{\"a\": 1}");
        assert_eq!(unwrap_fenced_json("```\n[1]\n```\n"), "[1]");
        assert_eq!(unwrap_fenced_json("  {\"a\": 1}  "), "{\"a\": 1}");
    }

    #[test]
    fn test_json_inside_payload_survives() {
        let value: Value = parse_model_json("```json\n{\"format\": \"json\"}\n```").unwrap();
        assert_eq!(value["format"], "json");
    }

    #[test]
    fn test_malformed_answer_keeps_text() {
        let err = parse_model_json::<Value>("Sure! Here is your video plan.").unwrap_err();
        match err {
            GeminiError::MalformedJson { text, .. } => assert!(text.starts_with("Sure!")),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_file_state_names() {
        let file: UploadedFile = serde_json::from_str(
            r#"{"name":"files/abc","mimeType":"video/mp4","uri":"https://g/files/abc","state":"ACTIVE"}"#,
        )
        .unwrap();
        assert_eq!(file.state, FileState::Active);
        let state: FileState = serde_json::from_str("\"SOMETHING_NEW\"").unwrap();
        assert_eq!(state, FileState::Unknown);
    }

    #[test]
    fn test_mime_for() {
        assert_eq!(mime_for(Path::new("clip.mp4")), "video/mp4");
        assert_eq!(mime_for(Path::new("still.jpeg")), "image/jpeg");
        assert_eq!(mime_for(Path::new("song.mp3")), "audio/mpeg");
        assert!(mime_for(Path::new("clip.m4v")).starts_with("video/"));
        assert!(mime_for(Path::new("take.flac")).starts_with("audio/"));
        assert_eq!(mime_for(Path::new("blob")), "application/octet-stream");
    }
}
