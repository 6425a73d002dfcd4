// SYNOID Reel Render Client
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Thin wrapper over the JSON2Video REST API: create a movie job, list the
// jobs of a project. Nothing is retried.

use crate::config::RenderConfig;
use crate::schema::Movie;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tracing::{error, info, warn};

/// The renderer's view of a submitted job.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobDescriptor {
    pub success: Option<bool>,
    /// Project identifier used to query the job later.
    pub project: Option<String>,
    /// `pending`, `running`, `done` or `error`.
    pub status: Option<String>,
    pub message: Option<String>,
    /// Download URL of the finished movie.
    pub url: Option<String>,
    /// Everything else the renderer reports, untouched.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl JobDescriptor {
    pub fn is_done(&self) -> bool {
        self.status.as_deref() == Some("done")
    }
}

#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("render API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("unexpected render API response: {0}")]
    Decode(#[from] serde_json::Error),
}

pub struct RenderClient {
    client: reqwest::Client,
    config: RenderConfig,
}

impl RenderClient {
    pub fn new(config: RenderConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_client(client: reqwest::Client, config: RenderConfig) -> Self {
        Self { client, config }
    }

    fn movies_url(&self) -> String {
        format!("{}/movies", self.config.base_url.trim_end_matches('/'))
    }

    /// Submit a movie for rendering.
    pub async fn submit(&self, movie: &Movie) -> Result<JobDescriptor, RenderError> {
        self.submit_map(&movie.to_map()).await
    }

    /// Submit an already serialized movie document. Transport errors and
    /// non-2xx answers are returned to the caller.
    pub async fn submit_map(&self, movie: &Map<String, Value>) -> Result<JobDescriptor, RenderError> {
        info!("[RENDER] Submitting movie ({} scenes)", scene_count(movie));

        let response = self
            .client
            .post(self.movies_url())
            .header("x-api-key", &self.config.api_key)
            .json(movie)
            .send()
            .await
            .map_err(|e| {
                error!("[RENDER] Error creating movie: {}", e);
                RenderError::from(e)
            })?;

        let response = ensure_success(response).await.map_err(|e| {
            error!("[RENDER] Error creating movie: {}", e);
            e
        })?;

        let job: JobDescriptor = response.json().await?;
        info!("[RENDER] Job accepted (project: {:?})", job.project);
        Ok(job)
    }

    /// Jobs of a project, oldest first. Any failure is logged and reported as
    /// an empty list; use [`RenderClient::try_list_jobs`] to see the error.
    pub async fn list_jobs(&self, project_id: &str) -> Vec<JobDescriptor> {
        match self.try_list_jobs(project_id).await {
            Ok(jobs) => jobs,
            Err(e) => {
                error!("[RENDER] Error fetching movies for project {}: {}", project_id, e);
                Vec::new()
            }
        }
    }

    pub async fn try_list_jobs(&self, project_id: &str) -> Result<Vec<JobDescriptor>, RenderError> {
        let response = self
            .client
            .get(self.movies_url())
            .query(&[("project", project_id)])
            .header("x-api-key", &self.config.api_key)
            .send()
            .await?;

        let body: Value = ensure_success(response).await?.json().await?;
        Ok(jobs_from_body(body))
    }

    /// Jobs of a project for display. `strict` surfaces failures instead of
    /// reporting them as an empty list.
    pub async fn project_jobs(
        &self,
        project_id: &str,
        strict: bool,
    ) -> Result<Vec<JobDescriptor>, RenderError> {
        if strict {
            self.try_list_jobs(project_id).await
        } else {
            Ok(self.list_jobs(project_id).await)
        }
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, RenderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(RenderError::Api {
        status: status.as_u16(),
        body,
    })
}

fn scene_count(movie: &Map<String, Value>) -> usize {
    movie
        .get("scenes")
        .and_then(Value::as_array)
        .map(Vec::len)
        .unwrap_or(0)
}

/// The list endpoint answers with a bare array, `{"movies": [...]}` or a
/// single `{"movie": {...}}` depending on API version.
fn jobs_from_body(body: Value) -> Vec<JobDescriptor> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            if let Some(Value::Array(items)) = map.remove("movies") {
                items
            } else if let Some(movie @ Value::Object(_)) = map.remove("movie") {
                vec![movie]
            } else {
                Vec::new()
            }
        }
        _ => Vec::new(),
    };

    items
        .into_iter()
        .filter_map(|item| match serde_json::from_value(item) {
            Ok(job) => Some(job),
            Err(e) => {
                warn!("[RENDER] Skipping unreadable job entry: {}", e);
                None
            }
        })
        .collect()
}
