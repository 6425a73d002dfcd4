// SYNOID Reel Stock Media Client
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Pexels photo and video search, lookup by id, rate-limit inspection and
// asset download.

use crate::config::StockMediaConfig;
use chrono::{DateTime, TimeZone, Utc};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::{debug, info};
use url::Url;

#[derive(Debug, thiserror::Error)]
pub enum StockMediaError {
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Pexels API error ({status}): {body}")]
    Api { status: u16, body: String },

    #[error("rate-limit header {0} missing or malformed")]
    RateLimitHeader(&'static str),

    #[error("invalid asset URL {0}")]
    InvalidUrl(String),

    #[error("failed to write asset: {0}")]
    Io(#[from] std::io::Error),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoSources {
    pub original: String,
    pub large2x: String,
    pub large: String,
    pub medium: String,
    pub small: String,
    pub portrait: String,
    pub landscape: String,
    pub tiny: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Photo {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub url: String,
    pub photographer: String,
    pub photographer_url: String,
    pub avg_color: Option<String>,
    pub src: PhotoSources,
    pub alt: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoFile {
    pub id: u64,
    /// `hd`, `sd`, `uhd` or null.
    pub quality: Option<String>,
    pub file_type: String,
    pub width: Option<u32>,
    pub height: Option<u32>,
    pub fps: Option<f64>,
    pub link: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoAuthor {
    pub id: u64,
    pub name: String,
    pub url: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StockVideo {
    pub id: u64,
    pub width: u32,
    pub height: u32,
    pub url: String,
    /// Preview still.
    pub image: String,
    /// Length in seconds.
    pub duration: u32,
    pub user: VideoAuthor,
    pub video_files: Vec<VideoFile>,
}

impl StockVideo {
    /// First rendition in the listing, which is what Pexels ranks highest.
    pub fn primary_file(&self) -> Option<&VideoFile> {
        self.video_files.first()
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct PhotoPage {
    pub page: u32,
    pub per_page: u32,
    pub total_results: u64,
    pub next_page: Option<String>,
    pub photos: Vec<Photo>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct VideoPage {
    pub page: u32,
    pub per_page: u32,
    pub total_results: u64,
    pub next_page: Option<String>,
    pub videos: Vec<StockVideo>,
}

/// Monthly request quota as reported by the `X-Ratelimit-*` headers.
#[derive(Debug, Clone, PartialEq)]
pub struct RateLimit {
    pub limit: u64,
    pub remaining: u64,
    pub reset: DateTime<Utc>,
}

impl RateLimit {
    pub fn from_headers(headers: &reqwest::header::HeaderMap) -> Result<Self, StockMediaError> {
        let number = |name: &'static str| -> Result<u64, StockMediaError> {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.trim().parse::<u64>().ok())
                .ok_or(StockMediaError::RateLimitHeader(name))
        };

        let limit = number("X-Ratelimit-Limit")?;
        let remaining = number("X-Ratelimit-Remaining")?;
        let reset_secs = number("X-Ratelimit-Reset")?;
        let reset = i64::try_from(reset_secs)
            .ok()
            .and_then(|secs| Utc.timestamp_opt(secs, 0).single())
            .ok_or(StockMediaError::RateLimitHeader("X-Ratelimit-Reset"))?;

        Ok(Self {
            limit,
            remaining,
            reset,
        })
    }
}

pub struct StockMediaClient {
    client: reqwest::Client,
    config: StockMediaConfig,
}

impl StockMediaClient {
    pub fn new(config: StockMediaConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }

    pub fn with_client(client: reqwest::Client, config: StockMediaConfig) -> Self {
        Self { client, config }
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }

    pub async fn search_photos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<PhotoPage, StockMediaError> {
        info!("[PEXELS] Searching photos: '{}' (page {}, {} per page)", query, page, per_page);
        self.get_json(
            &self.endpoint("v1/search"),
            &[("query", query.to_string()), ("page", page.to_string()), ("per_page", per_page.to_string())],
        )
        .await
    }

    pub async fn get_photo(&self, photo_id: u64) -> Result<Photo, StockMediaError> {
        self.get_json(&self.endpoint(&format!("v1/photos/{}", photo_id)), &[])
            .await
    }

    pub async fn search_videos(
        &self,
        query: &str,
        page: u32,
        per_page: u32,
    ) -> Result<VideoPage, StockMediaError> {
        info!("[PEXELS] Searching videos: '{}' (page {}, {} per page)", query, page, per_page);
        self.get_json(
            &self.endpoint("videos/search"),
            &[("query", query.to_string()), ("page", page.to_string()), ("per_page", per_page.to_string())],
        )
        .await
    }

    pub async fn get_video(&self, video_id: u64) -> Result<StockVideo, StockMediaError> {
        self.get_json(&self.endpoint(&format!("videos/videos/{}", video_id)), &[])
            .await
    }

    /// Current quota. Costs one request of it.
    pub async fn remaining_requests(&self) -> Result<RateLimit, StockMediaError> {
        let response = self
            .client
            .get(self.endpoint("v1/curated"))
            .query(&[("per_page", "1")])
            .header("Authorization", &self.config.api_key)
            .send()
            .await?;
        let response = ensure_success(response).await?;
        RateLimit::from_headers(response.headers())
    }

    /// Fetch an asset into `dir`, named after the last segment of its URL.
    pub async fn download(&self, link: &str, dir: &Path) -> Result<PathBuf, StockMediaError> {
        let name = file_name_from_url(link)?;
        let target = dir.join(name);

        debug!("[PEXELS] Downloading {} -> {:?}", link, target);
        let response = ensure_success(self.client.get(link).send().await?).await?;
        let bytes = response.bytes().await?;
        tokio::fs::create_dir_all(dir).await?;
        tokio::fs::write(&target, &bytes).await?;

        info!("[PEXELS] Saved {:?} ({:.2} MB)", target, bytes.len() as f64 / 1_048_576.0);
        Ok(target)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, StockMediaError> {
        let response = self
            .client
            .get(url)
            .query(query)
            .header("Authorization", &self.config.api_key)
            .send()
            .await?;
        Ok(ensure_success(response).await?.json().await?)
    }
}

async fn ensure_success(response: reqwest::Response) -> Result<reqwest::Response, StockMediaError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(StockMediaError::Api {
        status: status.as_u16(),
        body,
    })
}

/// Last non-empty path segment of `link`.
pub fn file_name_from_url(link: &str) -> Result<String, StockMediaError> {
    let parsed = Url::parse(link).map_err(|_| StockMediaError::InvalidUrl(link.to_string()))?;
    parsed
        .path_segments()
        .and_then(|segments| segments.filter(|s| !s.is_empty()).last())
        .map(str::to_string)
        .ok_or_else(|| StockMediaError::InvalidUrl(link.to_string()))
}
