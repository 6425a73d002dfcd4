// SYNOID Reel Generation Pipeline
// Copyright (c) 2026 Xing_The_Creator | SYNOID
//
// Topic -> stock media -> scenario -> render job. Each step is a method so
// the CLI can run the whole chain or a single part of it.

use crate::clients::{GeminiClient, JobDescriptor, RenderClient, StockMediaClient};
use crate::config::Config;
use crate::prompt::{yaml_str_to_value, PromptTask, BUNDLED_MOVIE_SCHEMA};
use crate::schema::Movie;
use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

pub const ASSISTANT_ROLE: &str =
    "You are a creative AI assistant that helps produce short films.";

/// Answer of the topic step.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopicPlan {
    pub topic: String,
    /// Space separated Pexels query for pictures.
    #[serde(alias = "picures_key_words", alias = "pictures_key_words")]
    pub picture_keywords: String,
    #[serde(alias = "movies_key_words")]
    pub movie_keywords: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PictureSource {
    pub url: String,
    pub alt: Option<String>,
    pub width: u32,
    pub height: u32,
    pub avg_color: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MovieSource {
    pub url: String,
    pub width: u32,
    pub height: u32,
    pub description: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Sources {
    pub pictures: Vec<PictureSource>,
    pub movies: Vec<MovieSource>,
}

#[derive(Debug, Clone)]
pub struct PipelineOptions {
    pub photos_per_query: u32,
    pub videos_per_query: u32,
    pub film_duration_secs: u32,
    /// Where stock clips are saved before upload.
    pub download_dir: PathBuf,
    /// Movie document shape shown to the model.
    pub schema: Value,
}

impl PipelineOptions {
    pub fn with_bundled_schema(download_dir: impl Into<PathBuf>) -> Result<Self> {
        let schema = yaml_str_to_value(BUNDLED_MOVIE_SCHEMA).context("Bundled movie schema")?;
        Ok(Self {
            photos_per_query: 10,
            videos_per_query: 1,
            film_duration_secs: 60,
            download_dir: download_dir.into(),
            schema,
        })
    }
}

/// What a full run produced.
#[derive(Debug, Clone)]
pub struct GenerationReport {
    pub plan: TopicPlan,
    pub sources: Sources,
    pub movie: Movie,
    pub comments: Option<String>,
    pub job: JobDescriptor,
    pub jobs: Vec<JobDescriptor>,
}

/// The model sometimes wraps the document in a top-level `movie` key.
pub fn movie_document(value: Value) -> Value {
    match value {
        Value::Object(mut map) if map.contains_key("movie") => {
            map.remove("movie").unwrap_or(Value::Null)
        }
        other => other,
    }
}

pub struct Pipeline {
    gemini: GeminiClient,
    stock: StockMediaClient,
    render: RenderClient,
    options: PipelineOptions,
}

impl Pipeline {
    pub fn new(config: Config, options: PipelineOptions) -> Self {
        Self {
            gemini: GeminiClient::new(config.gemini),
            stock: StockMediaClient::new(config.stock_media),
            render: RenderClient::new(config.render),
            options,
        }
    }

    pub fn from_clients(
        gemini: GeminiClient,
        stock: StockMediaClient,
        render: RenderClient,
        options: PipelineOptions,
    ) -> Self {
        Self {
            gemini,
            stock,
            render,
            options,
        }
    }

    pub async fn plan_topic(&self) -> Result<TopicPlan> {
        let task = PromptTask::new(
            ASSISTANT_ROLE,
            "topic and key words",
            format!(
                "Come up with a topic for a short film ({} seconds) and list keywords to search \
                 the Pexels stock library with. The film should be engaging and easy to illustrate. \
                 Keywords should be varied and cover different aspects of the topic.",
                self.options.film_duration_secs
            ),
        )
        .with_response_schema(json!({
            "topic": "[topic]",
            "picture_keywords": "word1 word2 word3",
            "movie_keywords": "word1 word2 word3",
        }));

        let answer = self.gemini.send_prompt(&task.to_prompt()?).await?;
        let plan: TopicPlan =
            serde_json::from_value(answer).context("Topic answer does not match the requested shape")?;
        info!("[PIPELINE] Topic: {}", plan.topic);
        Ok(plan)
    }

    pub async fn collect_pictures(&self, keywords: &str) -> Result<Vec<PictureSource>> {
        let page = self
            .stock
            .search_photos(keywords, 1, self.options.photos_per_query)
            .await?;
        Ok(page
            .photos
            .into_iter()
            .map(|photo| PictureSource {
                url: photo.src.original,
                alt: photo.alt,
                width: photo.width,
                height: photo.height,
                avg_color: photo.avg_color,
            })
            .collect())
    }

    /// Search clips, download each one and have the model describe it.
    pub async fn collect_movies(
        &self,
        keywords: &str,
        cancel: &CancellationToken,
    ) -> Result<Vec<MovieSource>> {
        let page = self
            .stock
            .search_videos(keywords, 1, self.options.videos_per_query)
            .await?;

        let mut movies = Vec::with_capacity(page.videos.len());
        for video in page.videos {
            let Some(file) = video.primary_file() else {
                warn!("[PIPELINE] Video {} has no downloadable file, skipping", video.id);
                continue;
            };
            let link = file.link.clone();
            let path = self
                .stock
                .download(&link, &self.options.download_dir)
                .await
                .with_context(|| format!("Downloading {}", link))?;
            let description = self.describe_video(&path, cancel).await?;
            movies.push(MovieSource {
                url: link,
                width: video.width,
                height: video.height,
                description,
            });
        }
        Ok(movies)
    }

    /// Upload a local clip and ask the model what happens in it.
    pub async fn describe_video(&self, path: &Path, cancel: &CancellationToken) -> Result<String> {
        let file = self
            .gemini
            .send_file(path, cancel)
            .await
            .with_context(|| format!("Uploading {:?}", path))?;

        let task = PromptTask::new(
            ASSISTANT_ROLE,
            "Describe video",
            "Describe the content and style of the video, what is happening, camera position and movement.",
        )
        .with_response_schema(json!({ "description": "[video description]" }));

        let answer = self
            .gemini
            .send_prompt_with_file(&file, &task.to_prompt()?)
            .await?;
        answer
            .get("description")
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| anyhow!("Video description missing from answer: {}", answer))
    }

    /// Ask the model for the movie document and load it into the model.
    pub async fn write_scenario(
        &self,
        topic: &str,
        sources: &Sources,
    ) -> Result<(Movie, Option<String>)> {
        let task = PromptTask::new(
            ASSISTANT_ROLE,
            "Create JSON for json2video API",
            format!(
                "Use the materials and descriptions from the sources to write a film scenario \
                 about {}. Give every element a size matching the film size, but do not stretch \
                 pictures; zoom or crop where needed. For each source used, add its alt text to \
                 the scene as a text element.",
                topic
            ),
        )
        .with_context("sources", serde_json::to_value(sources)?)
        .with_context("film_duration_in_seconds", json!(self.options.film_duration_secs))
        .with_context("schema_to_generate_json", json!({ "schema": self.options.schema }))
        .with_response_schema(json!({
            "movie_document": "[generated json]",
            "comments": "comment from AI",
        }));

        let answer = self.gemini.send_prompt(&task.to_prompt()?).await?;
        scenario_from_answer(answer)
    }

    pub async fn run(&self, cancel: &CancellationToken) -> Result<GenerationReport> {
        let plan = self.plan_topic().await.context("Topic step")?;

        let pictures = self
            .collect_pictures(&plan.picture_keywords)
            .await
            .context("Picture search")?;
        let movies = self
            .collect_movies(&plan.movie_keywords, cancel)
            .await
            .context("Video sources")?;
        let sources = Sources { pictures, movies };
        info!(
            "[PIPELINE] Collected {} pictures and {} clips",
            sources.pictures.len(),
            sources.movies.len()
        );

        if cancel.is_cancelled() {
            return Err(anyhow!("Cancelled before the scenario step"));
        }

        let (movie, comments) = self
            .write_scenario(&plan.topic, &sources)
            .await
            .context("Scenario step")?;
        if let Some(comments) = &comments {
            info!("[PIPELINE] Model comments: {}", comments);
        }

        let job = self.render.submit(&movie).await.context("Submitting movie")?;
        let jobs = match job.project.as_deref() {
            Some(project) => self.render.list_jobs(project).await,
            None => Vec::new(),
        };

        Ok(GenerationReport {
            plan,
            sources,
            movie,
            comments,
            job,
            jobs,
        })
    }
}

/// Pull the movie document and comments out of the scenario answer.
pub fn scenario_from_answer(answer: Value) -> Result<(Movie, Option<String>)> {
    let comments = answer
        .get("comments")
        .and_then(Value::as_str)
        .map(str::to_string);

    let document = match answer {
        Value::Object(mut map) => match map
            .remove("movie_document")
            .or_else(|| map.remove("schemaVideo"))
        {
            Some(document) => document,
            None => Value::Object(map),
        },
        other => other,
    };

    let movie = Movie::from_value(movie_document(document)).context("Loading movie document")?;
    info!(
        "[PIPELINE] Scenario has {} scenes ({:.1}s known length)",
        movie.scenes.len(),
        movie.known_duration()
    );
    Ok((movie, comments))
}
