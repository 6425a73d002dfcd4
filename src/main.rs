// SYNOID Reel Entry Point
// Copyright (c) 2026 Xing_The_Creator | SYNOID

use synoid_reel::clients::{GeminiClient, RenderClient, StockMediaClient};
use synoid_reel::config::Config;
use synoid_reel::pipeline::{movie_document, Pipeline, PipelineOptions};
use synoid_reel::prompt::{load_schema_yaml, yaml_str_to_value, BUNDLED_MOVIE_SCHEMA};
use synoid_reel::schema::Movie;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dotenv::dotenv;
use std::path::PathBuf;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "synoid-reel")]
#[command(about = "SYNOID Reel: AI-scripted stock footage movies via JSON2Video", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Plan, source, script and submit a movie end to end
    Generate {
        /// Directory stock clips are downloaded to
        #[arg(short, long, default_value = "downloads")]
        download_dir: PathBuf,

        /// YAML movie schema to show the model (bundled one if omitted)
        #[arg(short, long)]
        schema: Option<PathBuf>,

        /// Pictures to fetch per search
        #[arg(long, default_value = "10")]
        photos: u32,

        /// Clips to fetch and describe per search
        #[arg(long, default_value = "1")]
        videos: u32,

        /// Target film length in seconds
        #[arg(long, default_value = "60")]
        duration: u32,
    },

    /// Submit a movie document from a JSON file
    Submit {
        /// Path to the movie JSON
        #[arg(short, long)]
        file: PathBuf,
    },

    /// List the render jobs of a project
    Status {
        #[arg(short, long)]
        project: String,

        /// Fail on API errors instead of printing an empty list
        #[arg(long)]
        strict: bool,
    },

    /// Print a YAML schema as {"schema": ...} JSON
    Schema {
        /// Schema file (bundled one if omitted)
        #[arg(short, long)]
        file: Option<PathBuf>,
    },

    /// Show the remaining Pexels quota
    Limits,

    /// Upload a local clip and print the model's description of it
    Describe {
        #[arg(short, long)]
        video: PathBuf,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv().ok();

    if std::env::var("RUST_LOG").is_err() {
        std::env::set_var("RUST_LOG", "info,hyper=warn,reqwest=warn");
    }
    tracing_subscriber::fmt::init();

    info!("--- SYNOID REEL v{} ---", env!("CARGO_PKG_VERSION"));

    let args = Cli::parse();

    // Ctrl+C stops any wait on remote processing.
    let cancel = CancellationToken::new();
    let ctrl_c = cancel.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            warn!("Interrupt received, cancelling...");
            ctrl_c.cancel();
        }
    });

    match args.command {
        Commands::Generate {
            download_dir,
            schema,
            photos,
            videos,
            duration,
        } => {
            let config = Config::from_env()?;
            let mut options = PipelineOptions::with_bundled_schema(download_dir)?;
            if let Some(path) = schema {
                options.schema = load_schema_yaml(&path)?;
            }
            options.photos_per_query = photos;
            options.videos_per_query = videos;
            options.film_duration_secs = duration;

            let report = Pipeline::new(config, options).run(&cancel).await?;
            info!("🎬 Topic: {}", report.plan.topic);
            println!("{}", serde_json::to_string_pretty(&report.job)?);
            for job in &report.jobs {
                println!(
                    "{} {}",
                    job.status.as_deref().unwrap_or("unknown"),
                    job.url.as_deref().unwrap_or("-")
                );
            }
        }
        Commands::Submit { file } => {
            let config = Config::from_env()?;
            let text = std::fs::read_to_string(&file)
                .with_context(|| format!("Reading {:?}", file))?;
            let value: serde_json::Value =
                serde_json::from_str(&text).with_context(|| format!("Parsing {:?}", file))?;
            let movie = Movie::from_value(movie_document(value))?;

            let job = RenderClient::new(config.render).submit(&movie).await?;
            println!("{}", serde_json::to_string_pretty(&job)?);
        }
        Commands::Status { project, strict } => {
            let config = Config::from_env()?;
            let jobs = RenderClient::new(config.render)
                .project_jobs(&project, strict)
                .await?;
            if jobs.is_empty() {
                info!("No jobs for project {}", project);
            }
            println!("{}", serde_json::to_string_pretty(&jobs)?);
        }
        Commands::Schema { file } => {
            let schema = match file {
                Some(path) => load_schema_yaml(&path)?,
                None => yaml_str_to_value(BUNDLED_MOVIE_SCHEMA)?,
            };
            println!("{}", serde_json::json!({ "schema": schema }));
        }
        Commands::Limits => {
            let config = Config::from_env()?;
            let limit = StockMediaClient::new(config.stock_media)
                .remaining_requests()
                .await?;
            println!(
                "{}/{} requests left, resets {}",
                limit.remaining,
                limit.limit,
                limit.reset.to_rfc3339()
            );
        }
        Commands::Describe { video } => {
            let config = Config::from_env()?;
            let download_dir = video
                .parent()
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from("."));
            let pipeline = Pipeline::from_clients(
                GeminiClient::new(config.gemini),
                StockMediaClient::new(config.stock_media),
                RenderClient::new(config.render),
                PipelineOptions::with_bundled_schema(download_dir)?,
            );
            let description = pipeline.describe_video(&video, &cancel).await?;
            println!("{}", description);
        }
    }

    Ok(())
}
