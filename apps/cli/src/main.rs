mod config;
mod errors;
mod jobs;
mod letter;
mod openai_client;
mod pipeline;
mod ranking;

use anyhow::{Context, Result};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::letter::FileSink;
use crate::openai_client::OpenAiClient;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting jobmatch v{}", env!("CARGO_PKG_VERSION"));

    // Load inputs
    let jobs = jobs::fetch_jobs(&config.jobs_path)?;
    let resume = std::fs::read_to_string(&config.resume_path)
        .with_context(|| format!("Failed to read resume at '{}'", config.resume_path))?;

    // Initialize the OpenAI client (serves both embedding and completion calls)
    let client = OpenAiClient::new(config.openai_api_key.clone());
    info!(
        "OpenAI client initialized (embedding: {}, chat: {})",
        openai_client::EMBEDDING_MODEL,
        openai_client::CHAT_MODEL
    );

    let sink = FileSink::new(&config.drafts_dir);

    let mut stdout = std::io::stdout();
    pipeline::run(&client, &client, &sink, &resume, &jobs, &mut stdout).await?;

    Ok(())
}
