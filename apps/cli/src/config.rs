use anyhow::{Context, Result};

/// Application configuration loaded from environment variables.
/// Only the OpenAI key is required; paths fall back to the bundled samples.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub jobs_path: String,
    pub resume_path: String,
    pub drafts_dir: String,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            jobs_path: env_or("JOBS_PATH", "sample_data/jobs.json"),
            resume_path: env_or("RESUME_PATH", "sample_data/resume.txt"),
            drafts_dir: env_or("DRAFTS_DIR", "drafts"),
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}
