//! Letter Generator — produces a cover letter for one job title and persists
//! it as an artifact.
//!
//! Fire-and-forget from the pipeline's perspective: the caller never reads
//! the letter back, it only needs the generation to have run once for the
//! top-ranked match.

use std::path::PathBuf;

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;

pub mod prompts;

use prompts::{COVER_LETTER_PROMPT_TEMPLATE, COVER_LETTER_SYSTEM};

/// Produces natural-language text from a prompt.
///
/// Implemented by `OpenAiClient` in production and by fakes in tests.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    async fn complete(&self, prompt: &str, system: &str) -> Result<String, AppError>;
}

/// Destination for generated artifacts. Swappable so the drafts directory is
/// not baked into the generation logic.
pub trait ArtifactSink: Send + Sync {
    fn persist(&self, name: &str, content: &str) -> Result<(), AppError>;
}

/// Writes artifacts as files under a drafts directory, creating it if absent.
pub struct FileSink {
    dir: PathBuf,
}

impl FileSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }
}

impl ArtifactSink for FileSink {
    fn persist(&self, name: &str, content: &str) -> Result<(), AppError> {
        std::fs::create_dir_all(&self.dir)
            .map_err(|e| AppError::Write(format!("cannot create '{}': {e}", self.dir.display())))?;

        let path = self.dir.join(name);
        std::fs::write(&path, content)
            .map_err(|e| AppError::Write(format!("cannot write '{}': {e}", path.display())))
    }
}

/// Derives the artifact file name from a job title.
///
/// Known gap carried from the original behavior: only spaces are replaced;
/// other filesystem-unsafe characters in titles pass through untouched.
pub fn artifact_name(title: &str) -> String {
    format!("{}_letter.txt", title.replace(' ', "_"))
}

/// Generates a cover letter for `title` and persists it via the sink.
pub async fn generate_cover_letter(
    provider: &dyn CompletionProvider,
    sink: &dyn ArtifactSink,
    resume: &str,
    title: &str,
) -> Result<(), AppError> {
    let prompt = COVER_LETTER_PROMPT_TEMPLATE
        .replace("{job_title}", title)
        .replace("{resume}", resume);

    let text = provider.complete(&prompt, COVER_LETTER_SYSTEM).await?;

    let name = artifact_name(title);
    sink.persist(&name, &text)?;
    info!("Cover letter persisted as {name}");

    Ok(())
}
