//! Pipeline — the linear fetch → rank → report → generate flow.
//!
//! Written against the provider traits and an output writer so the whole run
//! is exercisable in tests with fakes and a byte buffer. There is no
//! partial-success mode: if ranking fails no letter is generated; if
//! generation fails the ranked list has already been printed but no artifact
//! exists.

use std::io::Write;

use tracing::info;

use crate::errors::AppError;
use crate::jobs::JobPosting;
use crate::letter::{generate_cover_letter, ArtifactSink, CompletionProvider};
use crate::ranking::{rank, EmbeddingProvider};

/// Ranks `jobs` against `resume`, prints the full ranking to `out`, and
/// generates one cover letter for the top match (skipped when the job list
/// is empty).
pub async fn run(
    embedder: &dyn EmbeddingProvider,
    completer: &dyn CompletionProvider,
    sink: &dyn ArtifactSink,
    resume: &str,
    jobs: &[JobPosting],
    out: &mut dyn Write,
) -> Result<(), AppError> {
    let ranked = rank(embedder, resume, jobs).await?;

    writeln!(out, "Top matches:").map_err(|e| AppError::Internal(e.into()))?;
    for m in &ranked {
        writeln!(out, "{}: {:.2}", m.title, m.score).map_err(|e| AppError::Internal(e.into()))?;
    }

    let Some(top) = ranked.first() else {
        info!("No jobs to match; skipping letter generation");
        return Ok(());
    };

    generate_cover_letter(completer, sink, resume, &top.title).await?;
    writeln!(out, "Generated cover letter for {}", top.title)
        .map_err(|e| AppError::Internal(e.into()))?;

    Ok(())
}
