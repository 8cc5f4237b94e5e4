use thiserror::Error;

/// Application-level error type.
///
/// One variant per failure class in the pipeline. None of these are recovered
/// locally: any failure aborts the run and surfaces through `main` as a
/// non-zero exit with a diagnostic message.
#[derive(Debug, Error)]
pub enum AppError {
    /// The job source file was unreadable or contained malformed records.
    /// Raised before any embedding call is made.
    #[error("Job source error: {0}")]
    Parse(String),

    /// The embedding provider was unreachable or returned malformed data.
    #[error("Embedding error: {0}")]
    Embedding(String),

    /// Two vectors of differing lengths were compared. Fatal precondition
    /// failure — no ranking is produced.
    #[error("Dimension mismatch: expected {expected}-dimensional vector, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },

    /// The text-generation provider failed while producing a cover letter.
    #[error("Generation error: {0}")]
    Generation(String),

    /// The cover-letter artifact could not be persisted.
    #[error("Write error: {0}")]
    Write(String),

    /// Startup or configuration failure.
    #[error("Internal error: {0}")]
    Internal(#[from] anyhow::Error),
}
