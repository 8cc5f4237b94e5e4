//! Job Source — loads job postings from a JSON file.
//!
//! Parsing and validation live entirely here: the ranker receives
//! already-valid records. A malformed file or a record with a missing or
//! empty field fails fast, before any embedding call is made.

use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;

/// A single job posting as supplied by the job source.
/// Identified by title; title uniqueness is assumed, not enforced.
#[derive(Debug, Clone, Deserialize)]
pub struct JobPosting {
    pub title: String,
    pub description: String,
}

/// Reads and validates the job postings file.
///
/// Expects a JSON array of objects, each with at least `title` and
/// `description` string fields. An empty array is valid and yields an
/// empty list.
pub fn fetch_jobs(path: &str) -> Result<Vec<JobPosting>, AppError> {
    let raw = std::fs::read_to_string(path)
        .map_err(|e| AppError::Parse(format!("cannot read '{path}': {e}")))?;

    let jobs: Vec<JobPosting> = serde_json::from_str(&raw)
        .map_err(|e| AppError::Parse(format!("malformed job source '{path}': {e}")))?;

    for (i, job) in jobs.iter().enumerate() {
        if job.title.trim().is_empty() {
            return Err(AppError::Parse(format!("job #{i} has an empty title")));
        }
        if job.description.trim().is_empty() {
            return Err(AppError::Parse(format!(
                "job #{i} ('{}') has an empty description",
                job.title
            )));
        }
    }

    info!("Loaded {} job postings from {path}", jobs.len());
    Ok(jobs)
}
