//! Similarity Ranker — produces a total ordering of job postings by semantic
//! closeness to a resume.
//!
//! The embedding fetch (network) is separated from the ordering logic (pure),
//! so the ranking and tie-break behavior is testable with synthetic vectors.
//!
//! Similarity is the raw inner product of the provider's vectors — no
//! normalization is applied, so vector magnitude contributes to the score.
//! This is NOT cosine similarity; do not normalize without revisiting the
//! ranking semantics.

use async_trait::async_trait;
use tracing::info;

use crate::errors::AppError;
use crate::jobs::JobPosting;

/// Converts text into a fixed-length embedding vector.
///
/// Implemented by `OpenAiClient` in production and by deterministic fakes in
/// tests. All vectors compared in one ranking call must share one
/// dimensionality.
#[async_trait]
pub trait EmbeddingProvider: Send + Sync {
    async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError>;
}

/// A job title paired with its similarity score. Derived, ephemeral —
/// produced fresh on each ranking call.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedMatch {
    pub title: String,
    pub score: f32,
}

/// Inner product of two equal-length vectors.
pub fn dot_product(a: &[f32], b: &[f32]) -> Result<f32, AppError> {
    if a.len() != b.len() {
        return Err(AppError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }
    Ok(a.iter().zip(b.iter()).map(|(x, y)| x * y).sum())
}

/// Pure ordering step: given the resume vector and each job's (title, vector)
/// pair, returns the full ranking sorted by descending score.
///
/// Tie-break: the sort is stable, so jobs with equal scores keep their input
/// order.
pub fn order_by_similarity(
    resume_vec: &[f32],
    job_vecs: Vec<(String, Vec<f32>)>,
) -> Result<Vec<RankedMatch>, AppError> {
    let mut ranked = job_vecs
        .into_iter()
        .map(|(title, vec)| {
            let score = dot_product(resume_vec, &vec)?;
            Ok(RankedMatch { title, score })
        })
        .collect::<Result<Vec<_>, AppError>>()?;

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    Ok(ranked)
}

/// Ranks all jobs by similarity to the resume.
///
/// Makes N+1 sequential embedding calls (one for the resume, one per job
/// description); scores are matched back to jobs by index, so the final
/// ordering never depends on call completion order. An empty job list yields
/// an empty ranking.
pub async fn rank(
    provider: &dyn EmbeddingProvider,
    resume: &str,
    jobs: &[JobPosting],
) -> Result<Vec<RankedMatch>, AppError> {
    let resume_vec = provider.embed(resume).await?;
    info!(
        "Resume embedded ({} dimensions); embedding {} job descriptions",
        resume_vec.len(),
        jobs.len()
    );

    let mut job_vecs = Vec::with_capacity(jobs.len());
    for job in jobs {
        let vec = provider.embed(&job.description).await?;
        job_vecs.push((job.title.clone(), vec));
    }

    order_by_similarity(&resume_vec, job_vecs)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    /// Deterministic fake: looks up vectors by exact text.
    struct FakeEmbedder {
        vectors: HashMap<String, Vec<f32>>,
    }

    impl FakeEmbedder {
        fn new(entries: &[(&str, Vec<f32>)]) -> Self {
            Self {
                vectors: entries
                    .iter()
                    .map(|(text, vec)| (text.to_string(), vec.clone()))
                    .collect(),
            }
        }
    }

    #[async_trait]
    impl EmbeddingProvider for FakeEmbedder {
        async fn embed(&self, text: &str) -> Result<Vec<f32>, AppError> {
            self.vectors
                .get(text)
                .cloned()
                .ok_or_else(|| AppError::Embedding(format!("no fake vector for '{text}'")))
        }
    }

    fn job(title: &str, description: &str) -> JobPosting {
        JobPosting {
            title: title.to_string(),
            description: description.to_string(),
        }
    }

    #[test]
    fn test_dot_product_basic() {
        let score = dot_product(&[1.0, 2.0, 3.0], &[4.0, 5.0, 6.0]).unwrap();
        assert_eq!(score, 32.0);
    }

    #[test]
    fn test_dot_product_dimension_mismatch() {
        let err = dot_product(&[1.0, 2.0], &[1.0, 2.0, 3.0]).unwrap_err();
        assert!(matches!(
            err,
            AppError::DimensionMismatch {
                expected: 2,
                actual: 3
            }
        ));
    }

    #[test]
    fn test_dot_product_is_magnitude_sensitive() {
        // Same direction, doubled magnitude → doubled score. Raw inner
        // product, not cosine.
        let a = dot_product(&[1.0, 0.0], &[1.0, 0.0]).unwrap();
        let b = dot_product(&[1.0, 0.0], &[2.0, 0.0]).unwrap();
        assert_eq!(b, 2.0 * a);
    }

    #[test]
    fn test_order_is_descending_and_a_permutation() {
        let resume = vec![1.0, 1.0];
        let ranked = order_by_similarity(
            &resume,
            vec![
                ("low".to_string(), vec![0.1, 0.1]),
                ("high".to_string(), vec![5.0, 5.0]),
                ("mid".to_string(), vec![1.0, 1.0]),
            ],
        )
        .unwrap();

        assert_eq!(ranked.len(), 3);
        let titles: Vec<&str> = ranked.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["high", "mid", "low"]);
        for pair in ranked.windows(2) {
            assert!(pair[0].score >= pair[1].score);
        }
    }

    #[test]
    fn test_equal_scores_keep_input_order() {
        let resume = vec![1.0, 0.0];
        let ranked = order_by_similarity(
            &resume,
            vec![
                ("first".to_string(), vec![2.0, 0.0]),
                ("second".to_string(), vec![2.0, 9.0]), // same dot product
                ("third".to_string(), vec![2.0, -3.0]), // same dot product
            ],
        )
        .unwrap();

        let titles: Vec<&str> = ranked.iter().map(|m| m.title.as_str()).collect();
        assert_eq!(titles, vec!["first", "second", "third"]);
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[1].score, ranked[2].score);
    }

    #[test]
    fn test_order_rejects_mismatched_job_vector() {
        let err = order_by_similarity(
            &[1.0, 0.0],
            vec![("bad".to_string(), vec![1.0, 2.0, 3.0])],
        )
        .unwrap_err();
        assert!(matches!(err, AppError::DimensionMismatch { .. }));
    }

    #[tokio::test]
    async fn test_rank_empty_job_list_is_empty_ranking() {
        let provider = FakeEmbedder::new(&[("resume text", vec![1.0, 0.0])]);
        let ranked = rank(&provider, "resume text", &[]).await.unwrap();
        assert!(ranked.is_empty());
    }

    #[tokio::test]
    async fn test_rank_orders_jobs_by_similarity() {
        let provider = FakeEmbedder::new(&[
            ("backend resume", vec![1.0, 0.0]),
            ("distributed systems backend role", vec![0.9, 0.1]),
            ("Adobe Photoshop and branding", vec![0.0, 1.0]),
        ]);
        let jobs = vec![
            job("Graphic Designer", "Adobe Photoshop and branding"),
            job("Backend Engineer", "distributed systems backend role"),
        ];

        let ranked = rank(&provider, "backend resume", &jobs).await.unwrap();
        assert_eq!(ranked.len(), 2);
        assert_eq!(ranked[0].title, "Backend Engineer");
        assert_eq!(ranked[1].title, "Graphic Designer");
        assert!(ranked[0].score > ranked[1].score);
    }

    #[tokio::test]
    async fn test_rank_identical_descriptions_get_equal_scores() {
        let provider = FakeEmbedder::new(&[
            ("resume", vec![1.0, 2.0]),
            ("same description", vec![0.5, 0.5]),
        ]);
        let jobs = vec![
            job("Role A", "same description"),
            job("Role B", "same description"),
        ];

        let ranked = rank(&provider, "resume", &jobs).await.unwrap();
        assert_eq!(ranked[0].score, ranked[1].score);
        assert_eq!(ranked[0].title, "Role A"); // stable tie-break
    }

    #[tokio::test]
    async fn test_rank_surfaces_dimension_mismatch() {
        let provider = FakeEmbedder::new(&[
            ("resume", vec![1.0, 2.0]),
            ("short vector role", vec![1.0]),
        ]);
        let jobs = vec![job("Oddball", "short vector role")];

        let err = rank(&provider, "resume", &jobs).await.unwrap_err();
        assert!(matches!(err, AppError::DimensionMismatch { .. }));
    }
}
