//! Submission Workflow — the ordered intake → scoring → persistence pipeline
//! behind `POST /api/resumes`, plus the listing query that polling clients
//! consume.
//!
//! Ordering contract, per request:
//!   1. durable file write (no fallback — failure aborts, no record),
//!   2. one best-effort scoring call (failure degrades to a pending score),
//!   3. record insert (failure aborts; the stored file becomes an orphan).
//! No transaction spans steps 1 and 3.

use sqlx::PgPool;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::{extract, storage, ResumeSubmission, UploadedFile};
use crate::models::resume::ResumeRow;
use crate::scoring::ResumeScorer;
use crate::state::AppState;

/// Runs the full submission workflow and returns the created record.
///
/// The caller has already validated the multipart body, so every error from
/// here on is a 5xx: either the file write or the record write failed.
pub async fn submit_resume(
    state: &AppState,
    submission: ResumeSubmission,
) -> Result<ResumeRow, AppError> {
    let resume_id = Uuid::new_v4();

    // Durable file write. The id is fixed before this point so the object key
    // stays traceable even if the record insert below never happens.
    let file_key = storage::store_resume_file(
        &state.s3,
        &state.config.s3_bucket,
        resume_id,
        &submission.file,
    )
    .await?;

    let ai_score = best_effort_score(state.scorer.as_ref(), &submission.file).await;

    let row = insert_resume(
        &state.db,
        resume_id,
        &submission.name,
        &submission.email,
        &file_key,
        ai_score,
    )
    .await?;

    info!(
        "Created submission {} for {} (score: {})",
        row.id,
        row.email,
        row.ai_score
            .map(|s| format!("{s:.1}"))
            .unwrap_or_else(|| "pending".to_string())
    );
    Ok(row)
}

/// Extracts text and asks the scorer for a value, swallowing every failure.
///
/// A submission with an unreachable scorer, a malformed response, or an
/// unextractable document is still a successful submission — it just stays
/// pending until something out of band re-scores it (nothing in this service
/// does).
async fn best_effort_score(scorer: &dyn ResumeScorer, file: &UploadedFile) -> Option<f64> {
    let owned = file.clone();
    let text = match tokio::task::spawn_blocking(move || extract::extract_text(&owned)).await {
        Ok(Ok(text)) => text,
        Ok(Err(e)) => {
            warn!("Skipping scoring, no text extracted: {e}");
            return None;
        }
        Err(e) => {
            warn!("Text extraction task failed: {e}");
            return None;
        }
    };

    match scorer.score(&text).await {
        Ok(score) => Some(score),
        Err(e) => {
            warn!("Resume scoring unavailable: {e}");
            None
        }
    }
}

/// Inserts the submission record, generating nothing: the id and file key are
/// already fixed by the workflow. `uploaded_at` comes from the database clock.
pub async fn insert_resume(
    pool: &PgPool,
    id: Uuid,
    name: &str,
    email: &str,
    file_key: &str,
    ai_score: Option<f64>,
) -> Result<ResumeRow, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>(
        r#"
        INSERT INTO resumes (id, name, email, file_key, ai_score)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING *
        "#,
    )
    .bind(id)
    .bind(name)
    .bind(email)
    .bind(file_key)
    .bind(ai_score)
    .fetch_one(pool)
    .await
}

/// All submissions, newest first. Pure read; called repeatedly by polling
/// clients, so it must stay side-effect free.
pub async fn list_resumes(pool: &PgPool) -> Result<Vec<ResumeRow>, sqlx::Error> {
    sqlx::query_as::<_, ResumeRow>("SELECT * FROM resumes ORDER BY uploaded_at DESC")
        .fetch_all(pool)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scoring::ScoreError;
    use async_trait::async_trait;
    use bytes::Bytes;
    use std::sync::Mutex;

    fn text_upload(content: &'static [u8]) -> UploadedFile {
        UploadedFile {
            filename: "resume.txt".to_string(),
            content_type: Some("text/plain".to_string()),
            bytes: Bytes::from_static(content),
        }
    }

    /// Always answers with a fixed score, recording the text it was given.
    struct FixedScorer {
        value: f64,
        seen: Mutex<Vec<String>>,
    }

    impl FixedScorer {
        fn new(value: f64) -> Self {
            Self {
                value,
                seen: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl ResumeScorer for FixedScorer {
        async fn score(&self, text: &str) -> Result<f64, ScoreError> {
            self.seen.lock().unwrap().push(text.to_string());
            Ok(self.value)
        }
    }

    /// Simulates the scoring service being down.
    struct UnreachableScorer;

    #[async_trait]
    impl ResumeScorer for UnreachableScorer {
        async fn score(&self, _text: &str) -> Result<f64, ScoreError> {
            Err(ScoreError::Api {
                status: 503,
                message: "connection refused".to_string(),
            })
        }
    }

    #[tokio::test]
    async fn test_successful_scoring_yields_a_value() {
        let scorer = FixedScorer::new(82.5);
        let file = text_upload(b"Alice. Rust, distributed systems, five years.");

        let score = best_effort_score(&scorer, &file).await;
        assert_eq!(score, Some(82.5));
    }

    #[tokio::test]
    async fn test_scorer_receives_the_extracted_text() {
        let scorer = FixedScorer::new(50.0);
        let file = text_upload(b"  Rust engineer  ");

        best_effort_score(&scorer, &file).await;

        let seen = scorer.seen.lock().unwrap();
        assert_eq!(seen.as_slice(), ["Rust engineer"]);
    }

    #[tokio::test]
    async fn test_unreachable_scorer_degrades_to_pending() {
        let file = text_upload(b"Bob. Embedded C, kernels.");

        let score = best_effort_score(&UnreachableScorer, &file).await;
        assert_eq!(score, None);
    }

    #[tokio::test]
    async fn test_unextractable_document_degrades_to_pending() {
        // .docx has no extractor; the scorer must never be called.
        let scorer = FixedScorer::new(99.0);
        let file = UploadedFile {
            filename: "resume.docx".to_string(),
            content_type: None,
            bytes: Bytes::from_static(b"PK\x03\x04"),
        };

        let score = best_effort_score(&scorer, &file).await;
        assert_eq!(score, None);
        assert!(scorer.seen.lock().unwrap().is_empty());
    }
}
