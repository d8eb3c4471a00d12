use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A persisted resume submission.
///
/// `ai_score` is `None` until the external scorer has produced a value for
/// this submission. The transition is one-way: once set it never reverts,
/// and a submission whose scoring failed stays pending permanently.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ResumeRow {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    /// Object-storage key of the uploaded file. Immutable once set.
    pub file_key: String,
    /// 0–100, assigned at most once.
    pub ai_score: Option<f64>,
    pub uploaded_at: DateTime<Utc>,
}
