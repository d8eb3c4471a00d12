//! Scoring Client — the single point of entry for calls to the external
//! resume scoring service.
//!
//! The workflow treats every call as best-effort: errors from this module are
//! logged and mapped to a pending (`NULL`) score, never to a failed request.
//! One attempt per submission — no retry, no backoff.

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

const SCORE_PATH: &str = "/score";
const REQUEST_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Error)]
pub enum ScoreError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Scorer returned status {status}: {message}")]
    Api { status: u16, message: String },

    #[error("Malformed scorer response: {0}")]
    Malformed(String),

    #[error("Score {0} outside the 0-100 range")]
    OutOfRange(f64),
}

/// The scorer seam. Implement this to swap the backend without touching the
/// submission workflow; carried in `AppState` as `Arc<dyn ResumeScorer>`.
#[async_trait]
pub trait ResumeScorer: Send + Sync {
    /// Scores extracted resume text, returning a value in [0, 100].
    async fn score(&self, text: &str) -> Result<f64, ScoreError>;
}

#[derive(Debug, Serialize)]
struct ScoreRequest<'a> {
    text: &'a str,
}

/// Production scorer: POSTs extracted text to `{base_url}/score` and expects
/// a JSON body with a numeric `score` field.
#[derive(Clone)]
pub struct HttpScorer {
    client: Client,
    base_url: String,
}

impl HttpScorer {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
                .build()
                .expect("Failed to build HTTP client"),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl ResumeScorer for HttpScorer {
    async fn score(&self, text: &str) -> Result<f64, ScoreError> {
        let url = format!("{}{}", self.base_url, SCORE_PATH);

        let response = self
            .client
            .post(&url)
            .json(&ScoreRequest { text })
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ScoreError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body: serde_json::Value = response
            .json()
            .await
            .map_err(|e| ScoreError::Malformed(e.to_string()))?;
        let score = parse_score(&body)?;

        debug!("Scorer returned {score} for {} chars of text", text.len());
        Ok(score)
    }
}

/// Pulls the numeric `score` field out of a scorer response and enforces the
/// 0-100 contract. Anything else is a failure, not clamped.
pub fn parse_score(body: &serde_json::Value) -> Result<f64, ScoreError> {
    let score = body
        .get("score")
        .and_then(|v| v.as_f64())
        .ok_or_else(|| ScoreError::Malformed(format!("no numeric 'score' field in {body}")))?;

    if !(0.0..=100.0).contains(&score) {
        return Err(ScoreError::OutOfRange(score));
    }
    Ok(score)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_parse_score_accepts_floats_and_integers() {
        assert_eq!(parse_score(&json!({"score": 82.5})).unwrap(), 82.5);
        assert_eq!(parse_score(&json!({"score": 100})).unwrap(), 100.0);
        assert_eq!(parse_score(&json!({"score": 0})).unwrap(), 0.0);
    }

    #[test]
    fn test_parse_score_missing_field_is_malformed() {
        let err = parse_score(&json!({"result": 82.5})).unwrap_err();
        assert!(matches!(err, ScoreError::Malformed(_)));
    }

    #[test]
    fn test_parse_score_non_numeric_is_malformed() {
        let err = parse_score(&json!({"score": "82.5"})).unwrap_err();
        assert!(matches!(err, ScoreError::Malformed(_)));
    }

    #[test]
    fn test_parse_score_rejects_out_of_range_values() {
        assert!(matches!(
            parse_score(&json!({"score": 100.1})),
            Err(ScoreError::OutOfRange(_))
        ));
        assert!(matches!(
            parse_score(&json!({"score": -1.0})),
            Err(ScoreError::OutOfRange(_))
        ));
    }

    #[test]
    fn test_base_url_trailing_slash_is_normalized() {
        let scorer = HttpScorer::new("http://localhost:8000/".to_string());
        assert_eq!(scorer.base_url, "http://localhost:8000");
    }
}
