use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::errors::AppError;
use crate::intake;
use crate::models::resume::ResumeRow;
use crate::state::AppState;
use crate::submission;

#[derive(Serialize)]
pub struct UploadResponse {
    pub success: bool,
    pub resume: ResumeRow,
}

/// POST /api/resumes
/// Multipart fields: `name`, `email`, `resume` (the file).
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<Json<UploadResponse>, AppError> {
    let parsed = intake::parse_submission(multipart).await?;
    let resume = submission::submit_resume(&state, parsed).await?;
    Ok(Json(UploadResponse {
        success: true,
        resume,
    }))
}

/// GET /api/resumes
/// Bare array, newest first. Polled by clients waiting on a pending score.
pub async fn handle_list_resumes(
    State(state): State<AppState>,
) -> Result<Json<Vec<ResumeRow>>, AppError> {
    let resumes = submission::list_resumes(&state.db).await?;
    Ok(Json(resumes))
}
