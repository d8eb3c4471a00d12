//! File Intake — turns a multipart request into a validated submission and
//! owns durable storage of the uploaded binary.

pub mod extract;
pub mod storage;

use axum::extract::Multipart;
use bytes::Bytes;

use crate::errors::AppError;

/// Document types the intake accepts, by filename extension.
const ALLOWED_EXTENSIONS: &[&str] = &["pdf", "doc", "docx", "txt"];

/// An uploaded resume file, held in memory until it is written to storage.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub filename: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    /// Lowercased filename extension, if any.
    pub fn extension(&self) -> Option<String> {
        self.filename
            .rsplit_once('.')
            .map(|(_, ext)| ext.to_ascii_lowercase())
    }
}

/// A parsed and validated resume submission, ready for the workflow.
#[derive(Debug)]
pub struct ResumeSubmission {
    pub name: String,
    pub email: String,
    pub file: UploadedFile,
}

/// Walks the multipart fields (`name`, `email`, `resume`) and validates them.
/// Performs no side effects, so a rejected request leaves no trace.
pub async fn parse_submission(mut multipart: Multipart) -> Result<ResumeSubmission, AppError> {
    let mut name: Option<String> = None;
    let mut email: Option<String> = None;
    let mut file: Option<UploadedFile> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed multipart body: {e}")))?
    {
        // The field name borrows from `field`, which the arms consume.
        let field_name = field.name().unwrap_or_default().to_string();
        match field_name.as_str() {
            "name" => {
                name = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable 'name' field: {e}"))
                })?);
            }
            "email" => {
                email = Some(field.text().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable 'email' field: {e}"))
                })?);
            }
            "resume" => {
                let filename = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or(AppError::MissingFile)?;
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Unreadable 'resume' field: {e}"))
                })?;
                file = Some(UploadedFile {
                    filename,
                    content_type,
                    bytes,
                });
            }
            // Unknown fields are ignored, matching lenient browser-form behavior.
            _ => {}
        }
    }

    let name = non_empty(name).ok_or_else(|| AppError::Validation("'name' is required".into()))?;
    let email =
        non_empty(email).ok_or_else(|| AppError::Validation("'email' is required".into()))?;
    let file = file.ok_or(AppError::MissingFile)?;

    if file.bytes.is_empty() {
        return Err(AppError::MissingFile);
    }
    if !is_allowed_document(&file.filename) {
        return Err(AppError::Validation(format!(
            "Unsupported document type '{}' (accepted: {})",
            file.filename,
            ALLOWED_EXTENSIONS.join(", ")
        )));
    }

    Ok(ResumeSubmission { name, email, file })
}

/// True when the filename carries one of the accepted document extensions.
pub fn is_allowed_document(filename: &str) -> bool {
    filename
        .rsplit_once('.')
        .map(|(stem, ext)| {
            !stem.is_empty() && ALLOWED_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str())
        })
        .unwrap_or(false)
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.map(|v| v.trim().to_string()).filter(|v| !v.is_empty())
}
