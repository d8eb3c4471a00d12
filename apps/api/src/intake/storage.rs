use anyhow::Result;
use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

use crate::errors::AppError;
use crate::intake::UploadedFile;

/// Writes the uploaded binary to the resume bucket and returns its key.
///
/// This is the only durable write before the database insert; there is no
/// compensating delete if a later step fails, so the key embeds the
/// submission id to keep any orphaned object traceable.
pub async fn store_resume_file(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    resume_id: Uuid,
    file: &UploadedFile,
) -> Result<String, AppError> {
    let key = object_key(resume_id, &file.filename);
    let content_type = file
        .content_type
        .clone()
        .unwrap_or_else(|| content_type_for(&file.filename).to_string());

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(file.bytes.to_vec()))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::Storage(format!("S3 upload failed: {e}")))?;

    tracing::info!("Stored resume upload at s3://{bucket}/{key}");
    Ok(key)
}

/// Object key for a stored upload: `resumes/<id>/<sanitized filename>`.
pub fn object_key(resume_id: Uuid, filename: &str) -> String {
    format!("resumes/{}/{}", resume_id, sanitize_filename(filename))
}

/// Restricts a client-supplied filename to a safe character set for use in
/// object keys. Path separators and control characters become `-`.
pub fn sanitize_filename(filename: &str) -> String {
    filename
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '-'
            }
        })
        .collect()
}

/// Content type inferred from the filename extension when the client did not
/// send one.
pub fn content_type_for(filename: &str) -> &'static str {
    match filename.rsplit_once('.').map(|(_, ext)| ext.to_ascii_lowercase()) {
        Some(ext) if ext == "pdf" => "application/pdf",
        Some(ext) if ext == "doc" => "application/msword",
        Some(ext) if ext == "docx" => {
            "application/vnd.openxmlformats-officedocument.wordprocessingml.document"
        }
        Some(ext) if ext == "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}
