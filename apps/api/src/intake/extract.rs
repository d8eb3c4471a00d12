use anyhow::{anyhow, bail, Result};

use crate::intake::UploadedFile;

/// Extracts plain text from an uploaded document for scoring.
///
/// PDF extraction is CPU-bound; callers on the async runtime should wrap this
/// in `tokio::task::spawn_blocking`. Failure here only degrades the
/// submission to "score unavailable" — it never rejects the upload.
pub fn extract_text(file: &UploadedFile) -> Result<String> {
    let text = match file.extension().as_deref() {
        Some("pdf") => pdf_extract::extract_text_from_mem(&file.bytes)
            .map_err(|e| anyhow!("PDF text extraction failed: {e}"))?,
        Some("txt") => String::from_utf8_lossy(&file.bytes).into_owned(),
        Some(ext) => bail!("No text extractor for .{ext} documents"),
        None => bail!("Upload has no filename extension"),
    };

    let text = text.trim().to_string();
    if text.is_empty() {
        bail!("Document contained no extractable text");
    }
    Ok(text)
}
