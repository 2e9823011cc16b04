// src/scrape/pdf.rs

use crate::error::AppError;

const PDF_MAGIC: &[u8] = b"%PDF-";

/// Extracts the text of every page of an uploaded PDF.
///
/// Parsing is CPU-bound and runs on the blocking pool; a panic inside the
/// parser is reported as an unreadable file.
pub async fn extract_text(bytes: Vec<u8>) -> Result<String, AppError> {
    if !bytes.starts_with(PDF_MAGIC) {
        return Err(AppError::BadRequest("Uploaded file is not a PDF".to_string()));
    }

    let size = bytes.len();
    let text = tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
        .await
        .map_err(|e| {
            tracing::warn!(size, "PDF parser panicked: {:?}", e);
            AppError::Unprocessable("Could not read the PDF file".to_string())
        })?
        .map_err(|e| {
            tracing::warn!(size, "PDF text extraction failed: {:?}", e);
            AppError::Unprocessable("Could not read the PDF file".to_string())
        })?;

    tracing::info!(size, chars = text.len(), "PDF text extracted");
    Ok(text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_rejects_non_pdf() {
        let err = extract_text(b"hello world".to_vec()).await.unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }

    #[tokio::test]
    async fn test_truncated_pdf_is_unprocessable() {
        let err = extract_text(b"%PDF-1.4\n%%EOF".to_vec()).await.unwrap_err();
        assert!(matches!(err, AppError::Unprocessable(_)));
    }
}
