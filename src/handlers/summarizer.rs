// src/handlers/summarizer.rs

use std::sync::Arc;

use axum::{
    Json,
    extract::{
        Multipart, State,
        multipart::{MultipartError, MultipartRejection},
    },
    http::StatusCode,
    response::IntoResponse,
};

use crate::{
    ai::{LanguageModel, summarize},
    error::AppError,
    extract::ValidatedJson,
    models::ai::{SummarizeUrlRequest, SummaryResponse, language_or_default},
    scrape::{self, ContentFetcher, pdf},
    utils::text::TextSplitter,
};

/// Summarizes a web page or a YouTube video's transcript.
pub async fn summarize_url(
    State(llm): State<Arc<dyn LanguageModel>>,
    State(fetcher): State<Arc<dyn ContentFetcher>>,
    ValidatedJson(payload): ValidatedJson<SummarizeUrlRequest>,
) -> Result<impl IntoResponse, AppError> {
    let text = scrape::fetch_text(fetcher.as_ref(), &payload.url).await?;
    let summary = summarize::summarize_text(llm.as_ref(), &text, payload.language()).await?;

    Ok(Json(SummaryResponse { summary }))
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Uploaded file is too large".to_string())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Summarizes an uploaded PDF (multipart field `file`, optional `language`).
///
/// The text is split into overlapping chunks, each chunk is summarized, and
/// the partial summaries are combined in one final pass.
pub async fn summarize_pdf(
    State(llm): State<Arc<dyn LanguageModel>>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<impl IntoResponse, AppError> {
    let mut multipart = multipart?;
    let mut file: Option<Vec<u8>> = None;
    let mut language: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().map(str::to_string);
        match name.as_deref() {
            Some("file") => {
                let bytes = field.bytes().await.map_err(multipart_error)?;
                file = Some(bytes.to_vec());
            }
            Some("language") => {
                language = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {}
        }
    }

    let file = file
        .filter(|bytes| !bytes.is_empty())
        .ok_or_else(|| AppError::BadRequest("PDF file is required".to_string()))?;

    let text = pdf::extract_text(file).await?;
    let chunks = TextSplitter::default().split(&text);
    tracing::info!(chunks = chunks.len(), "Summarizing PDF");

    let summary =
        summarize::summarize_chunks(llm.as_ref(), &chunks, language_or_default(language.as_deref()))
            .await?;

    Ok(Json(SummaryResponse { summary }))
}
