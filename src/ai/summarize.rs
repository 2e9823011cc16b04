// src/ai/summarize.rs

use crate::{
    ai::{LanguageModel, prompts},
    error::AppError,
};

/// "Stuff" chain: the whole text goes into one prompt.
pub async fn summarize_text(
    llm: &dyn LanguageModel,
    text: &str,
    language: &str,
) -> Result<String, AppError> {
    let summary = llm.complete(&prompts::summary_prompt(text, language)).await?;
    Ok(summary.trim().to_string())
}

/// Map-reduce chain: summarize every chunk, then combine the partial
/// summaries into a titled, numbered summary in `language`.
pub async fn summarize_chunks(
    llm: &dyn LanguageModel,
    chunks: &[String],
    language: &str,
) -> Result<String, AppError> {
    if chunks.is_empty() {
        return Err(AppError::Unprocessable(
            "No text could be extracted from the document".to_string(),
        ));
    }

    let mut partials = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        tracing::debug!(chunk = index + 1, total = chunks.len(), "Summarizing chunk");
        let partial = llm.complete(&prompts::chunk_summary_prompt(chunk)).await?;
        partials.push(partial.trim().to_string());
    }

    let combined = partials.join("\n\n");
    let summary = llm
        .complete(&prompts::combine_prompt(&combined, language))
        .await?;

    Ok(summary.trim().to_string())
}
