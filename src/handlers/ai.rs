// src/handlers/ai.rs

use std::sync::Arc;

use axum::{Json, extract::State, response::IntoResponse};

use crate::{
    ai::{LanguageModel, quiz},
    error::AppError,
    extract::ValidatedJson,
    models::ai::{ExplainRequest, ExplainResponse, QuizRequest},
};

/// Generates a multiple choice quiz with the language model.
///
/// Responds with the JSON object found in the model output. Output without
/// usable JSON is a 502 carrying the raw text.
pub async fn generate_quiz(
    State(llm): State<Arc<dyn LanguageModel>>,
    ValidatedJson(payload): ValidatedJson<QuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let quiz = quiz::generate_quiz(
        llm.as_ref(),
        payload.topic.trim(),
        payload.level(),
        payload.question_count(),
    )
    .await?;

    Ok(Json(quiz))
}

/// Explains a topic at the requested level.
pub async fn explain_topic(
    State(llm): State<Arc<dyn LanguageModel>>,
    ValidatedJson(payload): ValidatedJson<ExplainRequest>,
) -> Result<impl IntoResponse, AppError> {
    let explanation = quiz::explain_topic(llm.as_ref(), payload.topic.trim(), payload.level()).await?;

    Ok(Json(ExplainResponse { explanation }))
}
