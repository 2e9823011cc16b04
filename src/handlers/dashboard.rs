// src/handlers/dashboard.rs

use std::sync::Arc;

use axum::{
    Extension, Json,
    extract::{
        Path, Query, State,
        rejection::{PathRejection, QueryRejection},
    },
    response::IntoResponse,
};
use serde_json::json;

use crate::{
    db::ProgressStore,
    error::AppError,
    extract::ValidatedJson,
    models::progress::{
        DashboardSummary, NewExplanation, NewQuizResult, ProgressFilter, ProgressItem,
        ProgressQuery, ProgressResponse, QuizResult, SaveExplanationRequest, SaveQuizRequest,
    },
    utils::{html::sanitize_user_html, jwt::Claims},
};

/// Mean of the per-quiz percentages, rounded to two decimals.
/// Quizzes with no questions are left out; no quizzes gives 0.
fn average_percent(results: &[QuizResult]) -> f64 {
    let percentages: Vec<f64> = results.iter().filter_map(QuizResult::percentage).collect();

    if percentages.is_empty() {
        return 0.0;
    }

    let mean = percentages.iter().sum::<f64>() / percentages.len() as f64;
    (mean * 100.0).round() / 100.0
}

/// Dashboard counters, recomputed on every call.
pub async fn summary(
    State(progress): State<Arc<dyn ProgressStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let quizzes = progress.list_quiz_results(user_id).await?;
    let explained = progress.count_explanations(user_id).await?;

    Ok(Json(DashboardSummary {
        total_quiz_given: quizzes.len() as i64,
        total_topics_explained: explained,
        avg_quiz_percent: average_percent(&quizzes),
    }))
}

/// Lists the user's saved quizzes and/or explanations (`?type=quiz|explanation`).
pub async fn get_progress(
    State(progress): State<Arc<dyn ProgressStore>>,
    Extension(claims): Extension<Claims>,
    query: Result<Query<ProgressQuery>, QueryRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Query(query) = query?;
    let user_id = claims.user_id()?;
    let filter = ProgressFilter::from_query(query.kind.as_deref());

    let mut items = Vec::new();

    if filter.includes_quizzes() {
        items.extend(
            progress
                .list_quiz_results(user_id)
                .await?
                .into_iter()
                .map(ProgressItem::Quiz),
        );
    }

    if filter.includes_explanations() {
        items.extend(
            progress
                .list_explanations(user_id)
                .await?
                .into_iter()
                .map(ProgressItem::Explanation),
        );
    }

    Ok(Json(ProgressResponse { items }))
}

/// Saves a finished quiz. A retake of the same topic replaces the record.
pub async fn save_quiz_result(
    State(progress): State<Arc<dyn ProgressStore>>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(payload): ValidatedJson<SaveQuizRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;
    let quiz = NewQuizResult::from(payload);

    let saved = progress.upsert_quiz_result(user_id, quiz).await?;
    tracing::info!(user_id, topic = %saved.topic, score = saved.quiz_score, "Quiz result saved");

    Ok(Json(json!({ "message": "Quiz result saved successfully" })))
}

/// Saves an explanation. Same topic and level replaces the record.
pub async fn save_explanation(
    State(progress): State<Arc<dyn ProgressStore>>,
    Extension(claims): Extension<Claims>,
    ValidatedJson(payload): ValidatedJson<SaveExplanationRequest>,
) -> Result<impl IntoResponse, AppError> {
    let user_id = claims.user_id()?;

    let explanation = NewExplanation {
        topic: payload.topic,
        level: payload.level,
        explanation: sanitize_user_html(&payload.explanation),
    };

    progress.upsert_explanation(user_id, explanation).await?;

    Ok(Json(json!({ "message": "Explanation saved successfully" })))
}

/// Returns the stored result of one quiz topic.
pub async fn get_quiz_result(
    State(progress): State<Arc<dyn ProgressStore>>,
    Extension(claims): Extension<Claims>,
    topic: Result<Path<String>, PathRejection>,
) -> Result<impl IntoResponse, AppError> {
    let Path(topic) = topic?;
    let user_id = claims.user_id()?;

    let result = progress
        .find_quiz_result(user_id, &topic)
        .await?
        .ok_or_else(|| AppError::NotFound("Result not found".to_string()))?;

    Ok(Json(ProgressItem::Quiz(result)))
}
