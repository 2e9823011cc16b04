// src/ai/quiz.rs

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{
    ai::{LanguageModel, prompts},
    error::AppError,
};

static FENCED_OBJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?s)```(?:json)?\s*(\{.*?\})\s*```").expect("fenced JSON pattern is valid")
});

static BARE_OBJECT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)(\{.*\})").expect("bare JSON pattern is valid"));

/// Model output that could not be turned into a JSON object.
/// Both variants keep the text that was inspected.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuizParseError {
    #[error("No JSON found")]
    NoJson { raw: String },

    #[error("Invalid JSON from LLM")]
    InvalidJson { raw: String, details: String },
}

impl From<QuizParseError> for AppError {
    fn from(err: QuizParseError) -> Self {
        let message = err.to_string();
        match err {
            QuizParseError::NoJson { raw } => AppError::LlmOutput {
                message,
                raw,
                details: None,
            },
            QuizParseError::InvalidJson { raw, details } => AppError::LlmOutput {
                message,
                raw,
                details: Some(details),
            },
        }
    }
}

/// Locates a JSON object in free-form model output.
///
/// A fenced block (optionally tagged `json`) wins; otherwise the span from
/// the first `{` to the last `}`.
pub fn extract_json(content: &str) -> Option<&str> {
    FENCED_OBJECT
        .captures(content)
        .or_else(|| BARE_OBJECT.captures(content))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub fn parse_model_json(content: &str) -> Result<Value, QuizParseError> {
    let json = extract_json(content).ok_or_else(|| QuizParseError::NoJson {
        raw: content.to_string(),
    })?;

    serde_json::from_str(json).map_err(|e| QuizParseError::InvalidJson {
        raw: json.to_string(),
        details: e.to_string(),
    })
}

/// Asks the model for a quiz and returns the JSON object it produced,
/// normally `{"quiz": [...]}`.
pub async fn generate_quiz(
    llm: &dyn LanguageModel,
    topic: &str,
    level: &str,
    num_questions: u32,
) -> Result<Value, AppError> {
    let prompt = prompts::quiz_prompt(topic, level, num_questions);
    let content = llm.complete(&prompt).await?;

    let quiz = parse_model_json(&content)?;
    tracing::info!(topic, level, num_questions, "Quiz generated");

    Ok(quiz)
}

pub async fn explain_topic(
    llm: &dyn LanguageModel,
    topic: &str,
    level: &str,
) -> Result<String, AppError> {
    let prompt = prompts::explanation_prompt(topic, level);
    let explanation = llm.complete(&prompt).await?;

    Ok(explanation.trim().to_string())
}
