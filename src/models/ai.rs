// src/models/ai.rs

use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

pub const DEFAULT_QUIZ_LEVEL: &str = "high school";
pub const DEFAULT_EXPLAIN_LEVEL: &str = "intermediate";
pub const DEFAULT_QUESTION_COUNT: u32 = 5;
pub const MAX_QUESTION_COUNT: u32 = 20;
pub const DEFAULT_LANGUAGE: &str = "English";

/// DTO for `POST /ai/quiz`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct QuizRequest {
    #[validate(custom(function = not_blank, message = "Topic is required"))]
    pub topic: String,
    pub level: Option<String>,
    pub num_questions: Option<u32>,
}

impl QuizRequest {
    pub fn level(&self) -> &str {
        non_blank(self.level.as_deref()).unwrap_or(DEFAULT_QUIZ_LEVEL)
    }

    /// Requested count clamped to `1..=MAX_QUESTION_COUNT`.
    pub fn question_count(&self) -> u32 {
        self.num_questions
            .unwrap_or(DEFAULT_QUESTION_COUNT)
            .clamp(1, MAX_QUESTION_COUNT)
    }
}

/// DTO for `POST /ai/explain`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct ExplainRequest {
    #[validate(custom(function = not_blank, message = "Topic is required"))]
    pub topic: String,
    pub level: Option<String>,
}

impl ExplainRequest {
    pub fn level(&self) -> &str {
        non_blank(self.level.as_deref()).unwrap_or(DEFAULT_EXPLAIN_LEVEL)
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExplainResponse {
    pub explanation: String,
}

/// DTO for `POST /summarizer/url`.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SummarizeUrlRequest {
    #[validate(custom(function = not_blank, message = "URL is required"))]
    pub url: String,
    pub language: Option<String>,
}

impl SummarizeUrlRequest {
    pub fn language(&self) -> &str {
        language_or_default(self.language.as_deref())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SummaryResponse {
    pub summary: String,
}

pub fn language_or_default(language: Option<&str>) -> &str {
    non_blank(language).unwrap_or(DEFAULT_LANGUAGE)
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

/// Rejects empty and whitespace-only strings.
fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("blank"));
    }
    Ok(())
}
