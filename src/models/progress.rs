// src/models/progress.rs

use serde::{Deserialize, Serialize};
use serde_json::Value;
use sqlx::{FromRow, types::Json};
use validator::Validate;

/// Represents the 'quiz_results' table in the database.
/// One row per (user_id, topic); a retake overwrites it.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct QuizResult {
    pub id: i64,
    pub user_id: i64,
    pub topic: String,
    pub quiz_score: i64,
    pub total_questions: i64,
    pub level: Option<String>,

    /// Per-question review data exactly as the client sent it
    /// (question, options, selected and correct answers).
    pub questions: Json<Vec<Value>>,

    /// Seconds.
    pub time_spent: Option<i64>,
    pub completed: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl QuizResult {
    /// Score as a percentage, `None` when the quiz had no questions.
    pub fn percentage(&self) -> Option<f64> {
        (self.total_questions > 0)
            .then(|| self.quiz_score as f64 / self.total_questions as f64 * 100.0)
    }
}

/// Represents the 'explanations' table in the database.
/// One row per (user_id, topic, level).
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Explanation {
    pub id: i64,
    pub user_id: i64,
    pub topic: String,
    pub level: String,
    pub explanation: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// Upsert payload for a quiz result.
#[derive(Debug, Clone)]
pub struct NewQuizResult {
    pub topic: String,
    pub score: i64,
    pub total_questions: i64,
    pub level: Option<String>,
    pub questions: Vec<Value>,
    pub time_spent: Option<i64>,
}

/// Upsert payload for an explanation.
#[derive(Debug, Clone)]
pub struct NewExplanation {
    pub topic: String,
    pub level: String,
    pub explanation: String,
}

/// A progress entry, tagged with `"type": "quiz" | "explanation"`.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum ProgressItem {
    Quiz(QuizResult),
    Explanation(Explanation),
}

/// Which records `GET /dashboard/progress` returns.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProgressFilter {
    All,
    Quiz,
    Explanation,
}

impl ProgressFilter {
    /// Case-insensitive; unknown or absent values mean everything.
    pub fn from_query(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_lowercase()).as_deref() {
            Some("quiz") => Self::Quiz,
            Some("explanation") => Self::Explanation,
            _ => Self::All,
        }
    }

    pub fn includes_quizzes(self) -> bool {
        matches!(self, Self::All | Self::Quiz)
    }

    pub fn includes_explanations(self) -> bool {
        matches!(self, Self::All | Self::Explanation)
    }
}

/// Query parameters for listing progress.
#[derive(Debug, Deserialize)]
pub struct ProgressQuery {
    #[serde(rename = "type")]
    pub kind: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ProgressResponse {
    pub items: Vec<ProgressItem>,
}

#[derive(Debug, Serialize, PartialEq)]
pub struct DashboardSummary {
    pub total_quiz_given: i64,
    pub total_topics_explained: i64,
    pub avg_quiz_percent: f64,
}

/// DTO for submitting a finished quiz. Field names follow the web client.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct SaveQuizRequest {
    #[validate(
        required(message = "Missing required quiz result fields"),
        length(min = 1, message = "Missing required quiz result fields")
    )]
    pub topic: Option<String>,

    #[validate(
        required(message = "Missing required quiz result fields"),
        range(min = 0, message = "Score cannot be negative")
    )]
    pub score: Option<i64>,

    #[validate(
        required(message = "Missing required quiz result fields"),
        range(min = 0, message = "Total questions cannot be negative")
    )]
    pub total_questions: Option<i64>,

    pub level: Option<String>,

    #[serde(default)]
    pub questions: Vec<Value>,

    pub time_spent: Option<i64>,
}

impl From<SaveQuizRequest> for NewQuizResult {
    /// Expects a request that already passed validation.
    fn from(req: SaveQuizRequest) -> Self {
        Self {
            topic: req.topic.unwrap_or_default(),
            score: req.score.unwrap_or_default(),
            total_questions: req.total_questions.unwrap_or_default(),
            level: req.level.filter(|level| !level.trim().is_empty()),
            questions: req.questions,
            time_spent: req.time_spent,
        }
    }
}

/// DTO for saving a generated explanation.
#[derive(Debug, Default, Deserialize, Validate)]
#[serde(default)]
pub struct SaveExplanationRequest {
    #[validate(length(min = 1, message = "Missing required explanation fields"))]
    pub topic: String,
    #[validate(length(min = 1, message = "Missing required explanation fields"))]
    pub level: String,
    #[validate(length(min = 1, message = "Missing required explanation fields"))]
    pub explanation: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_parsing() {
        assert_eq!(ProgressFilter::from_query(Some("quiz")), ProgressFilter::Quiz);
        assert_eq!(ProgressFilter::from_query(Some("QUIZ")), ProgressFilter::Quiz);
        assert_eq!(
            ProgressFilter::from_query(Some("Explanation")),
            ProgressFilter::Explanation
        );
        assert_eq!(ProgressFilter::from_query(Some("all")), ProgressFilter::All);
        assert_eq!(ProgressFilter::from_query(Some("bogus")), ProgressFilter::All);
        assert_eq!(ProgressFilter::from_query(None), ProgressFilter::All);
    }

    #[test]
    fn test_item_tagging() {
        let now = chrono::Utc::now();
        let item = ProgressItem::Explanation(Explanation {
            id: 1,
            user_id: 2,
            topic: "Gravity".to_string(),
            level: "beginner".to_string(),
            explanation: "Things fall.".to_string(),
            created_at: now,
            updated_at: now,
        });

        let value = serde_json::to_value(&item).unwrap();
        assert_eq!(value["type"], "explanation");
        assert_eq!(value["topic"], "Gravity");
    }

    #[test]
    fn test_save_quiz_request_uses_client_field_names() {
        let req: SaveQuizRequest = serde_json::from_value(serde_json::json!({
            "topic": "Cells",
            "score": 4,
            "totalQuestions": 5,
            "timeSpent": 90,
            "questions": [{"question": "?", "selectedAnswer": 1, "correctAnswer": 1}]
        }))
        .unwrap();
        assert!(req.validate().is_ok());

        let new: NewQuizResult = req.into();
        assert_eq!(new.total_questions, 5);
        assert_eq!(new.time_spent, Some(90));
        assert_eq!(new.questions.len(), 1);
        assert_eq!(new.level, None);
    }

    #[test]
    fn test_save_quiz_request_missing_score() {
        let req: SaveQuizRequest = serde_json::from_value(serde_json::json!({
            "topic": "Cells",
            "totalQuestions": 5
        }))
        .unwrap();
        assert!(req.validate().is_err());
    }

    #[test]
    fn test_zero_score_is_valid() {
        let req: SaveQuizRequest = serde_json::from_value(serde_json::json!({
            "topic": "Cells",
            "score": 0,
            "totalQuestions": 5
        }))
        .unwrap();
        assert!(req.validate().is_ok());
    }
}
