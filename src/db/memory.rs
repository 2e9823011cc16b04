// src/db/memory.rs

use async_trait::async_trait;
use chrono::Utc;
use sqlx::types::Json;
use tokio::sync::RwLock;

use crate::{
    db::{ProgressStore, UserStore},
    error::AppError,
    models::{
        progress::{Explanation, NewExplanation, NewQuizResult, QuizResult},
        user::{NewUser, User},
    },
};

#[derive(Default)]
struct Tables {
    next_id: i64,
    users: Vec<User>,
    quiz_results: Vec<QuizResult>,
    explanations: Vec<Explanation>,
}

impl Tables {
    fn next_id(&mut self) -> i64 {
        self.next_id += 1;
        self.next_id
    }
}

/// In-process store with the same upsert semantics as `PgStore`.
/// Every write holds the lock for the whole find-or-insert, so the
/// one-record-per-key invariant holds under concurrent requests.
#[derive(Default)]
pub struct MemoryStore {
    tables: RwLock<Tables>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for MemoryStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        let mut tables = self.tables.write().await;

        if tables.users.iter().any(|u| u.email == user.email) {
            return Err(AppError::Conflict("User already exists".to_string()));
        }

        let id = tables.next_id();
        let user = User {
            id,
            name: user.name,
            email: user.email,
            password_hash: user.password_hash,
            created_at: Utc::now(),
        };
        tables.users.push(user.clone());

        Ok(user)
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.email == email).cloned())
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables.users.iter().find(|u| u.id == id).cloned())
    }
}

#[async_trait]
impl ProgressStore for MemoryStore {
    async fn upsert_quiz_result(
        &self,
        user_id: i64,
        quiz: NewQuizResult,
    ) -> Result<QuizResult, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        if let Some(existing) = tables
            .quiz_results
            .iter_mut()
            .find(|r| r.user_id == user_id && r.topic == quiz.topic)
        {
            existing.quiz_score = quiz.score;
            existing.total_questions = quiz.total_questions;
            existing.level = quiz.level;
            existing.questions = Json(quiz.questions);
            existing.time_spent = quiz.time_spent;
            existing.completed = true;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let id = tables.next_id();
        let result = QuizResult {
            id,
            user_id,
            topic: quiz.topic,
            quiz_score: quiz.score,
            total_questions: quiz.total_questions,
            level: quiz.level,
            questions: Json(quiz.questions),
            time_spent: quiz.time_spent,
            completed: true,
            created_at: now,
            updated_at: now,
        };
        tables.quiz_results.push(result.clone());

        Ok(result)
    }

    async fn upsert_explanation(
        &self,
        user_id: i64,
        explanation: NewExplanation,
    ) -> Result<Explanation, AppError> {
        let mut tables = self.tables.write().await;
        let now = Utc::now();

        if let Some(existing) = tables.explanations.iter_mut().find(|e| {
            e.user_id == user_id && e.topic == explanation.topic && e.level == explanation.level
        }) {
            existing.explanation = explanation.explanation;
            existing.updated_at = now;
            return Ok(existing.clone());
        }

        let id = tables.next_id();
        let saved = Explanation {
            id,
            user_id,
            topic: explanation.topic,
            level: explanation.level,
            explanation: explanation.explanation,
            created_at: now,
            updated_at: now,
        };
        tables.explanations.push(saved.clone());

        Ok(saved)
    }

    async fn list_quiz_results(&self, user_id: i64) -> Result<Vec<QuizResult>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .quiz_results
            .iter()
            .filter(|r| r.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn list_explanations(&self, user_id: i64) -> Result<Vec<Explanation>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .explanations
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn find_quiz_result(
        &self,
        user_id: i64,
        topic: &str,
    ) -> Result<Option<QuizResult>, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .quiz_results
            .iter()
            .find(|r| r.user_id == user_id && r.topic == topic)
            .cloned())
    }

    async fn count_explanations(&self, user_id: i64) -> Result<i64, AppError> {
        let tables = self.tables.read().await;
        Ok(tables
            .explanations
            .iter()
            .filter(|e| e.user_id == user_id)
            .count() as i64)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn quiz(topic: &str, score: i64, total: i64) -> NewQuizResult {
        NewQuizResult {
            topic: topic.to_string(),
            score,
            total_questions: total,
            level: Some("beginner".to_string()),
            questions: vec![],
            time_spent: Some(30),
        }
    }

    #[tokio::test]
    async fn test_quiz_upsert_keeps_one_record() {
        let store = MemoryStore::new();

        let first = store.upsert_quiz_result(1, quiz("Cells", 2, 5)).await.unwrap();
        let second = store.upsert_quiz_result(1, quiz("Cells", 5, 5)).await.unwrap();

        let all = store.list_quiz_results(1).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(all[0].quiz_score, 5);
        assert_eq!(first.id, second.id);
        assert_eq!(first.created_at, second.created_at);
    }

    #[tokio::test]
    async fn test_quiz_keys_are_per_user() {
        let store = MemoryStore::new();
        store.upsert_quiz_result(1, quiz("Cells", 2, 5)).await.unwrap();
        store.upsert_quiz_result(2, quiz("Cells", 3, 5)).await.unwrap();

        assert_eq!(store.list_quiz_results(1).await.unwrap().len(), 1);
        assert_eq!(store.list_quiz_results(2).await.unwrap()[0].quiz_score, 3);
    }

    #[tokio::test]
    async fn test_explanation_key_includes_level() {
        let store = MemoryStore::new();
        let new = |level: &str, text: &str| NewExplanation {
            topic: "Gravity".to_string(),
            level: level.to_string(),
            explanation: text.to_string(),
        };

        store.upsert_explanation(1, new("beginner", "v1")).await.unwrap();
        store.upsert_explanation(1, new("beginner", "v2")).await.unwrap();
        store.upsert_explanation(1, new("advanced", "v1")).await.unwrap();

        let all = store.list_explanations(1).await.unwrap();
        assert_eq!(all.len(), 2);
        assert_eq!(all[0].explanation, "v2");
        assert_eq!(store.count_explanations(1).await.unwrap(), 2);
    }

    #[tokio::test]
    async fn test_duplicate_email_conflicts() {
        let store = MemoryStore::new();
        let new = || NewUser {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            password_hash: "hash".to_string(),
        };

        store.create_user(new()).await.unwrap();
        let err = store.create_user(new()).await.unwrap_err();
        assert!(matches!(err, AppError::Conflict(_)));
    }
}
