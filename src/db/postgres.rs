// src/db/postgres.rs

use async_trait::async_trait;
use sqlx::{PgPool, types::Json};

use crate::{
    db::{ProgressStore, UserStore},
    error::AppError,
    models::{
        progress::{Explanation, NewExplanation, NewQuizResult, QuizResult},
        user::{NewUser, User},
    },
};

const QUIZ_COLUMNS: &str = "id, user_id, topic, quiz_score, total_questions, level, questions, \
                            time_spent, completed, created_at, updated_at";

const EXPLANATION_COLUMNS: &str = "id, user_id, topic, level, explanation, created_at, updated_at";

/// Postgres-backed store. The unique constraints on `quiz_results` and
/// `explanations` make both upserts atomic.
#[derive(Clone)]
pub struct PgStore {
    pool: PgPool,
}

impl PgStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db_err) if db_err.is_unique_violation())
}

#[async_trait]
impl UserStore for PgStore {
    async fn create_user(&self, user: NewUser) -> Result<User, AppError> {
        sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (name, email, password_hash)
            VALUES ($1, $2, $3)
            RETURNING id, name, email, password_hash, created_at
            "#,
        )
        .bind(&user.name)
        .bind(&user.email)
        .bind(&user.password_hash)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| {
            if is_unique_violation(&e) {
                AppError::Conflict("User already exists".to_string())
            } else {
                tracing::error!("Failed to register user: {:?}", e);
                AppError::from(e)
            }
        })
    }

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE email = $1",
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError> {
        let user = sqlx::query_as::<_, User>(
            "SELECT id, name, email, password_hash, created_at FROM users WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }
}

#[async_trait]
impl ProgressStore for PgStore {
    async fn upsert_quiz_result(
        &self,
        user_id: i64,
        quiz: NewQuizResult,
    ) -> Result<QuizResult, AppError> {
        let sql = format!(
            r#"
            INSERT INTO quiz_results
                (user_id, topic, quiz_score, total_questions, level, questions, time_spent, completed)
            VALUES ($1, $2, $3, $4, $5, $6, $7, TRUE)
            ON CONFLICT (user_id, topic) DO UPDATE SET
                quiz_score = EXCLUDED.quiz_score,
                total_questions = EXCLUDED.total_questions,
                level = EXCLUDED.level,
                questions = EXCLUDED.questions,
                time_spent = EXCLUDED.time_spent,
                completed = TRUE,
                updated_at = NOW()
            RETURNING {QUIZ_COLUMNS}
            "#
        );

        sqlx::query_as::<_, QuizResult>(&sql)
            .bind(user_id)
            .bind(&quiz.topic)
            .bind(quiz.score)
            .bind(quiz.total_questions)
            .bind(&quiz.level)
            .bind(Json(&quiz.questions))
            .bind(quiz.time_spent)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to upsert quiz result: {:?}", e);
                AppError::from(e)
            })
    }

    async fn upsert_explanation(
        &self,
        user_id: i64,
        explanation: NewExplanation,
    ) -> Result<Explanation, AppError> {
        let sql = format!(
            r#"
            INSERT INTO explanations (user_id, topic, level, explanation)
            VALUES ($1, $2, $3, $4)
            ON CONFLICT (user_id, topic, level) DO UPDATE SET
                explanation = EXCLUDED.explanation,
                updated_at = NOW()
            RETURNING {EXPLANATION_COLUMNS}
            "#
        );

        sqlx::query_as::<_, Explanation>(&sql)
            .bind(user_id)
            .bind(&explanation.topic)
            .bind(&explanation.level)
            .bind(&explanation.explanation)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                tracing::error!("Failed to upsert explanation: {:?}", e);
                AppError::from(e)
            })
    }

    async fn list_quiz_results(&self, user_id: i64) -> Result<Vec<QuizResult>, AppError> {
        let sql = format!(
            "SELECT {QUIZ_COLUMNS} FROM quiz_results WHERE user_id = $1 ORDER BY created_at, id"
        );

        let results = sqlx::query_as::<_, QuizResult>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(results)
    }

    async fn list_explanations(&self, user_id: i64) -> Result<Vec<Explanation>, AppError> {
        let sql = format!(
            "SELECT {EXPLANATION_COLUMNS} FROM explanations WHERE user_id = $1 ORDER BY created_at, id"
        );

        let explanations = sqlx::query_as::<_, Explanation>(&sql)
            .bind(user_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(explanations)
    }

    async fn find_quiz_result(
        &self,
        user_id: i64,
        topic: &str,
    ) -> Result<Option<QuizResult>, AppError> {
        let sql = format!("SELECT {QUIZ_COLUMNS} FROM quiz_results WHERE user_id = $1 AND topic = $2");

        let result = sqlx::query_as::<_, QuizResult>(&sql)
            .bind(user_id)
            .bind(topic)
            .fetch_optional(&self.pool)
            .await?;

        Ok(result)
    }

    async fn count_explanations(&self, user_id: i64) -> Result<i64, AppError> {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM explanations WHERE user_id = $1")
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
