// src/db/mod.rs

//! Persistence seams. Handlers only see these traits; `main` wires the
//! Postgres implementation, tests wire `MemoryStore`.

pub mod memory;
pub mod postgres;

use async_trait::async_trait;

use crate::{
    error::AppError,
    models::{
        progress::{Explanation, NewExplanation, NewQuizResult, QuizResult},
        user::{NewUser, User},
    },
};

pub use memory::MemoryStore;
pub use postgres::PgStore;

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `AppError::Conflict` when the email is taken.
    async fn create_user(&self, user: NewUser) -> Result<User, AppError>;

    async fn find_user_by_email(&self, email: &str) -> Result<Option<User>, AppError>;

    async fn find_user_by_id(&self, id: i64) -> Result<Option<User>, AppError>;
}

/// Quiz results and explanations. Both upserts are last-write-wins on their
/// key and keep the original `created_at`.
#[async_trait]
pub trait ProgressStore: Send + Sync {
    /// Keyed by (user_id, topic).
    async fn upsert_quiz_result(
        &self,
        user_id: i64,
        quiz: NewQuizResult,
    ) -> Result<QuizResult, AppError>;

    /// Keyed by (user_id, topic, level).
    async fn upsert_explanation(
        &self,
        user_id: i64,
        explanation: NewExplanation,
    ) -> Result<Explanation, AppError>;

    async fn list_quiz_results(&self, user_id: i64) -> Result<Vec<QuizResult>, AppError>;

    async fn list_explanations(&self, user_id: i64) -> Result<Vec<Explanation>, AppError>;

    async fn find_quiz_result(
        &self,
        user_id: i64,
        topic: &str,
    ) -> Result<Option<QuizResult>, AppError>;

    async fn count_explanations(&self, user_id: i64) -> Result<i64, AppError>;
}
