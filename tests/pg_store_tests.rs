// tests/pg_store_tests.rs
//
// Needs a running Postgres: `DATABASE_URL=... cargo test -- --ignored`

use edugenie::{
    db::{PgStore, ProgressStore, UserStore},
    error::AppError,
    models::{
        progress::{NewExplanation, NewQuizResult},
        user::NewUser,
    },
};
use serde_json::json;
use sqlx::postgres::PgPoolOptions;

async fn store() -> PgStore {
    let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");

    let pool = PgPoolOptions::new()
        .max_connections(1)
        .connect(&database_url)
        .await
        .expect("Failed to connect to Postgres for testing. Make sure DATABASE_URL is set.");

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .expect("Failed to migrate database");

    PgStore::new(pool)
}

fn new_user() -> NewUser {
    NewUser {
        name: "Pg Tester".to_string(),
        email: format!("pg_{}@example.com", uuid::Uuid::new_v4()),
        password_hash: "not-a-real-hash".to_string(),
    }
}

#[tokio::test]
#[ignore]
async fn duplicate_email_is_conflict() {
    let store = store().await;
    let user = new_user();

    store.create_user(user.clone()).await.unwrap();
    let err = store.create_user(user).await.unwrap_err();

    assert!(matches!(err, AppError::Conflict(_)));
}

#[tokio::test]
#[ignore]
async fn quiz_upsert_overwrites_in_place() {
    // Arrange
    let store = store().await;
    let user = store.create_user(new_user()).await.unwrap();

    let quiz = |score| NewQuizResult {
        topic: "Optics".to_string(),
        score,
        total_questions: 10,
        level: None,
        questions: vec![json!({ "question": "What bends light?" })],
        time_spent: Some(30),
    };

    // Act
    let first = store.upsert_quiz_result(user.id, quiz(3)).await.unwrap();
    let second = store.upsert_quiz_result(user.id, quiz(9)).await.unwrap();

    // Assert
    assert_eq!(first.id, second.id);
    assert_eq!(first.created_at, second.created_at);
    assert_eq!(second.quiz_score, 9);

    let all = store.list_quiz_results(user.id).await.unwrap();
    assert_eq!(all.len(), 1);
    assert_eq!(all[0].questions.0[0]["question"], "What bends light?");

    let found = store.find_quiz_result(user.id, "Optics").await.unwrap();
    assert_eq!(found.map(|r| r.quiz_score), Some(9));
}

#[tokio::test]
#[ignore]
async fn explanations_are_keyed_by_level() {
    let store = store().await;
    let user = store.create_user(new_user()).await.unwrap();

    for level in ["beginner", "advanced", "beginner"] {
        store
            .upsert_explanation(
                user.id,
                NewExplanation {
                    topic: "Optics".to_string(),
                    level: level.to_string(),
                    explanation: format!("Light, {}", level),
                },
            )
            .await
            .unwrap();
    }

    assert_eq!(store.count_explanations(user.id).await.unwrap(), 2);
    assert_eq!(store.list_explanations(user.id).await.unwrap().len(), 2);
}
