// tests/ai_tests.rs

mod common;

use common::spawn_app;
use serde_json::{Value, json};

#[tokio::test]
async fn quiz_from_fenced_output() {
    // Arrange
    let app = spawn_app().await;
    app.llm.reply(
        "Here you go!\n```json\n{\"quiz\": [{\"id\": 1, \"question\": \"2+2?\", \
         \"options\": [\"3\", \"4\"], \"correctAnswer\": 1}]}\n```",
    );

    // Act
    let response = app
        .client
        .post(app.url("/ai/quiz"))
        .json(&json!({ "topic": "Arithmetic", "num_questions": 1 }))
        .send()
        .await
        .unwrap();

    // Assert
    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["quiz"][0]["correctAnswer"], 1);

    let prompts = app.llm.prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains("Generate 1 multiple choice questions"));
    assert!(prompts[0].contains("\"Arithmetic\""));
    assert!(prompts[0].contains("high school level"));
}

#[tokio::test]
async fn quiz_count_is_clamped() {
    let app = spawn_app().await;
    app.llm.reply("{\"quiz\": []}");

    app.client
        .post(app.url("/ai/quiz"))
        .json(&json!({ "topic": "Chemistry", "level": "college", "num_questions": 500 }))
        .send()
        .await
        .unwrap();

    let prompts = app.llm.prompts();
    assert!(prompts[0].contains("Generate 20 multiple choice questions"));
    assert!(prompts[0].contains("college level"));
}

#[tokio::test]
async fn quiz_without_json_is_bad_gateway() {
    let app = spawn_app().await;
    app.llm.reply("Sorry, I cannot help with that.");

    let response = app
        .client
        .post(app.url("/ai/quiz"))
        .json(&json!({ "topic": "History" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "No JSON found");
    assert_eq!(body["raw"], "Sorry, I cannot help with that.");
    assert!(body.get("details").is_none());
}

#[tokio::test]
async fn quiz_with_broken_json_reports_details() {
    let app = spawn_app().await;
    app.llm.reply("{\"quiz\": [ {\"id\": 1,, } ]}");

    let response = app
        .client
        .post(app.url("/ai/quiz"))
        .json(&json!({ "topic": "History" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid JSON from LLM");
    assert!(body["details"].as_str().is_some());
}

#[tokio::test]
async fn quiz_requires_topic() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/ai/quiz"))
        .json(&json!({ "level": "college" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Topic is required");
    assert!(app.llm.prompts().is_empty());
}

#[tokio::test]
async fn explain_returns_trimmed_text() {
    let app = spawn_app().await;
    app.llm.reply("\n  Gravity pulls masses together.  \n");

    let response = app
        .client
        .post(app.url("/ai/explain"))
        .json(&json!({ "topic": "Gravity" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "explanation": "Gravity pulls masses together." }));
    assert!(app.llm.prompts()[0].contains("student in intermediate"));
}

#[tokio::test]
async fn model_failure_hides_detail() {
    // No scripted reply: the model call fails.
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/ai/explain"))
        .json(&json!({ "topic": "Gravity", "level": "beginner" }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 502);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, json!({ "error": "Upstream service request failed" }));
}

#[tokio::test]
async fn malformed_body_is_bad_request() {
    let app = spawn_app().await;

    let response = app
        .client
        .post(app.url("/ai/explain"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();

    assert_eq!(response.status().as_u16(), 400);
}

#[tokio::test]
async fn blank_topic_is_required() {
    let app = spawn_app().await;

    for path in ["/ai/quiz", "/ai/explain"] {
        let response = app
            .client
            .post(app.url(path))
            .json(&json!({ "topic": "  \t " }))
            .send()
            .await
            .unwrap();

        assert_eq!(response.status().as_u16(), 400, "POST {}", path);
        let body: Value = response.json().await.unwrap();
        assert_eq!(body["error"], "Topic is required");
    }
    assert!(app.llm.prompts().is_empty());
}
