// tests/common/mod.rs

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use edugenie::{
    ai::{LanguageModel, LlmError},
    config::Config,
    db::MemoryStore,
    error::AppError,
    routes,
    scrape::ContentFetcher,
    state::AppState,
};
use serde_json::{Value, json};

pub const TEST_SECRET: &str = "test_secret_for_integration_tests";

/// Replays queued replies in order and records every prompt it was given.
/// An empty queue behaves like an unreachable provider.
#[derive(Default)]
pub struct ScriptedModel {
    replies: Mutex<VecDeque<String>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedModel {
    pub fn reply(&self, text: &str) {
        self.replies.lock().unwrap().push_back(text.to_string());
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LanguageModel for ScriptedModel {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(LlmError::EmptyResponse)
    }

    fn model_name(&self) -> &str {
        "scripted"
    }
}

/// Serves fixed bodies per URL; anything else is an upstream failure.
#[derive(Default)]
pub struct CannedFetcher {
    pages: Mutex<HashMap<String, String>>,
}

impl CannedFetcher {
    pub fn serve(&self, url: &str, body: &str) {
        self.pages
            .lock()
            .unwrap()
            .insert(url.to_string(), body.to_string());
    }
}

#[async_trait]
impl ContentFetcher for CannedFetcher {
    async fn fetch(&self, url: &str) -> Result<String, AppError> {
        self.pages
            .lock()
            .unwrap()
            .get(url)
            .cloned()
            .ok_or_else(|| AppError::Upstream(format!("no canned response for {}", url)))
    }
}

pub struct TestApp {
    pub address: String,
    pub client: reqwest::Client,
    pub llm: Arc<ScriptedModel>,
    pub fetcher: Arc<CannedFetcher>,
}

impl TestApp {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.address, path)
    }

    /// Registers a fresh user and returns (email, password).
    pub async fn signup(&self) -> (String, String) {
        let email = format!("u_{}@example.com", &uuid::Uuid::new_v4().to_string()[..8]);
        let password = "password123".to_string();

        let response = self
            .client
            .post(self.url("/auth/signup"))
            .json(&json!({ "name": "Test User", "email": email, "password": password }))
            .send()
            .await
            .expect("Signup failed");
        assert_eq!(response.status().as_u16(), 201);

        (email, password)
    }

    pub async fn login(&self, email: &str, password: &str) -> reqwest::Response {
        self.client
            .post(self.url("/auth/login"))
            .json(&json!({ "email": email, "password": password }))
            .send()
            .await
            .expect("Login failed")
    }

    /// Signs up a fresh user and returns a bearer token for it.
    pub async fn token(&self) -> String {
        let (email, password) = self.signup().await;
        let body: Value = self.login(&email, &password).await.json().await.unwrap();
        body["access_token"]
            .as_str()
            .expect("Token not found")
            .to_string()
    }
}

pub fn test_config() -> Config {
    Config {
        database_url: "postgres://unused".to_string(),
        jwt_secret: TEST_SECRET.to_string(),
        jwt_expiration: 600, // 10 minutes for tests
        groq_api_key: "unused".to_string(),
        groq_model: "scripted".to_string(),
        groq_base_url: "http://127.0.0.1:9".to_string(),
        bind_addr: "127.0.0.1:0".parse().unwrap(),
        cors_origins: vec!["http://localhost:5173".to_string()],
        max_upload_bytes: 10 * 1024 * 1024,
        http_timeout_secs: 5,
        rust_log: "error".to_string(),
    }
}

/// Spawns the app on a random port, backed by in-memory collaborators.
pub async fn spawn_app() -> TestApp {
    spawn_app_with(test_config()).await
}

/// Router state backed by in-memory collaborators, plus handles to script them.
pub fn test_state(config: Config) -> (AppState, Arc<ScriptedModel>, Arc<CannedFetcher>) {
    let store = Arc::new(MemoryStore::new());
    let llm = Arc::new(ScriptedModel::default());
    let fetcher = Arc::new(CannedFetcher::default());

    let state = AppState {
        users: store.clone(),
        progress: store,
        llm: llm.clone(),
        fetcher: fetcher.clone(),
        config,
    };

    (state, llm, fetcher)
}

pub async fn spawn_app_with(config: Config) -> TestApp {
    let (state, llm, fetcher) = test_state(config);
    let app = routes::create_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    TestApp {
        address: format!("http://127.0.0.1:{}", port),
        client: reqwest::Client::new(),
        llm,
        fetcher,
    }
}
