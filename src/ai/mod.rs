// src/ai/mod.rs

pub mod groq;
pub mod prompts;
pub mod quiz;
pub mod summarize;

use async_trait::async_trait;

use crate::error::AppError;

pub use groq::GroqClient;

#[derive(Debug, thiserror::Error)]
pub enum LlmError {
    #[error("request to language model failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("language model returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("language model returned no choices")]
    EmptyResponse,
}

impl From<LlmError> for AppError {
    fn from(err: LlmError) -> Self {
        AppError::Upstream(err.to_string())
    }
}

/// A hosted chat model reduced to single-turn text completion.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    fn model_name(&self) -> &str;
}
