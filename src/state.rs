use std::sync::Arc;

use axum::extract::FromRef;

use crate::{
    ai::LanguageModel,
    config::Config,
    db::{ProgressStore, UserStore},
    scrape::ContentFetcher,
};

/// Process-wide collaborators, built once in `main` (or by a test harness)
/// and shared by every request.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserStore>,
    pub progress: Arc<dyn ProgressStore>,
    pub llm: Arc<dyn LanguageModel>,
    pub fetcher: Arc<dyn ContentFetcher>,
    pub config: Config,
}

impl FromRef<AppState> for Arc<dyn UserStore> {
    fn from_ref(state: &AppState) -> Self {
        state.users.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ProgressStore> {
    fn from_ref(state: &AppState) -> Self {
        state.progress.clone()
    }
}

impl FromRef<AppState> for Arc<dyn LanguageModel> {
    fn from_ref(state: &AppState) -> Self {
        state.llm.clone()
    }
}

impl FromRef<AppState> for Arc<dyn ContentFetcher> {
    fn from_ref(state: &AppState) -> Self {
        state.fetcher.clone()
    }
}

impl FromRef<AppState> for Config {
    fn from_ref(state: &AppState) -> Self {
        state.config.clone()
    }
}
