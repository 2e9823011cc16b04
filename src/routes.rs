// src/routes.rs

use axum::{
    Router,
    extract::DefaultBodyLimit,
    http::{HeaderValue, Method, header},
    middleware,
    routing::{get, post},
};
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::{
    handlers::{ai, auth, dashboard, health, summarizer},
    state::AppState,
    utils::jwt::auth_middleware,
};

fn cors_layer(origins: &[String]) -> CorsLayer {
    let origins: Vec<HeaderValue> = origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

/// Assembles the main application router.
///
/// * Public: signup/login, AI generation, summarizer, health.
/// * Bearer-protected: `/auth/me` and everything under `/dashboard`.
/// * Global middleware: Trace, CORS.
pub fn create_router(state: AppState) -> Router {
    let cors = cors_layer(&state.config.cors_origins);

    let auth_routes = Router::new()
        .route("/auth/signup", post(auth::register))
        .route("/auth/login", post(auth::login));

    // Full paths rather than `nest` so that both `/dashboard` and
    // `/dashboard/` reach the summary.
    let protected_routes = Router::new()
        .route("/auth/me", get(auth::me))
        .route("/dashboard", get(dashboard::summary))
        .route("/dashboard/", get(dashboard::summary))
        .route("/dashboard/progress", get(dashboard::get_progress))
        .route("/dashboard/save/quiz", post(dashboard::save_quiz_result))
        .route("/dashboard/save/explanation", post(dashboard::save_explanation))
        .route("/dashboard/quiz-result/{topic}", get(dashboard::get_quiz_result))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth_middleware));

    let ai_routes = Router::new()
        .route("/quiz", post(ai::generate_quiz))
        .route("/explain", post(ai::explain_topic));

    let summarizer_routes = Router::new()
        .route("/url", post(summarizer::summarize_url))
        .route("/pdf", post(summarizer::summarize_pdf))
        .layer(DefaultBodyLimit::max(state.config.max_upload_bytes));

    Router::new()
        .route("/health", get(health::health))
        .merge(auth_routes)
        .merge(protected_routes)
        .nest("/ai", ai_routes)
        .nest("/summarizer", summarizer_routes)
        // Global Middleware (applied from outside in)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}
