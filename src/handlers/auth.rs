// src/handlers/auth.rs

use std::sync::Arc;

use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use serde_json::json;

use crate::{
    config::Config,
    db::UserStore,
    error::AppError,
    extract::ValidatedJson,
    models::user::{LoginRequest, NewUser, SignupRequest, normalize_email},
    utils::{
        hash::{hash_password, verify_password},
        jwt::{Claims, sign_jwt},
    },
};

/// Registers a new user.
///
/// Hashes the password using Argon2 before storing it.
/// Returns 201 Created; 409 if the email is already registered.
pub async fn register(
    State(users): State<Arc<dyn UserStore>>,
    ValidatedJson(payload): ValidatedJson<SignupRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&payload.email);

    if users.find_user_by_email(&email).await?.is_some() {
        return Err(AppError::Conflict("User already exists".to_string()));
    }

    let password_hash = hash_password(&payload.password)?;

    // The store reports a concurrent duplicate as Conflict as well.
    let user = users
        .create_user(NewUser {
            name: payload.name.trim().to_string(),
            email,
            password_hash,
        })
        .await?;

    tracing::info!(user_id = user.id, "User registered");

    Ok((
        StatusCode::CREATED,
        Json(json!({ "message": "User registered successfully" })),
    ))
}

/// Authenticates a user and returns a JWT token.
///
/// Unknown email and wrong password produce the same 401 response.
pub async fn login(
    State(users): State<Arc<dyn UserStore>>,
    State(config): State<Config>,
    ValidatedJson(payload): ValidatedJson<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let email = normalize_email(&payload.email);

    let user = match users.find_user_by_email(&email).await? {
        Some(user) if verify_password(&payload.password, &user.password_hash)? => user,
        _ => return Err(AppError::AuthError("Invalid credentials".to_string())),
    };

    let token = sign_jwt(user.id, &config.jwt_secret, config.jwt_expiration)?;

    Ok(Json(json!({
        "access_token": token,
        "token_type": "Bearer",
        "expires_in": config.jwt_expiration,
    })))
}

/// Returns the authenticated user's profile (never the password hash).
pub async fn me(
    State(users): State<Arc<dyn UserStore>>,
    Extension(claims): Extension<Claims>,
) -> Result<impl IntoResponse, AppError> {
    let user = users
        .find_user_by_id(claims.user_id()?)
        .await?
        .ok_or_else(|| AppError::NotFound("User not found".to_string()))?;

    Ok(Json(user))
}
