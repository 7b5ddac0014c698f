use argon2::{
    Argon2,
    password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng},
};
use axum::{Json, extract::State};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::task;

use super::{ApiError, Created, validation};
use crate::db::schemas::User;
use crate::state::AppState;

// ============================================================================
// Request/Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub ok: bool,
    pub message: String,
}

// ============================================================================
// Handlers
// ============================================================================

/// POST /api/auth/signup
/// Stores a new user with an Argon2id password hash. Duplicate emails are
/// not rejected; login simply matches the first record.
pub async fn signup(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<Created>, ApiError> {
    validation::require_field(&payload.name, "name")?;
    validation::require_field(&payload.email, "email")?;
    validation::require_field(&payload.password, "password")?;

    // Argon2 is CPU-intensive and would stall the async runtime if run
    // directly on a worker thread.
    let password = payload.password;
    let password_hash = task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| ApiError::internal(format!("Password hashing task panicked: {e}")))??;

    let user = User {
        name: payload.name,
        email: payload.email,
        password_hash,
        created_at: Utc::now(),
    };

    let document = bson::to_document(&user)
        .map_err(|e| ApiError::internal(format!("Failed to encode user: {e}")))?;

    let id = super::store(&state)?
        .create_document(User::COLLECTION, document)
        .await?;

    Ok(Json(Created::new(id)))
}

/// POST /api/auth/login
/// Verifies the password against the stored hash. Unknown email and wrong
/// password produce the same response, so the endpoint does not reveal
/// whether an account exists.
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    validation::require_field(&payload.email, "email")?;
    validation::require_field(&payload.password, "password")?;

    let filter = bson::doc! { "email": payload.email.as_str() };
    let documents = super::store(&state)?
        .get_documents(User::COLLECTION, filter, 1)
        .await?;

    let Some(user) = documents.into_iter().next() else {
        return Err(ApiError::invalid_credentials());
    };

    let password_hash = user
        .get_str("password_hash")
        .map_err(|e| ApiError::internal(format!("User record missing password_hash: {e}")))?
        .to_string();

    let password = payload.password;
    let is_valid = task::spawn_blocking(move || verify_password(&password, &password_hash))
        .await
        .map_err(|e| ApiError::internal(format!("Password verification task panicked: {e}")))?;

    if !is_valid {
        return Err(ApiError::invalid_credentials());
    }

    Ok(Json(LoginResponse {
        ok: true,
        message: "Logged in".to_string(),
    }))
}

// ============================================================================
// Helpers
// ============================================================================

/// Hash a password using Argon2id with a fresh random salt.
fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);

    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| ApiError::internal(format!("Failed to hash password: {e}")))
}

/// An unparseable stored hash counts as a failed verification.
fn verify_password(password: &str, password_hash: &str) -> bool {
    PasswordHash::new(password_hash)
        .map(|parsed| {
            Argon2::default()
                .verify_password(password.as_bytes(), &parsed)
                .is_ok()
        })
        .unwrap_or(false)
}
