use axum::{Json, extract::State};
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, Created, validation};
use crate::db::schemas::ContactMessage;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct ContactRequest {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// POST /api/contact
/// Write-only; submissions are read out-of-band.
pub async fn submit_contact(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<ContactRequest>,
) -> Result<Json<Created>, ApiError> {
    validation::require_field(&payload.name, "name")?;
    validation::require_field(&payload.email, "email")?;
    validation::require_field(&payload.message, "message")?;

    let message = ContactMessage {
        name: payload.name,
        email: payload.email,
        message: payload.message,
        created_at: Utc::now(),
    };

    let document = bson::to_document(&message)
        .map_err(|e| ApiError::internal(format!("Failed to encode message: {e}")))?;

    let id = super::store(&state)?
        .create_document(ContactMessage::COLLECTION, document)
        .await?;

    Ok(Json(Created::new(id)))
}
