//! Root and diagnostic endpoints.
//!
//! `/test` is an operational smoke-test: it reports whether a store handle
//! exists, whether the database answers, and whether the two connection
//! settings are present in the environment. Purely observational.

use axum::{Json, extract::State};
use serde::Serialize;
use std::sync::Arc;

use super::Message;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct DiagnosticReport {
    pub backend: String,
    pub database: String,
    pub database_url: String,
    pub database_name: String,
    pub connection_status: String,
    pub collections: Vec<String>,
}

/// GET /
pub async fn root() -> Json<Message> {
    Json(Message {
        message: "Plinth backend running".to_string(),
    })
}

/// GET /test
pub async fn test_database(State(state): State<Arc<AppState>>) -> Json<DiagnosticReport> {
    let mut report = DiagnosticReport {
        backend: "✅ Running".to_string(),
        database: "❌ Not Available".to_string(),
        database_url: String::new(),
        database_name: String::new(),
        connection_status: "Not Connected".to_string(),
        collections: Vec::new(),
    };

    if let Some(store) = &state.store {
        report.connection_status = "Connected".to_string();

        match store.list_collection_names().await {
            Ok(collections) => {
                report.collections = collections.into_iter().take(10).collect();
                report.database = "✅ Connected & Working".to_string();
            }
            Err(e) => {
                report.database =
                    format!("⚠️  Connected but Error: {}", truncate(&e.to_string(), 50));
            }
        }
    }

    // Presence is re-checked on every request, not cached from startup.
    report.database_url = env_presence("DATABASE_URL");
    report.database_name = env_presence("DATABASE_NAME");

    Json(report)
}

fn env_presence(key: &str) -> String {
    if std::env::var(key).is_ok() {
        "✅ Set".to_string()
    } else {
        "❌ Not Set".to_string()
    }
}

fn truncate(message: &str, max_chars: usize) -> String {
    message.chars().take(max_chars).collect()
}
