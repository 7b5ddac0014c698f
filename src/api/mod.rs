use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::cors::{AllowHeaders, AllowMethods, AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::DocumentStore;
use crate::state::AppState;

pub mod auth;
pub mod blog;
pub mod contact;
mod error;
pub mod plans;
pub mod system;
mod types;
mod validation;

pub use error::ApiError;
pub use types::*;

pub fn router(state: Arc<AppState>) -> Router {
    // Wildcard CORS cannot be combined with credentials; mirroring the
    // request is the permissive equivalent.
    let cors_layer = CorsLayer::new()
        .allow_origin(AllowOrigin::mirror_request())
        .allow_methods(AllowMethods::mirror_request())
        .allow_headers(AllowHeaders::mirror_request())
        .allow_credentials(true);

    let api_router = Router::new()
        .route("/plans", get(plans::list_plans))
        .route("/auth/signup", post(auth::signup))
        .route("/auth/login", post(auth::login))
        .route("/blog", post(blog::create_post))
        .route("/blog", get(blog::list_posts))
        .route("/contact", post(contact::submit_contact));

    Router::new()
        .route("/", get(system::root))
        .route("/test", get(system::test_database))
        .nest("/api", api_router)
        .layer(cors_layer)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Resolve the injected store, or fail the way the original persistence
/// helpers did when no database was configured.
pub(crate) fn store(state: &AppState) -> Result<&dyn DocumentStore, ApiError> {
    state
        .store
        .as_deref()
        .ok_or_else(|| ApiError::Database("database is not configured".to_string()))
}
