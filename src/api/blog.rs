use axum::{
    Json,
    extract::{Query, State},
};
use bson::Bson;
use chrono::Utc;
use serde::Deserialize;
use std::sync::Arc;

use super::{ApiError, Created, validation};
use crate::db::schemas::BlogPost;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct BlogCreateRequest {
    pub title: String,
    pub slug: String,
    pub content: String,
    #[serde(default)]
    pub excerpt: Option<String>,
    pub author: String,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default = "default_published")]
    pub published: bool,
}

const fn default_published() -> bool {
    true
}

#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default = "default_limit")]
    pub limit: i64,
}

const fn default_limit() -> i64 {
    10
}

/// POST /api/blog
pub async fn create_post(
    State(state): State<Arc<AppState>>,
    Json(payload): Json<BlogCreateRequest>,
) -> Result<Json<Created>, ApiError> {
    validation::require_field(&payload.title, "title")?;
    validation::require_field(&payload.slug, "slug")?;
    validation::require_field(&payload.content, "content")?;
    validation::require_field(&payload.author, "author")?;

    let post = BlogPost {
        title: payload.title,
        slug: payload.slug,
        content: payload.content,
        excerpt: payload.excerpt,
        author: payload.author,
        tags: payload.tags,
        published: payload.published,
        created_at: Utc::now(),
    };

    let document = bson::to_document(&post)
        .map_err(|e| ApiError::internal(format!("Failed to encode post: {e}")))?;

    let id = super::store(&state)?
        .create_document(BlogPost::COLLECTION, document)
        .await?;

    Ok(Json(Created::new(id)))
}

/// GET /api/blog?limit=N
/// Lists published posts, newest-first ordering left to the store.
pub async fn list_posts(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ListQuery>,
) -> Result<Json<Vec<serde_json::Value>>, ApiError> {
    let limit = validation::validate_limit(query.limit)?;

    let documents = super::store(&state)?
        .get_documents(BlogPost::COLLECTION, bson::doc! { "published": true }, limit)
        .await?;

    let posts = documents.into_iter().map(render_post).collect();
    Ok(Json(posts))
}

/// Rewrites the store's native `_id` key into a plain string `id` field.
fn render_post(mut document: bson::Document) -> serde_json::Value {
    if let Some(id) = document.remove("_id") {
        let id = match id {
            Bson::ObjectId(oid) => oid.to_hex(),
            other => other.to_string(),
        };
        document.insert("id", id);
    }

    Bson::Document(document).into_relaxed_extjson()
}
