//! Integration tests driving the router end-to-end against the in-memory
//! store.

use axum::{
    Router,
    body::Body,
    http::{Request, StatusCode},
};
use bson::doc;
use http_body_util::BodyExt;
use serde_json::json;
use std::sync::Arc;
use tower::ServiceExt;

use plinth::api;
use plinth::db::{DocumentStore, MemoryStore};
use plinth::state::AppState;

fn spawn_app() -> (Arc<MemoryStore>, Router) {
    let store = Arc::new(MemoryStore::new());
    let state = Arc::new(AppState::new(Some(store.clone() as Arc<dyn DocumentStore>)));
    (store, api::router(state))
}

fn spawn_app_without_store() -> Router {
    api::router(Arc::new(AppState::new(None)))
}

fn get(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

fn post_json(uri: &str, body: &serde_json::Value) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("Content-Type", "application/json")
        .body(Body::from(serde_json::to_string(body).unwrap()))
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

#[tokio::test]
async fn test_root_message() {
    let (_, app) = spawn_app();

    let response = app.oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert!(body["message"].is_string());
}

#[tokio::test]
async fn test_plans_catalog() {
    let (_, app) = spawn_app();

    let response = app.oneshot(get("/api/plans")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let plans = body.as_array().expect("plans must be an array");
    assert_eq!(plans.len(), 3);

    let ids: Vec<&str> = plans.iter().map(|p| p["id"].as_str().unwrap()).collect();
    assert_eq!(ids, vec!["free", "pro", "team"]);

    assert_eq!(plans[0]["highlighted"], false);
    assert_eq!(plans[1]["highlighted"], true);
    assert_eq!(plans[2]["highlighted"], false);
}

#[tokio::test]
async fn test_signup_returns_id_and_stores_hash() {
    let (store, app) = spawn_app();

    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            &json!({"name": "Ada", "email": "ada@example.com", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert!(!body["id"].as_str().unwrap().is_empty());

    let users = store
        .get_documents("user", doc! { "email": "ada@example.com" }, 1)
        .await
        .unwrap();
    assert_eq!(users.len(), 1);

    let hash = users[0].get_str("password_hash").unwrap();
    assert!(hash.starts_with("$argon2"));
    assert_ne!(hash, "hunter2");
}

#[tokio::test]
async fn test_signup_rejects_empty_field() {
    let (store, app) = spawn_app();

    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            &json!({"name": "", "email": "ada@example.com", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let users = store.get_documents("user", doc! {}, 10).await.unwrap();
    assert!(users.is_empty());
}

#[tokio::test]
async fn test_signup_rejects_missing_field() {
    let (_, app) = spawn_app();

    let response = app
        .oneshot(post_json(
            "/api/auth/signup",
            &json!({"name": "Ada", "email": "ada@example.com"}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());
}

#[tokio::test]
async fn test_login_unknown_email_and_wrong_password_look_identical() {
    let (_, app) = spawn_app();

    app.clone()
        .oneshot(post_json(
            "/api/auth/signup",
            &json!({"name": "Ada", "email": "ada@example.com", "password": "hunter2"}),
        ))
        .await
        .unwrap();

    let unknown = app
        .clone()
        .oneshot(post_json(
            "/api/auth/login",
            &json!({"email": "ghost@example.com", "password": "whatever"}),
        ))
        .await
        .unwrap();
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);

    let wrong_password = app
        .oneshot(post_json(
            "/api/auth/login",
            &json!({"email": "ada@example.com", "password": "wrong"}),
        ))
        .await
        .unwrap();
    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);

    let unknown_body = json_body(unknown).await;
    let wrong_body = json_body(wrong_password).await;
    assert_eq!(unknown_body, wrong_body);
}

#[tokio::test]
async fn test_login_with_correct_credentials() {
    let (_, app) = spawn_app();

    app.clone()
        .oneshot(post_json(
            "/api/auth/signup",
            &json!({"name": "Ada", "email": "ada@example.com", "password": "hunter2"}),
        ))
        .await
        .unwrap();

    let response = app
        .oneshot(post_json(
            "/api/auth/login",
            &json!({"email": "ada@example.com", "password": "hunter2"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert_eq!(body["message"], "Logged in");
}

#[tokio::test]
async fn test_blog_create_then_list() {
    let (_, app) = spawn_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/blog",
            &json!({
                "title": "Hello",
                "slug": "hello",
                "content": "First post",
                "author": "ada",
                "tags": ["intro"]
            }),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let created = json_body(response).await;
    let id = created["id"].as_str().unwrap().to_string();

    let response = app.oneshot(get("/api/blog")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    let posts = body.as_array().expect("listing must be an array");
    assert_eq!(posts.len(), 1);

    // Published defaulted to true and the native key was renamed.
    assert_eq!(posts[0]["id"], id);
    assert!(posts[0].get("_id").is_none());
    assert_eq!(posts[0]["title"], "Hello");
    assert_eq!(posts[0]["published"], true);
}

#[tokio::test]
async fn test_blog_list_respects_limit() {
    let (_, app) = spawn_app();

    for i in 0..3 {
        app.clone()
            .oneshot(post_json(
                "/api/blog",
                &json!({
                    "title": format!("Post {i}"),
                    "slug": format!("post-{i}"),
                    "content": "body",
                    "author": "ada"
                }),
            ))
            .await
            .unwrap();
    }

    let response = app.oneshot(get("/api/blog?limit=2")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn test_blog_list_excludes_unpublished() {
    let (_, app) = spawn_app();

    app.clone()
        .oneshot(post_json(
            "/api/blog",
            &json!({
                "title": "Draft",
                "slug": "draft",
                "content": "wip",
                "author": "ada",
                "published": false
            }),
        ))
        .await
        .unwrap();

    app.clone()
        .oneshot(post_json(
            "/api/blog",
            &json!({
                "title": "Live",
                "slug": "live",
                "content": "done",
                "author": "ada"
            }),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/api/blog")).await.unwrap();
    let body = json_body(response).await;
    let posts = body.as_array().unwrap();

    assert_eq!(posts.len(), 1);
    assert_eq!(posts[0]["title"], "Live");
}

#[tokio::test]
async fn test_blog_list_rejects_bad_limit() {
    let (_, app) = spawn_app();

    let response = app.oneshot(get("/api/blog?limit=0")).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_contact_submit() {
    let (store, app) = spawn_app();

    let response = app
        .oneshot(post_json(
            "/api/contact",
            &json!({"name": "Ada", "email": "ada@example.com", "message": "Hi there"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["ok"], true);
    assert!(!body["id"].as_str().unwrap().is_empty());

    let messages = store
        .get_documents("contactmessage", doc! {}, 10)
        .await
        .unwrap();
    assert_eq!(messages.len(), 1);
}

#[tokio::test]
async fn test_contact_requires_message() {
    let (store, app) = spawn_app();

    let response = app
        .clone()
        .oneshot(post_json(
            "/api/contact",
            &json!({"name": "Ada", "email": "ada@example.com"}),
        ))
        .await
        .unwrap();
    assert!(response.status().is_client_error());

    let response = app
        .oneshot(post_json(
            "/api/contact",
            &json!({"name": "Ada", "email": "ada@example.com", "message": ""}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let messages = store
        .get_documents("contactmessage", doc! {}, 10)
        .await
        .unwrap();
    assert!(messages.is_empty());
}

#[tokio::test]
async fn test_persistence_endpoints_fail_without_store() {
    let app = spawn_app_without_store();

    let response = app
        .oneshot(post_json(
            "/api/contact",
            &json!({"name": "Ada", "email": "ada@example.com", "message": "Hi"}),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let body = json_body(response).await;
    assert_eq!(body["ok"], false);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn test_diagnostic_without_store() {
    let app = spawn_app_without_store();

    let response = app.oneshot(get("/test")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["backend"], "✅ Running");
    assert_eq!(body["database"], "❌ Not Available");
    assert_eq!(body["connection_status"], "Not Connected");
    assert_eq!(body["collections"].as_array().unwrap().len(), 0);
}

#[tokio::test]
async fn test_diagnostic_with_store() {
    let (_, app) = spawn_app();

    app.clone()
        .oneshot(post_json(
            "/api/auth/signup",
            &json!({"name": "Ada", "email": "ada@example.com", "password": "hunter2"}),
        ))
        .await
        .unwrap();

    let response = app.oneshot(get("/test")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = json_body(response).await;
    assert_eq!(body["database"], "✅ Connected & Working");
    assert_eq!(body["connection_status"], "Connected");

    let collections: Vec<&str> = body["collections"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c.as_str().unwrap())
        .collect();
    assert!(collections.contains(&"user"));
}
